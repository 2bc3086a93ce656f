//! OpenAPI 3.x document support
//!
//! Loads OpenAPI documents (JSON or YAML) and converts them into the
//! `ApiDefinition` IR consumed by the artifact generator.
//!
//! ## Usage
//! ```rust,ignore
//! use restgen_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("openapi.yaml")?;
//! let api = parser.parse()?;
//! ```

mod converter;
mod parser;
mod types;

pub use parser::OpenApiParser;
pub use types::*;
