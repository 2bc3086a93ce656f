//! OpenAPI parsing for restgen
//!
//! This crate turns an OpenAPI 3.x document into the frozen `ApiDefinition`
//! the generator renders from.
//!
//! ## Parsing Strategy
//!
//! - Component schemas become named type declarations
//! - Every (path, method) pair becomes an `OperationDescriptor`, with
//!   parameters classified by location and the success response resolved
//! - Success responses with status 200 are flattened into named records of
//!   the `TypeRegistry`, one per nested object

pub mod openapi;
pub mod operation_extractor;
pub mod parameter_classifier;
mod response_resolver;
mod schema_tree;
mod schema_walker;

pub use openapi::OpenApiParser;
pub use operation_extractor::{ExtractedOperation, OperationExtractor};
pub use parameter_classifier::{ParameterClassification, ParameterClassifier};
pub use response_resolver::ResponseResolver;
pub use schema_tree::SchemaTreeBuilder;
pub use schema_walker::SchemaWalker;

use restgen_common::{ApiDefinition, GenerationOptions, Result};
use std::path::Path;

/// Load an OpenAPI document and convert it with the given options
///
/// # Arguments
/// * `path` - JSON or YAML document
/// * `options` - Naming and heuristics for this run
pub fn parse_openapi_file<P: AsRef<Path>>(
    path: P,
    options: &GenerationOptions,
) -> Result<ApiDefinition> {
    OpenApiParser::from_file(path)?
        .with_options(options.clone())
        .parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_openapi_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{ "openapi": "3.0.0", "info": {{ "title": "Empty", "version": "0" }}, "paths": {{}} }}"#
        )
        .unwrap();

        let api = parse_openapi_file(file.path(), &GenerationOptions::default()).unwrap();
        assert_eq!(api.title, "Empty");
        assert!(api.operations.is_empty());
        assert!(api.registry.is_empty());
    }
}
