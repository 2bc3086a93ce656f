//! Common types and utilities for restgen
//!
//! This crate contains the intermediate representation shared by the parser,
//! generator, and CLI components: the error taxonomy, the schema and type
//! registry model, operation descriptors, and naming helpers.

mod naming;
mod operation;
mod options;
mod registry;
mod schema;

pub use naming::{camelize, capitalize, strip_get_prefix, CollisionKind, NameAllocator, NamingContext};
pub use operation::{
    ApiDefinition, ArgKind, HttpMethod, InputArg, NamedType, OperationDescriptor,
    ParameterLocation, ParameterPresence, ParameterSpec, PathPlaceholder, ResponseSpec,
    SuccessResponse,
};
pub use options::{CollisionPolicy, GenerationOptions};
pub use registry::{FieldDef, FieldType, Record, TypeRegistry, TypeRegistryBuilder};
pub use schema::{Primitive, PropertyExpr, SchemaNode, TypeExpr};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during artifact generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Document load error: {0}")]
    DocumentLoad(String),

    #[error("Schema walk error at {path}: {reason}")]
    SchemaWalk { path: String, reason: String },

    #[error("Naming collision: {kind} '{name}' is produced more than once (second source: {origin})")]
    NamingCollision {
        kind: CollisionKind,
        name: String,
        origin: String,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// Shorthand for a schema walk failure at a qualified type name
    pub fn schema_walk(path: impl Into<String>, reason: impl Into<String>) -> Self {
        GeneratorError::SchemaWalk {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
