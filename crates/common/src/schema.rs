//! Schema shapes consumed by the walker and the declaration emitter

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type of a scalar schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    String,
    Number,
    Integer,
    Boolean,
    /// Schema without a usable type
    Any,
    /// Any other declared type name, kept verbatim
    Other(String),
}

impl Primitive {
    /// Map an OpenAPI `type` keyword to a primitive
    pub fn from_type_name(type_name: Option<&str>) -> Self {
        match type_name {
            Some("string") => Primitive::String,
            Some("number") => Primitive::Number,
            Some("integer") => Primitive::Integer,
            Some("boolean") => Primitive::Boolean,
            None => Primitive::Any,
            Some(other) => Primitive::Other(other.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Primitive::Number | Primitive::Integer)
    }

    /// Native TypeScript spelling of the primitive
    pub fn ts_name(&self) -> &str {
        match self {
            Primitive::String => "string",
            Primitive::Number | Primitive::Integer => "number",
            Primitive::Boolean => "boolean",
            Primitive::Any => "any",
            Primitive::Other(name) => name,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::String => write!(f, "string"),
            Primitive::Number => write!(f, "number"),
            Primitive::Integer => write!(f, "integer"),
            Primitive::Boolean => write!(f, "boolean"),
            Primitive::Any => write!(f, "any"),
            Primitive::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A fully resolved schema tree, walked into registry records.
///
/// The local name of a node is the property key it sits under and its parent
/// is the record being walked when it is reached; both are supplied by the
/// walk rather than stored here.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// Object with its properties in declaration order
    Object { properties: Vec<(String, SchemaNode)> },

    /// Array with its item shape, if one was declared
    Array { items: Option<Box<SchemaNode>> },

    Scalar(Primitive),
}

impl SchemaNode {
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        SchemaNode::Object {
            properties: properties
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        }
    }

    pub fn array(items: SchemaNode) -> Self {
        SchemaNode::Array {
            items: Some(Box::new(items)),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, SchemaNode::Scalar(Primitive::Boolean))
    }
}

/// Declaration-side type expression. Component references stay symbolic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    Primitive(Primitive),

    /// Reference to a named component schema
    Named(String),

    Array(Box<TypeExpr>),

    Object(Vec<PropertyExpr>),

    /// Object used as a string-keyed dictionary
    Map(Box<TypeExpr>),
}

/// One property of an object type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyExpr {
    pub name: String,
    pub required: bool,
    pub ty: TypeExpr,
}
