//! Storage-layer type coercion for persisted entities
//!
//! Only the entity schema artifact coerces; type declarations keep the
//! native numeric and boolean types.

use restgen_common::{FieldDef, FieldType, Primitive};
use std::fmt;

/// Field type as the document-mapping runtime stores it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    Int,
    Double,
    Bool,

    /// Anything that passes through unchanged (`string`, record names, ...)
    Native(String),

    List(Box<StorageType>),
}

impl StorageType {
    /// TypeScript type of the class field carrying this value
    pub fn ts_type(&self) -> String {
        match self {
            StorageType::Int | StorageType::Double => "number".to_string(),
            StorageType::Bool => "boolean".to_string(),
            StorageType::Native(name) => name.clone(),
            StorageType::List(inner) => format!("List<{}>", inner.ts_type()),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, StorageType::List(_))
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Int => write!(f, "int"),
            StorageType::Double => write!(f, "double"),
            StorageType::Bool => write!(f, "bool"),
            StorageType::Native(name) => write!(f, "{}", name),
            StorageType::List(inner) => write!(f, "{}[]", inner),
        }
    }
}

/// Maps registry field types to storage types
pub struct TypeCoercer;

impl TypeCoercer {
    /// Coerce one record field
    ///
    /// # Examples
    /// ```
    /// use restgen_common::{FieldDef, FieldType, Primitive};
    /// use restgen_generator::TypeCoercer;
    ///
    /// let id = FieldDef::new("id", FieldType::Scalar(Primitive::Number));
    /// assert_eq!(TypeCoercer::coerce(&id).to_string(), "int");
    ///
    /// let price = FieldDef::new("price", FieldType::Scalar(Primitive::Integer));
    /// assert_eq!(TypeCoercer::coerce(&price).to_string(), "double");
    /// ```
    pub fn coerce(field: &FieldDef) -> StorageType {
        match &field.field_type {
            FieldType::Scalar(primitive) if primitive.is_numeric() && field.name == "id" => {
                StorageType::Int
            }
            other => Self::coerce_type(other),
        }
    }

    fn coerce_type(field_type: &FieldType) -> StorageType {
        match field_type {
            FieldType::Scalar(primitive) if primitive.is_numeric() => StorageType::Double,
            FieldType::Scalar(Primitive::Boolean) => StorageType::Bool,
            FieldType::Scalar(primitive) => StorageType::Native(primitive.to_string()),
            FieldType::Record(name) => StorageType::Native(name.clone()),
            // list elements follow the scalar rules; only a field itself is an id
            FieldType::List(inner) => StorageType::List(Box::new(Self::coerce_type(inner))),
        }
    }
}
