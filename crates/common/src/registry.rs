//! Flattened record types produced by the schema walk

use crate::{CollisionKind, CollisionPolicy, GeneratorError, NameAllocator, Primitive, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Scalar(Primitive),

    /// Another record in the registry
    Record(String),

    List(Box<FieldType>),
}

impl FieldType {
    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::List(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(primitive) => write!(f, "{}", primitive),
            FieldType::Record(name) => write!(f, "{}", name),
            FieldType::List(inner) => write!(f, "{}[]", inner),
        }
    }
}

/// A (fieldName, fieldType) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// One named record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,

    /// Where the record came from, for diagnostics
    pub origin: String,

    pub fields: Vec<FieldDef>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Qualified type name → record, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRegistry {
    records: IndexMap<String, Record>,
    roots: Vec<String>,
}

impl TypeRegistry {
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Names of the records each walk started from
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record has a list-typed field
    pub fn has_lists(&self) -> bool {
        self.records()
            .flat_map(|record| &record.fields)
            .any(|field| field.field_type.is_list())
    }
}

/// Owned accumulator for a `TypeRegistry`; every declaration goes through
/// the collision check.
#[derive(Debug, Clone)]
pub struct TypeRegistryBuilder {
    names: NameAllocator,
    records: IndexMap<String, Record>,
    roots: Vec<String>,
}

impl TypeRegistryBuilder {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            names: NameAllocator::new(CollisionKind::Record, policy),
            records: IndexMap::new(),
            roots: Vec::new(),
        }
    }

    /// Create an empty record, returning the name it was registered under
    pub fn declare(&mut self, qualified_name: &str, origin: &str) -> Result<String> {
        let name = self.names.allocate(qualified_name, origin)?;
        self.records.insert(
            name.clone(),
            Record {
                name: name.clone(),
                origin: origin.to_string(),
                fields: Vec::new(),
            },
        );
        Ok(name)
    }

    /// Append a field to an already declared record
    pub fn push_field(&mut self, owner: &str, field: FieldDef) -> Result<()> {
        let record = self.records.get_mut(owner).ok_or_else(|| {
            GeneratorError::schema_walk(owner, "field added to an undeclared record")
        })?;
        record.fields.push(field);
        Ok(())
    }

    pub fn mark_root(&mut self, name: &str) {
        if !self.roots.iter().any(|root| root == name) {
            self.roots.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            records: self.records,
            roots: self.roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_type_display() {
        assert_eq!(FieldType::Scalar(Primitive::Number).to_string(), "number");
        assert_eq!(FieldType::Record("ItemOwner".into()).to_string(), "ItemOwner");
        assert_eq!(
            FieldType::List(Box::new(FieldType::Record("ItemTagsItem".into()))).to_string(),
            "ItemTagsItem[]"
        );
        assert_eq!(
            FieldType::List(Box::new(FieldType::Scalar(Primitive::String))).to_string(),
            "string[]"
        );
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let mut builder = TypeRegistryBuilder::new(CollisionPolicy::Error);
        builder.declare("Item", "GET /items").unwrap();
        builder.declare("ItemOwner", "GET /items").unwrap();
        builder
            .push_field("Item", FieldDef::new("owner", FieldType::Record("ItemOwner".into())))
            .unwrap();
        builder.mark_root("Item");
        builder.mark_root("Item");

        let registry = builder.build();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Item", "ItemOwner"]);
        assert_eq!(registry.roots(), &["Item".to_string()]);
        assert_eq!(registry.get("Item").unwrap().fields.len(), 1);
        assert!(!registry.has_lists());
    }

    #[test]
    fn test_builder_detects_duplicate_record() {
        let mut builder = TypeRegistryBuilder::new(CollisionPolicy::Error);
        builder.declare("ItemAB", "first").unwrap();
        let err = builder.declare("ItemAB", "second").unwrap_err();
        assert!(matches!(err, GeneratorError::NamingCollision { .. }));
    }

    #[test]
    fn test_push_field_to_unknown_record() {
        let mut builder = TypeRegistryBuilder::new(CollisionPolicy::Error);
        let err = builder
            .push_field("Missing", FieldDef::new("x", FieldType::Scalar(Primitive::String)))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::SchemaWalk { .. }));
    }
}
