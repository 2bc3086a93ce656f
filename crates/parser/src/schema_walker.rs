//! Flattening of nested schema trees into named record types
//!
//! A nested node's qualified name is `capitalize(parent) + capitalize(field)`;
//! the walk root is named after the prefix it is walked under. Objects become
//! records, arrays walk their item shape under `<name>Item`, scalars stay
//! inline as field types.

use restgen_common::{
    capitalize, CollisionPolicy, FieldDef, FieldType, GeneratorError, Result, SchemaNode,
    TypeRegistry, TypeRegistryBuilder,
};

const HAS_NEXT: &str = "hasNext";
const HAS_PREV: &str = "hasPrev";

/// Walks `SchemaNode` trees into a `TypeRegistryBuilder`
#[derive(Debug, Clone)]
pub struct SchemaWalker {
    pagination_unwrap: bool,
}

impl Default for SchemaWalker {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaWalker {
    pub fn new() -> Self {
        Self {
            pagination_unwrap: true,
        }
    }

    /// Enable or disable the cursor-envelope heuristic
    pub fn with_pagination_unwrap(mut self, enabled: bool) -> Self {
        self.pagination_unwrap = enabled;
        self
    }

    /// Walk `root` under `prefix`, recording every object it contains.
    ///
    /// Returns the field type of the root itself. When the root (or the item
    /// of a root array) is an object, its record is marked as a root entity.
    pub fn walk(
        &self,
        root: &SchemaNode,
        prefix: &str,
        origin: &str,
        builder: &mut TypeRegistryBuilder,
    ) -> Result<FieldType> {
        let root_type = self.walk_node(root, prefix.to_string(), true, origin, builder)?;

        let mut record = &root_type;
        while let FieldType::List(inner) = record {
            record = &**inner;
        }
        if let FieldType::Record(name) = record {
            builder.mark_root(name);
        }

        Ok(root_type)
    }

    /// Walk a single tree into a fresh registry
    pub fn walk_to_registry(
        &self,
        root: &SchemaNode,
        prefix: &str,
        policy: CollisionPolicy,
    ) -> Result<TypeRegistry> {
        let mut builder = TypeRegistryBuilder::new(policy);
        self.walk(root, prefix, prefix, &mut builder)?;
        Ok(builder.build())
    }

    fn walk_node(
        &self,
        node: &SchemaNode,
        qualified_name: String,
        is_root: bool,
        origin: &str,
        builder: &mut TypeRegistryBuilder,
    ) -> Result<FieldType> {
        match self.unwrap_envelope(node) {
            SchemaNode::Object { properties } => {
                if properties.is_empty() {
                    return Err(GeneratorError::schema_walk(
                        qualified_name,
                        "object declares no properties",
                    ));
                }

                let name = builder.declare(&qualified_name, origin)?;
                for (field, child) in properties {
                    let child_name = format!("{}{}", capitalize(&name), capitalize(field));
                    let field_type = self.walk_node(child, child_name, false, origin, builder)?;
                    builder.push_field(&name, FieldDef::new(field.clone(), field_type))?;
                }

                Ok(FieldType::Record(name))
            }
            SchemaNode::Array { items } => {
                let items = items.as_deref().ok_or_else(|| {
                    GeneratorError::schema_walk(&qualified_name, "array declares no item schema")
                })?;

                let item_name = if is_root {
                    qualified_name
                } else {
                    format!("{}Item", qualified_name)
                };
                let item_type = self.walk_node(items, item_name, false, origin, builder)?;

                Ok(FieldType::List(Box::new(item_type)))
            }
            SchemaNode::Scalar(primitive) => Ok(FieldType::Scalar(primitive.clone())),
        }
    }

    /// `{hasNext: boolean, hasPrev: boolean, <payload>}` walks as `<payload>`
    fn unwrap_envelope<'n>(&self, mut node: &'n SchemaNode) -> &'n SchemaNode {
        if !self.pagination_unwrap {
            return node;
        }

        while let Some(payload) = envelope_payload(node) {
            node = payload;
        }
        node
    }
}

fn envelope_payload(node: &SchemaNode) -> Option<&SchemaNode> {
    let SchemaNode::Object { properties } = node else {
        return None;
    };
    if properties.len() != 3 {
        return None;
    }

    let is_cursor = |name: &str| {
        properties
            .iter()
            .any(|(field, child)| field == name && child.is_boolean())
    };
    if !is_cursor(HAS_NEXT) || !is_cursor(HAS_PREV) {
        return None;
    }

    properties
        .iter()
        .find(|(field, _)| field != HAS_NEXT && field != HAS_PREV)
        .map(|(_, payload)| payload)
}
