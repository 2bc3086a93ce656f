//! Conversion of OpenAPI schemas into walkable trees and type expressions

use crate::openapi::{AdditionalProperties, OpenApiSpec, Schema};
use restgen_common::{GeneratorError, Primitive, PropertyExpr, Result, SchemaNode, TypeExpr};

/// Resolves schemas against one document's components
pub struct SchemaTreeBuilder<'a> {
    spec: &'a OpenApiSpec,
}

impl<'a> SchemaTreeBuilder<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self { spec }
    }

    /// Build a fully resolved `SchemaNode` tree; every `$ref` is inlined.
    pub fn to_node(&self, schema: &Schema) -> Result<SchemaNode> {
        self.node(schema, &mut Vec::new())
    }

    fn node(&self, schema: &Schema, refs: &mut Vec<String>) -> Result<SchemaNode> {
        if let Some(ref_path) = &schema.ref_path {
            let name = OpenApiSpec::schema_ref_name(ref_path)
                .unwrap_or(ref_path)
                .to_string();

            if refs.contains(&name) {
                refs.push(name.clone());
                return Err(GeneratorError::schema_walk(
                    name,
                    format!("cyclic schema reference ({})", refs.join(" -> ")),
                ));
            }

            let target = self.resolve(ref_path)?;
            refs.push(name);
            let node = self.node(target, refs);
            refs.pop();
            return node;
        }

        match schema.type_name() {
            Some("object") => {
                let properties = schema
                    .properties
                    .iter()
                    .map(|(name, property)| Ok((name.clone(), self.node(property, refs)?)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(SchemaNode::Object { properties })
            }
            Some("array") => {
                let items = match &schema.items {
                    Some(items) => Some(Box::new(self.node(items, refs)?)),
                    None => None,
                };
                Ok(SchemaNode::Array { items })
            }
            other => Ok(SchemaNode::Scalar(Primitive::from_type_name(other))),
        }
    }

    /// Build a declaration-side type expression; component references stay named.
    pub fn to_type_expr(&self, schema: &Schema) -> Result<TypeExpr> {
        if let Some(ref_path) = &schema.ref_path {
            self.resolve(ref_path)?;
            let name = OpenApiSpec::schema_ref_name(ref_path).unwrap_or(ref_path);
            return Ok(TypeExpr::Named(name.to_string()));
        }

        match schema.type_name() {
            Some("object") if !schema.properties.is_empty() => {
                let properties = schema
                    .properties
                    .iter()
                    .map(|(name, property)| {
                        Ok(PropertyExpr {
                            name: name.clone(),
                            required: schema.required.contains(name),
                            ty: self.to_type_expr(property)?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(TypeExpr::Object(properties))
            }
            Some("object") => {
                let value = match &schema.additional_properties {
                    Some(AdditionalProperties::Schema(value)) => self.to_type_expr(value)?,
                    _ => TypeExpr::Primitive(Primitive::Any),
                };
                Ok(TypeExpr::Map(Box::new(value)))
            }
            Some("array") => {
                let items = match &schema.items {
                    Some(items) => self.to_type_expr(items)?,
                    None => TypeExpr::Primitive(Primitive::Any),
                };
                Ok(TypeExpr::Array(Box::new(items)))
            }
            other => Ok(TypeExpr::Primitive(Primitive::from_type_name(other))),
        }
    }

    fn resolve(&self, ref_path: &str) -> Result<&'a Schema> {
        self.spec.resolve_schema_ref(ref_path).ok_or_else(|| {
            GeneratorError::DocumentLoad(format!("Unresolved schema reference: {}", ref_path))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(components: &str) -> OpenApiSpec {
        serde_json::from_str(&format!(
            r#"{{
                "openapi": "3.0.0",
                "info": {{ "title": "t", "version": "1" }},
                "components": {{ "schemas": {} }}
            }}"#,
            components
        ))
        .unwrap()
    }

    fn schema(json: &str) -> Schema {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_node_inlines_references() {
        let spec = spec(r#"{ "Tag": { "type": "object", "properties": { "label": { "type": "string" } } } }"#);
        let builder = SchemaTreeBuilder::new(&spec);

        let node = builder
            .to_node(&schema(
                r##"{ "type": "array", "items": { "$ref": "#/components/schemas/Tag" } }"##,
            ))
            .unwrap();

        assert_eq!(
            node,
            SchemaNode::array(SchemaNode::object([(
                "label",
                SchemaNode::Scalar(Primitive::String)
            )]))
        );
    }

    #[test]
    fn test_node_rejects_cycles() {
        let spec = spec(
            r##"{ "Node": { "type": "object", "properties": { "next": { "$ref": "#/components/schemas/Node" } } } }"##,
        );
        let builder = SchemaTreeBuilder::new(&spec);

        let err = builder
            .to_node(&schema(r##"{ "$ref": "#/components/schemas/Node" }"##))
            .unwrap_err();
        match err {
            GeneratorError::SchemaWalk { path, reason } => {
                assert_eq!(path, "Node");
                assert!(reason.contains("Node -> Node"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_reference() {
        let spec = spec("{}");
        let builder = SchemaTreeBuilder::new(&spec);
        let err = builder
            .to_type_expr(&schema(r##"{ "$ref": "#/components/schemas/Missing" }"##))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::DocumentLoad(_)));
    }

    #[test]
    fn test_type_expr_keeps_names_and_required() {
        let spec = spec(r#"{ "Pet": { "type": "string" } }"#);
        let builder = SchemaTreeBuilder::new(&spec);

        let expr = builder
            .to_type_expr(&schema(
                r##"{
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "number" },
                        "pet": { "$ref": "#/components/schemas/Pet" },
                        "labels": { "type": "object", "additionalProperties": { "type": "string" } }
                    }
                }"##,
            ))
            .unwrap();

        assert_eq!(
            expr,
            TypeExpr::Object(vec![
                PropertyExpr {
                    name: "id".into(),
                    required: true,
                    ty: TypeExpr::Primitive(Primitive::Number),
                },
                PropertyExpr {
                    name: "pet".into(),
                    required: false,
                    ty: TypeExpr::Named("Pet".into()),
                },
                PropertyExpr {
                    name: "labels".into(),
                    required: false,
                    ty: TypeExpr::Map(Box::new(TypeExpr::Primitive(Primitive::String))),
                },
            ])
        );
    }
}
