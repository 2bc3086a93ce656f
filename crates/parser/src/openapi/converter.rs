//! Converts an OpenAPI document to the ApiDefinition IR

use super::types::OpenApiSpec;
use crate::operation_extractor::OperationExtractor;
use crate::schema_tree::SchemaTreeBuilder;
use crate::schema_walker::SchemaWalker;
use restgen_common::{
    ApiDefinition, GenerationOptions, NamedType, NamingContext, Result, TypeRegistryBuilder,
};

/// Status whose response schema is walked into persisted entities
const ENTITY_STATUS: &str = "200";

/// Convert an OpenAPI document to an ApiDefinition
pub fn convert_openapi_to_api_definition(
    spec: &OpenApiSpec,
    options: &GenerationOptions,
) -> Result<ApiDefinition> {
    let naming = NamingContext::new(options.root_namespace.clone());
    let tree = SchemaTreeBuilder::new(spec);

    let schemas = spec
        .component_schemas()
        .map(|(name, schema)| {
            Ok(NamedType {
                name: name.clone(),
                ty: tree.to_type_expr(schema)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let extracted = OperationExtractor::new(spec, &naming, options.on_collision).extract_all()?;

    // Entity records for every operation answering 200 with a schema
    let walker = SchemaWalker::new().with_pagination_unwrap(options.pagination_unwrap);
    let mut registry = TypeRegistryBuilder::new(options.on_collision);
    for op in &extracted {
        let Some(success) = &op.descriptor.success else {
            continue;
        };
        let Some(schema) = &op.success_schema else {
            continue;
        };
        if success.status != ENTITY_STATUS {
            continue;
        }

        let node = tree.to_node(schema)?;
        let entity = naming.entity_name(&op.descriptor.function_name);
        walker.walk(&node, &entity, &op.descriptor.origin(), &mut registry)?;
    }

    Ok(ApiDefinition {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        server_url: spec.servers.first().map(|server| server.url.clone()),
        naming,
        schemas,
        operations: extracted.into_iter().map(|op| op.descriptor).collect(),
        registry: registry.build(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use restgen_common::{CollisionPolicy, FieldType, GeneratorError, Primitive, TypeExpr};

    fn spec(json: &str) -> OpenApiSpec {
        serde_json::from_str(json).unwrap()
    }

    const ITEMS: &str = r##"{
        "openapi": "3.0.0",
        "info": { "title": "Items", "version": "1.2.0" },
        "servers": [{ "url": "https://api.example.com" }],
        "paths": {
            "/items/{id}": {
                "get": {
                    "operationId": "getItem",
                    "parameters": [{ "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }],
                    "responses": {
                        "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Item" } } } }
                    }
                },
                "delete": {
                    "operationId": "deleteItem",
                    "responses": { "204": { "description": "gone" } }
                }
            }
        },
        "components": {
            "schemas": {
                "Item": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "number" },
                        "tags": { "type": "array", "items": { "type": "object", "properties": { "label": { "type": "string" } } } }
                    }
                }
            }
        }
    }"##;

    #[test]
    fn test_convert_items_document() {
        let api = convert_openapi_to_api_definition(&spec(ITEMS), &GenerationOptions::default())
            .unwrap();

        assert_eq!(api.title, "Items");
        assert_eq!(api.server_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(api.schemas[0].name, "Item");
        assert!(matches!(api.schemas[0].ty, TypeExpr::Object(_)));
        assert_eq!(api.operations.len(), 2);
        assert_eq!(api.get_operations().count(), 1);

        let names: Vec<_> = api.registry.names().collect();
        assert_eq!(names, vec!["Item", "ItemTagsItem"]);
        assert_eq!(api.registry.roots(), &["Item".to_string()]);

        let item = api.registry.get("Item").unwrap();
        assert_eq!(
            item.field("id").unwrap().field_type,
            FieldType::Scalar(Primitive::Number)
        );
        assert_eq!(item.field("tags").unwrap().field_type.to_string(), "ItemTagsItem[]");
    }

    #[test]
    fn test_non_200_success_is_not_walked() {
        let api = convert_openapi_to_api_definition(
            &spec(
                r#"{
                    "openapi": "3.0.0",
                    "info": { "title": "t", "version": "1" },
                    "paths": {
                        "/items": {
                            "post": {
                                "operationId": "createItem",
                                "responses": { "201": { "content": { "application/json": {
                                    "schema": { "type": "object", "properties": { "id": { "type": "integer" } } }
                                } } } }
                            }
                        }
                    }
                }"#,
            ),
            &GenerationOptions::default(),
        )
        .unwrap();

        assert!(api.registry.is_empty());
        assert_eq!(api.operations[0].success.as_ref().unwrap().status, "201");
    }

    #[test]
    fn test_entity_collision_across_operations() {
        let json = r#"{
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/items/{id}": {
                    "get": {
                        "operationId": "getItem",
                        "responses": { "200": { "content": { "application/json": {
                            "schema": { "type": "object", "properties": { "id": { "type": "integer" } } }
                        } } } }
                    }
                },
                "/item": {
                    "post": {
                        "operationId": "item",
                        "responses": { "200": { "content": { "application/json": {
                            "schema": { "type": "object", "properties": { "name": { "type": "string" } } }
                        } } } }
                    }
                }
            }
        }"#;

        let err = convert_openapi_to_api_definition(&spec(json), &GenerationOptions::default())
            .unwrap_err();
        assert!(matches!(err, GeneratorError::NamingCollision { .. }));

        let options = GenerationOptions {
            on_collision: CollisionPolicy::Disambiguate,
            ..GenerationOptions::default()
        };
        let api = convert_openapi_to_api_definition(&spec(json), &options).unwrap();
        let names: Vec<_> = api.registry.names().collect();
        assert_eq!(names, vec!["Item", "Item2"]);
    }
}
