//! Integration tests for the OpenAPI parser

use restgen_common::{
    ArgKind, CollisionPolicy, FieldType, GenerationOptions, GeneratorError, HttpMethod, Primitive,
    TypeExpr,
};
use restgen_parser::{parse_openapi_file, OpenApiParser};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_parse_items_document() {
    let api = parse_openapi_file(fixture("items.json"), &GenerationOptions::default()).unwrap();

    assert_eq!(api.title, "Items");
    assert_eq!(api.version, "1.0.0");
    assert_eq!(api.server_url.as_deref(), Some("https://items.example.com/v1"));

    let functions: Vec<_> = api
        .operations
        .iter()
        .map(|op| op.function_name.as_str())
        .collect();
    assert_eq!(
        functions,
        vec!["listItems", "createItem", "getItem", "deleteItem"]
    );

    let schema_names: Vec<_> = api.schemas.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(schema_names, vec!["Summary", "NewItem"]);
}

#[test]
fn test_get_item_descriptor() {
    let api = parse_openapi_file(fixture("items.json"), &GenerationOptions::default()).unwrap();
    let op = api
        .operations
        .iter()
        .find(|op| op.function_name == "getItem")
        .unwrap();

    assert_eq!(op.method, HttpMethod::Get);
    assert_eq!(op.url_template, "/items/{id}");
    assert!(op.presence.path);
    assert!(!op.presence.has_options());
    assert_eq!(op.path_placeholders[0].ident, "id");
    assert_eq!(op.input_args.len(), 1);
    assert_eq!(op.input_args[0].type_ref, "$api.getItem.$pathParameters");
    assert_eq!(
        op.success.as_ref().unwrap().type_ref,
        "$api.getItem.responses.$200"
    );
}

#[test]
fn test_create_and_delete_descriptors() {
    let api = parse_openapi_file(fixture("items.json"), &GenerationOptions::default()).unwrap();

    let create = &api.operations[1];
    assert_eq!(create.request_body, Some(TypeExpr::Named("NewItem".into())));
    assert_eq!(create.input_args[0].kind, ArgKind::Body);
    assert_eq!(create.success.as_ref().unwrap().status, "201");
    assert_eq!(create.responses.len(), 2);

    let delete = &api.operations[3];
    assert!(delete.success.is_none());
    assert_eq!(delete.path_params[0].name, "id");
}

#[test]
fn test_registry_from_200_responses() {
    let api = parse_openapi_file(fixture("items.json"), &GenerationOptions::default()).unwrap();

    let names: Vec<_> = api.registry.names().collect();
    assert_eq!(names, vec!["ListItems", "Item", "ItemTagsItem"]);
    assert_eq!(
        api.registry.roots(),
        &["ListItems".to_string(), "Item".to_string()]
    );

    // the cursor envelope is transparent
    let list = api.registry.get("ListItems").unwrap();
    assert!(list.field("hasNext").is_none());
    assert_eq!(
        list.field("archived").unwrap().field_type,
        FieldType::Scalar(Primitive::Boolean)
    );

    let item = api.registry.get("Item").unwrap();
    assert_eq!(item.origin, "GET /items/{id}");
    assert_eq!(
        item.field("tags").unwrap().field_type,
        FieldType::List(Box::new(FieldType::Record("ItemTagsItem".into())))
    );
}

#[test]
fn test_pagination_unwrap_can_be_disabled() {
    let options = GenerationOptions {
        pagination_unwrap: false,
        ..GenerationOptions::default()
    };
    let api = parse_openapi_file(fixture("items.json"), &options).unwrap();

    let list = api.registry.get("ListItems").unwrap();
    assert!(list.field("hasNext").is_some());
    assert_eq!(list.field("data").unwrap().field_type.to_string(), "ListItemsDataItem[]");
}

#[test]
fn test_parse_yaml_document() {
    let api = parse_openapi_file(fixture("pets.yaml"), &GenerationOptions::default()).unwrap();
    let op = &api.operations[0];

    assert_eq!(op.function_name, "getVisits");
    assert_eq!(op.path_params[0].name, "pet_id");
    assert!(op.path_params[0].required);
    assert_eq!(op.path_placeholders[0].ident, "petId");
    assert_eq!(op.query_params[0].name, "limit");
    assert_eq!(op.success.as_ref().unwrap().status, "200");

    let names: Vec<_> = api.registry.names().collect();
    assert_eq!(names, vec!["Visits", "VisitsVet"]);
}

#[test]
fn test_parse_is_deterministic() {
    let first = parse_openapi_file(fixture("items.json"), &GenerationOptions::default()).unwrap();
    let second = parse_openapi_file(fixture("items.json"), &GenerationOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_namespace() {
    let options = GenerationOptions {
        root_namespace: "$items".into(),
        ..GenerationOptions::default()
    };
    let api = OpenApiParser::from_file(fixture("items.json"))
        .unwrap()
        .with_options(options)
        .parse()
        .unwrap();

    assert_eq!(api.naming.root_namespace(), "$items");
    assert_eq!(
        api.operations[0].input_args[0].type_ref,
        "$items.listItems.$queryParameters"
    );
}

#[test]
fn test_schema_walk_error_names_path() {
    let json = r#"{
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/items/{id}": {
                "get": {
                    "operationId": "getItem",
                    "responses": { "200": { "content": { "application/json": { "schema": {
                        "type": "object",
                        "properties": { "tags": { "type": "array" } }
                    } } } } }
                }
            }
        }
    }"#;

    let err = OpenApiParser::from_json(json).unwrap().parse().unwrap_err();
    match err {
        GeneratorError::SchemaWalk { path, .. } => assert_eq!(path, "ItemTags"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_record_collision_policies() {
    // `Item.abc` and `ItemA.bc` both qualify as `ItemABc`
    let json = r#"{
        "openapi": "3.0.0",
        "info": { "title": "t", "version": "1" },
        "paths": {
            "/items/{id}": {
                "get": {
                    "operationId": "getItem",
                    "responses": { "200": { "content": { "application/json": { "schema": {
                        "type": "object",
                        "properties": {
                            "a": { "type": "object", "properties": { "bc": { "type": "object", "properties": { "x": { "type": "string" } } } } },
                            "aBc": { "type": "object", "properties": { "y": { "type": "string" } } }
                        }
                    } } } } }
                }
            }
        }
    }"#;

    let err = OpenApiParser::from_json(json).unwrap().parse().unwrap_err();
    assert!(matches!(err, GeneratorError::NamingCollision { .. }));

    let api = OpenApiParser::from_json(json)
        .unwrap()
        .with_options(GenerationOptions {
            on_collision: CollisionPolicy::Disambiguate,
            ..GenerationOptions::default()
        })
        .parse()
        .unwrap();
    let names: Vec<_> = api.registry.names().collect();
    assert_eq!(names, vec!["Item", "ItemA", "ItemABc", "ItemABc2"]);
}
