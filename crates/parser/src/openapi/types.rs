//! OpenAPI 3.x type definitions
//!
//! Simplified representation focusing on what the generator consumes. Every
//! map is an `IndexMap` so document key order survives parsing.

use indexmap::IndexMap;
use restgen_common::{GeneratorError, HttpMethod, Result};
use serde::{Deserialize, Serialize};

/// OpenAPI document root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApiSpec {
    /// OpenAPI version (e.g., "3.0.0")
    pub openapi: String,

    /// API metadata
    pub info: Info,

    /// API paths (endpoints)
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable components
    #[serde(default)]
    pub components: Option<Components>,

    /// Servers
    #[serde(default)]
    pub servers: Vec<Server>,
}

/// API information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,

    /// API version
    pub version: String,

    /// API description
    #[serde(default)]
    pub description: Option<String>,
}

/// Server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    /// Server URL
    pub url: String,

    /// Server description
    #[serde(default)]
    pub description: Option<String>,
}

/// Path item: shared parameters plus one entry per HTTP method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Parameters shared by every operation of the path
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// Remaining entries in document order (methods, extensions, servers)
    #[serde(flatten)]
    pub entries: IndexMap<String, serde_json::Value>,
}

impl PathItem {
    /// Operations of this path in document order
    pub fn operations(&self) -> Result<Vec<(HttpMethod, Operation)>> {
        let mut operations = Vec::new();

        for (key, value) in &self.entries {
            let Some(method) = parse_method(key) else {
                continue;
            };
            let operation: Operation = serde_json::from_value(value.clone()).map_err(|e| {
                GeneratorError::DocumentLoad(format!("Invalid {} operation: {}", method, e))
            })?;
            operations.push((method, operation));
        }

        Ok(operations)
    }
}

fn parse_method(key: &str) -> Option<HttpMethod> {
    match key {
        "get" => Some(HttpMethod::Get),
        "put" => Some(HttpMethod::Put),
        "post" => Some(HttpMethod::Post),
        "delete" => Some(HttpMethod::Delete),
        "options" => Some(HttpMethod::Options),
        "head" => Some(HttpMethod::Head),
        "patch" => Some(HttpMethod::Patch),
        "trace" => Some(HttpMethod::Trace),
        _ => None,
    }
}

/// HTTP operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation ID (unique identifier)
    #[serde(rename = "operationId")]
    #[serde(default)]
    pub operation_id: Option<String>,

    /// Summary
    #[serde(default)]
    pub summary: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Parameters
    #[serde(default)]
    pub parameters: Vec<ParameterOrRef>,

    /// Request body
    #[serde(rename = "requestBody")]
    #[serde(default)]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code, in declaration order
    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    /// Tags (for grouping)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Parameter or a reference into `components.parameters`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    Reference {
        #[serde(rename = "$ref")]
        ref_path: String,
    },

    Parameter(Parameter),
}

/// Parameter definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Location: query, header, path, cookie
    #[serde(rename = "in")]
    pub location: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Required flag
    #[serde(default)]
    pub required: bool,

    /// Schema
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Reference into `components.requestBodies`
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    /// Required flag
    #[serde(default)]
    pub required: bool,
}

/// Response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Reference into `components.responses`
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Content types
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema
    #[serde(default)]
    pub schema: Option<Schema>,
}

/// Body schema of a content map, preferring JSON media types
pub fn content_schema(content: &IndexMap<String, MediaType>) -> Option<&Schema> {
    content
        .iter()
        .find(|(media, _)| media.contains("json"))
        .and_then(|(_, media)| media.schema.as_ref())
        .or_else(|| content.values().find_map(|media| media.schema.as_ref()))
}

/// `type` keyword: a single name or, in 3.1 documents, a list of names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

/// `additionalProperties`: a flag or a value schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// Schema definition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Type: string, number, integer, boolean, array, object
    #[serde(rename = "type")]
    #[serde(default)]
    pub schema_type: Option<SchemaType>,

    /// Format (e.g., int32, int64, date-time)
    #[serde(default)]
    pub format: Option<String>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Properties (for object type)
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,

    /// Required properties
    #[serde(default)]
    pub required: Vec<String>,

    /// Items schema (for array type)
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    /// Additional properties
    #[serde(rename = "additionalProperties")]
    #[serde(default)]
    pub additional_properties: Option<AdditionalProperties>,

    /// Reference
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_path: Option<String>,
}

impl Schema {
    /// The declared type, ignoring `null` in a type list. Falls back to
    /// `object`/`array` when only properties or items are present.
    pub fn type_name(&self) -> Option<&str> {
        let declared = match &self.schema_type {
            Some(SchemaType::Single(name)) => Some(name.as_str()),
            Some(SchemaType::Multiple(names)) => names
                .iter()
                .map(String::as_str)
                .find(|name| *name != "null"),
            None => None,
        };

        declared.or_else(|| {
            if !self.properties.is_empty() {
                Some("object")
            } else if self.items.is_some() {
                Some("array")
            } else {
                None
            }
        })
    }
}

/// Reusable components
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Schemas
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,

    /// Parameters
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    /// Request bodies
    #[serde(rename = "requestBodies")]
    #[serde(default)]
    pub request_bodies: IndexMap<String, RequestBody>,

    /// Responses
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

const SCHEMA_PREFIX: &str = "#/components/schemas/";

impl OpenApiSpec {
    /// Name of the component a schema reference points at
    /// e.g., "#/components/schemas/Pet" -> "Pet"
    pub fn schema_ref_name(ref_path: &str) -> Option<&str> {
        ref_path.strip_prefix(SCHEMA_PREFIX)
    }

    /// Get a schema by reference path
    pub fn resolve_schema_ref(&self, ref_path: &str) -> Option<&Schema> {
        let schema_name = Self::schema_ref_name(ref_path)?;
        self.components
            .as_ref()
            .and_then(|c| c.schemas.get(schema_name))
    }

    /// Get a shared parameter by reference path
    pub fn resolve_parameter_ref(&self, ref_path: &str) -> Option<&Parameter> {
        let name = ref_path.strip_prefix("#/components/parameters/")?;
        self.components
            .as_ref()
            .and_then(|c| c.parameters.get(name))
    }

    /// Get a shared request body by reference path
    pub fn resolve_request_body_ref(&self, ref_path: &str) -> Option<&RequestBody> {
        let name = ref_path.strip_prefix("#/components/requestBodies/")?;
        self.components
            .as_ref()
            .and_then(|c| c.request_bodies.get(name))
    }

    /// Get a shared response by reference path
    pub fn resolve_response_ref(&self, ref_path: &str) -> Option<&Response> {
        let name = ref_path.strip_prefix("#/components/responses/")?;
        self.components
            .as_ref()
            .and_then(|c| c.responses.get(name))
    }

    /// Component schemas in document order
    pub fn component_schemas(&self) -> impl Iterator<Item = (&String, &Schema)> {
        self.components
            .iter()
            .flat_map(|components| components.schemas.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_item_keeps_method_order() {
        let item: PathItem = serde_json::from_str(
            r#"{
                "parameters": [{ "name": "id", "in": "path", "required": true }],
                "post": { "operationId": "b" },
                "x-internal": true,
                "get": { "operationId": "a" }
            }"#,
        )
        .unwrap();

        let operations = item.operations().unwrap();
        let methods: Vec<_> = operations.iter().map(|(m, _)| *m).collect();
        assert_eq!(methods, vec![HttpMethod::Post, HttpMethod::Get]);
        assert_eq!(item.parameters.len(), 1);
    }

    #[test]
    fn test_parameter_reference() {
        let param: ParameterOrRef =
            serde_json::from_str(r##"{ "$ref": "#/components/parameters/Limit" }"##).unwrap();
        assert!(matches!(param, ParameterOrRef::Reference { .. }));

        let param: ParameterOrRef =
            serde_json::from_str(r#"{ "name": "limit", "in": "query" }"#).unwrap();
        assert!(matches!(param, ParameterOrRef::Parameter(_)));
    }

    #[test]
    fn test_type_name_inference() {
        let schema: Schema =
            serde_json::from_str(r#"{ "type": ["null", "string"] }"#).unwrap();
        assert_eq!(schema.type_name(), Some("string"));

        let schema: Schema =
            serde_json::from_str(r#"{ "properties": { "a": { "type": "string" } } }"#).unwrap();
        assert_eq!(schema.type_name(), Some("object"));

        let schema: Schema = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(schema.type_name(), None);
    }

    #[test]
    fn test_responses_keep_declaration_order() {
        let op: Operation = serde_json::from_str(
            r#"{ "responses": { "404": {}, "201": {}, "200": {} } }"#,
        )
        .unwrap();
        let keys: Vec<_> = op.responses.keys().cloned().collect();
        assert_eq!(keys, vec!["404", "201", "200"]);
    }

    #[test]
    fn test_content_schema_prefers_json() {
        let response: Response = serde_json::from_str(
            r#"{ "content": {
                "text/plain": { "schema": { "type": "string" } },
                "application/json": { "schema": { "type": "integer" } }
            } }"#,
        )
        .unwrap();
        let schema = content_schema(&response.content).unwrap();
        assert_eq!(schema.type_name(), Some("integer"));
    }
}
