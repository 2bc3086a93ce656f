//! OpenAPI document loading

use super::types::OpenApiSpec;
use restgen_common::{ApiDefinition, GenerationOptions, GeneratorError, Result};
use std::fs;
use std::path::Path;

/// OpenAPI specification parser
///
/// Reads an OpenAPI 3.x document (JSON or YAML) and turns it into the
/// frozen `ApiDefinition` the generator renders from.
pub struct OpenApiParser {
    /// Loaded OpenAPI spec
    spec: OpenApiSpec,

    /// Options for this run
    options: GenerationOptions,
}

impl OpenApiParser {
    /// Load an OpenAPI document from a file path
    ///
    /// Files ending in `.yaml`/`.yml` are read as YAML, anything else as JSON.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("openapi.json")?;
    /// let api = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            GeneratorError::DocumentLoad(format!(
                "Failed to read OpenAPI file {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Parse an OpenAPI document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: OpenApiSpec = serde_json::from_str(json).map_err(|e| {
            GeneratorError::DocumentLoad(format!("Failed to parse OpenAPI JSON: {}", e))
        })?;

        Ok(Self::from_spec(spec))
    }

    /// Parse an OpenAPI document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).map_err(|e| {
            GeneratorError::DocumentLoad(format!("Failed to parse OpenAPI YAML: {}", e))
        })?;
        let spec: OpenApiSpec = serde_json::from_value(yaml_to_json(value)?).map_err(|e| {
            GeneratorError::DocumentLoad(format!("Invalid OpenAPI document: {}", e))
        })?;

        Ok(Self::from_spec(spec))
    }

    pub fn from_spec(spec: OpenApiSpec) -> Self {
        Self {
            spec,
            options: GenerationOptions::default(),
        }
    }

    /// Set generation options (namespace, collision policy, heuristics)
    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse the document into the ApiDefinition IR
    pub fn parse(&self) -> Result<ApiDefinition> {
        super::converter::convert_openapi_to_api_definition(&self.spec, &self.options)
    }

    /// Get reference to the underlying OpenAPI spec
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }
}

/// YAML allows non-string mapping keys (`200:`); JSON objects do not.
fn yaml_to_json(value: serde_yaml::Value) -> Result<serde_json::Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => serde_json::Value::Null,
        Yaml::Bool(b) => serde_json::Value::Bool(b),
        Yaml::Number(n) => serde_json::to_value(&n)?,
        Yaml::String(s) => serde_json::Value::String(s),
        Yaml::Sequence(items) => serde_json::Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(GeneratorError::DocumentLoad(format!(
                            "Unsupported YAML mapping key: {:?}",
                            other
                        )))
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            serde_json::Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}
