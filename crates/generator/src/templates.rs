//! Template loading and management

use crate::emitters::Artifact;
use crate::typescript::property_key;
use restgen_common::{GeneratorError, Result};
use std::collections::HashMap;
use tera::{Tera, Value};

/// Load all templates into a fresh `Tera` instance
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.register_filter("ts_key", ts_key_filter);

    for artifact in Artifact::ALL {
        tera.add_raw_template(artifact.template(), source(artifact))
            .map_err(|e| {
                GeneratorError::Generation(format!(
                    "Failed to load {} template: {}",
                    artifact.template(),
                    e
                ))
            })?;
    }

    Ok(tera)
}

fn source(artifact: Artifact) -> &'static str {
    match artifact {
        Artifact::Declarations => include_str!("../templates/declarations.d.ts.tera"),
        Artifact::Bindings => include_str!("../templates/bindings.ts.tera"),
        Artifact::Resources => include_str!("../templates/resources.ts.tera"),
        Artifact::Entities => include_str!("../templates/entities.ts.tera"),
    }
}

/// Filter to quote object keys that are not identifiers
fn ts_key_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let key = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("ts_key filter expects a string"))?;

    Ok(Value::String(property_key(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_templates() {
        let tera = load_templates().unwrap();
        let names: Vec<_> = tera.get_template_names().collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_ts_key_filter() {
        let quoted = ts_key_filter(&Value::String("content-type".into()), &HashMap::new()).unwrap();
        assert_eq!(quoted, Value::String("'content-type'".into()));
        assert!(ts_key_filter(&Value::Bool(true), &HashMap::new()).is_err());
    }
}
