//! Persisted-entity schemas (`<name>Schemas.ts`)
//!
//! One class per registry record carrying a static `schema` descriptor with
//! coerced storage types, plus the `schemas` and `modelSchemas` aggregates.

use crate::coercion::TypeCoercer;
use crate::typescript::is_identifier;
use restgen_common::{ApiDefinition, GeneratorError, Record, Result};
use serde::Serialize;

const PRIMARY_KEY: &str = "id";

#[derive(Debug, Serialize)]
struct Member {
    key: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct EntityClass {
    name: String,
    primary_key: Option<&'static str>,

    /// Descriptor properties: field → storage type
    properties: Vec<Member>,

    /// Class fields: field → TypeScript type
    fields: Vec<Member>,
}

pub(super) fn fill(context: &mut tera::Context, api: &ApiDefinition) -> Result<()> {
    let mut uses_list = false;
    let mut classes = Vec::with_capacity(api.registry.len());

    for record in api.registry.records() {
        let class = entity_class(record)?;
        uses_list |= record
            .fields
            .iter()
            .any(|field| TypeCoercer::coerce(field).is_list());
        classes.push(class);
    }

    let class_names: Vec<&str> = classes.iter().map(|c| c.name.as_str()).collect();
    context.insert("uses_list", &uses_list);
    context.insert("classes", &classes);
    context.insert("class_names", &class_names);
    context.insert("roots", api.registry.roots());
    Ok(())
}

fn entity_class(record: &Record) -> Result<EntityClass> {
    if !is_identifier(&record.name) {
        return Err(GeneratorError::Generation(format!(
            "Record '{}' (from {}) is not a valid class name",
            record.name, record.origin
        )));
    }

    let mut properties = Vec::with_capacity(record.fields.len());
    let mut fields = Vec::with_capacity(record.fields.len());
    for field in &record.fields {
        let storage = TypeCoercer::coerce(field);
        properties.push(Member {
            key: field.name.clone(),
            value: storage.to_string(),
        });
        fields.push(Member {
            key: field.name.clone(),
            value: storage.ts_type(),
        });
    }

    Ok(EntityClass {
        name: record.name.clone(),
        primary_key: record.field(PRIMARY_KEY).map(|_| PRIMARY_KEY),
        properties,
        fields,
    })
}
