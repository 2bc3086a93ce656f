//! Job configuration files
//!
//! A public file holds the list of generation jobs. An optional private file
//! holds partial jobs, matched by `id`, whose values are laid over the public
//! ones. Only keys the public job already has are overridden at the top
//! level; nested objects are merged key by key.

use anyhow::{bail, Context, Result};
use restgen_common::GenerationOptions;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Script a job runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Openapi,
}

/// One generation job
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub script: Script,

    /// OpenAPI document, relative to the config file
    pub spec: PathBuf,

    /// Output folder, relative to the config file
    pub output_folder: PathBuf,

    #[serde(flatten)]
    pub options: GenerationOptions,
}

/// Load the jobs of `public`, overlaid with `private` when given
pub fn load_jobs(public: &Path, private: Option<&Path>) -> Result<Vec<Job>> {
    let mut jobs = read_json(public)?;
    if let Some(private) = private {
        overlay(&mut jobs, &read_json(private)?)
            .with_context(|| format!("Failed to apply {}", private.display()))?;
    }

    let mut jobs: Vec<Job> = serde_json::from_value(jobs)
        .with_context(|| format!("Invalid job list in {}", public.display()))?;

    let base = public.parent().unwrap_or_else(|| Path::new(""));
    for job in &mut jobs {
        job.spec = base.join(&job.spec);
        job.output_folder = base.join(&job.output_folder);
    }

    Ok(jobs)
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

/// Lay every private item over the public job with the same `id`
pub fn overlay(public: &mut Value, private: &Value) -> Result<()> {
    let Some(public_jobs) = public.as_array_mut() else {
        bail!("Job config must be a JSON array");
    };
    let Some(private_jobs) = private.as_array() else {
        bail!("Private job config must be a JSON array");
    };

    for private_item in private_jobs.iter().filter_map(Value::as_object) {
        let Some(id) = private_item.get("id") else {
            continue;
        };
        let public_item = public_jobs
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|job| job.get("id") == Some(id));

        if let Some(public_item) = public_item {
            extend_item(public_item, private_item);
        }
    }

    Ok(())
}

fn extend_item(source: &mut Map<String, Value>, target: &Map<String, Value>) {
    let keys: Vec<String> = source.keys().cloned().collect();
    for key in keys {
        dive(&key, source, target);
    }
}

fn dive(key: &str, source: &mut Map<String, Value>, target: &Map<String, Value>) {
    let Some(replacement) = target.get(key).filter(|value| is_set(value)) else {
        return;
    };

    match (source.get_mut(key), replacement) {
        (Some(Value::Object(nested_source)), Value::Object(nested_target)) => {
            let mut keys: Vec<String> = nested_source.keys().cloned().collect();
            for nested_key in nested_target.keys() {
                if !nested_source.contains_key(nested_key) {
                    keys.push(nested_key.clone());
                }
            }
            for nested_key in keys {
                dive(&nested_key, nested_source, nested_target);
            }
        }
        _ => {
            source.insert(key.to_string(), replacement.clone());
        }
    }
}

/// Empty overlay values (null, false, 0, "") leave the public value alone
fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
