//! Options controlling one generation run

use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do when two sources produce the same identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Abort the run with a `NamingCollision` error
    #[default]
    Error,

    /// Append a numeric discriminator (`2`, `3`, ...) to the later name
    Disambiguate,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Error => write!(f, "error"),
            CollisionPolicy::Disambiguate => write!(f, "disambiguate"),
        }
    }
}

/// Generation options, shared by the parser and the generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Root namespace of the type declarations (e.g. `$api`)
    pub root_namespace: String,

    /// Base name of the emitted files (`api` → `api.d.ts`, `api.ts`, ...)
    pub output_name: String,

    pub on_collision: CollisionPolicy,

    /// Treat `{hasNext, hasPrev, <payload>}` objects as transparent envelopes
    pub pagination_unwrap: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            root_namespace: "$api".to_string(),
            output_name: "api".to_string(),
            on_collision: CollisionPolicy::Error,
            pagination_unwrap: true,
        }
    }
}
