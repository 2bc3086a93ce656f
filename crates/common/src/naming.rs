//! Identifier synthesis and collision detection

use crate::{CollisionPolicy, GeneratorError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Convert a `snake_case`, `kebab-case`, spaced or PascalCase identifier to camelCase
///
/// # Examples
/// ```
/// use restgen_common::camelize;
///
/// assert_eq!(camelize("list_foo"), "listFoo");
/// assert_eq!(camelize("ListFoo"), "listFoo");
/// assert_eq!(camelize("create_Item_resource"), "createItemResource");
/// ```
pub fn camelize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for segment in s
        .split(|c: char| c == '_' || c == '-' || c == ' ' || c == '.')
        .filter(|segment| !segment.is_empty())
    {
        if result.is_empty() {
            let mut chars = segment.chars();
            if let Some(first) = chars.next() {
                result.extend(first.to_lowercase());
                result.push_str(chars.as_str());
            }
        } else {
            result.push_str(&capitalize(segment));
        }
    }

    result
}

/// Uppercase the first character, leaving the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop a leading `get` from a function name, unless nothing would be left
pub fn strip_get_prefix(name: &str) -> &str {
    match name.strip_prefix("get") {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    }
}

fn reads_as_getter(name: &str) -> bool {
    if name.starts_with("get") {
        return true;
    }
    match name.strip_prefix("list") {
        Some(rest) => rest.chars().next().map_or(true, |c| !c.is_lowercase()),
        None => false,
    }
}

/// Root namespace plus the naming rules that derive every emitted identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingContext {
    root_namespace: String,
}

impl NamingContext {
    pub fn new(root_namespace: impl Into<String>) -> Self {
        Self {
            root_namespace: root_namespace.into(),
        }
    }

    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    /// Namespace holding an operation's declarations: the camelized operationId
    pub fn operation_namespace(&self, operation_id: &str) -> String {
        camelize(operation_id)
    }

    /// Emitted binding name; GET operations read as getters
    ///
    /// A GET name is left alone when it already starts with `get` or with the
    /// word `list`; anything else gets a `get` prefix.
    ///
    /// # Examples
    /// ```
    /// use restgen_common::{HttpMethod, NamingContext};
    ///
    /// let naming = NamingContext::new("$api");
    /// assert_eq!(naming.function_name("foo", HttpMethod::Get), "getFoo");
    /// assert_eq!(naming.function_name("listFoo", HttpMethod::Get), "listFoo");
    /// assert_eq!(naming.function_name("getFoo", HttpMethod::Get), "getFoo");
    /// assert_eq!(naming.function_name("foo", HttpMethod::Post), "foo");
    /// ```
    pub fn function_name(&self, operation_id: &str, method: crate::HttpMethod) -> String {
        let name = camelize(operation_id);
        if method == crate::HttpMethod::Get && !reads_as_getter(&name) {
            format!("get{}", capitalize(&name))
        } else {
            name
        }
    }

    /// Resource wrapper name for a GET binding (`getItem` → `createItemResource`)
    pub fn resource_name(&self, function_name: &str) -> String {
        camelize(&format!(
            "create_{}_resource",
            strip_get_prefix(function_name)
        ))
    }

    /// Root persisted-entity name for a binding (`getItem` → `Item`)
    pub fn entity_name(&self, function_name: &str) -> String {
        capitalize(strip_get_prefix(function_name))
    }

    /// Reference to a declaration inside an operation namespace
    pub fn operation_type(&self, operation_namespace: &str, leaf: &str) -> String {
        format!("{}.{}.${}", self.root_namespace, operation_namespace, leaf)
    }

    /// Reference to an operation's response for one status code
    pub fn response_type(&self, operation_namespace: &str, status: &str) -> String {
        format!(
            "{}.{}.responses.${}",
            self.root_namespace, operation_namespace, status
        )
    }

    /// Reference to a component schema
    pub fn component_type(&self, schema_name: &str) -> String {
        format!("{}.schemas.${}", self.root_namespace, schema_name)
    }
}

/// Which family of identifiers collided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Record,
    Function,
    Resource,
    Namespace,
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionKind::Record => write!(f, "record type"),
            CollisionKind::Function => write!(f, "function"),
            CollisionKind::Resource => write!(f, "resource"),
            CollisionKind::Namespace => write!(f, "operation namespace"),
        }
    }
}

/// Hands out unique identifiers of one kind, remembering where each came from
#[derive(Debug, Clone)]
pub struct NameAllocator {
    kind: CollisionKind,
    policy: CollisionPolicy,
    taken: IndexMap<String, String>,
}

impl NameAllocator {
    pub fn new(kind: CollisionKind, policy: CollisionPolicy) -> Self {
        Self {
            kind,
            policy,
            taken: IndexMap::new(),
        }
    }

    /// Reserve `candidate`, or resolve a clash according to the policy
    pub fn allocate(&mut self, candidate: &str, origin: &str) -> Result<String> {
        if !self.taken.contains_key(candidate) {
            self.taken
                .insert(candidate.to_string(), origin.to_string());
            return Ok(candidate.to_string());
        }

        match self.policy {
            CollisionPolicy::Error => Err(GeneratorError::NamingCollision {
                kind: self.kind,
                name: candidate.to_string(),
                origin: origin.to_string(),
            }),
            CollisionPolicy::Disambiguate => {
                let mut discriminator = 2;
                loop {
                    let name = format!("{}{}", candidate, discriminator);
                    if !self.taken.contains_key(&name) {
                        self.taken.insert(name.clone(), origin.to_string());
                        return Ok(name);
                    }
                    discriminator += 1;
                }
            }
        }
    }

    /// Source that first claimed `name`
    pub fn origin_of(&self, name: &str) -> Option<&str> {
        self.taken.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains_key(name)
    }
}
