//! Operation descriptors and the frozen API definition handed to emitters

use crate::{NamingContext, TypeExpr, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Lowercase method name as it appears in a path item
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Where a parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

/// A classified operation parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub ty: TypeExpr,
}

/// A `{name}` placeholder of a URL template and the identifier bound to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPlaceholder {
    /// Name as written between the braces
    pub raw: String,

    /// Identifier destructured at the call site and interpolated into the URL
    pub ident: String,
}

/// Which options sub-object an argument occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    Path,
    Query,
    Body,
}

impl ArgKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgKind::Path => "path",
            ArgKind::Query => "query",
            ArgKind::Body => "body",
        }
    }
}

/// A typed input argument of a binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputArg {
    pub kind: ArgKind,

    /// Reference into the type declarations (e.g. `$api.getItem.$pathParameters`)
    pub type_ref: String,
}

/// Which parameter kinds an operation takes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterPresence {
    pub path: bool,
    pub query: bool,
    pub body: bool,
}

impl ParameterPresence {
    /// Whether anything besides path parameters goes into the dispatch options
    pub fn has_options(&self) -> bool {
        self.query || self.body
    }

    pub fn any(&self) -> bool {
        self.path || self.query || self.body
    }
}

/// One declared response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSpec {
    pub status: String,

    /// Body type, if the response declares content with a schema
    pub body: Option<TypeExpr>,
}

/// The response an operation's binding resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status: String,
    pub type_ref: String,
}

/// Everything the emitters need to know about one (path, method) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub operation_id: String,

    /// Namespace of the operation's declarations (camelized operationId)
    pub type_namespace: String,

    /// Exported binding name
    pub function_name: String,

    pub method: HttpMethod,
    pub url_template: String,
    pub path_params: Vec<ParameterSpec>,
    pub query_params: Vec<ParameterSpec>,
    pub request_body: Option<TypeExpr>,

    /// All declared responses in declaration order
    pub responses: Vec<ResponseSpec>,

    /// Resolved success response; `None` means the binding returns void
    pub success: Option<SuccessResponse>,

    pub presence: ParameterPresence,

    /// Ordered path, query, body
    pub input_args: Vec<InputArg>,

    pub path_placeholders: Vec<PathPlaceholder>,
}

impl OperationDescriptor {
    pub fn is_get(&self) -> bool {
        self.method == HttpMethod::Get
    }

    /// Human-readable origin, used in diagnostics
    pub fn origin(&self) -> String {
        format!("{} {}", self.method, self.url_template)
    }
}

/// A named component schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub ty: TypeExpr,
}

/// Frozen result of the parsing phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiDefinition {
    pub title: String,
    pub version: String,

    /// URL of the first declared server
    pub server_url: Option<String>,

    pub naming: NamingContext,
    pub schemas: Vec<NamedType>,
    pub operations: Vec<OperationDescriptor>,
    pub registry: TypeRegistry,
}

impl ApiDefinition {
    pub fn get_operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.iter().filter(|op| op.is_get())
    }
}
