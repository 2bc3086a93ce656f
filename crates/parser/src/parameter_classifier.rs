//! Parameter bucketing and call-site argument specs

use restgen_common::{
    camelize, ArgKind, InputArg, NamingContext, ParameterLocation, ParameterPresence,
    ParameterSpec, PathPlaceholder, Primitive, TypeExpr,
};

/// Parameters of one operation, split the way bindings consume them
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterClassification {
    pub path_params: Vec<ParameterSpec>,
    pub query_params: Vec<ParameterSpec>,
    pub request_body: Option<TypeExpr>,
    pub presence: ParameterPresence,

    /// Ordered path, query, body
    pub input_args: Vec<InputArg>,

    pub path_placeholders: Vec<PathPlaceholder>,
}

/// Classifies operation parameters by location
pub struct ParameterClassifier<'a> {
    naming: &'a NamingContext,
}

impl<'a> ParameterClassifier<'a> {
    pub fn new(naming: &'a NamingContext) -> Self {
        Self { naming }
    }

    /// Classify `parameters` and the request body of the operation whose
    /// declarations live under `type_namespace`.
    ///
    /// Header and cookie parameters are not part of the binding signature.
    /// URL placeholders without a declared path parameter become required
    /// string path parameters.
    pub fn classify(
        &self,
        type_namespace: &str,
        url_template: &str,
        parameters: &[ParameterSpec],
        request_body: Option<TypeExpr>,
    ) -> ParameterClassification {
        let mut path_params: Vec<ParameterSpec> = parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Path)
            .cloned()
            .collect();
        let query_params: Vec<ParameterSpec> = parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
            .cloned()
            .collect();

        let path_placeholders = placeholders(url_template);
        for placeholder in &path_placeholders {
            if !path_params.iter().any(|p| p.name == placeholder.raw) {
                path_params.push(ParameterSpec {
                    name: placeholder.raw.clone(),
                    location: ParameterLocation::Path,
                    required: true,
                    ty: TypeExpr::Primitive(Primitive::String),
                });
            }
        }

        let presence = ParameterPresence {
            path: !path_params.is_empty(),
            query: !query_params.is_empty(),
            body: request_body.is_some(),
        };

        let mut input_args = Vec::new();
        if presence.path {
            input_args.push(self.arg(ArgKind::Path, type_namespace, "pathParameters"));
        }
        if presence.query {
            input_args.push(self.arg(ArgKind::Query, type_namespace, "queryParameters"));
        }
        if presence.body {
            input_args.push(self.arg(ArgKind::Body, type_namespace, "requestBody"));
        }

        ParameterClassification {
            path_params,
            query_params,
            request_body,
            presence,
            input_args,
            path_placeholders,
        }
    }

    fn arg(&self, kind: ArgKind, type_namespace: &str, leaf: &str) -> InputArg {
        InputArg {
            kind,
            type_ref: self.naming.operation_type(type_namespace, leaf),
        }
    }
}

/// `{name}` placeholders of a URL template, first occurrence wins
///
/// # Examples
/// ```
/// use restgen_parser::parameter_classifier::placeholders;
///
/// let found = placeholders("/users/{user-id}/posts/{postId}");
/// assert_eq!(found[0].raw, "user-id");
/// assert_eq!(found[0].ident, "userId");
/// assert_eq!(found[1].ident, "postId");
/// ```
pub fn placeholders(url_template: &str) -> Vec<PathPlaceholder> {
    let mut found: Vec<PathPlaceholder> = Vec::new();
    let mut rest = url_template;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let raw = &after[..end];
        if !raw.is_empty() && !found.iter().any(|p| p.raw == raw) {
            found.push(PathPlaceholder {
                raw: raw.to_string(),
                ident: identifier(raw),
            });
        }
        rest = &after[end + 1..];
    }

    found
}

fn identifier(raw: &str) -> String {
    let ident = camelize(raw);
    match ident.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("_{}", ident),
        Some(_) => ident,
        None => "_".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, location: ParameterLocation) -> ParameterSpec {
        ParameterSpec {
            name: name.to_string(),
            location,
            required: location == ParameterLocation::Path,
            ty: TypeExpr::Primitive(Primitive::String),
        }
    }

    #[test]
    fn test_classify_path_query_body() {
        let naming = NamingContext::new("$api");
        let classifier = ParameterClassifier::new(&naming);

        let result = classifier.classify(
            "updateItem",
            "/items/{id}",
            &[
                param("id", ParameterLocation::Path),
                param("dryRun", ParameterLocation::Query),
                param("X-Trace", ParameterLocation::Header),
            ],
            Some(TypeExpr::Primitive(Primitive::Any)),
        );

        assert_eq!(
            result.presence,
            ParameterPresence {
                path: true,
                query: true,
                body: true
            }
        );
        assert_eq!(result.path_params.len(), 1);
        assert_eq!(result.query_params.len(), 1);
        let refs: Vec<_> = result.input_args.iter().map(|a| a.type_ref.as_str()).collect();
        assert_eq!(
            refs,
            vec![
                "$api.updateItem.$pathParameters",
                "$api.updateItem.$queryParameters",
                "$api.updateItem.$requestBody",
            ]
        );
        assert_eq!(result.input_args[2].kind, ArgKind::Body);
    }

    #[test]
    fn test_no_parameters() {
        let naming = NamingContext::new("$api");
        let result = ParameterClassifier::new(&naming).classify("listItems", "/items", &[], None);
        assert!(!result.presence.any());
        assert!(result.input_args.is_empty());
        assert!(result.path_placeholders.is_empty());
    }

    #[test]
    fn test_undeclared_placeholder_becomes_path_parameter() {
        let naming = NamingContext::new("$api");
        let result = ParameterClassifier::new(&naming).classify(
            "getComment",
            "/posts/{postId}/comments/{comment_id}",
            &[param("postId", ParameterLocation::Path)],
            None,
        );

        let names: Vec<_> = result.path_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["postId", "comment_id"]);
        assert!(result.path_params[1].required);
        assert_eq!(result.path_placeholders[1].ident, "commentId");
    }

    #[test]
    fn test_placeholder_edge_cases() {
        let found = placeholders("/a/{id}/b/{id}/c/{2fa}/{unterminated");
        let raws: Vec<_> = found.iter().map(|p| p.raw.as_str()).collect();
        assert_eq!(raws, vec!["id", "2fa"]);
        assert_eq!(found[1].ident, "_2fa");
    }
}
