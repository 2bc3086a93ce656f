//! Success-response selection

use restgen_common::{NamingContext, ResponseSpec, SuccessResponse};

/// Picks the response an operation's binding resolves to
pub struct ResponseResolver;

impl ResponseResolver {
    /// First response, in declaration order, with a numeric status below 400
    /// that declares a body. Non-numeric keys (`default`, `2XX`) never qualify.
    ///
    /// # Examples
    /// ```
    /// use restgen_common::{Primitive, ResponseSpec, TypeExpr};
    /// use restgen_parser::ResponseResolver;
    ///
    /// let responses = vec![
    ///     ResponseSpec { status: "200".into(), body: Some(TypeExpr::Primitive(Primitive::String)) },
    ///     ResponseSpec { status: "404".into(), body: None },
    /// ];
    /// assert_eq!(ResponseResolver::select(&responses).unwrap().status, "200");
    ///
    /// let responses = vec![ResponseSpec { status: "204".into(), body: None }];
    /// assert!(ResponseResolver::select(&responses).is_none());
    /// ```
    pub fn select(responses: &[ResponseSpec]) -> Option<&ResponseSpec> {
        responses
            .iter()
            .find(|response| is_success(&response.status) && response.body.is_some())
    }

    /// Select the success response and build its type reference; `None` is void
    pub fn resolve(
        naming: &NamingContext,
        type_namespace: &str,
        responses: &[ResponseSpec],
    ) -> Option<SuccessResponse> {
        Self::select(responses).map(|response| SuccessResponse {
            status: response.status.clone(),
            type_ref: naming.response_type(type_namespace, &response.status),
        })
    }
}

fn is_success(status: &str) -> bool {
    status
        .parse::<u16>()
        .map(|code| code < 400)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use restgen_common::{Primitive, TypeExpr};

    fn response(status: &str, body: bool) -> ResponseSpec {
        ResponseSpec {
            status: status.to_string(),
            body: body.then(|| TypeExpr::Primitive(Primitive::String)),
        }
    }

    #[test]
    fn test_resolves_200_with_content() {
        let naming = NamingContext::new("$api");
        let responses = vec![response("200", true), response("404", false)];

        let success = ResponseResolver::resolve(&naming, "getItem", &responses).unwrap();
        assert_eq!(success.status, "200");
        assert_eq!(success.type_ref, "$api.getItem.responses.$200");
    }

    #[test]
    fn test_no_content_is_void() {
        let naming = NamingContext::new("$api");
        let responses = vec![response("204", false)];
        assert!(ResponseResolver::resolve(&naming, "deleteItem", &responses).is_none());
    }

    #[test]
    fn test_declaration_order_wins() {
        let responses = vec![
            response("404", true),
            response("201", true),
            response("200", true),
        ];
        assert_eq!(ResponseResolver::select(&responses).unwrap().status, "201");
    }

    #[test]
    fn test_skips_bodyless_and_non_numeric() {
        let responses = vec![
            response("default", true),
            response("2XX", true),
            response("204", false),
            response("202", true),
        ];
        assert_eq!(ResponseResolver::select(&responses).unwrap().status, "202");
    }

    #[test]
    fn test_error_statuses_never_qualify() {
        let responses = vec![response("400", true), response("500", true)];
        assert!(ResponseResolver::select(&responses).is_none());
    }
}
