//! Type declarations (`<name>.d.ts`)

use crate::typescript::{parameters_type, render_type};
use restgen_common::ApiDefinition;
use serde::Serialize;

/// Depth of declarations directly inside a second-level namespace
const MEMBER_DEPTH: usize = 2;

#[derive(Debug, Serialize)]
struct TypeDecl {
    leaf: String,
    ty: String,
}

#[derive(Debug, Serialize)]
struct OperationDecl {
    namespace: String,
    origin: String,
    path_parameters: Option<String>,
    query_parameters: Option<String>,
    request_body: Option<String>,
    responses: Vec<TypeDecl>,
}

pub(super) fn fill(context: &mut tera::Context, api: &ApiDefinition) {
    let naming = &api.naming;

    let schemas: Vec<TypeDecl> = api
        .schemas
        .iter()
        .map(|schema| TypeDecl {
            leaf: format!("${}", schema.name),
            ty: render_type(&schema.ty, naming, MEMBER_DEPTH),
        })
        .collect();

    let operations: Vec<OperationDecl> = api
        .operations
        .iter()
        .map(|op| OperationDecl {
            namespace: op.type_namespace.clone(),
            origin: op.origin(),
            path_parameters: (!op.path_params.is_empty())
                .then(|| parameters_type(&op.path_params, naming, MEMBER_DEPTH)),
            query_parameters: (!op.query_params.is_empty())
                .then(|| parameters_type(&op.query_params, naming, MEMBER_DEPTH)),
            request_body: op
                .request_body
                .as_ref()
                .map(|body| render_type(body, naming, MEMBER_DEPTH)),
            responses: op
                .responses
                .iter()
                .filter_map(|response| {
                    response.body.as_ref().map(|body| TypeDecl {
                        leaf: format!("${}", response.status),
                        ty: render_type(body, naming, MEMBER_DEPTH + 1),
                    })
                })
                .collect(),
        })
        .collect();

    context.insert("schemas", &schemas);
    context.insert("operations", &operations);
}
