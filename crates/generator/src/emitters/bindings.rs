//! Operation bindings (`<name>.ts`)

use super::{args_type, return_type};
use crate::typescript::{path_destructure, url_literal};
use restgen_common::{ApiDefinition, OperationDescriptor};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Binding {
    name: String,
    method: &'static str,
    signature: String,
    return_type: String,
    destructure: Option<String>,
    url: String,
    options: Option<String>,
}

pub(super) fn fill(context: &mut tera::Context, api: &ApiDefinition) {
    let bindings: Vec<Binding> = api.operations.iter().map(binding).collect();

    context.insert("host", &api.server_url);
    context.insert("bindings", &bindings);
}

fn binding(op: &OperationDescriptor) -> Binding {
    let signature = if op.input_args.is_empty() {
        String::new()
    } else {
        let names: Vec<&str> = op.input_args.iter().map(|arg| arg.kind.as_str()).collect();
        format!("{{ {} }}: {}", names.join(", "), args_type(&op.input_args))
    };

    let options = op.presence.has_options().then(|| {
        let mut members = Vec::new();
        if op.presence.query {
            members.push("query");
        }
        if op.presence.body {
            members.push("body");
        }
        format!("{{ {} }}", members.join(", "))
    });

    Binding {
        name: op.function_name.clone(),
        method: op.method.as_str(),
        signature,
        return_type: return_type(op),
        destructure: path_destructure(&op.path_placeholders),
        url: url_literal(&op.url_template, &op.path_placeholders),
        options,
    }
}
