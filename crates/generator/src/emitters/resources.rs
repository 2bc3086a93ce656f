//! Resource wrappers (`<name>Resources.ts`)

use super::{args_type, return_type};
use restgen_common::{ApiDefinition, CollisionKind, GenerationOptions, NameAllocator, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ResourceWrapper {
    name: String,
    binding: String,
    signature: String,
    call_args: &'static str,
    return_type: String,
}

pub(super) fn fill(
    context: &mut tera::Context,
    api: &ApiDefinition,
    options: &GenerationOptions,
) -> Result<()> {
    let mut names = NameAllocator::new(CollisionKind::Resource, options.on_collision);
    let mut resources = Vec::new();

    for op in api.get_operations() {
        let name = names.allocate(&api.naming.resource_name(&op.function_name), &op.origin())?;
        let (signature, call_args) = if op.input_args.is_empty() {
            (String::new(), "")
        } else {
            (format!("args: {}", args_type(&op.input_args)), "args")
        };

        resources.push(ResourceWrapper {
            name,
            binding: op.function_name.clone(),
            signature,
            call_args,
            return_type: return_type(op),
        });
    }

    let imports: Vec<&str> = resources.iter().map(|r| r.binding.as_str()).collect();
    context.insert("imports", &imports);
    context.insert("resources", &resources);
    Ok(())
}
