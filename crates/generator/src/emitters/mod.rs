//! Artifact emitters
//!
//! Each emitter turns the frozen `ApiDefinition` into the template context of
//! one output file. Emitters share no state and can run in any order.

mod bindings;
mod declarations;
mod entities;
mod resources;

use restgen_common::{ApiDefinition, GenerationOptions, InputArg, Result};
use std::fmt;

/// The files produced by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// `<name>.d.ts`
    Declarations,

    /// `<name>.ts`
    Bindings,

    /// `<name>Resources.ts`
    Resources,

    /// `<name>Schemas.ts`
    Entities,
}

impl Artifact {
    /// Every artifact, in generation order
    pub const ALL: [Artifact; 4] = [
        Artifact::Declarations,
        Artifact::Bindings,
        Artifact::Resources,
        Artifact::Entities,
    ];

    /// Name used in progress reports
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Declarations => "dts",
            Artifact::Bindings => "api implementation",
            Artifact::Resources => "resource's implementation",
            Artifact::Entities => "realm schemas",
        }
    }

    pub(crate) fn template(&self) -> &'static str {
        match self {
            Artifact::Declarations => "declarations.d.ts",
            Artifact::Bindings => "bindings.ts",
            Artifact::Resources => "resources.ts",
            Artifact::Entities => "entities.ts",
        }
    }

    pub fn file_name(&self, output_name: &str) -> String {
        match self {
            Artifact::Declarations => format!("{}.d.ts", output_name),
            Artifact::Bindings => format!("{}.ts", output_name),
            Artifact::Resources => format!("{}Resources.ts", output_name),
            Artifact::Entities => format!("{}Schemas.ts", output_name),
        }
    }

    /// Build the template context of this artifact
    pub(crate) fn context(
        &self,
        api: &ApiDefinition,
        options: &GenerationOptions,
    ) -> Result<tera::Context> {
        let mut context = tera::Context::new();
        context.insert("output_name", &options.output_name);
        context.insert("root", api.naming.root_namespace());
        context.insert("title", &api.title);
        context.insert("version", &api.version);

        match self {
            Artifact::Declarations => declarations::fill(&mut context, api),
            Artifact::Bindings => bindings::fill(&mut context, api),
            Artifact::Resources => resources::fill(&mut context, api, options)?,
            Artifact::Entities => entities::fill(&mut context, api)?,
        }

        Ok(context)
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A rendered output file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub artifact: Artifact,
    pub file_name: String,
    pub content: String,
}

/// Type of the single options argument (`{ path: ...; query: ... }`)
fn args_type(input_args: &[InputArg]) -> String {
    let members: Vec<String> = input_args
        .iter()
        .map(|arg| format!("{}: {}", arg.kind.as_str(), arg.type_ref))
        .collect();
    format!("{{ {} }}", members.join("; "))
}

/// Return type of a binding: the success response or `void`
fn return_type(op: &restgen_common::OperationDescriptor) -> String {
    op.success
        .as_ref()
        .map(|success| success.type_ref.clone())
        .unwrap_or_else(|| "void".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use restgen_common::ArgKind;

    #[test]
    fn test_file_names() {
        assert_eq!(Artifact::Declarations.file_name("api"), "api.d.ts");
        assert_eq!(Artifact::Bindings.file_name("api"), "api.ts");
        assert_eq!(Artifact::Resources.file_name("api"), "apiResources.ts");
        assert_eq!(Artifact::Entities.file_name("shop"), "shopSchemas.ts");
    }

    #[test]
    fn test_args_type() {
        let args = vec![
            InputArg {
                kind: ArgKind::Path,
                type_ref: "$api.getItem.$pathParameters".into(),
            },
            InputArg {
                kind: ArgKind::Query,
                type_ref: "$api.getItem.$queryParameters".into(),
            },
        ];
        assert_eq!(
            args_type(&args),
            "{ path: $api.getItem.$pathParameters; query: $api.getItem.$queryParameters }"
        );
    }
}
