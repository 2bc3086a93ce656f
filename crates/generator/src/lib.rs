//! TypeScript artifact generation for restgen
//!
//! This crate renders a parsed `ApiDefinition` into four files:
//! - `<name>.d.ts`: request and response type declarations
//! - `<name>.ts`: one fetch binding per operation
//! - `<name>Resources.ts`: resource wrappers over the GET bindings
//! - `<name>Schemas.ts`: Realm entity classes for the walked records
//!
//! Everything is rendered in memory first; nothing is written unless every
//! artifact rendered.

mod coercion;
mod emitters;
mod report;
mod templates;
pub mod typescript;

pub use coercion::{StorageType, TypeCoercer};
pub use emitters::{Artifact, RenderedArtifact};
pub use report::{NoopReporter, Phase, Reporter};

#[cfg(test)]
pub use report::MockReporter;

use restgen_common::{ApiDefinition, GenerationOptions, GeneratorError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tera::Tera;

/// Artifact generator
///
/// Owns the template engine for one run; templates are loaded when the
/// generator is created and dropped with it.
pub struct ArtifactGenerator {
    api: ApiDefinition,
    options: GenerationOptions,
    tera: Tera,
}

impl ArtifactGenerator {
    /// Create a new generator from an ApiDefinition
    pub fn new(api: ApiDefinition, options: GenerationOptions) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self { api, options, tera })
    }

    pub fn api(&self) -> &ApiDefinition {
        &self.api
    }

    /// Render one artifact
    pub fn render(&self, artifact: Artifact) -> Result<RenderedArtifact> {
        let context = artifact.context(&self.api, &self.options)?;
        let content = self
            .tera
            .render(artifact.template(), &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {:?}", e)))?;

        Ok(RenderedArtifact {
            artifact,
            file_name: artifact.file_name(&self.options.output_name),
            content,
        })
    }

    /// Render every artifact, stopping at the first failure
    pub fn render_all(&self, reporter: &dyn Reporter) -> Result<Vec<RenderedArtifact>> {
        let mut rendered = Vec::with_capacity(Artifact::ALL.len());

        for artifact in Artifact::ALL {
            reporter.started(artifact.label(), Phase::Generate);
            match self.render(artifact) {
                Ok(output) => {
                    reporter.finished(artifact.label(), Phase::Generate);
                    rendered.push(output);
                }
                Err(e) => {
                    reporter.failed(artifact.label(), Phase::Generate, &e);
                    return Err(e);
                }
            }
        }

        Ok(rendered)
    }

    /// Write rendered artifacts into `output_dir`, creating it if missing
    pub fn write_all(
        &self,
        rendered: &[RenderedArtifact],
        output_dir: &Path,
        reporter: &dyn Reporter,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(output_dir).map_err(|source| GeneratorError::OutputWrite {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(rendered.len());
        for output in rendered {
            let label = output.artifact.label();
            let path = output_dir.join(&output.file_name);

            reporter.started(label, Phase::Save);
            if let Err(source) = fs::write(&path, &output.content) {
                let e = GeneratorError::OutputWrite { path, source };
                reporter.failed(label, Phase::Save, &e);
                return Err(e);
            }
            reporter.finished(label, Phase::Save);
            written.push(path);
        }

        Ok(written)
    }

    /// Render all artifacts, then write them to a directory
    pub fn generate_to_directory(
        &self,
        output_dir: &Path,
        reporter: &dyn Reporter,
    ) -> Result<Vec<PathBuf>> {
        let rendered = self.render_all(reporter)?;
        self.write_all(&rendered, output_dir, reporter)
    }
}

/// Generate all artifacts without progress reporting (convenience function)
pub fn generate_artifacts(
    api: ApiDefinition,
    options: GenerationOptions,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let generator = ArtifactGenerator::new(api, options)?;
    generator.generate_to_directory(output_dir, &NoopReporter)
}
