//! restgen CLI
//!
//! Command-line interface for generating TypeScript API bindings, resource
//! wrappers and Realm schemas from OpenAPI documents.

mod config;
mod reporter;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use config::{Job, Script};
use reporter::ConsoleReporter;
use restgen_common::{ApiDefinition, CollisionPolicy, GenerationOptions};
use restgen_generator::{ArtifactGenerator, Phase, Reporter};
use restgen_parser::OpenApiParser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "restgen")]
#[command(version, about = "Generate TypeScript API bindings from OpenAPI documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an OpenAPI document and display the extracted operations
    #[command(after_help = "EXAMPLES:\n  \
        # Parse a JSON document\n  \
        restgen parse --spec docs/openapi.json\n\n  \
        # List every operation and entity record\n  \
        restgen parse --spec docs/openapi.yaml --verbose")]
    Parse {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Generate the four artifacts from one OpenAPI document
    #[command(after_help = "EXAMPLES:\n  \
        # Generate into ./output\n  \
        restgen generate --spec docs/openapi.json\n\n  \
        # Custom namespace and file names\n  \
        restgen generate \\\n    \
        --spec docs/openapi.json \\\n    \
        --namespace '$shop' \\\n    \
        --name shop \\\n    \
        --output ./app/resources")]
    Generate {
        /// Path to the OpenAPI document
        #[arg(short, long)]
        spec: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Root namespace of the type declarations
        #[arg(long, default_value = "$api")]
        namespace: String,

        /// Base name of the generated files
        #[arg(long, default_value = "api")]
        name: String,

        /// What to do when two sources produce the same name
        #[arg(long, value_enum, default_value_t = CollisionArg::Error)]
        on_collision: CollisionArg,

        /// Keep `{hasNext, hasPrev, ...}` envelopes as records
        #[arg(long)]
        no_pagination_unwrap: bool,
    },

    /// Run every job of a job configuration file
    #[command(after_help = "EXAMPLES:\n  \
        # Run the jobs of the public config\n  \
        restgen run --config .utils.public.json\n\n  \
        # Overlay private values (hosts, local paths)\n  \
        restgen run --config .utils.public.json --private .utils.private.json")]
    Run {
        /// Public job configuration
        #[arg(short, long)]
        config: PathBuf,

        /// Private overlay, matched to public jobs by `id`
        #[arg(short, long)]
        private: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CollisionArg {
    /// Abort the run
    Error,
    /// Append a numeric discriminator
    Disambiguate,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Error => CollisionPolicy::Error,
            CollisionArg::Disambiguate => CollisionPolicy::Disambiguate,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        println!("{} Verbose mode enabled", "→".cyan());
    }

    match cli.command {
        Commands::Parse { spec } => {
            parse_command(&spec, cli.verbose)?;
        }

        Commands::Generate {
            spec,
            output,
            namespace,
            name,
            on_collision,
            no_pagination_unwrap,
        } => {
            let options = GenerationOptions {
                root_namespace: namespace,
                output_name: name,
                on_collision: on_collision.into(),
                pagination_unwrap: !no_pagination_unwrap,
            };
            generate_command(&spec, &output, options, cli.verbose)?;
        }

        Commands::Run { config, private } => {
            run_command(&config, private.as_deref(), cli.verbose)?;
        }
    }

    Ok(())
}

fn parse_command(spec_path: &Path, verbose: bool) -> Result<()> {
    println!("{} Parsing spec file: {}", "→".cyan(), spec_path.display());

    let api = load_api(spec_path, GenerationOptions::default(), &ConsoleReporter)?;

    println!("\n{}", "✓ Parse successful!".green().bold());
    print_summary(&api, verbose);

    Ok(())
}

fn generate_command(
    spec_path: &Path,
    output: &Path,
    options: GenerationOptions,
    verbose: bool,
) -> Result<()> {
    println!(
        "{} Generating artifacts from: {}",
        "→".cyan(),
        spec_path.display()
    );

    if verbose {
        println!("  Namespace: {}", options.root_namespace);
        println!("  Name: {}", options.output_name);
        println!("  On collision: {}", options.on_collision);
        println!("  Pagination unwrap: {}", options.pagination_unwrap);
        println!("  Output: {}", output.display());
    }

    let reporter = ConsoleReporter;
    let api = load_api(spec_path, options.clone(), &reporter)?;

    println!(
        "{} Parsed {} operations and {} entity records",
        "✓".green(),
        api.operations.len(),
        api.registry.len()
    );

    let generator = ArtifactGenerator::new(api, options).context("Failed to create generator")?;
    let written = generator
        .generate_to_directory(output, &reporter)
        .context("Failed to generate artifacts")?;

    println!("\n{}", "✓ Generation complete!".green().bold());
    println!("\n{}", "Generated files:".bold());
    for path in &written {
        println!("  📄 {}", path.display());
    }

    Ok(())
}

fn run_command(config_path: &Path, private: Option<&Path>, verbose: bool) -> Result<()> {
    let jobs = config::load_jobs(config_path, private)?;

    if verbose {
        println!("{} Loaded {} jobs", "→".cyan(), jobs.len());
    }

    for job in jobs {
        run_job(&job, verbose).with_context(|| format!("Job {} failed", job.id))?;
    }

    Ok(())
}

fn run_job(job: &Job, verbose: bool) -> Result<()> {
    match job.script {
        Script::Openapi => {
            println!(
                "{} {}",
                "ℹ".blue(),
                format!("[SCRIPT: openapi for ID: {}]", job.id).blue()
            );
            generate_command(&job.spec, &job.output_folder, job.options.clone(), verbose)
        }
    }
}

/// Load and parse a document, reporting the load phase
fn load_api(
    spec_path: &Path,
    options: GenerationOptions,
    reporter: &dyn Reporter,
) -> Result<ApiDefinition> {
    const LABEL: &str = "openapi config";

    reporter.started(LABEL, Phase::Load);
    let parsed = OpenApiParser::from_file(spec_path).and_then(|parser| {
        parser.with_options(options).parse()
    });

    match parsed {
        Ok(api) => {
            reporter.finished(LABEL, Phase::Load);
            Ok(api)
        }
        Err(e) => {
            reporter.failed(LABEL, Phase::Load, &e);
            Err(e).with_context(|| format!("Failed to load {}", spec_path.display()))
        }
    }
}

fn print_summary(api: &ApiDefinition, verbose: bool) {
    println!("\n{}", "API Definition:".bold());
    println!("  Title: {}", api.title.yellow());
    println!("  Version: {}", api.version.yellow());
    if let Some(server) = &api.server_url {
        println!("  Server: {}", server.yellow());
    }
    println!("  Operations: {}", api.operations.len());
    println!("  Component schemas: {}", api.schemas.len());
    println!("  Entity records: {}", api.registry.len());

    if !verbose {
        return;
    }

    println!("\n{}", "Operations:".bold());
    for op in &api.operations {
        let args: Vec<&str> = op.input_args.iter().map(|arg| arg.kind.as_str()).collect();
        println!(
            "  • {} {} {}",
            op.function_name.cyan(),
            op.method.as_str().to_uppercase(),
            op.url_template
        );
        if !args.is_empty() {
            println!("    Args: {}", args.join(", "));
        }
        if let Some(success) = &op.success {
            println!("    Returns: {}", success.type_ref);
        }
    }

    if !api.registry.is_empty() {
        println!("\n{}", "Entity records:".bold());
        for record in api.registry.records() {
            let root = if api.registry.roots().contains(&record.name) {
                " (root)"
            } else {
                ""
            };
            println!("  • {}{} from {}", record.name.cyan(), root, record.origin);
            println!("    Fields: {}", record.fields.len());
        }
    }
}
