//! Colored console progress output

use colored::*;
use restgen_common::GeneratorError;
use restgen_generator::{Phase, Reporter};

/// Prints one line per phase transition of every artifact
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn started(&self, artifact: &str, phase: Phase) {
        println!("{} {}", "→".cyan(), started_message(artifact, phase).cyan());
    }

    fn finished(&self, artifact: &str, phase: Phase) {
        println!("{} {}", "✓".green(), finished_message(artifact, phase).green());
    }

    fn failed(&self, artifact: &str, phase: Phase, error: &GeneratorError) {
        eprintln!("{} {}", "✗".red(), failed_message(artifact, phase, error).red());
    }
}

fn verbs(phase: Phase) -> (&'static str, &'static str) {
    match phase {
        Phase::Load => ("Loading", "loaded"),
        Phase::Generate => ("Generating", "generated"),
        Phase::Save => ("Saving", "saved"),
    }
}

fn started_message(artifact: &str, phase: Phase) -> String {
    format!("{} {}...", verbs(phase).0, artifact)
}

fn finished_message(artifact: &str, phase: Phase) -> String {
    format!("{} {}!", artifact, verbs(phase).1)
}

fn failed_message(artifact: &str, phase: Phase, error: &GeneratorError) -> String {
    format!("{} {} failed: {}", verbs(phase).0, artifact, error)
}
