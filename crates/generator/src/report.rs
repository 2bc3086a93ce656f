//! Progress reporting seam

use restgen_common::GeneratorError;
use std::fmt;

/// Stage of an artifact's lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Load,
    Generate,
    Save,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Load => write!(f, "load"),
            Phase::Generate => write!(f, "generate"),
            Phase::Save => write!(f, "save"),
        }
    }
}

/// Receives start, completion and failure of every artifact phase
#[cfg_attr(test, mockall::automock)]
pub trait Reporter {
    fn started(&self, artifact: &str, phase: Phase);

    fn finished(&self, artifact: &str, phase: Phase);

    fn failed(&self, artifact: &str, phase: Phase, error: &GeneratorError);
}

/// Reporter that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn started(&self, _artifact: &str, _phase: Phase) {}

    fn finished(&self, _artifact: &str, _phase: Phase) {}

    fn failed(&self, _artifact: &str, _phase: Phase, _error: &GeneratorError) {}
}
