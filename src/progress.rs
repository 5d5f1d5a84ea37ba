//! Progress reporting for the ingestion pipeline
//!
//! Extraction, chunking and embedding can take seconds to minutes on large
//! documents, so each stage announces itself before the pipeline blocks on
//! it.

use std::io::{self, Write};

/// Reports pipeline phases to stderr as they run.
pub struct ProgressReporter {
    current_phase: Option<String>,
    /// Whether to show output (false for tests/quiet mode)
    show_output: bool,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            current_phase: None,
            show_output: true,
        }
    }

    /// Create a quiet reporter (no output).
    pub fn quiet() -> Self {
        Self {
            current_phase: None,
            show_output: false,
        }
    }

    /// Start a new phase of processing.
    pub fn start_phase(&mut self, phase: &str) {
        self.current_phase = Some(phase.to_string());
        if self.show_output {
            eprint!("  {}... ", phase);
            let _ = io::stderr().flush();
        }
    }

    /// Finish the current phase, optionally with a short detail.
    pub fn finish_phase(&mut self, detail: Option<&str>) {
        if self.show_output && self.current_phase.is_some() {
            match detail {
                Some(d) => eprintln!("done ({})", d),
                None => eprintln!("done"),
            }
        }
        self.current_phase = None;
    }

    /// Mark the current phase as failed before the error propagates.
    pub fn fail_phase(&mut self) {
        if self.show_output && self.current_phase.is_some() {
            eprintln!("failed");
        }
        self.current_phase = None;
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_lifecycle() {
        let mut reporter = ProgressReporter::quiet();

        reporter.start_phase("Extracting text");
        assert!(reporter.current_phase.is_some());

        reporter.finish_phase(Some("42 chars"));
        assert!(reporter.current_phase.is_none());
    }

    #[test]
    fn test_fail_clears_phase() {
        let mut reporter = ProgressReporter::quiet();
        reporter.start_phase("Embedding chunks");
        reporter.fail_phase();
        assert!(reporter.current_phase.is_none());
    }
}
