//! Runs one example through the convert-then-compile pipeline.

use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use crate::command::{CommandError, run_command};
use crate::config::HarnessConfig;
use crate::report::RunStats;

/// Verdict for a single example case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Both the converter and the compiler exited zero
    Passed,
    /// The converter exited non-zero; the compiler was not invoked
    ConversionFailed,
    /// The converter succeeded but the compiler exited non-zero
    CompileFailed,
}

impl CaseOutcome {
    pub fn passed(self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CaseOutcome::Passed => "passed",
            CaseOutcome::ConversionFailed => "conversion failed",
            CaseOutcome::CompileFailed => "compilation failed",
        };
        f.write_str(s)
    }
}

/// Converts and compiles the example in `dir`.
///
/// Both tools run with `dir` as their working directory, so relative tool
/// and library paths resolve against the case directory. The compiler only
/// runs when conversion exits zero.
pub fn run_case(
    config: &HarnessConfig,
    dir: &Path,
    input: &str,
) -> Result<CaseOutcome, CommandError> {
    info!("testing {}", dir.display());

    let conversion = run_command(&config.converter, &[input, &config.dialect], dir)?;
    if !conversion.success() {
        return Ok(CaseOutcome::ConversionFailed);
    }

    let converted = config.converted_file();
    let compile = run_command(
        &config.compiler,
        &["-i", &converted, "-L", &config.library_path],
        dir,
    )?;
    if !compile.success() {
        return Ok(CaseOutcome::CompileFailed);
    }

    Ok(CaseOutcome::Passed)
}

/// Runs the case and records the verdict into `stats` exactly once:
/// attempted unconditionally, passed only on success. Returns whether the
/// case passed.
///
/// A tool that cannot even be launched counts as that case's failure rather
/// than aborting the run.
pub fn run_and_record(
    config: &HarnessConfig,
    stats: &mut RunStats,
    name: &str,
    dir: &Path,
    input: &str,
) -> bool {
    match run_case(config, dir, input) {
        Ok(CaseOutcome::Passed) => {
            stats.record_pass();
            true
        }
        Ok(outcome) => {
            stats.record_failure(name, outcome.to_string());
            false
        }
        Err(err) => {
            warn!("{}: {}", name, err);
            stats.record_failure(name, err.to_string());
            false
        }
    }
}
