//! Run result accumulation and reporting

use serde::{Deserialize, Serialize};

/// Accumulated results of a harness run.
///
/// Returned by each discovery pass and merged by the entry point; there is
/// no global counter state anywhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Number of cases entered into the case runner
    pub attempted: usize,
    /// Number of cases that survived both conversion and compilation
    pub passed: usize,
    /// Failed case details
    pub failures: Vec<CaseFailure>,
}

/// Information about a failed case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFailure {
    /// Case directory name
    pub case: String,
    /// Which step failed and how
    pub reason: String,
}

impl RunStats {
    /// Record a case that passed both steps.
    pub fn record_pass(&mut self) {
        self.attempted += 1;
        self.passed += 1;
    }

    /// Record a case that failed, with a human-readable reason.
    pub fn record_failure(&mut self, case: impl Into<String>, reason: impl Into<String>) {
        self.attempted += 1;
        self.failures.push(CaseFailure {
            case: case.into(),
            reason: reason.into(),
        });
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: RunStats) {
        self.attempted += other.attempted;
        self.passed += other.passed;
        self.failures.extend(other.failures);
    }

    /// True when every attempted case passed; trivially true for an empty run.
    pub fn all_passed(&self) -> bool {
        self.passed == self.attempted
    }

    /// The end-of-run summary line.
    pub fn summary_line(&self) -> String {
        format!("Ran {} out of which {} passed", self.attempted, self.passed)
    }

    /// Print the summary line, plus failure details if there were any.
    pub fn print_summary(&self) {
        println!("{}", self.summary_line());

        if !self.failures.is_empty() {
            println!("\nFailures:");
            for failure in &self.failures {
                println!("  {} - {}", failure.case, failure.reason);
            }
        }
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
