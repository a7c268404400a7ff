//! Child process execution with captured output.

use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured result of one external tool invocation.
#[derive(Debug)]
pub struct Invocation {
    /// Exit status of the child; -1 if it was terminated by a signal
    pub status: i32,
    /// Everything the child wrote to stdout
    pub stdout: String,
}

impl Invocation {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Error launching an external tool
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: io::Error,
    },
}

/// Runs `program` with `args`, using `dir` as the child's working directory,
/// and waits for it to finish.
///
/// Stdout is captured and returned with the exit status. On a non-zero exit
/// the captured stderr is forwarded verbatim to this process's stderr so the
/// operator sees the tool's diagnostics. No timeout: a hung child blocks the
/// run.
pub fn run_command(program: &str, args: &[&str], dir: &Path) -> Result<Invocation, CommandError> {
    debug!(program, ?args, dir = %dir.display(), "running");

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| CommandError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let status = output.status.code().unwrap_or(-1);
    if status != 0 && !output.stderr.is_empty() {
        let _ = io::stderr().write_all(&output.stderr);
    }

    Ok(Invocation {
        status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    })
}
