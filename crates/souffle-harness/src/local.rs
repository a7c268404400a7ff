//! Discovery of hand-written examples in a local corpus directory.

use std::fs;
use std::io;
use std::path::Path;

use crate::case::run_and_record;
use crate::config::HarnessConfig;
use crate::report::RunStats;

/// Runs every example directory under `root` whose name contains the case
/// marker, each with the fixed local input file.
///
/// Plain files and unrelated directories are skipped. Iteration follows
/// filesystem listing order, which is unspecified.
pub fn run_local_examples(config: &HarnessConfig, root: &Path) -> io::Result<RunStats> {
    let mut stats = RunStats::default();

    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.contains(&config.case_marker) {
            continue;
        }

        run_and_record(config, &mut stats, &name, &path, &config.local_input);
    }

    Ok(stats)
}
