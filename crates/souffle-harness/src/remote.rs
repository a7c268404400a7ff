//! Discovery of corpus entries exported from a remote repository.

use std::fs;
use std::path::Path;
use tracing::warn;

use crate::case::run_and_record;
use crate::command::run_command;
use crate::config::HarnessConfig;
use crate::report::RunStats;

/// Result of a remote discovery pass.
#[derive(Debug)]
pub enum RemoteOutcome {
    /// The remote corpus was listed and cases were run
    Ran(RunStats),
    /// The remote corpus could not be listed; remote testing was skipped.
    /// This is graceful degradation, not an error.
    Unavailable,
}

/// Lists the remote corpus with the svn client and runs each listed
/// directory as a case, exporting it first when no local copy exists.
///
/// A passing case's exported directory is removed afterwards so corpus
/// copies do not accumulate. The pass stops once the attempted count
/// reaches the configured ceiling.
pub fn run_remote_examples(config: &HarnessConfig, root: &Path) -> RemoteOutcome {
    let listing = match run_command(&config.svn, &["ls", &config.remote_url], root) {
        Ok(inv) if inv.success() => inv.stdout,
        Ok(_) => return RemoteOutcome::Unavailable,
        Err(err) => {
            warn!("remote listing failed: {}", err);
            return RemoteOutcome::Unavailable;
        }
    };

    let mut stats = RunStats::default();

    for name in listing.lines().filter_map(directory_entry) {
        // Bound the run against an externally controlled corpus
        if stats.attempted >= config.remote_case_limit {
            break;
        }

        let dir = root.join(name);
        if !dir.is_dir() {
            let url = format!("{}/{}", config.remote_url, name);
            match run_command(&config.svn, &["export", &url], root) {
                Ok(inv) if inv.success() => {}
                Ok(_) => {
                    warn!("export of {} failed, skipping", name);
                    continue;
                }
                Err(err) => {
                    warn!("export of {} failed: {}", name, err);
                    continue;
                }
            }
        }

        let input = format!("{}.dl", name);
        let passed = run_and_record(config, &mut stats, name, &dir, &input);

        if passed {
            if let Err(err) = fs::remove_dir_all(&dir) {
                warn!("could not remove {}: {}", dir.display(), err);
            }
        }
    }

    RemoteOutcome::Ran(stats)
}

/// `svn ls` prints one entry per line, directories with a trailing slash.
fn directory_entry(line: &str) -> Option<&str> {
    line.trim().strip_suffix('/').filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{fake_tool, stub_config};
    use tempfile::TempDir;

    fn remote_config(
        dir: &Path,
        svn_body: &str,
        converter_body: &str,
        compiler_body: &str,
    ) -> HarnessConfig {
        let converter = fake_tool(dir, "converter", converter_body);
        let compiler = fake_tool(dir, "compiler", compiler_body);
        let svn = fake_tool(dir, "svn", svn_body);

        let mut config = stub_config(&converter, &compiler);
        config.svn = svn.display().to_string();
        config.remote_url = "https://corpus.example.org/evaluation".to_string();
        config
    }

    #[test]
    fn failed_listing_is_unavailable_and_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let converter_log = dir.path().join("converter.log");
        let config = remote_config(
            dir.path(),
            "exit 1",
            &format!("echo ran >> {}\nexit 0", converter_log.display()),
            "exit 0",
        );

        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        match run_remote_examples(&config, &root) {
            RemoteOutcome::Unavailable => {}
            other => panic!("expected Unavailable, got {:?}", other),
        }
        assert!(!converter_log.exists(), "cases ran despite failed listing");
    }

    #[test]
    fn missing_svn_client_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let mut config = remote_config(dir.path(), "exit 0", "exit 0", "exit 0");
        config.svn = dir.path().join("no-svn-here").display().to_string();

        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        assert!(matches!(
            run_remote_examples(&config, &root),
            RemoteOutcome::Unavailable
        ));
    }

    #[test]
    fn exports_runs_and_cleans_up_passing_cases() {
        let dir = TempDir::new().unwrap();
        let converter_log = dir.path().join("converter.log");
        let svn_body = r#"if [ "$1" = "ls" ]; then
  printf 'souffle_r1/\n'
  exit 0
fi
if [ "$1" = "export" ]; then
  mkdir -p "${2##*/}"
  exit 0
fi
exit 1"#;
        let config = remote_config(
            dir.path(),
            svn_body,
            &format!("echo \"$1\" >> {}\nexit 0", converter_log.display()),
            "exit 0",
        );

        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        let stats = match run_remote_examples(&config, &root) {
            RemoteOutcome::Ran(stats) => stats,
            other => panic!("expected Ran, got {:?}", other),
        };

        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.passed, 1);
        // Input file name is derived from the directory name
        let logged = fs::read_to_string(&converter_log).unwrap();
        assert_eq!(logged.trim(), "souffle_r1.dl");
        // Passing exports are cleaned up
        assert!(!root.join("souffle_r1").exists());
    }

    #[test]
    fn failing_case_directory_is_left_in_place() {
        let dir = TempDir::new().unwrap();
        let svn_body = r#"if [ "$1" = "ls" ]; then
  printf 'souffle_r1/\n'
  exit 0
fi
if [ "$1" = "export" ]; then
  mkdir -p "${2##*/}"
  exit 0
fi
exit 1"#;
        let config = remote_config(dir.path(), svn_body, "exit 0", "exit 1");

        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        let stats = match run_remote_examples(&config, &root) {
            RemoteOutcome::Ran(stats) => stats,
            other => panic!("expected Ran, got {:?}", other),
        };

        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.passed, 0);
        assert!(root.join("souffle_r1").is_dir());
    }

    #[test]
    fn failed_export_skips_the_entry_but_continues() {
        let dir = TempDir::new().unwrap();
        let svn_body = r#"if [ "$1" = "ls" ]; then
  printf 'souffle_bad/\nsouffle_ok/\n'
  exit 0
fi
if [ "$1" = "export" ]; then
  case "$2" in *bad*) exit 1 ;; esac
  mkdir -p "${2##*/}"
  exit 0
fi
exit 1"#;
        let config = remote_config(dir.path(), svn_body, "exit 0", "exit 0");

        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        let stats = match run_remote_examples(&config, &root) {
            RemoteOutcome::Ran(stats) => stats,
            other => panic!("expected Ran, got {:?}", other),
        };

        assert_eq!(stats.attempted, 1);
        assert_eq!(stats.passed, 1);
    }

    #[test]
    fn present_local_copy_is_not_re_exported() {
        let dir = TempDir::new().unwrap();
        let export_log = dir.path().join("export.log");
        let svn_body = format!(
            r#"if [ "$1" = "ls" ]; then
  printf 'souffle_r1/\n'
  exit 0
fi
if [ "$1" = "export" ]; then
  echo "$2" >> {}
  mkdir -p "${{2##*/}}"
  exit 0
fi
exit 1"#,
            export_log.display()
        );
        let config = remote_config(dir.path(), &svn_body, "exit 0", "exit 0");

        let root = dir.path().join("root");
        fs::create_dir_all(root.join("souffle_r1")).unwrap();

        let stats = match run_remote_examples(&config, &root) {
            RemoteOutcome::Ran(stats) => stats,
            other => panic!("expected Ran, got {:?}", other),
        };

        assert_eq!(stats.attempted, 1);
        assert!(!export_log.exists(), "svn export ran for a present copy");
    }

    #[test]
    fn attempts_stop_at_the_case_ceiling() {
        let dir = TempDir::new().unwrap();
        let svn_body = r#"if [ "$1" = "ls" ]; then
  i=1
  while [ $i -le 12 ]; do
    echo "souffle_r$i/"
    i=$((i + 1))
  done
  exit 0
fi
if [ "$1" = "export" ]; then
  mkdir -p "${2##*/}"
  exit 0
fi
exit 1"#;
        let config = remote_config(dir.path(), svn_body, "exit 0", "exit 0");

        let root = dir.path().join("root");
        fs::create_dir(&root).unwrap();

        let stats = match run_remote_examples(&config, &root) {
            RemoteOutcome::Ran(stats) => stats,
            other => panic!("expected Ran, got {:?}", other),
        };

        assert_eq!(stats.attempted, 10);
        // Entries past the ceiling were never exported
        assert!(!root.join("souffle_r11").exists());
        assert!(!root.join("souffle_r12").exists());
    }

    #[test]
    fn listing_entries_without_trailing_slash_are_skipped() {
        assert_eq!(directory_entry("souffle_r1/"), Some("souffle_r1"));
        assert_eq!(directory_entry("  souffle_r2/  "), Some("souffle_r2"));
        assert_eq!(directory_entry("README.md"), None);
        assert_eq!(directory_entry("/"), None);
        assert_eq!(directory_entry(""), None);
    }
}
