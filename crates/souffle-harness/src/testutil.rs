//! Shared fixtures for the harness's own tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;

/// Writes an executable shell script standing in for an external tool.
pub fn fake_tool(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();

    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();

    path
}

/// Config pointing the converter and compiler at stub tools.
pub fn stub_config(converter: &Path, compiler: &Path) -> HarnessConfig {
    HarnessConfig {
        converter: converter.display().to_string(),
        compiler: compiler.display().to_string(),
        ..HarnessConfig::default()
    }
}
