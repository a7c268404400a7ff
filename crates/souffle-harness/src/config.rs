//! TOML configuration for the harness

use serde::Deserialize;
use std::path::Path;

/// Harness configuration loaded from a TOML file.
///
/// Every field has a default matching the layout the corpus repositories
/// use, so running without a config file works out of the box.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Converter executable, resolved relative to each case directory
    pub converter: String,

    /// Compiler executable
    pub compiler: String,

    /// Library search path handed to the compiler via `-L`, resolved
    /// relative to each case directory
    pub library_path: String,

    /// Target dialect name; also the stem of the converted file
    pub dialect: String,

    /// Substring marking a local case directory
    pub case_marker: String,

    /// Input file name for local cases
    pub local_input: String,

    /// Remote corpus URL listed and exported with the svn client
    pub remote_url: String,

    /// svn client executable
    pub svn: String,

    /// Remote discovery stops once this many cases were attempted
    pub remote_case_limit: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            converter: "../../tools/souffle-converter.py".to_string(),
            compiler: "ddlog".to_string(),
            library_path: "../../lib".to_string(),
            dialect: "souffle".to_string(),
            case_marker: "souffle".to_string(),
            local_input: "test.dl".to_string(),
            remote_url: "https://github.com/souffle-lang/souffle/trunk/tests/evaluation"
                .to_string(),
            svn: "svn".to_string(),
            remote_case_limit: 10,
        }
    }
}

/// Error loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

impl HarnessConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Try to load from the given or default location, fall back to defaults if not found.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::load(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: {}", e);
                    Self::default()
                }
            }
        } else {
            // Try default location
            let default_path = Path::new("souffle-tests.toml");
            if default_path.exists() {
                match Self::load(default_path) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("Warning: {}", e);
                        Self::default()
                    }
                }
            } else {
                Self::default()
            }
        }
    }

    /// Name of the file the converter writes into the case directory.
    pub fn converted_file(&self) -> String {
        format!("{}.dl", self.dialect)
    }
}
