use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default scanning tool the drill validates.
pub const DEFAULT_TOOL: &str = "git-secrets";
/// Default hard timeout applied to every subprocess, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default name of the seeded file inside the temporary repository.
pub const DEFAULT_SEED_FILENAME: &str = "drill.txt";
/// Default message for the intercepted commit attempt.
pub const DEFAULT_COMMIT_MESSAGE: &str = "test pre-commit hook";

/// Drill settings loaded from `.firedrill.toml`.
///
/// Every field has a working default; both the file and any individual key
/// are optional. CLI flags override file values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name of the scanning tool binary expected on `PATH`.
    pub tool: String,

    /// Hard timeout applied to every subprocess, in seconds.
    pub timeout_secs: u64,

    /// Name of the seeded file inside the temporary repository.
    pub seed_filename: String,

    /// Message used for the intercepted commit attempt.
    pub commit_message: String,

    /// Diagnostic substring that proves the scanning hook rejected the
    /// commit. Overridable because the tool's message format is not a
    /// stable contract.
    pub marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            seed_filename: DEFAULT_SEED_FILENAME.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            marker: crate::PROHIBITED_MARKER.to_string(),
        }
    }
}

impl Config {
    /// Creates a default configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a `.firedrill.toml` file.
    ///
    /// Returns the default configuration if the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = read_file(path)?;
        parse_toml(path, &content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_toml(path: &Path, content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Errors that can occur when reading or parsing a `.firedrill.toml`
/// configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config '{path}': {source}")]
    Read {
        /// Path to the config file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid TOML or unexpected values.
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// Path to the config file that could not be parsed.
        path: PathBuf,
        /// The underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },
}
