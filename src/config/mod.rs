use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{ProbeError, Result};

const APP_DIR: &str = "check_budgets";
const CONFIG_FILE: &str = "config.json";

/// Defaults for a probe run. Command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Budget document to read, `-` for standard input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    /// Evaluate only this budget when no name is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Extra tracing directive, e.g. `budget_probe=debug`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

/// Locates and reads [`ProbeConfig`] files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
    explicit: bool,
}

impl ConfigLoader {
    /// Uses `<config dir>/check_budgets/config.json`; a missing file means defaults.
    pub fn new() -> Self {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            path: base.join(APP_DIR).join(CONFIG_FILE),
            explicit: false,
        }
    }

    /// Uses the given file, which must exist.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            explicit: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ProbeConfig> {
        if !self.path.exists() {
            if self.explicit {
                return Err(ProbeError::Config(format!(
                    "{} does not exist",
                    self.path.display()
                )));
            }
            return Ok(ProbeConfig::default());
        }
        let data = fs::read_to_string(&self.path).map_err(|err| {
            ProbeError::Config(format!("cannot read {}: {err}", self.path.display()))
        })?;
        serde_json::from_str(&data)
            .map_err(|err| ProbeError::Config(format!("{}: {err}", self.path.display())))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
