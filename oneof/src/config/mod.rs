//! Checker configuration
//!
//! Settings are read from a TOML file:
//!
//! ```toml
//! max_counterexamples = 5
//! refine_literals = true
//! exhaustive_by_default = false
//! total_by_default = false
//! ```
//!
//! Every field is optional. Without a file the defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{CompileError, Result};

/// File looked up next to the checked source when no `--config` is given
pub const CONFIG_FILE_NAME: &str = "oneof.toml";

/// Checker configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Counterexamples listed per exhaustiveness diagnostic
    pub max_counterexamples: usize,
    /// Report literal groups that do not cover their type's value range
    pub refine_literals: bool,
    /// Check exhaustiveness for every `match`, requested or not
    pub exhaustive_by_default: bool,
    /// Check totality for every `match`, requested or not
    pub total_by_default: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            max_counterexamples: 3,
            refine_literals: true,
            exhaustive_by_default: false,
            total_by_default: false,
        }
    }
}

impl CheckConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CompileError::config_error(e.to_string()))
    }

    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| CompileError::io_error(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text).map_err(|e| {
            CompileError::config_error(format!("{}: {}", path.display(), e.message()))
        })
    }

    /// Use `explicit` if given, else `oneof.toml` beside `source`, else
    /// the defaults
    pub fn discover(explicit: Option<&Path>, source: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = sibling_config(source);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using discovered config");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }

    pub fn max_counterexamples(mut self, max: usize) -> Self {
        self.max_counterexamples = max;
        self
    }

    pub fn refine_literals(mut self, refine: bool) -> Self {
        self.refine_literals = refine;
        self
    }

    pub fn exhaustive_by_default(mut self, exhaustive: bool) -> Self {
        self.exhaustive_by_default = exhaustive;
        self
    }

    pub fn total_by_default(mut self, total: bool) -> Self {
        self.total_by_default = total;
        self
    }
}

fn sibling_config(source: &Path) -> PathBuf {
    match source.parent() {
        Some(dir) => dir.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}
