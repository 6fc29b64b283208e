//! Configuration loading and management
//!
//! Handles parsing of `.tm.toml` configuration files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::task::Priority;

pub const CONFIG_FILE: &str = ".tm.toml";

const MAX_ID_SUFFIX_LEN: usize = 16;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Task store configuration
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Category configuration
    #[serde(default)]
    pub categories: CategoriesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tasks: TasksConfig::default(),
            categories: CategoriesConfig::default(),
        }
    }
}

/// Task store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Prefix for generated task ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Minimum length of the generated id suffix
    #[serde(default = "default_id_min_len")]
    pub id_min_len: usize,

    /// Priority assigned when none is given
    #[serde(default = "default_priority")]
    pub default_priority: Priority,

    /// Seed new sessions from the sample task list
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_id_prefix() -> String {
    "task".to_string()
}

fn default_id_min_len() -> usize {
    4
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_seed() -> bool {
    true
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            id_prefix: default_id_prefix(),
            id_min_len: default_id_min_len(),
            default_priority: default_priority(),
            seed: default_seed(),
        }
    }
}

/// Category configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Categories offered even when no task uses them
    #[serde(default = "default_categories")]
    pub defaults: Vec<String>,
}

fn default_categories() -> Vec<String> {
    crate::category::DEFAULT_CATEGORIES
        .iter()
        .map(|name| name.to_string())
        .collect()
}

impl Default for CategoriesConfig {
    fn default() -> Self {
        Self {
            defaults: default_categories(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            Error::InvalidConfig(format!("cannot read {}: {err}", path.display()))
        })?;
        let config: Config = toml::from_str(&raw)
            .map_err(|err| Error::InvalidConfig(format!("{}: {err}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.tm.toml` from the working directory, falling back to defaults
    /// when the file does not exist.
    pub fn load_default() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<()> {
        if self.tasks.id_prefix.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "tasks.id_prefix cannot be empty".to_string(),
            ));
        }
        if self.tasks.id_min_len == 0 || self.tasks.id_min_len > MAX_ID_SUFFIX_LEN {
            return Err(Error::InvalidConfig(format!(
                "tasks.id_min_len must be between 1 and {MAX_ID_SUFFIX_LEN}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = Config::default();
        assert_eq!(config.tasks.id_prefix, "task");
        assert_eq!(config.tasks.id_min_len, 4);
        assert_eq!(config.tasks.default_priority, Priority::Medium);
        assert!(config.tasks.seed);
        assert_eq!(config.categories.defaults.len(), 5);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[tasks]\nid_prefix = \"todo\"\n").expect("parse");
        assert_eq!(config.tasks.id_prefix, "todo");
        assert_eq!(config.tasks.id_min_len, 4);
        assert!(config.tasks.seed);
    }

    #[test]
    fn rejects_zero_min_len() {
        let config: Config = toml::from_str("[tasks]\nid_min_len = 0\n").expect("parse");
        assert!(config.validate().is_err());
    }
}
