use std::{fs, path::Path};

use serde::Deserialize;

use crate::{DagflowError, Result};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// prefix of the positional vertex names, defaults to "p"
    pub vertex_prefix: String,
    /// resolve edge labels from the name table during normalization, defaults to true
    pub resolve_names: bool,
    /// reject cyclic graphs at the end of normalization, defaults to false
    pub check_cycles: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vertex_prefix: "p".to_string(),
            resolve_names: true,
            check_cycles: false,
        }
    }
}

impl Config {
    pub fn create<T: AsRef<Path>>(path: T) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())
            .map_err(|e| DagflowError::Config(format!("failed to load config file {:?}: {}", path.as_ref(), e)))?;

        Self::load_from_str(data.as_str())
    }

    pub fn load_from_str(toml_str: &str) -> Result<Self> {
        let config = toml::from_str::<Config>(toml_str)?;
        if config.vertex_prefix.is_empty() {
            return Err(DagflowError::Config("vertex_prefix must not be empty".to_string()));
        }
        Ok(config)
    }
}
