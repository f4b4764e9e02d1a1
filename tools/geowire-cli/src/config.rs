//! CLI configuration file
//!
//! ```toml
//! [limits]
//! max_block_len = 1048576
//! max_list_len = 65536
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use geowire_core::DecodeLimits;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub limits: DecodeLimits,
}

impl CliConfig {
    /// Load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse config from string
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Config file if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
