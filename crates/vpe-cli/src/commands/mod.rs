//! CLI command implementations

pub mod build;
pub mod classify;
pub mod curve;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads and parses a YAML file.
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("Failed to parse: {}", path.display()))
}
