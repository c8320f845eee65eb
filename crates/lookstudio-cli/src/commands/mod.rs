pub mod config;
pub mod edit;
pub mod info;
pub mod styles;

use std::path::Path;

use anyhow::{Context, Result};
use lookstudio_core::config::StudioConfig;

/// Load the config file when one was given, otherwise use the defaults.
pub fn load_config(path: Option<&Path>) -> Result<StudioConfig> {
    match path {
        Some(path) => StudioConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(StudioConfig::default()),
    }
}
