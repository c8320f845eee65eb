use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    API_KEY_ENV_VARS, DEFAULT_ACCEPTED_MIME_TYPES, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL,
    DEFAULT_MAX_IMAGE_BYTES, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RESULT_MIME,
};
use crate::error::Result;
use crate::presets::StyleCatalog;

/// Full application configuration, stored as TOML.
///
/// Every section is optional in the file; missing sections and fields take
/// their defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub service: ServiceConfig,
    pub intake: IntakeConfig,
    pub styles: StyleCatalog,
}

impl StudioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Remote edit service settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub endpoint: String,
    pub model: String,
    /// Falls back to the `GEMINI_API_KEY` / `API_KEY` environment variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Presentation type for results the service returns without one.
    pub result_mime_type: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            result_mime_type: DEFAULT_RESULT_MIME.to_string(),
        }
    }
}

impl ServiceConfig {
    /// The configured key, or the first non-empty one found in the environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|var| std::env::var(var).ok())
                    .find(|key| !key.trim().is_empty())
            })
    }
}

/// Rules applied to a selected file before it becomes the original image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub accepted_mime_types: Vec<String>,
    pub max_image_bytes: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            accepted_mime_types: DEFAULT_ACCEPTED_MIME_TYPES
                .iter()
                .map(|mime| mime.to_string())
                .collect(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
        }
    }
}
