use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fpraster_core::LayerStack;
use fpraster_renderer::RenderOptions;

use crate::error::IoError;

/// A named render configuration: canvas settings plus the layer table,
/// stored as pretty-printed JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub options: RenderOptions,
    #[serde(default)]
    pub layers: LayerStack,
}

impl Default for RenderProfile {
    fn default() -> Self {
        Self::new("default")
    }
}

impl RenderProfile {
    /// A 2048 px, 2 mm profile over the front-side layer table.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            options: RenderOptions::default(),
            layers: LayerStack::front(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let profile: Self = serde_json::from_str(&text).map_err(IoError::json_at(path))?;
        log::info!(
            "loaded profile '{}' from {} ({} layers)",
            profile.name,
            path.display(),
            profile.layers.layer_count()
        );
        Ok(profile)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(IoError::json_at(path))?;
        fs::write(path, json)?;
        log::debug!("saved profile '{}' to {}", self.name, path.display());
        Ok(())
    }
}
