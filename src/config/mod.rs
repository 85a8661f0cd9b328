//! Adapter Configuration
//!
//! Construction-time settings ([`AdapterConfig`]), per-track options
//! ([`PlaybackOptions`]) and the validated panning layout
//! ([`PanningConfig`]).

pub mod options;
pub mod panning;

pub use options::{PlaybackOptions, NO_TRACK};
pub use panning::{PanningConfig, PANNING_LEN};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Construction-time adapter settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Record trace streams unless a track's options say otherwise
    pub scope_enabled: bool,
    /// Panning for all voices of all chip slots
    pub panning: Option<Vec<f32>>,
}

impl AdapterConfig {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Enable trace streams by default
    pub fn with_scope(mut self, enabled: bool) -> Self {
        self.scope_enabled = enabled;
        self
    }

    /// Set the panning array
    pub fn with_panning(mut self, panning: Vec<f32>) -> Self {
        self.panning = Some(panning);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_config_json() {
        let config = AdapterConfig::from_json(r#"{"scopeEnabled": true}"#).unwrap();
        assert!(config.scope_enabled);
        assert!(config.panning.is_none());
    }

    #[test]
    fn test_adapter_config_builder() {
        let config = AdapterConfig::default()
            .with_scope(true)
            .with_panning(vec![0.25; PANNING_LEN]);
        assert!(config.scope_enabled);
        assert_eq!(config.panning.as_ref().map(Vec::len), Some(PANNING_LEN));
    }
}
