use crate::error::ConfigError;
use crate::layout::{LayoutPreset, PresetParams};
use serde::{Deserialize, Serialize};
use std::fs;

/// Editor settings, loaded from JSON. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub layout: LayoutConfig,
    /// Filter directive used by the CLI when `RUST_LOG` is unset.
    pub log_level: String,
    /// Oldest undo steps are dropped past this many entries. Unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_history_entries: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            log_level: "info".to_string(),
            max_history_entries: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Size used for nodes the renderer has not measured yet.
    pub default_node_width: f64,
    pub default_node_height: f64,
    pub symmetric_tree: PresetParams,
    pub hierarchical: PresetParams,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_node_width: 180.0,
            default_node_height: 64.0,
            symmetric_tree: PresetParams::symmetric_tree(),
            hierarchical: PresetParams::hierarchical(),
        }
    }
}

impl LayoutConfig {
    pub fn params(&self, preset: LayoutPreset) -> &PresetParams {
        match preset {
            LayoutPreset::SymmetricTree => &self.symmetric_tree,
            LayoutPreset::Hierarchical => &self.hierarchical,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::JsonParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("layout.defaultNodeWidth", self.layout.default_node_width)?;
        require_positive("layout.defaultNodeHeight", self.layout.default_node_height)?;
        for (name, params) in [
            ("layout.symmetricTree", &self.layout.symmetric_tree),
            ("layout.hierarchical", &self.layout.hierarchical),
        ] {
            require_positive(&format!("{}.nodeSpacing", name), params.node_spacing)?;
            require_positive(&format!("{}.rankSpacing", name), params.rank_spacing)?;
        }
        if self.max_history_entries == Some(0) {
            return Err(ConfigError::Invalid {
                field: "maxHistoryEntries".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field: field.to_string(),
            message: format!("must be a positive number, got {}", value),
        })
    }
}
