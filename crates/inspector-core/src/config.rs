//! Inspector configuration.
//!
//! Passed from JavaScript as JSON; every field is optional and falls back to
//! the defaults below.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectorConfig {
    /// Id of the container that bounds the inspectable surface.
    /// Elements outside it (portals, overlays) never resolve. Default: `storybook-root`.
    pub root_id: String,

    /// Custom-property prefix that marks a design token. Default: `--nk-`.
    pub token_prefix: String,

    /// Maximum number of shadow roots descended during point resolution.
    pub max_shadow_depth: usize,

    /// Maximum nesting of layer blocks walked during rule collection.
    pub max_rule_depth: usize,

    /// Overlay canvases get the ids `<prefix>-selected` and `<prefix>-hover`.
    pub canvas_id_prefix: String,

    /// Stacking order of the overlay canvases.
    pub z_index: i64,

    /// Fill colors of the four box-model layers.
    pub colors: BoxModelColors,

    /// Console log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            root_id: "storybook-root".to_string(),
            token_prefix: "--nk-".to_string(),
            max_shadow_depth: 32,
            max_rule_depth: 16,
            canvas_id_prefix: "element-inspector".to_string(),
            z_index: 999_999_999,
            colors: BoxModelColors::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl InspectorConfig {
    /// Parse and validate a JSON config. An empty string yields the defaults.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] on malformed JSON or invalid values.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the resolver and aggregator rely on.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.root_id.trim().is_empty() {
            return Err(Error::InvalidConfig("rootId must not be empty".into()));
        }
        if !self.token_prefix.starts_with("--") || self.token_prefix.len() <= 2 {
            return Err(Error::InvalidConfig(format!(
                "tokenPrefix must start with `--` and name a prefix, got `{}`",
                self.token_prefix
            )));
        }
        if self.max_shadow_depth == 0 || self.max_rule_depth == 0 {
            return Err(Error::InvalidConfig(
                "maxShadowDepth and maxRuleDepth must be positive".into(),
            ));
        }
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(Error::InvalidConfig(format!(
                "unknown logLevel `{}`",
                self.log_level
            )));
        }
        Ok(())
    }

    /// The configured log level, `Warn` when unparseable.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }
}

/// Translucent fill colors for the box-model overlay (CSS color strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxModelColors {
    pub margin: String,
    pub border: String,
    pub padding: String,
    pub content: String,
}

impl Default for BoxModelColors {
    fn default() -> Self {
        Self {
            margin: "#f6b26ba8".to_string(),
            border: "#ffe599a8".to_string(),
            padding: "#93c47d8c".to_string(),
            content: "#6fa8dca8".to_string(),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
