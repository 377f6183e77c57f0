#![forbid(unsafe_code)]

//! Inspector configuration.
//!
//! Every field has a default matching the reference behaviour, so an empty
//! JSON object (`{}`) is a valid configuration. Environment overrides use the
//! `STYLELENS_*` prefix.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::placement::{DEFAULT_EDGE_MARGIN, DEFAULT_GAP};

/// Env var enabling the diagnostic log.
pub const ENV_DIAGNOSTICS: &str = "STYLELENS_DIAGNOSTICS";
/// Env var selecting [`EmptyCategories::Hide`].
pub const ENV_HIDE_EMPTY: &str = "STYLELENS_HIDE_EMPTY_CATEGORIES";
/// Env var opening the raw property disclosure by default.
pub const ENV_RAW_OPEN: &str = "STYLELENS_RAW_OPEN";

/// Default panel height cap in CSS pixels.
pub const DEFAULT_PANEL_MAX_HEIGHT: f64 = 400.0;

/// What to do with a category that has nothing to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyCategories {
    /// Render the heading with an empty body.
    #[default]
    ShowHeading,
    /// Leave the category out of the panel.
    Hide,
}

/// Configuration for one inspector instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectorConfig {
    /// When false the wrapper renders its children untouched.
    pub enabled: bool,
    /// Text of the hover badge.
    pub badge_label: String,
    /// Title in the panel header.
    pub panel_title: String,
    /// Distance between target and panel.
    pub gap: f64,
    /// Distance kept from the viewport edge after a flip or clamp.
    pub edge_margin: f64,
    /// Handling of categories with no listed properties.
    pub empty_categories: EmptyCategories,
    /// Whether the raw property disclosure starts expanded.
    pub raw_open: bool,
    /// Panel height cap in CSS pixels; the panel scrolls beyond it.
    pub panel_max_height: f64,
    /// Record a diagnostic log for this instance.
    pub diagnostics: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            badge_label: "Click to inspect".into(),
            panel_title: "Computed Styles".into(),
            gap: DEFAULT_GAP,
            edge_margin: DEFAULT_EDGE_MARGIN,
            empty_categories: EmptyCategories::ShowHeading,
            raw_open: false,
            panel_max_height: DEFAULT_PANEL_MAX_HEIGHT,
            diagnostics: false,
        }
    }
}

impl InspectorConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment-like lookup.
    ///
    /// Flags accept `1`/`true`/`yes` and `0`/`false`/`no`; anything else is
    /// ignored.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| lookup(key).and_then(|v| parse_flag(&v));
        if let Some(on) = flag(ENV_DIAGNOSTICS) {
            self.diagnostics = on;
        }
        if let Some(on) = flag(ENV_HIDE_EMPTY) {
            self.empty_categories = if on {
                EmptyCategories::Hide
            } else {
                EmptyCategories::ShowHeading
            };
        }
        if let Some(on) = flag(ENV_RAW_OPEN) {
            self.raw_open = on;
        }
        self
    }

    /// Check numeric fields.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const REASON: &str = "must be finite and non-negative";
        let check = |field: &'static str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: REASON,
                })
            }
        };
        check("gap", self.gap)?;
        check("edgeMargin", self.edge_margin)?;
        check("panelMaxHeight", self.panel_max_height)
    }

    /// Replace non-finite or negative numeric fields with their defaults.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.gap = or_default(self.gap, DEFAULT_GAP);
        self.edge_margin = or_default(self.edge_margin, DEFAULT_EDGE_MARGIN);
        self.panel_max_height = or_default(self.panel_max_height, DEFAULT_PANEL_MAX_HEIGHT);
        self
    }

    /// Enable or disable the inspector.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the badge text.
    #[must_use]
    pub fn with_badge_label(mut self, label: impl Into<String>) -> Self {
        self.badge_label = label.into();
        self
    }

    /// Set the panel title.
    #[must_use]
    pub fn with_panel_title(mut self, title: impl Into<String>) -> Self {
        self.panel_title = title.into();
        self
    }

    /// Set gap and edge margin used for placement.
    ///
    /// Negative or non-finite values fall back to the defaults.
    #[must_use]
    pub fn with_spacing(mut self, gap: f64, edge_margin: f64) -> Self {
        self.gap = or_default(gap, DEFAULT_GAP);
        self.edge_margin = or_default(edge_margin, DEFAULT_EDGE_MARGIN);
        self
    }

    /// Choose how empty categories render.
    #[must_use]
    pub fn with_empty_categories(mut self, policy: EmptyCategories) -> Self {
        self.empty_categories = policy;
        self
    }

    /// Start with the raw disclosure expanded.
    #[must_use]
    pub fn with_raw_open(mut self, open: bool) -> Self {
        self.raw_open = open;
        self
    }

    /// Record diagnostics.
    #[must_use]
    pub fn with_diagnostics(mut self, on: bool) -> Self {
        self.diagnostics = on;
        self
    }
}

fn or_default(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
