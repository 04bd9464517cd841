//! Attrition settings loaded from TOML
//!
//! The engine never validates or caches these values: the host hands it a
//! fresh `&AttritionConfig` on every poll, so a settings change takes effect
//! on the next refresh. Range checks happen here, at the load boundary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::attrition::constants::*;
use crate::core::error::{AttritionError, Result};
use crate::core::types::{PerSide, Side};

/// Which signal decides whether a side is "below threshold"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Live headcount compared against a fixed number
    #[default]
    Absolute,
    /// Cumulative casualties as a share of the session baseline
    Percentage,
}

/// Complete attrition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttritionConfig {
    /// Master switch; when off every verdict is `false`
    pub enabled: bool,

    /// Whether the player side is tracked at all
    pub apply_to_player_side: bool,

    pub mode: ThresholdMode,

    /// Headcount below which a side counts as depleted (Absolute mode)
    ///
    /// Valid range 10-500 per side.
    pub absolute_threshold: PerSide<u32>,

    /// Casualty percentage at or above which a side counts as depleted
    /// (Percentage mode)
    ///
    /// Valid range 5.0-100.0 per side.
    pub percentage_threshold: PerSide<f32>,

    /// Consecutive below-threshold samples required before confirming
    ///
    /// One sample is taken per simulated second, so this doubles as the
    /// grace period reinforcements have to arrive. Valid range 1-100.
    pub confirmation_window: u32,
}

impl Default for AttritionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            apply_to_player_side: true,
            mode: ThresholdMode::Absolute,
            absolute_threshold: PerSide::new(
                DEFAULT_ENEMY_ABSOLUTE_THRESHOLD,
                DEFAULT_PLAYER_ABSOLUTE_THRESHOLD,
            ),
            percentage_threshold: PerSide::new(
                DEFAULT_ENEMY_PERCENTAGE_THRESHOLD,
                DEFAULT_PLAYER_PERCENTAGE_THRESHOLD,
            ),
            confirmation_window: DEFAULT_CONFIRMATION_WINDOW,
        }
    }
}

impl AttritionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether verdicts are produced for `side` at all
    pub fn applies_to(&self, side: Side) -> bool {
        match side {
            Side::Enemy => self.enabled,
            Side::Player => self.enabled && self.apply_to_player_side,
        }
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AttritionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every value against its declared range
    pub fn validate(&self) -> Result<()> {
        for &side in Side::all() {
            let absolute = self.absolute_threshold[side];
            if !(ABSOLUTE_THRESHOLD_MIN..=ABSOLUTE_THRESHOLD_MAX).contains(&absolute) {
                return Err(AttritionError::InvalidConfig(format!(
                    "{} absolute_threshold ({}) must be within {}-{}",
                    side, absolute, ABSOLUTE_THRESHOLD_MIN, ABSOLUTE_THRESHOLD_MAX
                )));
            }

            let pct = self.percentage_threshold[side];
            if !(PERCENTAGE_THRESHOLD_MIN..=PERCENTAGE_THRESHOLD_MAX).contains(&pct) {
                return Err(AttritionError::InvalidConfig(format!(
                    "{} percentage_threshold ({}) must be within {:.1}-{:.1}",
                    side, pct, PERCENTAGE_THRESHOLD_MIN, PERCENTAGE_THRESHOLD_MAX
                )));
            }
        }

        if !(CONFIRMATION_WINDOW_MIN..=CONFIRMATION_WINDOW_MAX).contains(&self.confirmation_window)
        {
            return Err(AttritionError::InvalidConfig(format!(
                "confirmation_window ({}) must be within {}-{}",
                self.confirmation_window, CONFIRMATION_WINDOW_MIN, CONFIRMATION_WINDOW_MAX
            )));
        }

        Ok(())
    }
}

/// Load and validate a config from a TOML file
pub fn load_config(path: &Path) -> Result<AttritionConfig> {
    if !path.exists() {
        return Err(AttritionError::ConfigNotFound(path.display().to_string()));
    }
    let contents = fs::read_to_string(path)?;
    AttritionConfig::from_toml_str(&contents)
}

/// Load a named preset
///
/// Loads from `data/attrition/{name}.toml`
pub fn load_named_config(name: &str) -> Result<AttritionConfig> {
    load_config(&config_path(name))
}

fn config_path(name: &str) -> PathBuf {
    PathBuf::from("data/attrition").join(format!("{}.toml", name))
}
