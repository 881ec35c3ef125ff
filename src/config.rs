//! Engine configuration: snapping tolerances, unit scale, display precision,
//! and how the consistency pass treats a diverged length.
//!
//! The host passes configuration as a JSON object; every field is optional and
//! falls back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{ANGLE_SNAP_THRESHOLD_DEG, ORTHO_SNAP_THRESHOLD_DEG, PIXELS_PER_METER, SNAP_TOLERANCE};

/// Largest number of fractional digits accepted for length or angle precision.
pub const MAX_DECIMALS: u32 = 6;

/// Errors produced while loading an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for [`EngineConfig`].
    #[error("config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field parsed but holds an unusable value.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// What the consistency pass does with a stored length that no longer
/// matches the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyPolicy {
    /// Flag the mismatch, then overwrite the stored length (and angle) with
    /// the geometric value. The flag clears on the next pass.
    #[default]
    Resync,
    /// Flag the mismatch and keep the stored length until the user sets a new
    /// length, so the divergence stays visible.
    Retain,
}

/// Tunable engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Endpoint and axis snap distance in surface units.
    pub snap_tolerance: f64,
    /// Angle-snap threshold in degrees for free drawing (45° candidates).
    pub angle_snap_threshold_deg: f64,
    /// Angle-snap threshold in degrees with the ortho modifier held (90° candidates).
    pub ortho_snap_threshold_deg: f64,
    /// Surface units per meter.
    pub pixels_per_meter: f64,
    /// Fractional digits kept on element lengths.
    pub length_decimals: u32,
    /// Fractional digits kept on element angles.
    pub angle_decimals: u32,
    /// Consistency pass behavior.
    pub consistency: ConsistencyPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_tolerance: SNAP_TOLERANCE,
            angle_snap_threshold_deg: ANGLE_SNAP_THRESHOLD_DEG,
            ortho_snap_threshold_deg: ORTHO_SNAP_THRESHOLD_DEG,
            pixels_per_meter: PIXELS_PER_METER,
            length_decimals: 0,
            angle_decimals: 0,
            consistency: ConsistencyPolicy::Resync,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a JSON object. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value fails [`EngineConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate().inspect_err(|e| warn!(error = %e, "rejected engine config"))?;
        Ok(config)
    }

    /// Check every field for a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("snap_tolerance", self.snap_tolerance)?;
        angle_threshold("angle_snap_threshold_deg", self.angle_snap_threshold_deg)?;
        angle_threshold("ortho_snap_threshold_deg", self.ortho_snap_threshold_deg)?;

        if !self.pixels_per_meter.is_finite() || self.pixels_per_meter <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "pixels_per_meter",
                reason: format!("must be a positive number, got {}", self.pixels_per_meter),
            });
        }

        decimals("length_decimals", self.length_decimals)?;
        decimals("angle_decimals", self.angle_decimals)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("must be a non-negative number, got {value}") })
    }
}

fn angle_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    non_negative(field, value)?;
    if value > 45.0 {
        return Err(ConfigError::Invalid { field, reason: format!("must not exceed 45 degrees, got {value}") });
    }
    Ok(())
}

fn decimals(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > MAX_DECIMALS {
        return Err(ConfigError::Invalid { field, reason: format!("at most {MAX_DECIMALS} digits, got {value}") });
    }
    Ok(())
}
