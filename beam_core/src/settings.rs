//! # Analysis Settings
//!
//! Numeric knobs for a single analysis request. Every field has a default, so
//! a JSON settings object only needs to name the values it overrides:
//!
//! ```rust
//! use beam_core::settings::AnalysisSettings;
//!
//! let settings: AnalysisSettings = serde_json::from_str(r#"{ "sample_points": 101 }"#).unwrap();
//! assert_eq!(settings.sample_points, 101);
//! assert_eq!(settings.timeout_ms, AnalysisSettings::default().timeout_ms);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default relative tolerance for equilibrium self-checks
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default number of diagram points (plot resolution)
pub const DEFAULT_SAMPLE_POINTS: usize = 500;

/// Default grid size for the deflection extremum search
pub const DEFAULT_DEFLECTION_RESOLUTION: usize = 2000;

/// Largest accepted `sample_points`
pub const MAX_SAMPLE_POINTS: usize = 1_000_000;

/// Largest accepted `deflection_resolution`
pub const MAX_DEFLECTION_RESOLUTION: usize = 1_000_000;

/// Default per-request time limit
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Settings applied to one call of [`crate::analyze_with`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Relative tolerance for equilibrium checks and extremum ties
    pub tolerance: f64,

    /// Number of uniformly spaced points in each returned diagram
    pub sample_points: usize,

    /// Number of grid intervals over the span used to bracket slope roots
    /// when locating the maximum deflection
    pub deflection_resolution: usize,

    /// Time limit for the whole request (milliseconds)
    pub timeout_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            tolerance: DEFAULT_TOLERANCE,
            sample_points: DEFAULT_SAMPLE_POINTS,
            deflection_resolution: DEFAULT_DEFLECTION_RESOLUTION,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AnalysisSettings {
    /// Set the tolerance (builder pattern)
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the diagram resolution (builder pattern)
    pub fn with_sample_points(mut self, points: usize) -> Self {
        self.sample_points = points;
        self
    }

    /// Set the deflection search grid (builder pattern)
    pub fn with_deflection_resolution(mut self, resolution: usize) -> Self {
        self.deflection_resolution = resolution;
        self
    }

    /// Set the time limit (builder pattern)
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Time limit as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validate the settings
    pub fn validate(&self) -> CalcResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance >= 1.0 {
            return Err(CalcError::invalid_input(
                "tolerance",
                self.tolerance.to_string(),
                "Tolerance must lie in (0, 1)",
            ));
        }
        if self.sample_points < 2 {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                "At least 2 diagram points are required",
            ));
        }
        if self.sample_points > MAX_SAMPLE_POINTS {
            return Err(CalcError::invalid_input(
                "sample_points",
                self.sample_points.to_string(),
                format!("At most {} diagram points are allowed", MAX_SAMPLE_POINTS),
            ));
        }
        if self.deflection_resolution == 0 {
            return Err(CalcError::invalid_input(
                "deflection_resolution",
                "0",
                "Deflection search needs at least one interval",
            ));
        }
        if self.deflection_resolution > MAX_DEFLECTION_RESOLUTION {
            return Err(CalcError::invalid_input(
                "deflection_resolution",
                self.deflection_resolution.to_string(),
                format!("At most {} search intervals are allowed", MAX_DEFLECTION_RESOLUTION),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisSettings::default().validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let settings = AnalysisSettings::default()
            .with_sample_points(11)
            .with_timeout_ms(250);
        assert_eq!(settings.sample_points, 11);
        assert_eq!(settings.timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_single_sample_point() {
        let err = AnalysisSettings::default()
            .with_sample_points(1)
            .validate()
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_rejects_oversized_grids() {
        let err = AnalysisSettings::default()
            .with_sample_points(usize::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "sample_points"));

        let err = AnalysisSettings::default()
            .with_deflection_resolution(MAX_DEFLECTION_RESOLUTION + 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "deflection_resolution"));

        assert!(AnalysisSettings::default()
            .with_sample_points(MAX_SAMPLE_POINTS)
            .with_deflection_resolution(MAX_DEFLECTION_RESOLUTION)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        assert!(AnalysisSettings::default().with_tolerance(0.0).validate().is_err());
        assert!(AnalysisSettings::default().with_tolerance(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: AnalysisSettings = serde_json::from_str(r#"{ "tolerance": 1e-6 }"#).unwrap();
        assert_eq!(settings.tolerance, 1e-6);
        assert_eq!(settings.sample_points, DEFAULT_SAMPLE_POINTS);
        assert_eq!(settings.deflection_resolution, DEFAULT_DEFLECTION_RESOLUTION);
    }
}
