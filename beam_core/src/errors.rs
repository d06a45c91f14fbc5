//! # Error Types
//!
//! Structured error types for beam_core. Every validation failure carries the
//! offending field and value so a front end can render a message without
//! parsing strings.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length: f64) -> CalcResult<()> {
//!     if length <= 0.0 {
//!         return Err(CalcError::invalid_beam(
//!             "length",
//!             length.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_length(-2.0).unwrap_err();
//! assert_eq!(err.error_code(), "INVALID_BEAM");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Beam geometry or section property is invalid (L, E, I or Z not positive)
    #[error("Invalid beam '{field}': {value} - {reason}")]
    InvalidBeam {
        field: String,
        value: String,
        reason: String,
    },

    /// Load geometry is out of range or degenerate
    #[error("Invalid load '{field}': {value} - {reason}")]
    InvalidLoad {
        field: String,
        value: String,
        reason: String,
    },

    /// A function was evaluated outside the span
    #[error("{quantity} evaluated at x = {x}, outside the span [0, {length}]")]
    OutOfRange { quantity: String, x: f64, length: f64 },

    /// Flexural rigidity is not usable for deflection
    #[error("Invalid section property: flexural rigidity EI = {ei} must be positive and finite")]
    InvalidSectionProperty { ei: f64 },

    /// The analysis exceeded its time budget
    #[error("Computation timed out during {stage} (limit {limit_ms} ms)")]
    ComputationTimeout { stage: String, limit_ms: u64 },

    /// An equilibrium self-check failed. Indicates an engine defect.
    #[error("Internal consistency check '{check}' failed: residual {residual:e} exceeds tolerance {tolerance:e}")]
    InternalConsistency {
        check: String,
        residual: f64,
        tolerance: f64,
    },

    /// Any other invalid input value (analysis settings and the like)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
}

impl CalcError {
    /// Create an InvalidBeam error
    pub fn invalid_beam(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidBeam {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidLoad error
    pub fn invalid_load(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidLoad {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(quantity: impl Into<String>, x: f64, length: f64) -> Self {
        CalcError::OutOfRange {
            quantity: quantity.into(),
            x,
            length,
        }
    }

    /// Create a ComputationTimeout error
    pub fn timeout(stage: impl Into<String>, limit_ms: u64) -> Self {
        CalcError::ComputationTimeout {
            stage: stage.into(),
            limit_ms,
        }
    }

    /// Create an InternalConsistency error
    pub fn inconsistency(check: impl Into<String>, residual: f64, tolerance: f64) -> Self {
        CalcError::InternalConsistency {
            check: check.into(),
            residual,
            tolerance,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input, as opposed to engine
    /// defects or resource limits
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::InvalidBeam { .. }
                | CalcError::InvalidLoad { .. }
                | CalcError::OutOfRange { .. }
                | CalcError::InvalidSectionProperty { .. }
                | CalcError::InvalidInput { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidBeam { .. } => "INVALID_BEAM",
            CalcError::InvalidLoad { .. } => "INVALID_LOAD",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::InvalidSectionProperty { .. } => "INVALID_SECTION_PROPERTY",
            CalcError::ComputationTimeout { .. } => "COMPUTATION_TIMEOUT",
            CalcError::InternalConsistency { .. } => "INTERNAL_CONSISTENCY",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_load("position", "15", "Point load must lie within [0, 10]");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
        assert!(json.contains("\"type\":\"InvalidLoad\""));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::out_of_range("Shear", -1.0, 6.0).error_code(), "OUT_OF_RANGE");
        assert_eq!(CalcError::timeout("deflection", 10).error_code(), "COMPUTATION_TIMEOUT");
        assert_eq!(
            CalcError::InvalidSectionProperty { ei: 0.0 }.error_code(),
            "INVALID_SECTION_PROPERTY"
        );
    }

    #[test]
    fn test_input_errors_vs_defects() {
        assert!(CalcError::invalid_beam("length", "0", "must be positive").is_input_error());
        assert!(!CalcError::inconsistency("moment at x = L", 1.0, 1e-9).is_input_error());
        assert!(!CalcError::timeout("extremes", 0).is_input_error());
    }

    #[test]
    fn test_display_names_the_field() {
        let msg = CalcError::invalid_beam("elastic_modulus", "-200", "must be positive").to_string();
        assert!(msg.contains("elastic_modulus"));
        assert!(msg.contains("-200"));
    }
}
