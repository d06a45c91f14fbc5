//! # beam_core - Simply Supported Beam Analysis Engine
//!
//! `beam_core` computes the static response of a single-span, simply supported
//! Euler-Bernoulli beam: support reactions, shear force and bending moment
//! diagrams, slope and deflection by double integration, and the extreme values
//! with their locations. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Exact**: Piecewise polynomials, not sampled arrays, so any x evaluates exactly
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Sign Convention
//!
//! Loads are positive downward, reactions positive upward, sagging moment
//! positive, deflection positive upward. Units are whatever consistent set the
//! caller supplies; [`units`] offers SI wrappers for front ends.
//!
//! ## Quick Start
//!
//! ```rust
//! use beam_core::{analyze, Beam, Load};
//!
//! // 6 m steel beam, 5 kN/m over the full span
//! let beam = Beam::new(6.0, 200e9, 5e-5, 5e-4).unwrap();
//! let result = analyze(&beam, &[Load::uniform_full(5_000.0, 6.0)]).unwrap();
//!
//! assert!((result.max_moment.value - 22_500.0).abs() < 1e-6);
//!
//! // Serialize to JSON for storage or transmission
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("max_deflection"));
//! ```
//!
//! ## Modules
//!
//! - [`beam`] - Span and section properties
//! - [`loads`] - Point and distributed loads, validated load sets
//! - [`piecewise`] - Piecewise polynomial functions of x
//! - [`calculations`] - Reactions, internal forces, deflection, extremes
//! - [`settings`] - Tolerances, sampling density, time budget
//! - [`units`] - Type-safe SI unit wrappers
//! - [`errors`] - Structured error types

pub mod beam;
pub mod calculations;
pub mod errors;
pub mod loads;
pub mod piecewise;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use beam::{Beam, BeamProperties};
pub use calculations::{analyze, analyze_with, AnalysisResult};
pub use errors::{CalcError, CalcResult};
pub use loads::{Load, LoadSet};
pub use settings::AnalysisSettings;
