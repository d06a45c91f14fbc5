//! # Beam Analysis
//!
//! The analysis pipeline, one stage per module:
//!
//! - [`reactions`] - support reactions from ΣF = 0, ΣM = 0
//! - [`internal_forces`] - piecewise shear V(x) and moment M(x)
//! - [`deflection`] - slope θ(x) and deflection y(x) by double integration
//! - [`extremes`] - maxima, their locations, and bending stress
//!
//! [`analyze`] runs the whole pipeline for one (beam, loads) request. It holds
//! no state between calls, so independent requests may run on any thread.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::beam::Beam;
//! use beam_core::calculations::analyze;
//! use beam_core::loads::Load;
//!
//! // 6 m beam, 10 kN at midspan
//! let beam = Beam::new(6.0, 200e9, 5e-5, 5e-4).unwrap();
//! let result = analyze(&beam, &[Load::point(10_000.0, 3.0)]).unwrap();
//!
//! assert!((result.reactions.left - 5_000.0).abs() < 1e-6);
//! assert!((result.max_moment.value - 15_000.0).abs() < 1e-6);
//! assert!((result.max_moment.position - 3.0).abs() < 1e-9);
//!
//! // Functions evaluate anywhere on the span
//! let m = result.moment.eval(1.5).unwrap();
//! assert!((m - 7_500.0).abs() < 1e-6);
//! ```

pub mod deflection;
pub mod extremes;
pub mod internal_forces;
pub mod reactions;

use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::beam::Beam;
use crate::errors::{CalcError, CalcResult};
use crate::loads::{Load, LoadSet};
use crate::piecewise::PiecewiseFunction;
use crate::settings::AnalysisSettings;

pub use deflection::Deflection;
pub use extremes::{Extremes, Extremum, SignedRange};
pub use internal_forces::InternalForces;
pub use reactions::Reactions;

/// Per-request time budget, checked inside every loop of the pipeline
#[derive(Debug, Clone, Copy)]
pub(crate) struct Deadline {
    started: Instant,
    limit: Duration,
}

impl Deadline {
    pub(crate) fn new(limit: Duration) -> Self {
        Deadline {
            started: Instant::now(),
            limit,
        }
    }

    pub(crate) fn check(&self, stage: &str) -> CalcResult<()> {
        if self.started.elapsed() >= self.limit {
            return Err(CalcError::timeout(stage, self.limit.as_millis() as u64));
        }
        Ok(())
    }
}

/// Sampled diagrams for an external plotter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagrams {
    /// (x, V) including both sides of every jump
    pub shear: Vec<(f64, f64)>,
    /// (x, M)
    pub moment: Vec<(f64, f64)>,
    /// (x, θ)
    pub slope: Vec<(f64, f64)>,
    /// (x, y)
    pub deflection: Vec<(f64, f64)>,
}

/// Everything computed for one beam and load set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Support reactions, positive upward
    pub reactions: Reactions,

    /// Shear force V(x)
    pub shear: PiecewiseFunction,
    /// Bending moment M(x), sagging positive
    pub moment: PiecewiseFunction,
    /// Slope θ(x)
    pub slope: PiecewiseFunction,
    /// Deflection y(x), positive upward
    pub deflection: PiecewiseFunction,

    /// Largest |V| and where it occurs
    pub max_shear: Extremum,
    /// Largest |M| and where it occurs
    pub max_moment: Extremum,
    /// Largest |y| and where it occurs
    pub max_deflection: Extremum,
    /// Bending stress M/Z at the largest |M|
    pub max_stress: Extremum,

    /// Most negative and most positive shear
    pub shear_range: SignedRange,
    /// Most negative and most positive moment
    pub moment_range: SignedRange,

    /// Pre-sampled diagrams (`sample_points` points each)
    pub diagrams: Diagrams,
}

impl AnalysisResult {
    /// Span divided by the largest deflection magnitude (the "L/Δ" ratio),
    /// or `None` when the beam does not deflect
    pub fn span_deflection_ratio(&self) -> Option<f64> {
        let delta = self.max_deflection.value.abs();
        if delta > 0.0 {
            Some(self.deflection.end() / delta)
        } else {
            None
        }
    }

    /// End rotations (θ(0), θ(L))
    pub fn end_slopes(&self) -> (f64, f64) {
        let segments = self.slope.segments();
        (segments[0].start_value(), segments[segments.len() - 1].end_value())
    }
}

/// Analyze `beam` under `loads` with default settings.
pub fn analyze(beam: &Beam, loads: &[Load]) -> CalcResult<AnalysisResult> {
    analyze_with(beam, loads, &AnalysisSettings::default())
}

/// Analyze `beam` under `loads`.
///
/// # Errors
/// - `InvalidLoad` - a load is off the span or degenerate
/// - `InvalidInput` - `settings` are invalid
/// - `InvalidSectionProperty` - EI is not positive and finite
/// - `ComputationTimeout` - the request exceeded `settings.timeout_ms`
/// - `InternalConsistency` - an equilibrium self-check failed (engine defect)
pub fn analyze_with(
    beam: &Beam,
    loads: &[Load],
    settings: &AnalysisSettings,
) -> CalcResult<AnalysisResult> {
    settings.validate()?;
    let deadline = Deadline::new(settings.timeout());

    let load_set = LoadSet::new(beam, loads)?;
    debug!(
        "analyzing L = {}, EI = {:.6e}, {} loads",
        beam.length(),
        beam.flexural_rigidity(),
        load_set.loads().len()
    );

    let reactions = reactions::reactions_for(&load_set, settings.tolerance)?;
    let forces = internal_forces::build_internal_forces(&load_set, &reactions, settings.tolerance, &deadline)?;
    let deflection = deflection::solve_deflection(
        &forces.moment,
        beam.flexural_rigidity(),
        settings.tolerance,
        &deadline,
    )?;
    let extremes = extremes::evaluate_extremes(
        &forces,
        &deflection,
        beam.section_modulus(),
        settings.deflection_resolution,
        settings.tolerance,
        &deadline,
    )?;

    let diagrams = Diagrams {
        shear: forces.shear.sample_with_breakpoints(settings.sample_points),
        moment: forces.moment.sample(settings.sample_points),
        slope: deflection.slope.sample(settings.sample_points),
        deflection: deflection.deflection.sample(settings.sample_points),
    };

    let InternalForces { shear, moment } = forces;
    let Deflection { slope, deflection } = deflection;

    Ok(AnalysisResult {
        reactions,
        shear,
        moment,
        slope,
        deflection,
        max_shear: extremes.max_shear,
        max_moment: extremes.max_moment,
        max_deflection: extremes.max_deflection,
        max_stress: extremes.max_stress,
        shear_range: extremes.shear_range,
        moment_range: extremes.moment_range,
        diagrams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if b.abs() < 1e-10 {
            a.abs() < tol
        } else {
            ((a - b) / b).abs() < tol
        }
    }

    fn steel_beam(length: f64) -> Beam {
        // E = 200 GPa, I = 5e-5 m^4, Z = 5e-4 m^3
        Beam::new(length, 200e9, 5e-5, 5e-4).unwrap()
    }

    #[test]
    fn test_central_point_load() {
        let (p, l) = (10_000.0, 6.0);
        let beam = steel_beam(l);
        let r = analyze(&beam, &[Load::point(p, l / 2.0)]).unwrap();

        assert!(approx_eq(r.reactions.left, p / 2.0, EPSILON));
        assert!(approx_eq(r.reactions.right, p / 2.0, EPSILON));
        assert!(approx_eq(r.max_moment.value, p * l / 4.0, EPSILON));
        assert!(approx_eq(r.max_moment.position, l / 2.0, EPSILON));

        let expected = -p * l.powi(3) / (48.0 * beam.flexural_rigidity());
        assert!(approx_eq(r.max_deflection.value, expected, 1e-9));
        assert!((r.max_deflection.position - l / 2.0).abs() < 1e-6);

        assert!(approx_eq(r.max_stress.value, p * l / 4.0 / 5e-4, EPSILON));
    }

    #[test]
    fn test_full_span_udl() {
        let (w, l) = (5_000.0, 6.0);
        let beam = steel_beam(l);
        let r = analyze(&beam, &[Load::uniform_full(w, l)]).unwrap();

        assert!(approx_eq(r.reactions.left, w * l / 2.0, EPSILON));
        assert!(approx_eq(r.reactions.right, w * l / 2.0, EPSILON));
        assert!(approx_eq(r.max_moment.value, w * l * l / 8.0, EPSILON));
        assert!(approx_eq(r.max_moment.position, l / 2.0, EPSILON));

        let expected = -5.0 * w * l.powi(4) / (384.0 * beam.flexural_rigidity());
        assert!(approx_eq(r.max_deflection.value, expected, 1e-9));
        assert!((r.max_deflection.position - l / 2.0).abs() < 1e-6);

        // |V| ties at both supports: smaller x wins
        assert_eq!(r.max_shear.position, 0.0);
        assert!(approx_eq(r.max_shear.value, w * l / 2.0, EPSILON));
    }

    #[test]
    fn test_shear_and_moment_ranges() {
        // 10 m span, 1000 N at 3 m: V from +700 to -300
        let r = analyze(&steel_beam(10.0), &[Load::point(1000.0, 3.0)]).unwrap();
        assert!(approx_eq(r.shear_range.max.value, 700.0, EPSILON));
        assert!(approx_eq(r.shear_range.min.value, -300.0, EPSILON));
        assert_eq!(r.shear_range.min.position, 3.0);
        assert!(approx_eq(r.moment_range.max.value, 2100.0, EPSILON));
        assert_eq!(r.moment_range.max.position, 3.0);
    }

    #[test]
    fn test_upward_load_gives_hogging() {
        let r = analyze(&steel_beam(4.0), &[Load::point(-800.0, 2.0)]).unwrap();
        assert!(r.max_moment.value < 0.0);
        assert!(r.max_deflection.value > 0.0);
        assert!(r.max_stress.value < 0.0);
    }

    #[test]
    fn test_no_loads() {
        let r = analyze(&steel_beam(5.0), &[]).unwrap();
        assert_eq!(r.reactions, Reactions { left: 0.0, right: 0.0 });
        assert_eq!(r.max_moment.value, 0.0);
        assert_eq!(r.max_moment.position, 0.0);
        assert_eq!(r.max_deflection.value, 0.0);
        assert_eq!(r.span_deflection_ratio(), None);
    }

    #[test]
    fn test_diagrams_have_requested_resolution() {
        let settings = AnalysisSettings::default().with_sample_points(11);
        let r = analyze_with(&steel_beam(10.0), &[Load::point(1000.0, 3.0)], &settings).unwrap();
        assert_eq!(r.diagrams.moment.len(), 11);
        assert_eq!(r.diagrams.deflection.len(), 11);
        // x = 3 is a grid point; shear carries both sides of the jump there
        assert_eq!(r.diagrams.shear.len(), 12);
        assert_eq!(r.diagrams.shear[3], (3.0, 700.0));
        assert_eq!(r.diagrams.shear[4], (3.0, -300.0));
    }

    #[test]
    fn test_end_slopes_antisymmetric() {
        let r = analyze(&steel_beam(6.0), &[Load::uniform_full(1000.0, 6.0)]).unwrap();
        let (left, right) = r.end_slopes();
        assert!(left < 0.0);
        assert!(approx_eq(right, -left, 1e-9));
    }

    #[test]
    fn test_span_deflection_ratio() {
        let beam = steel_beam(6.0);
        let r = analyze(&beam, &[Load::point(10_000.0, 3.0)]).unwrap();
        let delta = 10_000.0 * 216.0 / (48.0 * beam.flexural_rigidity());
        assert!(approx_eq(r.span_deflection_ratio().unwrap(), 6.0 / delta, 1e-9));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = AnalysisSettings::default().with_deflection_resolution(0);
        let err = analyze_with(&steel_beam(5.0), &[], &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_unbounded_sampling_rejected() {
        let loads = [Load::point(1.0, 1.0)];
        let settings = AnalysisSettings::default().with_sample_points(usize::MAX);
        let err = analyze_with(&steel_beam(5.0), &loads, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let settings = AnalysisSettings::default().with_deflection_resolution(usize::MAX);
        let err = analyze_with(&steel_beam(5.0), &loads, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_zero_timeout() {
        let settings = AnalysisSettings::default().with_timeout_ms(0);
        let err = analyze_with(&steel_beam(5.0), &[Load::point(1.0, 1.0)], &settings).unwrap_err();
        assert_eq!(err.error_code(), "COMPUTATION_TIMEOUT");
    }

    #[test]
    fn test_deadline() {
        assert!(Deadline::new(Duration::from_secs(60)).check("stage").is_ok());
        match Deadline::new(Duration::ZERO).check("stage") {
            Err(CalcError::ComputationTimeout { stage, limit_ms }) => {
                assert_eq!(stage, "stage");
                assert_eq!(limit_ms, 0);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
