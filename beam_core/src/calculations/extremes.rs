//! Maximum shear, moment, deflection and bending stress.
//!
//! Candidates are exact wherever a closed form exists:
//!
//! - **Shear**: piecewise linear, so extremes sit at breakpoints. Both
//!   one-sided limits are candidates; jumps are never averaged.
//! - **Moment**: piecewise quadratic, so extremes sit at breakpoints or where
//!   dM/dx = V = 0 inside a segment (root of the linear V).
//! - **Deflection**: piecewise quartic. Breakpoints, a uniform grid of
//!   `deflection_resolution` intervals over the span, and every slope root
//!   bracketed by that grid and refined by bisection.
//!
//! Ties (within the relative tolerance) go to the smaller x.

use log::debug;
use serde::{Deserialize, Serialize};

use super::deflection::Deflection;
use super::internal_forces::InternalForces;
use super::Deadline;
use crate::errors::CalcResult;
use crate::piecewise::{PiecewiseFunction, Segment};

/// Minimum grid intervals per segment in the deflection search
const MIN_SUBDIVISIONS: usize = 4;

/// Upper bound on bisection steps (doubles run out of bits well before this)
const MAX_BISECTIONS: usize = 200;

/// A value and where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremum {
    /// Position from the left support
    pub position: f64,
    /// Signed value at that position
    pub value: f64,
}

/// Most negative and most positive values of a quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignedRange {
    /// Minimum (most negative) value
    pub min: Extremum,
    /// Maximum (most positive) value
    pub max: Extremum,
}

/// All extremes of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extremes {
    /// Largest |V|
    pub max_shear: Extremum,
    /// Largest |M|
    pub max_moment: Extremum,
    /// Largest |y|
    pub max_deflection: Extremum,
    /// Bending stress M/Z at the largest |M|
    pub max_stress: Extremum,
    /// Signed shear range
    pub shear_range: SignedRange,
    /// Signed moment range
    pub moment_range: SignedRange,
}

/// Locate every extreme and the maximum bending stress.
pub(crate) fn evaluate_extremes(
    forces: &InternalForces,
    deflection: &Deflection,
    section_modulus: f64,
    resolution: usize,
    tolerance: f64,
    deadline: &Deadline,
) -> CalcResult<Extremes> {
    deadline.check("extremum search")?;
    let shear_candidates = shear_candidates(&forces.shear);
    let moment_candidates = moment_candidates(&forces.moment);
    let deflection_candidates = deflection_candidates(deflection, resolution, deadline)?;

    let max_moment = select(&moment_candidates, tolerance, f64::abs);
    let max_stress = Extremum {
        position: max_moment.position,
        value: max_moment.value / section_modulus,
    };

    let extremes = Extremes {
        max_shear: select(&shear_candidates, tolerance, f64::abs),
        max_moment,
        max_deflection: select(&deflection_candidates, tolerance, f64::abs),
        max_stress,
        shear_range: signed_range(&shear_candidates, tolerance),
        moment_range: signed_range(&moment_candidates, tolerance),
    };

    debug!(
        "extremes: |V| {:.6e} at {}, |M| {:.6e} at {}, |y| {:.6e} at {} ({} deflection candidates)",
        extremes.max_shear.value,
        extremes.max_shear.position,
        extremes.max_moment.value,
        extremes.max_moment.position,
        extremes.max_deflection.value,
        extremes.max_deflection.position,
        deflection_candidates.len()
    );

    Ok(extremes)
}

/// Both one-sided limits at every breakpoint
fn shear_candidates(shear: &PiecewiseFunction) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(shear.segments().len() * 2);
    for seg in shear.segments() {
        out.push((seg.start, seg.start_value()));
        out.push((seg.end, seg.end_value()));
    }
    out
}

/// Breakpoint values plus interior points where dM/dx = 0
fn moment_candidates(moment: &PiecewiseFunction) -> Vec<(f64, f64)> {
    let mut out = Vec::with_capacity(moment.segments().len() * 3);
    for seg in moment.segments() {
        out.push((seg.start, seg.start_value()));
        if let Some(t) = seg.poly.derivative().linear_root() {
            if t > 0.0 && t < seg.len() {
                out.push((seg.start + t, seg.poly.eval(t)));
            }
        }
        out.push((seg.end, seg.end_value()));
    }
    out
}

/// Grid values and bisected slope roots over every segment
fn deflection_candidates(
    deflection: &Deflection,
    resolution: usize,
    deadline: &Deadline,
) -> CalcResult<Vec<(f64, f64)>> {
    let span = deflection.deflection.end() - deflection.deflection.start();
    let mut out = Vec::new();

    for (slope_seg, defl_seg) in deflection
        .slope
        .segments()
        .iter()
        .zip(deflection.deflection.segments())
    {
        let len = defl_seg.len();
        let steps = ((resolution as f64 * len / span).ceil() as usize).max(MIN_SUBDIVISIONS);

        out.push((defl_seg.start, defl_seg.start_value()));
        let mut t_prev = 0.0;
        let mut theta_prev = slope_seg.poly.eval(0.0);

        for k in 1..=steps {
            deadline.check("deflection extremum search")?;

            let t = if k == steps { len } else { len * k as f64 / steps as f64 };
            let theta = slope_seg.poly.eval(t);
            out.push((defl_seg.start + t, defl_seg.poly.eval(t)));

            if theta_prev != 0.0 && theta != 0.0 && theta_prev.signum() != theta.signum() {
                let root = bisect(slope_seg, t_prev, t, theta_prev);
                out.push((defl_seg.start + root, defl_seg.poly.eval(root)));
            }

            t_prev = t;
            theta_prev = theta;
        }
    }

    Ok(out)
}

/// Root of the segment polynomial in `[lo, hi]`, given a sign change and the
/// value at `lo`
fn bisect(seg: &Segment, mut lo: f64, mut hi: f64, mut f_lo: f64) -> f64 {
    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let f_mid = seg.poly.eval(mid);
        if f_mid == 0.0 {
            return mid;
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Candidate with the highest score; equal scores (within `tolerance`,
/// relative) resolve to the smaller position.
fn select(candidates: &[(f64, f64)], tolerance: f64, score: impl Fn(f64) -> f64) -> Extremum {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (mut position, mut value) = sorted[0];
    for &(x, v) in &sorted[1..] {
        let (candidate, best) = (score(v), score(value));
        if candidate - best > tolerance * candidate.abs().max(best.abs()) {
            position = x;
            value = v;
        }
    }
    Extremum { position, value }
}

fn signed_range(candidates: &[(f64, f64)], tolerance: f64) -> SignedRange {
    SignedRange {
        min: select(candidates, tolerance, |v| -v),
        max: select(candidates, tolerance, |v| v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piecewise::{Polynomial, Quantity};

    #[test]
    fn test_select_prefers_smaller_position_on_tie() {
        let candidates = [(10.0, -500.0), (0.0, 500.0), (5.0, 0.0)];
        let best = select(&candidates, 1e-9, f64::abs);
        assert_eq!(best, Extremum { position: 0.0, value: 500.0 });
    }

    #[test]
    fn test_select_ignores_rounding_noise() {
        let candidates = [(1.0, 100.0), (2.0, 100.0 * (1.0 + 1e-13))];
        assert_eq!(select(&candidates, 1e-9, f64::abs).position, 1.0);
        let candidates = [(1.0, 100.0), (2.0, 100.1)];
        assert_eq!(select(&candidates, 1e-9, f64::abs).position, 2.0);
    }

    #[test]
    fn test_signed_range() {
        let candidates = [(0.0, 3.0), (1.0, -7.0), (2.0, 9.0), (3.0, -7.0)];
        let range = signed_range(&candidates, 1e-9);
        assert_eq!(range.min, Extremum { position: 1.0, value: -7.0 });
        assert_eq!(range.max, Extremum { position: 2.0, value: 9.0 });
    }

    #[test]
    fn test_moment_interior_critical_point() {
        // M = 300t - 50t² on [0, 6]: peak at t = 3
        let moment = PiecewiseFunction::new(
            Quantity::Moment,
            vec![Segment::new(2.0, 8.0, Polynomial::new([0.0, 300.0, -50.0, 0.0, 0.0]))],
        );
        let candidates = moment_candidates(&moment);
        let best = select(&candidates, 1e-9, f64::abs);
        assert_eq!(best.position, 5.0);
        assert_eq!(best.value, 450.0);
    }

    #[test]
    fn test_bisect_finds_root() {
        // t² - 2 on [0, 2]
        let seg = Segment::new(0.0, 2.0, Polynomial::new([-2.0, 0.0, 1.0, 0.0, 0.0]));
        let root = bisect(&seg, 0.0, 2.0, -2.0);
        assert!((root - 2.0_f64.sqrt()).abs() < 1e-14);
    }

    #[test]
    fn test_shear_candidates_keep_both_limits() {
        let shear = PiecewiseFunction::new(
            Quantity::Shear,
            vec![
                Segment::new(0.0, 3.0, Polynomial::constant(700.0)),
                Segment::new(3.0, 10.0, Polynomial::constant(-300.0)),
            ],
        );
        let candidates = shear_candidates(&shear);
        assert!(candidates.contains(&(3.0, 700.0)));
        assert!(candidates.contains(&(3.0, -300.0)));
        let range = signed_range(&candidates, 1e-9);
        assert_eq!(range.min, Extremum { position: 3.0, value: -300.0 });
        assert_eq!(range.max, Extremum { position: 0.0, value: 700.0 });
    }
}
