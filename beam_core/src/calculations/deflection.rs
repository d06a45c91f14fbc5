//! Slope and deflection by double integration of M/EI.
//!
//! On each segment the curvature M(t)/EI is a polynomial of degree ≤ 2, so
//! its antiderivatives are exact:
//!
//! ```text
//! θ_raw(t) = θ₀ + ∫ M/EI dt            (degree ≤ 3)
//! y_raw(t) = y₀ + ∫ θ_raw dt           (degree ≤ 4)
//! ```
//!
//! with θ₀, y₀ carried across breakpoints so both stay continuous and
//! θ_raw(0) = y_raw(0) = 0 on the first segment. The integration constants
//! come from the simple-support conditions:
//!
//! ```text
//! y(0) = y_raw(0) + C2         = 0
//! y(L) = y_raw(L) + C1·L + C2  = 0
//! ```
//!
//! giving θ = θ_raw + C1 and y = y_raw + C1·x + C2. Deflection is positive
//! upward, so a beam under downward load deflects negative.

use log::debug;
use serde::{Deserialize, Serialize};

use super::Deadline;
use crate::errors::{CalcError, CalcResult};
use crate::piecewise::{PiecewiseFunction, Polynomial, Quantity, Segment};

/// θ(x) and y(x) over the span, on the same breakpoints as M(x)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deflection {
    /// Slope θ(x) (radians)
    pub slope: PiecewiseFunction,
    /// Deflection y(x), positive upward
    pub deflection: PiecewiseFunction,
}

/// Integrate `moment` twice and apply y(0) = y(L) = 0.
pub(crate) fn solve_deflection(
    moment: &PiecewiseFunction,
    flexural_rigidity: f64,
    tolerance: f64,
    deadline: &Deadline,
) -> CalcResult<Deflection> {
    if !flexural_rigidity.is_finite() || flexural_rigidity <= 0.0 {
        return Err(CalcError::InvalidSectionProperty { ei: flexural_rigidity });
    }

    let mut raw_slopes = Vec::with_capacity(moment.segments().len());
    let mut raw_deflections = Vec::with_capacity(moment.segments().len());
    let (mut theta, mut y) = (0.0, 0.0);
    // Largest |y_raw| at any segment end; the end residual is rounding
    // relative to this, not to y_raw(L) which may nearly cancel.
    let mut y_scale: f64 = 0.0;

    for seg in moment.segments() {
        deadline.check("deflection integration")?;

        let slope = seg.poly.scale(1.0 / flexural_rigidity).integral(theta);
        let deflection = slope.integral(y);
        theta = slope.eval(seg.len());
        y = deflection.eval(seg.len());
        y_scale = y_scale.max(y.abs());

        raw_slopes.push(slope);
        raw_deflections.push(deflection);
    }

    let length = moment.end();
    let y_raw_start = raw_deflections[0].eval(0.0);
    let [c1, c2] = solve_2x2([[0.0, 1.0], [length, 1.0]], [-y_raw_start, -y])
        .map_err(|det| CalcError::inconsistency("deflection boundary system determinant", det, 0.0))?;

    let slope_segments = moment
        .segments()
        .iter()
        .zip(&raw_slopes)
        .map(|(seg, raw)| Segment::new(seg.start, seg.end, *raw + Polynomial::constant(c1)))
        .collect();
    // C1·x in local coordinates: C1·start + C1·t
    let deflection_segments = moment
        .segments()
        .iter()
        .zip(&raw_deflections)
        .map(|(seg, raw)| {
            Segment::new(seg.start, seg.end, *raw + Polynomial::linear(c2 + c1 * seg.start, c1))
        })
        .collect();

    let slope = PiecewiseFunction::new(Quantity::Slope, slope_segments);
    let deflection = PiecewiseFunction::new(Quantity::Deflection, deflection_segments);

    let scale = deflection
        .segments()
        .iter()
        .map(term_magnitude)
        .fold(y_scale, f64::max)
        .max(f64::MIN_POSITIVE);
    let end_residual = deflection.eval_unchecked(length).abs();
    if end_residual > tolerance * scale {
        return Err(CalcError::inconsistency(
            "deflection at x = L",
            end_residual,
            tolerance * scale,
        ));
    }

    debug!(
        "deflection: EI = {:.6e}, C1 = {:.6e}, C2 = {:.6e}, end residual {:.3e}",
        flexural_rigidity, c1, c2, end_residual
    );

    Ok(Deflection { slope, deflection })
}

/// Σ|c_k·len^k|, the size of the terms rounded when evaluating the segment
/// at its right end
fn term_magnitude(seg: &Segment) -> f64 {
    let len = seg.len();
    seg.poly
        .coefficients()
        .iter()
        .zip(0..)
        .map(|(c, k)| (c * len.powi(k)).abs())
        .sum()
}

/// Solve `a · [x0, x1] = b` by Cramer's rule. A singular system returns the
/// offending determinant.
fn solve_2x2(a: [[f64; 2]; 2], b: [f64; 2]) -> Result<[f64; 2], f64> {
    let det = a[0][0] * a[1][1] - a[0][1] * a[1][0];
    if det == 0.0 || !det.is_finite() {
        return Err(det);
    }
    let x0 = (b[0] * a[1][1] - a[0][1] * b[1]) / det;
    let x1 = (a[0][0] * b[1] - b[0] * a[1][0]) / det;
    Ok([x0, x1])
}
