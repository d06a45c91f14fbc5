//! Shear force and bending moment as piecewise polynomials.
//!
//! Scans the breakpoints left to right starting from V(0⁺) = R1:
//!
//! - across a segment carrying total UDL intensity w: V(t) = V₀ − w·t
//! - at a point load P: V drops by P
//! - M(t) = M₀ + V₀·t − w·t²/2, the running integral of V
//!
//! At x = L adding R2 must bring V back to zero, and M(L) must vanish (no end
//! moments). Both are checked; failure means the engine is wrong, not the
//! input.
//!
//! ## Sign Convention
//! - Positive shear: left side up relative to right
//! - Positive moment: sagging (tension on bottom fiber)

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::reactions::Reactions;
use super::Deadline;
use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadSet;
use crate::piecewise::{PiecewiseFunction, Polynomial, Quantity, Segment};

/// V(x) and M(x) over the span, sharing breakpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalForces {
    /// Shear force V(x)
    pub shear: PiecewiseFunction,
    /// Bending moment M(x)
    pub moment: PiecewiseFunction,
}

/// Assemble V(x) and M(x) for `loads` given the support `reactions`.
pub(crate) fn build_internal_forces(
    loads: &LoadSet,
    reactions: &Reactions,
    tolerance: f64,
    deadline: &Deadline,
) -> CalcResult<InternalForces> {
    let breakpoints = loads.breakpoints();
    let mut shear_segments = Vec::with_capacity(breakpoints.len() - 1);
    let mut moment_segments = Vec::with_capacity(breakpoints.len() - 1);

    // A point load sitting on the left support acts before the first segment
    let mut v = reactions.left - loads.point_force_at(0.0);
    let mut m = 0.0;

    for pair in breakpoints.windows(2) {
        deadline.check("internal force assembly")?;

        let (a, b) = (pair[0], pair[1]);
        let w = loads.intensity_over(a, b);
        let shear = Polynomial::linear(v, -w);
        let moment = shear.integral(m);
        trace!("segment [{}, {}]: V0 = {:.6e}, M0 = {:.6e}, w = {:.6e}", a, b, v, m, w);

        shear_segments.push(Segment::new(a, b, shear));
        moment_segments.push(Segment::new(a, b, moment));

        let len = b - a;
        v = shear.eval(len) - loads.point_force_at(b);
        m = moment.eval(len);
    }

    let force_scale = loads.force_scale().max(f64::MIN_POSITIVE);

    let shear_residual = (v + reactions.right).abs();
    let shear_limit = tolerance * force_scale;
    if shear_residual > shear_limit {
        return Err(CalcError::inconsistency("shear at x = L", shear_residual, shear_limit));
    }

    let moment_limit = tolerance * force_scale * loads.length();
    if m.abs() > moment_limit {
        return Err(CalcError::inconsistency("moment at x = L", m.abs(), moment_limit));
    }

    debug!(
        "internal forces: {} segments, V(L+) residual {:.3e}, M(L) residual {:.3e}",
        shear_segments.len(),
        shear_residual,
        m.abs()
    );

    Ok(InternalForces {
        shear: PiecewiseFunction::new(Quantity::Shear, shear_segments),
        moment: PiecewiseFunction::new(Quantity::Moment, moment_segments),
    })
}
