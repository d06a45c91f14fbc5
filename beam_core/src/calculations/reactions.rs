//! Support reactions from global equilibrium.
//!
//! ```text
//!          F (resultant of all loads, at x̄)
//!          ↓
//!    △─────┴──────────────△
//!   R1  ←───────L────────→ R2
//! ```
//!
//! - ΣM about x = 0:  R2·L = M0  →  R2 = M0 / L
//! - ΣF:              R1 = F − R2
//!
//! Reactions are positive upward.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::LoadSet;

/// Support reactions, positive upward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Pin reaction at x = 0
    pub left: f64,
    /// Roller reaction at x = L
    pub right: f64,
}

impl Reactions {
    /// R_left + R_right
    pub fn total(&self) -> f64 {
        self.left + self.right
    }
}

/// Solve the two reactions from total force `total_force` and total moment
/// about the left support `moment_about_origin` on a span `length`.
///
/// ```rust
/// use beam_core::calculations::reactions::solve_reactions;
///
/// // 1000 N at 3 m on a 10 m span
/// let r = solve_reactions(10.0, 1000.0, 3000.0);
/// assert!((r.left - 700.0).abs() < 1e-9);
/// assert!((r.right - 300.0).abs() < 1e-9);
/// ```
pub fn solve_reactions(length: f64, total_force: f64, moment_about_origin: f64) -> Reactions {
    let right = moment_about_origin / length;
    let left = total_force - right;
    Reactions { left, right }
}

/// Reactions for a validated load set, with both equilibrium checks applied.
pub fn reactions_for(loads: &LoadSet, tolerance: f64) -> CalcResult<Reactions> {
    let reactions = solve_reactions(loads.length(), loads.total_force(), loads.moment_about_origin());
    check_equilibrium(&reactions, loads, tolerance)?;
    debug!(
        "reactions: left = {:.6e}, right = {:.6e} (F = {:.6e})",
        reactions.left,
        reactions.right,
        loads.total_force()
    );
    Ok(reactions)
}

/// Verify ΣF = 0 and ΣM = 0 about the right support.
///
/// The moment check is independent of how the reactions were solved (it
/// uses lever arms measured from x = L), so it catches a wrong moment sum.
pub fn check_equilibrium(reactions: &Reactions, loads: &LoadSet, tolerance: f64) -> CalcResult<()> {
    let force_scale = loads.force_scale().max(f64::MIN_POSITIVE);

    let force_residual = (reactions.total() - loads.total_force()).abs();
    let force_limit = tolerance * force_scale;
    if force_residual > force_limit {
        return Err(CalcError::inconsistency(
            "vertical force balance",
            force_residual,
            force_limit,
        ));
    }

    let length = loads.length();
    let moment_residual = (reactions.left * length - loads.moment_about_end()).abs();
    let moment_limit = tolerance * force_scale * length;
    if moment_residual > moment_limit {
        return Err(CalcError::inconsistency(
            "moment balance about right support",
            moment_residual,
            moment_limit,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beam::Beam;
    use crate::loads::Load;

    fn load_set(length: f64, loads: &[Load]) -> LoadSet {
        let beam = Beam::new(length, 200e9, 5e-5, 5e-4).unwrap();
        LoadSet::new(&beam, loads).unwrap()
    }

    #[test]
    fn test_central_point_load() {
        let set = load_set(10.0, &[Load::point(1000.0, 5.0)]);
        let r = reactions_for(&set, 1e-9).unwrap();
        assert_eq!(r.left, 500.0);
        assert_eq!(r.right, 500.0);
    }

    #[test]
    fn test_partial_uniform() {
        // 100 plf from 2 ft to 8 ft on 10 ft: W = 600 at centroid 5
        let set = load_set(10.0, &[Load::uniform(100.0, 2.0, 8.0)]);
        let r = reactions_for(&set, 1e-9).unwrap();
        assert!((r.left - 300.0).abs() < 1e-9);
        assert!((r.right - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_off_centre_combination() {
        // 12 ft: 50 plf full span + 1000 lb at 3 ft
        let set = load_set(12.0, &[Load::uniform_full(50.0, 12.0), Load::point(1000.0, 3.0)]);
        let r = reactions_for(&set, 1e-9).unwrap();
        // Uniform: 300 / 300. Point: 750 / 250
        assert!((r.left - 1050.0).abs() < 1e-9);
        assert!((r.right - 550.0).abs() < 1e-9);
        assert!((r.total() - set.total_force()).abs() <= 1e-9 * set.total_force());
    }

    #[test]
    fn test_load_on_support_goes_to_that_support() {
        let set = load_set(8.0, &[Load::point(40.0, 0.0), Load::point(10.0, 8.0)]);
        let r = reactions_for(&set, 1e-9).unwrap();
        assert_eq!(r.left, 40.0);
        assert_eq!(r.right, 10.0);
    }

    #[test]
    fn test_no_loads() {
        let set = load_set(5.0, &[]);
        let r = reactions_for(&set, 1e-9).unwrap();
        assert_eq!(r, Reactions { left: 0.0, right: 0.0 });
    }

    #[test]
    fn test_inconsistent_reactions_fail_loudly() {
        let set = load_set(10.0, &[Load::point(1000.0, 2.0)]);
        // Reactions that sum correctly but violate moment balance
        let wrong = Reactions { left: 500.0, right: 500.0 };
        match check_equilibrium(&wrong, &set, 1e-9) {
            Err(CalcError::InternalConsistency { check, .. }) => {
                assert_eq!(check, "moment balance about right support");
            }
            other => panic!("expected InternalConsistency, got {:?}", other),
        }

        let short = Reactions { left: 800.0, right: 100.0 };
        assert!(check_equilibrium(&short, &set, 1e-9).is_err());
    }
}
