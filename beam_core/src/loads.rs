//! # Load Model
//!
//! Point loads and uniformly distributed loads (UDLs) on a simply supported
//! beam, and the validated, position-sorted [`LoadSet`] the solvers consume.
//!
//! ## Sign Convention
//!
//! - Magnitudes are positive downward (gravity direction)
//! - Positions are measured from the left support
//!
//! ## Example
//!
//! ```rust
//! use beam_core::beam::Beam;
//! use beam_core::loads::{Load, LoadSet};
//!
//! let beam = Beam::new(10.0, 200e9, 5e-5, 5e-4).unwrap();
//! let loads = [
//!     Load::uniform(2.0, 4.0, 8.0),   // 2 kN/m over 4..8 m
//!     Load::point(10.0, 3.0),         // 10 kN at 3 m
//! ];
//!
//! let set = LoadSet::new(&beam, &loads).unwrap();
//! assert_eq!(set.total_force(), 18.0);
//! assert_eq!(set.moment_about_origin(), 10.0 * 3.0 + 8.0 * 6.0);
//!
//! // A load past the right support is rejected
//! assert!(LoadSet::new(&beam, &[Load::point(1.0, 15.0)]).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::beam::Beam;
use crate::errors::{CalcError, CalcResult};

/// A single load applied to the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    /// Concentrated force P at distance `position` from the left support
    Point { magnitude: f64, position: f64 },

    /// Uniform intensity w (force per length) from `start` to `end`
    Distributed { intensity: f64, start: f64, end: f64 },
}

impl Load {
    /// Create a point load
    pub fn point(magnitude: f64, position: f64) -> Self {
        Load::Point { magnitude, position }
    }

    /// Create a uniformly distributed load over [start, end]
    pub fn uniform(intensity: f64, start: f64, end: f64) -> Self {
        Load::Distributed { intensity, start, end }
    }

    /// Create a uniformly distributed load over the full span
    pub fn uniform_full(intensity: f64, length: f64) -> Self {
        Load::Distributed {
            intensity,
            start: 0.0,
            end: length,
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point { .. } => "Point",
            Load::Distributed { .. } => "Uniform",
        }
    }

    /// Resultant force of this load
    pub fn resultant(&self) -> f64 {
        match *self {
            Load::Point { magnitude, .. } => magnitude,
            Load::Distributed { intensity, start, end } => intensity * (end - start),
        }
    }

    /// Line of action of the resultant (UDL centroid at (s + e) / 2)
    pub fn centroid(&self) -> f64 {
        match *self {
            Load::Point { position, .. } => position,
            Load::Distributed { start, end, .. } => (start + end) / 2.0,
        }
    }

    /// Moment of this load about the left support (x = 0)
    pub fn moment_about_origin(&self) -> f64 {
        self.resultant() * self.centroid()
    }

    /// Leftmost position touched by the load, used for ordering
    pub fn leading_position(&self) -> f64 {
        match *self {
            Load::Point { position, .. } => position,
            Load::Distributed { start, .. } => start,
        }
    }

    /// Validate placement against a span of length `length`.
    ///
    /// `index` names the load in error messages (`loads[index].field`).
    pub fn validate(&self, index: usize, length: f64) -> CalcResult<()> {
        let field = |name: &str| format!("loads[{}].{}", index, name);
        let on_span = |x: f64| x.is_finite() && (0.0..=length).contains(&x);

        match *self {
            Load::Point { magnitude, position } => {
                if !magnitude.is_finite() {
                    return Err(CalcError::invalid_load(
                        field("magnitude"),
                        magnitude.to_string(),
                        "Point load magnitude must be finite",
                    ));
                }
                if !on_span(position) {
                    return Err(CalcError::invalid_load(
                        field("position"),
                        position.to_string(),
                        format!("Point load must lie within [0, {}]", length),
                    ));
                }
            }
            Load::Distributed { intensity, start, end } => {
                if !intensity.is_finite() {
                    return Err(CalcError::invalid_load(
                        field("intensity"),
                        intensity.to_string(),
                        "Distributed load intensity must be finite",
                    ));
                }
                if !on_span(start) {
                    return Err(CalcError::invalid_load(
                        field("start"),
                        start.to_string(),
                        format!("Distributed load start must lie within [0, {}]", length),
                    ));
                }
                if !on_span(end) {
                    return Err(CalcError::invalid_load(
                        field("end"),
                        end.to_string(),
                        format!("Distributed load end must lie within [0, {}]", length),
                    ));
                }
                if start >= end {
                    return Err(CalcError::invalid_load(
                        field("end"),
                        end.to_string(),
                        format!("Distributed load end must be greater than start ({})", start),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Loads validated against one beam and sorted by position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSet {
    length: f64,
    loads: Vec<Load>,
}

impl LoadSet {
    /// Validate every load against `beam` and sort them by leading position.
    pub fn new(beam: &Beam, loads: &[Load]) -> CalcResult<Self> {
        let length = beam.length();
        for (index, load) in loads.iter().enumerate() {
            load.validate(index, length)?;
        }

        let mut loads = loads.to_vec();
        loads.sort_by(|a, b| a.leading_position().total_cmp(&b.leading_position()));

        Ok(LoadSet { length, loads })
    }

    /// Span length the loads were validated against
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Loads in ascending position order
    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    /// True when no loads are applied
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Total applied force F = ΣP + Σw·(e − s)
    pub fn total_force(&self) -> f64 {
        self.loads.iter().map(Load::resultant).sum()
    }

    /// Total applied moment about x = 0: ΣP·a + Σw·(e − s)·(s + e)/2
    pub fn moment_about_origin(&self) -> f64 {
        self.loads.iter().map(Load::moment_about_origin).sum()
    }

    /// Total applied moment about x = L (same sense as about the origin,
    /// measured with lever arm L − x)
    pub fn moment_about_end(&self) -> f64 {
        self.loads
            .iter()
            .map(|load| load.resultant() * (self.length - load.centroid()))
            .sum()
    }

    /// Sum of absolute resultants, the force scale used for tolerances
    pub fn force_scale(&self) -> f64 {
        self.loads.iter().map(|load| load.resultant().abs()).sum()
    }

    /// Sorted, de-duplicated positions where V or its slope changes,
    /// always including 0 and L.
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut points = vec![0.0, self.length];
        for load in &self.loads {
            match *load {
                Load::Point { position, .. } => points.push(position),
                Load::Distributed { start, end, .. } => {
                    points.push(start);
                    points.push(end);
                }
            }
        }
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }

    /// Sum of point loads applied exactly at `x`
    pub fn point_force_at(&self, x: f64) -> f64 {
        self.loads
            .iter()
            .filter_map(|load| match *load {
                Load::Point { magnitude, position } if position == x => Some(magnitude),
                _ => None,
            })
            .sum()
    }

    /// Combined UDL intensity acting over the whole interval [a, b]
    pub fn intensity_over(&self, a: f64, b: f64) -> f64 {
        self.loads
            .iter()
            .filter_map(|load| match *load {
                Load::Distributed { intensity, start, end } if start <= a && end >= b => {
                    Some(intensity)
                }
                _ => None,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beam(length: f64) -> Beam {
        Beam::new(length, 200e9, 5e-5, 5e-4).unwrap()
    }

    #[test]
    fn test_resultant_and_centroid() {
        let udl = Load::uniform(100.0, 2.0, 8.0);
        assert_eq!(udl.resultant(), 600.0);
        assert_eq!(udl.centroid(), 5.0);
        assert_eq!(udl.moment_about_origin(), 3000.0);

        let p = Load::point(1000.0, 3.0);
        assert_eq!(p.resultant(), 1000.0);
        assert_eq!(p.moment_about_origin(), 3000.0);
    }

    #[test]
    fn test_point_load_outside_span() {
        let err = LoadSet::new(&beam(10.0), &[Load::point(5.0, 15.0)]).unwrap_err();
        match err {
            CalcError::InvalidLoad { field, value, .. } => {
                assert_eq!(field, "loads[0].position");
                assert_eq!(value, "15");
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(LoadSet::new(&beam(10.0), &[Load::point(5.0, -0.5)]).is_err());
    }

    #[test]
    fn test_point_load_on_supports_is_valid() {
        assert!(LoadSet::new(&beam(10.0), &[Load::point(5.0, 0.0), Load::point(5.0, 10.0)]).is_ok());
    }

    #[test]
    fn test_degenerate_udl() {
        let err = LoadSet::new(&beam(10.0), &[Load::uniform(1.0, 4.0, 4.0)]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_LOAD");
        assert!(LoadSet::new(&beam(10.0), &[Load::uniform(1.0, 6.0, 2.0)]).is_err());
        assert!(LoadSet::new(&beam(10.0), &[Load::uniform(1.0, -1.0, 2.0)]).is_err());
        assert!(LoadSet::new(&beam(10.0), &[Load::uniform(1.0, 2.0, 10.5)]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LoadSet::new(&beam(10.0), &[Load::point(f64::NAN, 1.0)]).is_err());
        assert!(LoadSet::new(&beam(10.0), &[Load::uniform(f64::INFINITY, 0.0, 1.0)]).is_err());
    }

    #[test]
    fn test_error_names_offending_index() {
        let loads = [Load::point(1.0, 1.0), Load::uniform(1.0, 3.0, 12.0)];
        match LoadSet::new(&beam(10.0), &loads).unwrap_err() {
            CalcError::InvalidLoad { field, .. } => assert_eq!(field, "loads[1].end"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_sorted_by_position() {
        let loads = [
            Load::point(1.0, 7.0),
            Load::uniform(2.0, 1.0, 3.0),
            Load::point(3.0, 2.0),
        ];
        let set = LoadSet::new(&beam(10.0), &loads).unwrap();
        let positions: Vec<f64> = set.loads().iter().map(Load::leading_position).collect();
        assert_eq!(positions, vec![1.0, 2.0, 7.0]);
    }

    #[test]
    fn test_breakpoints_deduplicated() {
        let loads = [
            Load::point(1.0, 5.0),
            Load::uniform(2.0, 0.0, 5.0),
            Load::point(1.0, 10.0),
        ];
        let set = LoadSet::new(&beam(10.0), &loads).unwrap();
        assert_eq!(set.breakpoints(), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_totals() {
        let loads = [Load::point(10.0, 2.0), Load::uniform_full(3.0, 10.0)];
        let set = LoadSet::new(&beam(10.0), &loads).unwrap();
        assert_eq!(set.total_force(), 40.0);
        assert_eq!(set.moment_about_origin(), 20.0 + 150.0);
        assert_eq!(set.moment_about_end(), 80.0 + 150.0);
        assert_eq!(set.intensity_over(2.0, 5.0), 3.0);
        assert_eq!(set.point_force_at(2.0), 10.0);
        assert_eq!(set.point_force_at(3.0), 0.0);
    }

    #[test]
    fn test_load_json_format() {
        let json = r#"[
            {"type": "Point", "magnitude": 10000.0, "position": 3.0},
            {"type": "Distributed", "intensity": 5000.0, "start": 0.0, "end": 6.0}
        ]"#;
        let loads: Vec<Load> = serde_json::from_str(json).unwrap();
        assert_eq!(loads[0], Load::point(10000.0, 3.0));
        assert_eq!(loads[1], Load::uniform_full(5000.0, 6.0));
    }
}
