//! # Unit Types
//!
//! Type-safe SI wrappers for front ends. The engine itself computes in
//! whatever consistent units it is given; these newtypes exist so a form or
//! CLI can accept the units people actually type (kN, kN/m, GPa) and hand the
//! engine base SI values (N, N/m, Pa), then convert results back for display.
//!
//! ## Base Units
//!
//! - Length: meters (m), millimeters (mm)
//! - Force: newtons (N), kilonewtons (kN)
//! - Distributed load: N/m, kN/m
//! - Stress / modulus: pascals (Pa), megapascals (MPa), gigapascals (GPa)
//! - Moment: N·m, kN·m
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{Gigapascals, Kilonewtons, Newtons, Pascals};
//!
//! let e: Pascals = Gigapascals(200.0).into();
//! assert_eq!(e.0, 200e9);
//!
//! let p: Newtons = Kilonewtons(10.0).into();
//! assert_eq!(p.0, 10_000.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Distributed Load Units
// ============================================================================

/// Distributed load in newtons per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMeter(pub f64);

/// Distributed load in kilonewtons per meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonsPerMeter(pub f64);

impl From<KilonewtonsPerMeter> for NewtonsPerMeter {
    fn from(knm: KilonewtonsPerMeter) -> Self {
        NewtonsPerMeter(knm.0 * 1000.0)
    }
}

impl From<NewtonsPerMeter> for KilonewtonsPerMeter {
    fn from(nm: NewtonsPerMeter) -> Self {
        KilonewtonsPerMeter(nm.0 / 1000.0)
    }
}

// ============================================================================
// Stress / Modulus Units
// ============================================================================

/// Stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Modulus in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

impl From<Megapascals> for Pascals {
    fn from(mpa: Megapascals) -> Self {
        Pascals(mpa.0 * 1e6)
    }
}

impl From<Pascals> for Megapascals {
    fn from(pa: Pascals) -> Self {
        Megapascals(pa.0 / 1e6)
    }
}

impl From<Gigapascals> for Pascals {
    fn from(gpa: Gigapascals) -> Self {
        Pascals(gpa.0 * 1e9)
    }
}

impl From<Pascals> for Gigapascals {
    fn from(pa: Pascals) -> Self {
        Gigapascals(pa.0 / 1e9)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in kilonewton-meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<KilonewtonMeters> for NewtonMeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMeters(knm.0 * 1000.0)
    }
}

impl From<NewtonMeters> for KilonewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KilonewtonMeters(nm.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(NewtonsPerMeter);
impl_arithmetic!(KilonewtonsPerMeter);
impl_arithmetic!(Pascals);
impl_arithmetic!(Megapascals);
impl_arithmetic!(Gigapascals);
impl_arithmetic!(NewtonMeters);
impl_arithmetic!(KilonewtonMeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modulus_conversion() {
        let e: Pascals = Gigapascals(200.0).into();
        assert_eq!(e.0, 200e9);
        let back: Gigapascals = e.into();
        assert_eq!(back.0, 200.0);
    }

    #[test]
    fn test_load_conversions() {
        let w: NewtonsPerMeter = KilonewtonsPerMeter(5.0).into();
        assert_eq!(w.0, 5000.0);
        let p: Kilonewtons = Newtons(2500.0).into();
        assert_eq!(p.0, 2.5);
    }

    #[test]
    fn test_display_conversions() {
        let delta: Millimeters = Meters(0.0045).into();
        assert!((delta.0 - 4.5).abs() < 1e-12);
        let stress: Megapascals = Pascals(30e6).into();
        assert_eq!(stress.0, 30.0);
        let moment: KilonewtonMeters = NewtonMeters(15_000.0).into();
        assert_eq!(moment.0, 15.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(6.0);
        let b = Meters(1.5);
        assert_eq!((a + b).0, 7.5);
        assert_eq!((a - b).0, 4.5);
        assert_eq!((a * 2.0).value(), 12.0);
        assert_eq!((a / 2.0).value(), 3.0);
    }

    #[test]
    fn test_serialization() {
        let w = KilonewtonsPerMeter(5.5);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "5.5");
        let roundtrip: KilonewtonsPerMeter = serde_json::from_str(&json).unwrap();
        assert_eq!(w, roundtrip);
    }
}
