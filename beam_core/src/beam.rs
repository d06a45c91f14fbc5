//! # Beam Definition
//!
//! A straight, simply supported beam: pin at x = 0, roller at x = L.
//! All quantities are in consistent base units (the engine does no unit
//! conversion; see [`crate::units`] for front-end helpers).
//!
//! ```text
//!    △────────────────────────△
//!    x = 0                  x = L
//! ```
//!
//! A `Beam` is validated once on construction and immutable afterwards.
//! Deserializing goes through the same validation.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::beam::Beam;
//!
//! // 6 m steel beam, E = 200 GPa, I = 5e-5 m^4, Z = 5e-4 m^3
//! let beam = Beam::new(6.0, 200e9, 5e-5, 5e-4).unwrap();
//! assert_eq!(beam.length(), 6.0);
//! assert!((beam.flexural_rigidity() - 1.0e7).abs() < 1e-3);
//!
//! // Zero length is rejected
//! assert!(Beam::new(0.0, 200e9, 5e-5, 5e-4).is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Raw beam properties, as read from JSON or a form.
///
/// Converted into a [`Beam`] with `Beam::try_from`, which validates them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamProperties {
    /// Span length L
    pub length: f64,
    /// Elastic modulus E
    pub elastic_modulus: f64,
    /// Second moment of area I
    pub moment_of_inertia: f64,
    /// Elastic section modulus Z (I / c)
    pub section_modulus: f64,
}

/// A validated simply supported beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BeamProperties", into = "BeamProperties")]
pub struct Beam {
    length: f64,
    elastic_modulus: f64,
    moment_of_inertia: f64,
    section_modulus: f64,
}

impl Beam {
    /// Create a beam, rejecting any property that is not positive and finite.
    ///
    /// # Arguments
    /// * `length` - Span L
    /// * `elastic_modulus` - E
    /// * `moment_of_inertia` - I
    /// * `section_modulus` - Z
    pub fn new(
        length: f64,
        elastic_modulus: f64,
        moment_of_inertia: f64,
        section_modulus: f64,
    ) -> CalcResult<Self> {
        check_positive("length", length, "Beam length must be positive")?;
        check_positive("elastic_modulus", elastic_modulus, "Elastic modulus must be positive")?;
        check_positive(
            "moment_of_inertia",
            moment_of_inertia,
            "Second moment of area must be positive",
        )?;
        check_positive("section_modulus", section_modulus, "Section modulus must be positive")?;

        Ok(Beam {
            length,
            elastic_modulus,
            moment_of_inertia,
            section_modulus,
        })
    }

    /// Create a beam with a solid rectangular section bending about its
    /// strong axis.
    ///
    /// ```text
    ///     ┌─────────┐
    ///   d │ ════════│ ← neutral axis at d/2
    ///     └─────────┘
    ///          b
    /// ```
    ///
    /// I = b·d³/12, Z = b·d²/6
    ///
    /// ```rust
    /// use beam_core::beam::Beam;
    ///
    /// let beam = Beam::rectangular(4.0, 11e9, 0.1, 0.3).unwrap();
    /// assert!((beam.moment_of_inertia() - 2.25e-4).abs() < 1e-12);
    /// assert!((beam.section_modulus() - 1.5e-3).abs() < 1e-12);
    /// ```
    pub fn rectangular(length: f64, elastic_modulus: f64, width: f64, depth: f64) -> CalcResult<Self> {
        check_positive("width", width, "Section width must be positive")?;
        check_positive("depth", depth, "Section depth must be positive")?;
        let moment_of_inertia = width * depth.powi(3) / 12.0;
        let section_modulus = width * depth.powi(2) / 6.0;
        Beam::new(length, elastic_modulus, moment_of_inertia, section_modulus)
    }

    /// Span length L
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Elastic modulus E
    pub fn elastic_modulus(&self) -> f64 {
        self.elastic_modulus
    }

    /// Second moment of area I
    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    /// Section modulus Z
    pub fn section_modulus(&self) -> f64 {
        self.section_modulus
    }

    /// Flexural rigidity EI
    pub fn flexural_rigidity(&self) -> f64 {
        self.elastic_modulus * self.moment_of_inertia
    }

    /// Raw properties (for display or re-serialization)
    pub fn properties(&self) -> BeamProperties {
        BeamProperties {
            length: self.length,
            elastic_modulus: self.elastic_modulus,
            moment_of_inertia: self.moment_of_inertia,
            section_modulus: self.section_modulus,
        }
    }

    /// True when `x` lies on the span [0, L]
    pub fn contains(&self, x: f64) -> bool {
        (0.0..=self.length).contains(&x)
    }
}

impl TryFrom<BeamProperties> for Beam {
    type Error = CalcError;

    fn try_from(props: BeamProperties) -> CalcResult<Self> {
        Beam::new(
            props.length,
            props.elastic_modulus,
            props.moment_of_inertia,
            props.section_modulus,
        )
    }
}

impl From<Beam> for BeamProperties {
    fn from(beam: Beam) -> Self {
        beam.properties()
    }
}

fn check_positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_beam(field, value.to_string(), reason))
    }
}
