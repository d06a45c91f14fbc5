//! # Piecewise Polynomial Functions
//!
//! Shear, moment, slope and deflection are all stored the same way: an
//! ordered list of segments, each a closed-form polynomial of degree ≤ 4
//! written in the local coordinate `t = x - start`. Local coordinates keep
//! the coefficients well scaled on long spans and make integration a
//! matter of shifting coefficients.
//!
//! ```text
//!   f(x) ─┬─ [x0, x1): p0(x - x0)
//!         ├─ [x1, x2): p1(x - x1)
//!         └─ [x2, x3]: p2(x - x2)
//! ```
//!
//! Segment lookup is a binary search over segment ends. At a breakpoint the
//! function may jump (shear under a point load), so both one-sided limits are
//! available explicitly; [`PiecewiseFunction::eval`] returns the right limit
//! at interior breakpoints and the left limit at the right end.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::settings::MAX_SAMPLE_POINTS;

/// Number of stored coefficients (degree ≤ 4)
pub const MAX_TERMS: usize = 5;

/// Polynomial `c0 + c1·t + c2·t² + c3·t³ + c4·t⁴`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polynomial {
    coeffs: [f64; MAX_TERMS],
}

impl Polynomial {
    /// The zero polynomial
    pub const ZERO: Polynomial = Polynomial { coeffs: [0.0; MAX_TERMS] };

    /// Create from coefficients in ascending order of power
    pub fn new(coeffs: [f64; MAX_TERMS]) -> Self {
        Polynomial { coeffs }
    }

    /// Constant polynomial
    pub fn constant(c0: f64) -> Self {
        Polynomial::new([c0, 0.0, 0.0, 0.0, 0.0])
    }

    /// Linear polynomial `c0 + c1·t`
    pub fn linear(c0: f64, c1: f64) -> Self {
        Polynomial::new([c0, c1, 0.0, 0.0, 0.0])
    }

    /// Coefficients in ascending order of power
    pub fn coefficients(&self) -> &[f64; MAX_TERMS] {
        &self.coeffs
    }

    /// Highest power with a non-zero coefficient (0 for the zero polynomial)
    pub fn degree(&self) -> usize {
        self.coeffs.iter().rposition(|&c| c != 0.0).unwrap_or(0)
    }

    /// Evaluate by Horner's rule
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// First derivative
    pub fn derivative(&self) -> Polynomial {
        let mut out = [0.0; MAX_TERMS];
        for power in 1..MAX_TERMS {
            out[power - 1] = self.coeffs[power] * power as f64;
        }
        Polynomial::new(out)
    }

    /// Antiderivative with the given value at t = 0.
    ///
    /// Only defined for degree ≤ 3; the quartic term of the result holds the
    /// integrated cubic.
    pub fn integral(&self, constant: f64) -> Polynomial {
        debug_assert!(
            self.coeffs[MAX_TERMS - 1] == 0.0,
            "integrating a quartic would exceed the stored degree"
        );
        let mut out = [0.0; MAX_TERMS];
        out[0] = constant;
        for power in 0..MAX_TERMS - 1 {
            out[power + 1] = self.coeffs[power] / (power + 1) as f64;
        }
        Polynomial::new(out)
    }

    /// Multiply every coefficient by `k`
    pub fn scale(&self, k: f64) -> Polynomial {
        let mut out = self.coeffs;
        out.iter_mut().for_each(|c| *c *= k);
        Polynomial::new(out)
    }

    /// Root of a polynomial of degree ≤ 1, if it has exactly one
    pub fn linear_root(&self) -> Option<f64> {
        debug_assert!(self.degree() <= 1);
        let [c0, c1, ..] = self.coeffs;
        if c1 == 0.0 {
            None
        } else {
            Some(-c0 / c1)
        }
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: Polynomial) -> Polynomial {
        let mut out = self.coeffs;
        for (a, b) in out.iter_mut().zip(rhs.coeffs.iter()) {
            *a += b;
        }
        Polynomial::new(out)
    }
}

/// One interval of a piecewise function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Left end of the interval (global x)
    pub start: f64,
    /// Right end of the interval (global x)
    pub end: f64,
    /// Polynomial in the local coordinate `t = x - start`
    pub poly: Polynomial,
}

impl Segment {
    /// Create a segment
    pub fn new(start: f64, end: f64, poly: Polynomial) -> Self {
        Segment { start, end, poly }
    }

    /// Interval length
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// True for a zero-length interval
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Evaluate at global `x` (not range checked)
    pub fn eval(&self, x: f64) -> f64 {
        self.poly.eval(x - self.start)
    }

    /// Value at the left end
    pub fn start_value(&self) -> f64 {
        self.poly.eval(0.0)
    }

    /// Value at the right end
    pub fn end_value(&self) -> f64 {
        self.poly.eval(self.len())
    }
}

/// Which physical quantity a piecewise function describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quantity {
    /// Shear force V(x)
    Shear,
    /// Bending moment M(x)
    Moment,
    /// Slope θ(x)
    Slope,
    /// Deflection y(x)
    Deflection,
}

impl Quantity {
    /// Conventional symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Quantity::Shear => "V",
            Quantity::Moment => "M",
            Quantity::Slope => "θ",
            Quantity::Deflection => "y",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quantity::Shear => "Shear",
            Quantity::Moment => "Moment",
            Quantity::Slope => "Slope",
            Quantity::Deflection => "Deflection",
        };
        write!(f, "{}", name)
    }
}

/// A function over [0, L] made of contiguous polynomial segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PiecewiseParts")]
pub struct PiecewiseFunction {
    quantity: Quantity,
    segments: Vec<Segment>,
}

/// Unchecked wire form of [`PiecewiseFunction`], validated on conversion
#[derive(Debug, Clone, Deserialize)]
pub struct PiecewiseParts {
    quantity: Quantity,
    segments: Vec<Segment>,
}

impl TryFrom<PiecewiseParts> for PiecewiseFunction {
    type Error = CalcError;

    fn try_from(parts: PiecewiseParts) -> CalcResult<Self> {
        if parts.segments.is_empty() {
            return Err(CalcError::invalid_input(
                "segments",
                "[]",
                "A piecewise function needs at least one segment",
            ));
        }
        for (index, seg) in parts.segments.iter().enumerate() {
            if !seg.start.is_finite() || !seg.end.is_finite() || seg.start >= seg.end {
                return Err(CalcError::invalid_input(
                    format!("segments[{}]", index),
                    format!("[{}, {}]", seg.start, seg.end),
                    "Segment bounds must be finite with start < end",
                ));
            }
        }
        for (index, pair) in parts.segments.windows(2).enumerate() {
            if pair[0].end != pair[1].start {
                return Err(CalcError::invalid_input(
                    format!("segments[{}].start", index + 1),
                    pair[1].start.to_string(),
                    format!("Segments must be contiguous (previous ends at {})", pair[0].end),
                ));
            }
        }
        Ok(PiecewiseFunction::new(parts.quantity, parts.segments))
    }
}

impl PiecewiseFunction {
    /// Assemble from contiguous, non-empty segments in ascending order.
    pub(crate) fn new(quantity: Quantity, segments: Vec<Segment>) -> Self {
        debug_assert!(!segments.is_empty());
        debug_assert!(segments.windows(2).all(|w| w[0].end == w[1].start));
        PiecewiseFunction { quantity, segments }
    }

    /// Quantity this function describes
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Segments in ascending order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Left end of the domain (0)
    pub fn start(&self) -> f64 {
        self.segments[0].start
    }

    /// Right end of the domain (L)
    pub fn end(&self) -> f64 {
        self.segments[self.segments.len() - 1].end
    }

    /// All breakpoints including both ends
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self.segments.iter().map(|s| s.start).collect();
        points.push(self.end());
        points
    }

    fn check_range(&self, x: f64) -> CalcResult<()> {
        if x.is_nan() || x < self.start() || x > self.end() {
            return Err(CalcError::out_of_range(self.quantity.to_string(), x, self.end()));
        }
        Ok(())
    }

    /// Index of the segment with `start <= x < end` (last segment at x = L)
    fn right_index(&self, x: f64) -> usize {
        self.segments
            .partition_point(|s| s.end <= x)
            .min(self.segments.len() - 1)
    }

    /// Index of the segment with `start < x <= end` (first segment at x = 0)
    fn left_index(&self, x: f64) -> usize {
        self.segments
            .partition_point(|s| s.end < x)
            .min(self.segments.len() - 1)
    }

    /// Evaluate at `x`.
    ///
    /// Returns the value just after `x` at interior breakpoints and the value
    /// just before `x` at the right end. Fails with `OutOfRange` outside the
    /// span.
    pub fn eval(&self, x: f64) -> CalcResult<f64> {
        self.check_range(x)?;
        Ok(self.eval_unchecked(x))
    }

    /// Limit from the left ("the value just before x")
    pub fn eval_left(&self, x: f64) -> CalcResult<f64> {
        self.check_range(x)?;
        Ok(self.segments[self.left_index(x)].eval(x))
    }

    /// Limit from the right ("the value just after x")
    pub fn eval_right(&self, x: f64) -> CalcResult<f64> {
        self.check_range(x)?;
        Ok(self.segments[self.right_index(x)].eval(x))
    }

    /// Jump `f(x⁺) - f(x⁻)` at `x` (zero where the function is continuous)
    pub fn jump_at(&self, x: f64) -> CalcResult<f64> {
        Ok(self.eval_right(x)? - self.eval_left(x)?)
    }

    pub(crate) fn eval_unchecked(&self, x: f64) -> f64 {
        self.segments[self.right_index(x)].eval(x)
    }

    /// Uniformly spaced `(x, f(x))` pairs from 0 to L inclusive.
    ///
    /// `points` is clamped to `[2, MAX_SAMPLE_POINTS]`.
    pub fn sample(&self, points: usize) -> Vec<(f64, f64)> {
        let points = points.clamp(2, MAX_SAMPLE_POINTS);
        let (a, b) = (self.start(), self.end());
        (0..points)
            .map(|i| {
                let x = if i == points - 1 {
                    b
                } else {
                    a + (b - a) * i as f64 / (points - 1) as f64
                };
                (x, self.eval_unchecked(x))
            })
            .collect()
    }

    /// Uniform samples plus both one-sided values at every breakpoint, so a
    /// plotted shear diagram shows vertical jumps instead of slanted ones.
    pub fn sample_with_breakpoints(&self, points: usize) -> Vec<(f64, f64)> {
        let breakpoints = self.breakpoints();
        let mut out: Vec<(f64, f64)> = self
            .sample(points)
            .into_iter()
            .filter(|(x, _)| !breakpoints.contains(x))
            .collect();

        for &x in &breakpoints {
            let left = self.segments[self.left_index(x)].eval(x);
            let right = self.segments[self.right_index(x)].eval(x);
            out.push((x, left));
            if right != left {
                out.push((x, right));
            }
        }

        // Stable sort keeps each left limit ahead of its right limit
        out.sort_by(|a, b| a.0.total_cmp(&b.0));
        out
    }
}
