//! Knot vectors for B-spline curves.
//!
//! Two generation strategies are supported:
//!
//! - **Uniform**: `0, 1, 2, …`. The curve does not, in general, touch its end
//!   control points.
//! - **Clamped**: `k + 1` zeros, evenly spaced interior knots, `k + 1` ones.
//!   The curve starts at the first control point and ends at the last.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Knot-vector generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnotType {
    Uniform,
    #[default]
    Clamped,
}

impl KnotType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Clamped => "clamped",
        }
    }
}

impl fmt::Display for KnotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown knot type `{0}` (expected `uniform` or `clamped`)")]
pub struct KnotTypeParseError(pub String);

impl FromStr for KnotType {
    type Err = KnotTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "clamped" => Ok(Self::Clamped),
            _ => Err(KnotTypeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KnotVectorError {
    #[error("knot vector is empty")]
    Empty,
    #[error("knot {index} is not finite ({value})")]
    NonFinite { index: usize, value: f64 },
    #[error("knot {index} ({value}) is smaller than the knot before it ({previous})")]
    Decreasing {
        index: usize,
        value: f64,
        previous: f64,
    },
}

/// A nondecreasing, finite sequence of knots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnotVector(Vec<f64>);

impl KnotVector {
    /// Validates `knots` and wraps them.
    pub fn new(knots: Vec<f64>) -> Result<Self, KnotVectorError> {
        if knots.is_empty() {
            return Err(KnotVectorError::Empty);
        }
        if let Some((index, &value)) = knots.iter().enumerate().find(|(_, k)| !k.is_finite()) {
            return Err(KnotVectorError::NonFinite { index, value });
        }
        if let Some(index) = knots.windows(2).position(|w| w[1] < w[0]) {
            return Err(KnotVectorError::Decreasing {
                index: index + 1,
                value: knots[index + 1],
                previous: knots[index],
            });
        }
        Ok(Self(knots))
    }

    /// Uniform knots for `n` control points of degree `k`.
    #[must_use]
    pub fn uniform(n: usize, k: usize) -> Self {
        generate_uniform_knots(n, k)
    }

    /// Clamped knots for `n` control points of degree `k`.
    #[must_use]
    pub fn clamped(n: usize, k: usize) -> Self {
        generate_clamped_knots(n, k)
    }

    #[must_use]
    pub fn for_type(knot_type: KnotType, n: usize, k: usize) -> Self {
        match knot_type {
            KnotType::Uniform => Self::uniform(n, k),
            KnotType::Clamped => Self::clamped(n, k),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    /// Valid parameter range `[knots[degree], knots[n])` for `n` control points.
    ///
    /// Returns `None` when either index is out of bounds or the range is empty.
    #[must_use]
    pub fn domain(&self, degree: usize, n: usize) -> Option<(f64, f64)> {
        let t_min = *self.0.get(degree)?;
        let t_max = *self.0.get(n)?;
        (t_min < t_max).then_some((t_min, t_max))
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl AsRef<[f64]> for KnotVector {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Generates `n + k + 1` knots with values `0, 1, 2, …`.
#[must_use]
pub fn generate_uniform_knots(n: usize, k: usize) -> KnotVector {
    let m = n + k + 1;
    KnotVector((0..m).map(|i| i as f64).collect())
}

/// Generates a clamped knot vector for `n` control points of degree `k`.
///
/// The first and last `k + 1` knots are 0 and 1. The `m - 2(k + 1)` interior
/// knots (`m = n + k + 1`) sit at `i / (count + 1)`. When `n < k + 1` there
/// is no interior and the vector holds only the `2(k + 1)` end knots.
#[must_use]
pub fn generate_clamped_knots(n: usize, k: usize) -> KnotVector {
    let m = n + k + 1;
    let interior = m.saturating_sub(2 * (k + 1));

    let mut knots = Vec::with_capacity(2 * (k + 1) + interior);
    knots.extend(std::iter::repeat_n(0.0, k + 1));
    knots.extend((1..=interior).map(|i| i as f64 / (interior + 1) as f64));
    knots.extend(std::iter::repeat_n(1.0, k + 1));
    KnotVector(knots)
}
