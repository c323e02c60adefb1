//! Bernstein basis and direct-sum Bézier curve sampling.

use super::binomial::binomial_weight;
use super::core::{Point2, unit_parameters, weighted_sum};

/// Bernstein basis polynomial `B_{i,n}(t) = C(n,i) · tⁱ · (1-t)ⁿ⁻ⁱ`.
///
/// Defined for `t` in `[0, 1]`; returns 0 when `i > n`.
#[must_use]
pub fn bernstein_basis(i: usize, n: usize, t: f64) -> f64 {
    if i > n {
        return 0.0;
    }
    binomial_weight(n, i) * powu(t, i) * powu(1.0 - t, n - i)
}

/// Evaluates a Bézier curve at `t` as the Bernstein-weighted sum of its control points.
///
/// The degree is `points.len() - 1`. An empty slice yields the origin.
#[must_use]
pub fn bezier_point_bernstein(points: &[Point2], t: f64) -> Point2 {
    let Some(n) = points.len().checked_sub(1) else {
        return Point2::ORIGIN;
    };
    weighted_sum(
        points
            .iter()
            .enumerate()
            .map(|(j, &p)| (p, bernstein_basis(j, n, t))),
    )
}

/// Samples a Bézier curve at `num_samples + 1` evenly spaced parameters over `[0, 1]`.
///
/// Returns an empty curve for fewer than 2 control points.
#[must_use]
pub fn evaluate_bezier_bernstein(points: &[Point2], num_samples: usize) -> Vec<Point2> {
    if points.len() < 2 {
        log::debug!(
            "bezier (bernstein): {} control points, need at least 2",
            points.len()
        );
        return Vec::new();
    }

    unit_parameters(num_samples)
        .map(|t| bezier_point_bernstein(points, t))
        .collect()
}

/// `base^exp` for a small non-negative exponent.
pub(crate) fn powu(base: f64, exp: usize) -> f64 {
    i32::try_from(exp).map_or(0.0, |e| base.powi(e))
}
