//! de Casteljau evaluation: the same Bézier curve as [`super::bernstein`],
//! computed by repeated affine combination instead of basis sums.

use super::core::{Point2, unit_parameters};

/// Evaluates the Bézier curve defined by `points` at parameter `t`.
///
/// Works on a private copy of the control points; the caller's slice is
/// never touched. Returns `None` for an empty slice.
#[must_use]
pub fn de_casteljau_point(points: &[Point2], t: f64) -> Option<Point2> {
    let mut buffer = points.to_vec();
    let n = buffer.len();

    for r in 1..n {
        for i in 0..n - r {
            buffer[i] = buffer[i].lerp(buffer[i + 1], t);
        }
    }

    buffer.first().copied()
}

/// Samples a Bézier curve at `num_samples + 1` evenly spaced parameters over `[0, 1]`.
///
/// Returns an empty curve for fewer than 2 control points.
#[must_use]
pub fn evaluate_bezier_de_casteljau(points: &[Point2], num_samples: usize) -> Vec<Point2> {
    if points.len() < 2 {
        log::debug!(
            "bezier (de casteljau): {} control points, need at least 2",
            points.len()
        );
        return Vec::new();
    }

    unit_parameters(num_samples)
        .filter_map(|t| de_casteljau_point(points, t))
        .collect()
}
