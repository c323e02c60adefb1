//! B-spline basis functions (Cox-de Boor) and B-spline curve sampling.
//!
//! The basis is a plain tree recursion over `(i, k)`. [`BasisMemo`] caches the
//! recursion for one parameter value; a fresh memo is created for every sample
//! of every evaluation, so nothing is shared between calls or threads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::core::{MAX_COORDINATE_MAGNITUDE, Point2, Tolerance};
use super::knots::{KnotType, KnotVector};

/// Cox-de Boor basis function `N_{i,k}(t)` over `knots`.
///
/// Returns 0 when `i + k + 1` runs past the knot vector. Knot spans shorter
/// than [`Tolerance::KNOT`] contribute zero instead of dividing by zero.
#[must_use]
pub fn bspline_basis(i: usize, k: usize, t: f64, knots: &[f64]) -> f64 {
    cox_de_boor(i, k, t, knots, |i, k| bspline_basis(i, k, t, knots))
}

/// One level of the Cox-de Boor recursion; `lower` supplies `N_{·,k-1}(t)`.
fn cox_de_boor(
    i: usize,
    k: usize,
    t: f64,
    knots: &[f64],
    mut lower: impl FnMut(usize, usize) -> f64,
) -> f64 {
    if i + k + 1 >= knots.len() {
        return 0.0;
    }
    if k == 0 {
        return degree_zero_basis(i, t, knots);
    }

    let eps = Tolerance::KNOT.eps;

    let left_span = knots[i + k] - knots[i];
    let term1 = if left_span.abs() < eps {
        0.0
    } else {
        (t - knots[i]) / left_span * lower(i, k - 1)
    };

    let right_span = knots[i + k + 1] - knots[i + 1];
    let term2 = if right_span.abs() < eps {
        0.0
    } else {
        (knots[i + k + 1] - t) / right_span * lower(i + 1, k - 1)
    };

    term1 + term2
}

fn degree_zero_basis(i: usize, t: f64, knots: &[f64]) -> f64 {
    let start = knots[i];
    let end = knots[i + 1];
    if start <= t && t < end {
        return 1.0;
    }

    // Closed right end: the last non-empty span also owns t == last knot.
    let eps = Tolerance::KNOT.eps;
    let last = knots[knots.len() - 1];
    if (t - end).abs() < eps && t >= last - eps {
        return 1.0;
    }
    0.0
}

/// Memo table for the basis recursion at a single parameter value.
#[derive(Debug)]
pub struct BasisMemo<'a> {
    knots: &'a [f64],
    t: f64,
    table: HashMap<(usize, usize), f64>,
    hits: usize,
    misses: usize,
}

impl<'a> BasisMemo<'a> {
    #[must_use]
    pub fn new(knots: &'a [f64], t: f64) -> Self {
        Self {
            knots,
            t,
            table: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// `N_{i,k}(t)`, computing each `(i, k)` pair at most once.
    pub fn basis(&mut self, i: usize, k: usize) -> f64 {
        if let Some(&value) = self.table.get(&(i, k)) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;

        let (knots, t) = (self.knots, self.t);
        let value = cox_de_boor(i, k, t, knots, |i, k| self.basis(i, k));
        self.table.insert((i, k), value);
        value
    }

    #[must_use]
    pub const fn parameter(&self) -> f64 {
        self.t
    }

    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }
}

/// Evaluates the B-spline with control `points`, `degree` and `knots` at `t`.
///
/// No domain clamping is applied; see [`evaluate_bspline_curve`] for the
/// sampling rules.
#[must_use]
pub fn bspline_point(points: &[Point2], degree: usize, knots: &[f64], t: f64) -> Point2 {
    let mut memo = BasisMemo::new(knots, t);
    bspline_point_with_memo(points, degree, &mut memo)
}

fn bspline_point_with_memo(points: &[Point2], degree: usize, memo: &mut BasisMemo<'_>) -> Point2 {
    points
        .iter()
        .enumerate()
        .fold(Point2::ORIGIN, |acc, (j, p)| {
            let basis = memo.basis(j, degree);
            Point2::new(acc.x + p.x * basis, acc.y + p.y * basis)
        })
}

/// Options for [`evaluate_bspline_curve_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BSplineOptions {
    /// Polynomial degree of the basis.
    pub degree: usize,
    /// Number of parameter steps; `samples + 1` points are requested.
    pub samples: usize,
    pub knot_type: KnotType,
}

impl Default for BSplineOptions {
    fn default() -> Self {
        Self {
            degree: 3,
            samples: 100,
            knot_type: KnotType::Clamped,
        }
    }
}

impl BSplineOptions {
    #[must_use]
    pub const fn new(degree: usize, samples: usize, knot_type: KnotType) -> Self {
        Self {
            degree,
            samples,
            knot_type,
        }
    }
}

/// What happened during a B-spline evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BSplineDiagnostics {
    /// Knot vector used, if the input was valid enough to build one.
    pub knots: Option<KnotVector>,
    /// Sampled parameter range `[t_min, t_max)`.
    pub domain: Option<(f64, f64)>,
    pub requested_sample_count: usize,
    pub emitted_sample_count: usize,
    /// Samples omitted because a coordinate ran past [`MAX_COORDINATE_MAGNITUDE`].
    pub dropped_sample_count: usize,
    pub memo_hits: usize,
    pub memo_misses: usize,
}

impl BSplineDiagnostics {
    /// True when every requested sample was emitted.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped_sample_count == 0 && self.emitted_sample_count == self.requested_sample_count
    }
}

/// Samples a B-spline curve.
///
/// Returns an empty curve when there are fewer than `degree + 1` control
/// points or the knot domain is empty.
#[must_use]
pub fn evaluate_bspline_curve(
    points: &[Point2],
    degree: usize,
    num_samples: usize,
    knot_type: KnotType,
) -> Vec<Point2> {
    let options = BSplineOptions::new(degree, num_samples, knot_type);
    evaluate_bspline_curve_with_options(points, &options).0
}

/// Samples a B-spline curve and reports diagnostics.
///
/// Parameters are spaced evenly over `[t_min, t_max]` with the last one pulled
/// in to `t_max - 1e-10`, because the domain is half-open. Points with a
/// coordinate magnitude of at least 1e8 (or non-finite) are dropped.
#[must_use]
pub fn evaluate_bspline_curve_with_options(
    points: &[Point2],
    options: &BSplineOptions,
) -> (Vec<Point2>, BSplineDiagnostics) {
    let mut diagnostics = BSplineDiagnostics::default();
    let degree = options.degree;
    let n = points.len();

    if n == 0 || n < degree.saturating_add(1) {
        log::debug!("bspline: {n} control points cannot carry degree {degree}");
        return (Vec::new(), diagnostics);
    }

    let knots = KnotVector::for_type(options.knot_type, n, degree);
    let Some((t_min, t_max)) = knots.domain(degree, n) else {
        log::debug!("bspline: empty parameter domain for {} knots", knots.len());
        diagnostics.knots = Some(knots);
        return (Vec::new(), diagnostics);
    };

    let samples = options.samples.max(1);
    let t_end = t_max - Tolerance::KNOT.eps;
    let span = t_max - t_min;

    diagnostics.domain = Some((t_min, t_max));
    diagnostics.requested_sample_count = samples + 1;

    let mut curve = Vec::with_capacity(samples + 1);
    for step in 0..=samples {
        let t = if step == samples {
            t_end
        } else {
            t_min + span * step as f64 / samples as f64
        };
        let t = t.min(t_end).max(t_min);

        let mut memo = BasisMemo::new(knots.as_slice(), t);
        let point = bspline_point_with_memo(points, degree, &mut memo);
        diagnostics.memo_hits += memo.hits();
        diagnostics.memo_misses += memo.misses();

        if within_magnitude(point) {
            curve.push(point);
        } else {
            diagnostics.dropped_sample_count += 1;
        }
    }

    diagnostics.emitted_sample_count = curve.len();
    if diagnostics.dropped_sample_count > 0 {
        log::debug!(
            "bspline: dropped {} of {} samples with runaway coordinates",
            diagnostics.dropped_sample_count,
            diagnostics.requested_sample_count
        );
        if curve.is_empty() {
            log::warn!("bspline: every sample was dropped");
        }
    }
    diagnostics.knots = Some(knots);

    (curve, diagnostics)
}

fn within_magnitude(p: Point2) -> bool {
    p.x.abs() < MAX_COORDINATE_MAGNITUDE && p.y.abs() < MAX_COORDINATE_MAGNITUDE
}
