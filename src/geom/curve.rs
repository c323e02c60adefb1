use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::bernstein::{bezier_point_bernstein, evaluate_bezier_bernstein};
use super::bspline::bspline_point;
use super::core::{Point2, Tolerance};
use super::de_casteljau::{de_casteljau_point, evaluate_bezier_de_casteljau};
use super::knots::{KnotType, KnotVector};

/// Default sample count for curves drawn by the shell.
pub const DEFAULT_CURVE_SAMPLES: usize = 100;

/// Sample count the shell passes to [`quadratic_bezier`] and [`cubic_bezier`].
pub const DEFAULT_SEGMENT_SAMPLES: usize = 50;

pub trait Curve2 {
    fn point_at(&self, t: f64) -> Point2;

    /// Parameter range of the curve.
    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

/// Which Bézier evaluation algorithm to use. Both produce the same curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BezierAlgorithm {
    #[default]
    Bernstein,
    DeCasteljau,
}

impl BezierAlgorithm {
    /// Samples the Bézier curve through `points` with this algorithm.
    #[must_use]
    pub fn evaluate(self, points: &[Point2], num_samples: usize) -> Vec<Point2> {
        match self {
            Self::Bernstein => evaluate_bezier_bernstein(points, num_samples),
            Self::DeCasteljau => evaluate_bezier_de_casteljau(points, num_samples),
        }
    }

    #[must_use]
    pub fn point_at(self, points: &[Point2], t: f64) -> Point2 {
        match self {
            Self::Bernstein => bezier_point_bernstein(points, t),
            Self::DeCasteljau => de_casteljau_point(points, t).unwrap_or(Point2::ORIGIN),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bernstein => "bernstein",
            Self::DeCasteljau => "de_casteljau",
        }
    }
}

impl fmt::Display for BezierAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bezier algorithm `{0}` (expected `bernstein` or `de_casteljau`)")]
pub struct BezierAlgorithmParseError(pub String);

impl FromStr for BezierAlgorithm {
    type Err = BezierAlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bernstein" => Ok(Self::Bernstein),
            "de_casteljau" | "decasteljau" | "de-casteljau" => Ok(Self::DeCasteljau),
            _ => Err(BezierAlgorithmParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("bezier curve requires at least 2 control points, got {count}")]
    NotEnoughBezierPoints { count: usize },
    #[error("degree {degree} b-spline requires at least {required} control points, got {count}")]
    NotEnoughBSplinePoints {
        degree: usize,
        required: usize,
        count: usize,
    },
    #[error("knot vector must have {expected} knots, got {actual}")]
    KnotCountMismatch { expected: usize, actual: usize },
    #[error("knot vector has an empty domain for degree {degree}")]
    EmptyDomain { degree: usize },
}

/// Sampling options for Bézier curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveSamplingOptions {
    pub samples: usize,
    pub algorithm: BezierAlgorithm,
}

impl Default for CurveSamplingOptions {
    fn default() -> Self {
        Self {
            samples: DEFAULT_CURVE_SAMPLES,
            algorithm: BezierAlgorithm::Bernstein,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve2 {
    control_points: Vec<Point2>,
    pub algorithm: BezierAlgorithm,
}

impl BezierCurve2 {
    pub fn new(control_points: Vec<Point2>, algorithm: BezierAlgorithm) -> Result<Self, CurveError> {
        if control_points.len() < 2 {
            return Err(CurveError::NotEnoughBezierPoints {
                count: control_points.len(),
            });
        }
        Ok(Self {
            control_points,
            algorithm,
        })
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    #[must_use]
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    #[must_use]
    pub fn sample(&self, options: CurveSamplingOptions) -> Vec<Point2> {
        options.algorithm.evaluate(&self.control_points, options.samples)
    }
}

impl Curve2 for BezierCurve2 {
    fn point_at(&self, t: f64) -> Point2 {
        self.algorithm.point_at(&self.control_points, t.clamp(0.0, 1.0))
    }
}

/// Non-rational B-spline curve with an explicit knot vector.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineCurve2 {
    control_points: Vec<Point2>,
    degree: usize,
    knots: KnotVector,
    domain: (f64, f64),
}

impl BSplineCurve2 {
    pub fn new(
        control_points: Vec<Point2>,
        degree: usize,
        knots: KnotVector,
    ) -> Result<Self, CurveError> {
        let count = control_points.len();
        check_point_count(count, degree)?;
        let expected = count.saturating_add(degree).saturating_add(1);
        if knots.len() != expected {
            return Err(CurveError::KnotCountMismatch {
                expected,
                actual: knots.len(),
            });
        }
        let domain = knots
            .domain(degree, count)
            .ok_or(CurveError::EmptyDomain { degree })?;

        Ok(Self {
            control_points,
            degree,
            knots,
            domain,
        })
    }

    /// Builds a curve with a generated knot vector.
    pub fn with_knot_type(
        control_points: Vec<Point2>,
        degree: usize,
        knot_type: KnotType,
    ) -> Result<Self, CurveError> {
        // Reject before the knot vector is allocated.
        check_point_count(control_points.len(), degree)?;
        let knots = KnotVector::for_type(knot_type, control_points.len(), degree);
        Self::new(control_points, degree, knots)
    }

    #[must_use]
    pub fn control_points(&self) -> &[Point2] {
        &self.control_points
    }

    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }
}

fn check_point_count(count: usize, degree: usize) -> Result<(), CurveError> {
    let required = degree.saturating_add(1);
    if count < required {
        return Err(CurveError::NotEnoughBSplinePoints {
            degree,
            required,
            count,
        });
    }
    Ok(())
}

impl Curve2 for BSplineCurve2 {
    /// The domain is half-open; `t` is clamped into `[t_min, t_max - 1e-10]`.
    fn point_at(&self, t: f64) -> Point2 {
        let (t_min, t_max) = self.domain;
        let t = t.min(t_max - Tolerance::KNOT.eps).max(t_min);
        bspline_point(&self.control_points, self.degree, self.knots.as_slice(), t)
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }
}

/// Samples `steps + 1` points evenly over the curve's domain.
#[must_use]
pub fn tessellate_curve_uniform(curve: &impl Curve2, steps: usize) -> Vec<Point2> {
    let steps = steps.max(1);
    let (t0, t1) = curve.domain();
    (0..=steps)
        .map(|i| curve.point_at(t0 + (t1 - t0) * i as f64 / steps as f64))
        .collect()
}

/// Quadratic Bézier through three control points.
#[must_use]
pub fn quadratic_bezier(p0: Point2, p1: Point2, p2: Point2, num_samples: usize) -> Vec<Point2> {
    evaluate_bezier_bernstein(&[p0, p1, p2], num_samples)
}

/// Cubic Bézier through four control points.
#[must_use]
pub fn cubic_bezier(
    p0: Point2,
    p1: Point2,
    p2: Point2,
    p3: Point2,
    num_samples: usize,
) -> Vec<Point2> {
    evaluate_bezier_bernstein(&[p0, p1, p2, p3], num_samples)
}
