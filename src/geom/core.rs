use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Point2
// ─────────────────────────────────────────────────────────────────────────────

/// A real-valued point in the drawing plane.
///
/// All evaluators work on `Point2` in `f64`. Conversion to integer pixels
/// happens only at the output boundary through [`Point2::to_pixel`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// The origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a Point2 from an array.
    #[must_use]
    pub const fn from_array(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Linear interpolation between two points.
    /// Returns `self * (1 - t) + rhs * t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        Self::new(
            (1.0 - t) * self.x + t * rhs.x,
            (1.0 - t) * self.y + t * rhs.y,
        )
    }

    #[must_use]
    pub const fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Rounds to the nearest pixel (half away from zero).
    #[must_use]
    pub fn to_pixel(self) -> Pixel {
        Pixel::new(round_to_i32(self.x), round_to_i32(self.y))
    }
}

impl Default for Point2 {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(arr: [f64; 2]) -> Self {
        Self::from_array(arr)
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        p.to_array()
    }
}

impl From<Pixel> for Point2 {
    fn from(p: Pixel) -> Self {
        Self::new(f64::from(p.x), f64::from(p.y))
    }
}

impl Add for Point2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl Mul<Point2> for f64 {
    type Output = Point2;
    fn mul(self, rhs: Point2) -> Self::Output {
        rhs.scale(self)
    }
}

/// Sums `weight * point` over a sequence of pairs.
pub(crate) fn weighted_sum<I>(terms: I) -> Point2
where
    I: IntoIterator<Item = (Point2, f64)>,
{
    terms
        .into_iter()
        .fold(Point2::ORIGIN, |acc, (p, w)| Point2::new(acc.x + p.x * w, acc.y + p.y * w))
}

#[allow(clippy::cast_possible_truncation)]
pub(crate) fn round_to_i32(value: f64) -> i32 {
    // `as` saturates at the i32 range and maps NaN to 0.
    value.round() as i32
}

// ─────────────────────────────────────────────────────────────────────────────
// Pixel
// ─────────────────────────────────────────────────────────────────────────────

/// Integer raster coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
}

impl Pixel {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Pixel {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BBox2
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BBox2 {
    #[must_use]
    pub const fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn from_points(points: &[Point2]) -> Option<Self> {
        let mut iter = points.iter().copied();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), Self::expand_point))
    }

    #[must_use]
    pub fn expand_point(self, p: Point2) -> Self {
        Self::new(
            Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        )
    }

    /// Check if a point is inside the bounding box (inclusive).
    #[must_use]
    pub fn contains_point(self, p: Point2) -> bool {
        self.contains_point_with_tolerance(p, Tolerance::new(0.0))
    }

    /// Inclusive containment test with the box grown by `tol.eps` on every side.
    #[must_use]
    pub fn contains_point_with_tolerance(self, p: Point2, tol: Tolerance) -> bool {
        p.x >= self.min.x - tol.eps
            && p.x <= self.max.x + tol.eps
            && p.y >= self.min.y - tol.eps
            && p.y <= self.max.y + tol.eps
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

/// Coordinates at or beyond this magnitude are treated as numeric runaway.
pub const MAX_COORDINATE_MAGNITUDE: f64 = 1e8;

/// Tolerance configuration for numeric comparisons.
///
/// Common presets:
/// - `Tolerance::DEFAULT` - General comparisons (1e-9)
/// - `Tolerance::KNOT` - Collapsed knot spans and the half-open domain end (1e-10)
/// - `Tolerance::BARYCENTRIC` - Slack on the `w >= 0` test (1e-10)
/// - `Tolerance::LOOSE` - Coarse comparisons (1e-6)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Knot-span tolerance (1e-10).
    /// Spans shorter than this contribute zero to the Cox-de Boor recursion.
    pub const KNOT: Self = Self { eps: 1e-10 };

    /// Barycentric slack (1e-10).
    pub const BARYCENTRIC: Self = Self { eps: 1e-10 };

    /// Loose tolerance for coarse comparisons (1e-6).
    pub const LOOSE: Self = Self { eps: 1e-6 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_point2(self, a: Point2, b: Point2) -> bool {
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        dx * dx + dy * dy <= self.eps_squared()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Parameters `i / samples` for `i = 0..=samples`.
///
/// A zero count is raised to one so both ends are always sampled.
pub(crate) fn unit_parameters(samples: usize) -> impl Iterator<Item = f64> {
    let samples = samples.max(1);
    (0..=samples).map(move |i| i as f64 / samples as f64)
}
