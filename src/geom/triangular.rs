//! Triangular (barycentric) Bézier patches.
//!
//! A degree-`n` patch has one control point per index triple `(i, j, k)` with
//! `i + j + k = n`. It is evaluated at barycentric coordinates `(u, v, w)`,
//! `u + v + w = 1`:
//!
//! ```text
//! S(u, v, w) = Σ n! / (i! j! k!) · uⁱ vʲ wᵏ · P[i, j, k]
//! ```
//!
//! Sampling produces a point cloud only; no triangle connectivity is built.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bernstein::powu;
use super::binomial::{index_sum, trinomial_coefficient};
use super::core::{Point2, Tolerance};

/// Index triple `(i, j, k)` of a triangular control point.
pub type TriangleIndex = (usize, usize, usize);

/// Barycentric coordinate `(u, v, w)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarycentricCoord {
    pub u: f64,
    pub v: f64,
    pub w: f64,
}

impl BarycentricCoord {
    #[must_use]
    pub const fn new(u: f64, v: f64, w: f64) -> Self {
        Self { u, v, w }
    }

    /// Builds `(u, v, 1 - u - v)`.
    #[must_use]
    pub fn from_uv(u: f64, v: f64) -> Self {
        Self::new(u, v, 1.0 - u - v)
    }

    #[must_use]
    pub fn sum(self) -> f64 {
        self.u + self.v + self.w
    }

    /// True when the coordinates sum to 1 within `tol`.
    #[must_use]
    pub fn is_normalized(self, tol: Tolerance) -> bool {
        tol.approx_eq_f64(self.sum(), 1.0)
    }
}

/// Triangle in the drawing plane that the parameter domain maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainTriangle {
    pub a: Point2,
    pub b: Point2,
    pub c: Point2,
}

impl DomainTriangle {
    #[must_use]
    pub const fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self { a, b, c }
    }

    #[must_use]
    pub fn vertices(self) -> [Point2; 3] {
        [self.a, self.b, self.c]
    }
}

impl Default for DomainTriangle {
    fn default() -> Self {
        Self::new(
            Point2::new(200.0, 400.0),
            Point2::new(400.0, 100.0),
            Point2::new(600.0, 400.0),
        )
    }
}

/// Maps a barycentric coordinate to `u·a + v·b + w·c`.
#[must_use]
pub fn barycentric_to_cartesian(coord: BarycentricCoord, triangle: &DomainTriangle) -> Point2 {
    let BarycentricCoord { u, v, w } = coord;
    Point2::new(
        u * triangle.a.x + v * triangle.b.x + w * triangle.c.x,
        u * triangle.a.y + v * triangle.b.y + w * triangle.c.y,
    )
}

/// Control points of a triangular patch keyed by `(i, j, k)`.
///
/// Entries whose indices do not sum to the evaluated degree are ignored by
/// [`evaluate_triangular_surface`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangularControlSet {
    points: BTreeMap<TriangleIndex, Point2>,
}

impl TriangularControlSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a control point, returning the one it replaced.
    pub fn insert(&mut self, index: TriangleIndex, point: Point2) -> Option<Point2> {
        self.points.insert(index, point)
    }

    #[must_use]
    pub fn get(&self, index: TriangleIndex) -> Option<Point2> {
        self.points.get(&index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TriangleIndex, Point2)> + '_ {
        self.points.iter().map(|(&index, &point)| (index, point))
    }

    /// True when every triple of `degree` has a control point.
    #[must_use]
    pub fn is_complete(&self, degree: usize) -> bool {
        Self::index_triples(degree)
            .iter()
            .all(|index| self.points.contains_key(index))
    }

    /// All `(i, j, k)` with `i + j + k = degree`, in lexicographic order.
    #[must_use]
    pub fn index_triples(degree: usize) -> Vec<TriangleIndex> {
        (0..=degree)
            .flat_map(|i| (0..=degree - i).map(move |j| (i, j, degree - i - j)))
            .collect()
    }

    /// Evenly spaced control net over `triangle`: `P[i,j,k]` sits at
    /// barycentric `(i, j, k) / degree`. The resulting patch is planar and
    /// reproduces the domain mapping.
    #[must_use]
    pub fn lattice(degree: usize, triangle: &DomainTriangle) -> Self {
        let scale = degree.max(1) as f64;
        Self::index_triples(degree)
            .into_iter()
            .map(|(i, j, k)| {
                let coord = BarycentricCoord::new(i as f64 / scale, j as f64 / scale, k as f64 / scale);
                ((i, j, k), barycentric_to_cartesian(coord, triangle))
            })
            .collect()
    }
}

impl FromIterator<(TriangleIndex, Point2)> for TriangularControlSet {
    fn from_iter<I: IntoIterator<Item = (TriangleIndex, Point2)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// One sample of a triangular patch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriangularSample {
    /// Point on the patch.
    pub point: Point2,
    pub barycentric: BarycentricCoord,
    /// The barycentric coordinate mapped into the domain triangle.
    pub domain_point: Point2,
}

/// Triangular Bernstein basis `n! / (i! j! k!) · uⁱ vʲ wᵏ`; 0 unless `i + j + k = n`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::many_single_char_names)]
pub fn triangular_bernstein_basis(
    i: usize,
    j: usize,
    k: usize,
    n: usize,
    u: f64,
    v: f64,
    w: f64,
) -> f64 {
    if index_sum(i, j, k) != Some(n) {
        return 0.0;
    }
    trinomial_coefficient(n, i, j, k) as f64 * powu(u, i) * powu(v, j) * powu(w, k)
}

/// Evaluates the patch at one barycentric coordinate.
#[must_use]
pub fn triangular_point(
    control_set: &TriangularControlSet,
    degree: usize,
    coord: BarycentricCoord,
) -> Point2 {
    control_set
        .iter()
        .filter(|&((i, j, k), _)| index_sum(i, j, k) == Some(degree))
        .fold(Point2::ORIGIN, |acc, ((i, j, k), p)| {
            let basis = triangular_bernstein_basis(i, j, k, degree, coord.u, coord.v, coord.w);
            Point2::new(acc.x + p.x * basis, acc.y + p.y * basis)
        })
}

/// Samples a triangular patch on a barycentric grid of resolution `samples`.
///
/// For `ui = 0..=samples` and `vi = 0..=samples - ui` the coordinate is
/// `(ui / samples, vi / samples, 1 - u - v)`; coordinates with `w` below
/// `-1e-10` are skipped. Yields `(samples + 1)(samples + 2) / 2` records.
#[must_use]
pub fn evaluate_triangular_surface(
    control_set: &TriangularControlSet,
    degree: usize,
    samples: usize,
    domain: &DomainTriangle,
) -> Vec<TriangularSample> {
    let skipped = control_set
        .iter()
        .filter(|&((i, j, k), _)| index_sum(i, j, k) != Some(degree))
        .count();
    if skipped > 0 {
        log::debug!("triangular surface: ignoring {skipped} control points not of degree {degree}");
    }

    let samples = samples.max(1);
    let step = samples as f64;
    let slack = Tolerance::BARYCENTRIC.eps;

    let mut out = Vec::with_capacity((samples + 1) * (samples + 2) / 2);
    for ui in 0..=samples {
        let u = ui as f64 / step;
        for vi in 0..=samples - ui {
            let v = vi as f64 / step;
            let coord = BarycentricCoord::from_uv(u, v);
            if coord.w < -slack {
                continue;
            }
            out.push(TriangularSample {
                point: triangular_point(control_set, degree, coord),
                barycentric: coord,
                domain_point: barycentric_to_cartesian(coord, domain),
            });
        }
    }
    out
}
