//! Tensor-product Bézier surfaces over a rectangular control grid.
//!
//! A grid with `m` rows and `n` columns defines a surface of degree
//! `(m - 1, n - 1)`:
//!
//! ```text
//! S(u, v) = Σ_p Σ_q P[p][q] · B(p, m-1, u) · B(q, n-1, v)
//! ```
//!
//! The sampled output is a point grid plus the two polyline families a
//! wireframe view needs: `u_lines` (grid rows) and `v_lines` (grid columns).

use serde::{Deserialize, Serialize};

use super::bernstein::bernstein_basis;
use super::core::{Point2, unit_parameters};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("control grid has no rows")]
    NoRows,
    #[error("control grid row 0 is empty")]
    EmptyRow,
    #[error("control grid row {row} has {actual} points, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Rectangular grid of control points. `rows[p][q]` is row `p`, column `q`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPointGrid {
    rows: Vec<Vec<Point2>>,
}

impl ControlPointGrid {
    pub fn new(rows: Vec<Vec<Point2>>) -> Result<Self, GridError> {
        validate_grid(&rows)?;
        Ok(Self { rows })
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Point2>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    /// Degree along u (rows) and v (columns).
    #[must_use]
    pub fn degree(&self) -> (usize, usize) {
        (self.row_count() - 1, self.column_count() - 1)
    }

    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<Point2> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Evaluates the surface at `(u, v)`.
    #[must_use]
    pub fn point_at(&self, u: f64, v: f64) -> Point2 {
        let (du, dv) = self.degree();
        let bu: Vec<f64> = (0..=du).map(|p| bernstein_basis(p, du, u)).collect();
        let bv: Vec<f64> = (0..=dv).map(|q| bernstein_basis(q, dv, v)).collect();
        tensor_sum(&self.rows, &bu, &bv)
    }

    #[must_use]
    pub fn evaluate(&self, options: SurfaceSamplingOptions) -> SampledSurface {
        evaluate_bezier_surface(&self.rows, options.u_samples, options.v_samples)
    }
}

fn validate_grid(rows: &[Vec<Point2>]) -> Result<(), GridError> {
    let first = rows.first().ok_or(GridError::NoRows)?;
    let expected = first.len();
    if expected == 0 {
        return Err(GridError::EmptyRow);
    }
    match rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(GridError::RaggedRow {
            row,
            expected,
            actual: rows[row].len(),
        }),
        None => Ok(()),
    }
}

/// Sample counts for surface evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSamplingOptions {
    pub u_samples: usize,
    pub v_samples: usize,
}

impl Default for SurfaceSamplingOptions {
    fn default() -> Self {
        Self {
            u_samples: 20,
            v_samples: 20,
        }
    }
}

/// Sampled tensor-product surface.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampledSurface {
    /// `points[ui][vi]` is the surface point at `(ui / u_samples, vi / v_samples)`.
    pub points: Vec<Vec<Point2>>,
    /// Constant-u polylines (rows of `points`).
    pub u_lines: Vec<Vec<Point2>>,
    /// Constant-v polylines (columns of `points`).
    pub v_lines: Vec<Vec<Point2>>,
}

impl SampledSurface {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when every row of `points` has the same length.
    #[must_use]
    pub fn is_rectangular(&self) -> bool {
        let (_, columns) = self.dimensions();
        self.points.iter().all(|row| row.len() == columns)
    }

    /// Grid dimensions as `(u count, v count)`.
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (
            self.points.len(),
            self.points.first().map_or(0, Vec::len),
        )
    }
}

/// Samples the tensor-product Bézier surface defined by `grid`.
///
/// Produces `(u_samples + 1) x (v_samples + 1)` points. An empty or ragged
/// grid yields an empty surface.
#[must_use]
pub fn evaluate_bezier_surface(
    grid: &[Vec<Point2>],
    u_samples: usize,
    v_samples: usize,
) -> SampledSurface {
    if let Err(err) = validate_grid(grid) {
        log::debug!("bezier surface: {err}");
        return SampledSurface::default();
    }

    let du = grid.len() - 1;
    let dv = grid[0].len() - 1;

    let v_bases: Vec<Vec<f64>> = unit_parameters(v_samples)
        .map(|v| (0..=dv).map(|q| bernstein_basis(q, dv, v)).collect())
        .collect();

    let points: Vec<Vec<Point2>> = unit_parameters(u_samples)
        .map(|u| {
            let bu: Vec<f64> = (0..=du).map(|p| bernstein_basis(p, du, u)).collect();
            v_bases.iter().map(|bv| tensor_sum(grid, &bu, bv)).collect()
        })
        .collect();

    let u_lines = points.clone();
    let column_count = points.first().map_or(0, Vec::len);
    let v_lines = (0..column_count)
        .map(|j| points.iter().map(|row| row[j]).collect())
        .collect();

    SampledSurface {
        points,
        u_lines,
        v_lines,
    }
}

fn tensor_sum(grid: &[Vec<Point2>], bu: &[f64], bv: &[f64]) -> Point2 {
    let mut x = 0.0;
    let mut y = 0.0;
    for (row, &wu) in grid.iter().zip(bu) {
        for (p, &wv) in row.iter().zip(bv) {
            let w = wu * wv;
            x += p.x * w;
            y += p.y * w;
        }
    }
    Point2::new(x, y)
}
