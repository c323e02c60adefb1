//! Scan-line rasterization with per-vertex color gradients.

use serde::Serialize;

use super::color::{Color, lerp_color};
use super::core::{Pixel, Point2, round_to_i32};
use super::surface::SampledSurface;

/// A pixel with its fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColoredPixel {
    pub position: Pixel,
    pub color: Color,
}

impl ColoredPixel {
    #[must_use]
    pub const fn new(position: Pixel, color: Color) -> Self {
        Self { position, color }
    }
}

/// Fills the triangle `p0 p1 p2`, blending the vertex colors across it.
///
/// Vertices are sorted by ascending `y`. Each scanline between the lowest and
/// highest vertex is intersected with the non-horizontal edges; the color at
/// each crossing is interpolated along its edge, then across the span from the
/// leftmost to the rightmost crossing. A triangle with no vertical extent
/// produces no pixels.
#[must_use]
pub fn fill_triangle_gradient(
    p0: Pixel,
    p1: Pixel,
    p2: Pixel,
    c0: Color,
    c1: Color,
    c2: Color,
) -> Vec<ColoredPixel> {
    let mut vertices = [(p0, c0), (p1, c1), (p2, c2)];
    vertices.sort_by_key(|(p, _)| p.y);
    let [(v0, c0), (v1, c1), (v2, c2)] = vertices;

    let (y_min, y_max) = (v0.y, v2.y);
    if y_min == y_max {
        return Vec::new();
    }

    let edges = [(v0, v1, c0, c1), (v1, v2, c1, c2), (v2, v0, c2, c0)];
    let mut pixels = Vec::new();
    let mut crossings: Vec<(f64, Color)> = Vec::with_capacity(edges.len());

    for y in y_min..=y_max {
        crossings.clear();
        for &(a, b, ca, cb) in &edges {
            if a.y == b.y {
                continue;
            }
            if a.y.min(b.y) <= y && y <= a.y.max(b.y) {
                let t = (f64::from(y) - f64::from(a.y)) / (f64::from(b.y) - f64::from(a.y));
                let x = f64::from(a.x) + t * (f64::from(b.x) - f64::from(a.x));
                crossings.push((x, lerp_color(Some(ca), Some(cb), t)));
            }
        }

        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (x_start, color_start) = crossings[0];
        let (x_end, color_end) = crossings[crossings.len() - 1];
        let (x_start, x_end) = (round_to_i32(x_start), round_to_i32(x_end));
        let width = f64::from(x_end) - f64::from(x_start);

        for x in x_start..=x_end {
            let color = if x_end == x_start {
                color_start
            } else {
                color_start.lerp(color_end, (f64::from(x) - f64::from(x_start)) / width)
            };
            pixels.push(ColoredPixel::new(Pixel::new(x, y), color));
        }
    }

    pixels
}

/// Corner colors of a sampled surface, indexed by parameter corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerColors {
    /// Color at `(u, v) = (0, 0)`.
    pub u0v0: Color,
    /// Color at `(0, 1)`.
    pub u0v1: Color,
    /// Color at `(1, 0)`.
    pub u1v0: Color,
    /// Color at `(1, 1)`.
    pub u1v1: Color,
}

impl CornerColors {
    #[must_use]
    pub const fn new(u0v0: Color, u0v1: Color, u1v0: Color, u1v1: Color) -> Self {
        Self {
            u0v0,
            u0v1,
            u1v0,
            u1v1,
        }
    }

    /// Bilinear blend of the corners at `(u, v)`.
    #[must_use]
    pub fn at(self, u: f64, v: f64) -> Color {
        let low = self.u0v0.lerp(self.u0v1, v);
        let high = self.u1v0.lerp(self.u1v1, v);
        low.lerp(high, u)
    }
}

/// Fills a sampled surface with a bilinear color gradient.
///
/// Every grid cell is split into two triangles and filled with
/// [`fill_triangle_gradient`]; pixels on shared cell edges are emitted once
/// per adjacent triangle. A ragged point grid fills nothing.
#[must_use]
pub fn fill_surface_gradient(surface: &SampledSurface, colors: CornerColors) -> Vec<ColoredPixel> {
    if !surface.is_rectangular() {
        log::debug!("surface fill: ragged point grid");
        return Vec::new();
    }
    let (u_count, v_count) = surface.dimensions();
    if u_count < 2 || v_count < 2 {
        return Vec::new();
    }

    let u_den = (u_count - 1) as f64;
    let v_den = (v_count - 1) as f64;
    let node = |i: usize, j: usize| -> (Pixel, Color) {
        let point: Point2 = surface.points[i][j];
        (point.to_pixel(), colors.at(i as f64 / u_den, j as f64 / v_den))
    };

    let mut pixels = Vec::new();
    for i in 0..u_count - 1 {
        for j in 0..v_count - 1 {
            let (p00, c00) = node(i, j);
            let (p10, c10) = node(i + 1, j);
            let (p11, c11) = node(i + 1, j + 1);
            let (p01, c01) = node(i, j + 1);
            pixels.extend(fill_triangle_gradient(p00, p10, p11, c00, c10, c11));
            pixels.extend(fill_triangle_gradient(p00, p11, p01, c00, c11, c01));
        }
    }
    pixels
}
