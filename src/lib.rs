#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod geom;

use std::fmt;

use geom::{
    BSplineOptions, BarycentricCoord, BezierAlgorithm, BezierAlgorithmParseError, Color,
    ColoredPixel, DomainTriangle, KnotTypeParseError, Pixel, Point2, SampledSurface,
    TriangularControlSet, TriangularSample,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsError;
use wasm_bindgen::prelude::*;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "console_error_panic_hook", target_arch = "wasm32"))] {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            console_error_panic_hook::set_once();
            init_logger();
        }
    } else {
        #[wasm_bindgen(start)]
        pub fn initialize() {
            init_logger();
        }
    }
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    // A second `initialize` call finds the logger already installed.
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

#[macro_export]
macro_rules! debug_log {
    ($($t:tt)*) => {{
        #[cfg(feature = "debug_logs")]
        {
            #[cfg(target_arch = "wasm32")]
            {
                ::web_sys::console::log_1(&::wasm_bindgen::JsValue::from_str(&format!($($t)*)));
            }
            #[cfg(not(target_arch = "wasm32"))]
            {
                println!("{}", format!($($t)*));
            }
        }
    }};
}

/// Errors raised while translating between JS values and engine types.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindingError {
    #[error(transparent)]
    Algorithm(#[from] BezierAlgorithmParseError),
    #[error(transparent)]
    KnotType(#[from] KnotTypeParseError),
    #[error("expected {expected} {what}, got {actual}")]
    WrongCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid input: {0}")]
    Decode(String),
    #[error("could not encode result: {0}")]
    Encode(String),
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveExport {
    pub points: Vec<Pixel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BSplineExport {
    pub points: Vec<Pixel>,
    pub knots: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceExport {
    pub points: Vec<Vec<Pixel>>,
    pub u_lines: Vec<Vec<Pixel>>,
    pub v_lines: Vec<Vec<Pixel>>,
}

/// One control point of a triangular patch as sent by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TriangularEntry {
    pub i: usize,
    pub j: usize,
    pub k: usize,
    pub point: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TriangularSampleExport {
    pub point: Pixel,
    pub barycentric: [f64; 3],
    pub domain_point: Pixel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelExport {
    pub x: i32,
    pub y: i32,
    pub color: [u8; 3],
}

impl From<ColoredPixel> for PixelExport {
    fn from(pixel: ColoredPixel) -> Self {
        Self {
            x: pixel.position.x,
            y: pixel.position.y,
            color: pixel.color.to_array(),
        }
    }
}

impl From<TriangularSample> for TriangularSampleExport {
    fn from(sample: TriangularSample) -> Self {
        let BarycentricCoord { u, v, w } = sample.barycentric;
        Self {
            point: sample.point.to_pixel(),
            barycentric: [u, v, w],
            domain_point: sample.domain_point.to_pixel(),
        }
    }
}

impl From<&SampledSurface> for SurfaceExport {
    fn from(surface: &SampledSurface) -> Self {
        Self {
            points: pixel_grid(&surface.points),
            u_lines: pixel_grid(&surface.u_lines),
            v_lines: pixel_grid(&surface.v_lines),
        }
    }
}

fn to_points(raw: &[[f64; 2]]) -> Vec<Point2> {
    raw.iter().copied().map(Point2::from).collect()
}

fn to_pixels(points: &[Point2]) -> Vec<Pixel> {
    points.iter().map(|p| p.to_pixel()).collect()
}

fn pixel_grid(rows: &[Vec<Point2>]) -> Vec<Vec<Pixel>> {
    rows.iter().map(|row| to_pixels(row)).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversions
// ─────────────────────────────────────────────────────────────────────────────

/// Samples a Bézier curve; `algorithm` defaults to Bernstein.
pub fn sample_bezier_curve(
    points: &[[f64; 2]],
    samples: usize,
    algorithm: Option<&str>,
) -> Result<CurveExport, BindingError> {
    let algorithm = algorithm
        .map(str::parse::<BezierAlgorithm>)
        .transpose()?
        .unwrap_or_default();
    let curve = algorithm.evaluate(&to_points(points), samples);
    debug_log!("bezier_curve: {algorithm}, {} points", curve.len());
    Ok(CurveExport {
        points: to_pixels(&curve),
    })
}

#[must_use]
pub fn sample_bspline_curve(points: &[[f64; 2]], options: &BSplineOptions) -> BSplineExport {
    let (curve, diagnostics) =
        geom::evaluate_bspline_curve_with_options(&to_points(points), options);
    debug_log!(
        "bspline_curve: {} emitted, {} dropped",
        diagnostics.emitted_sample_count,
        diagnostics.dropped_sample_count
    );
    BSplineExport {
        points: to_pixels(&curve),
        knots: diagnostics.knots.map(|k| k.into_inner()).unwrap_or_default(),
        domain: diagnostics.domain.map(|(a, b)| [a, b]),
        dropped: diagnostics.dropped_sample_count,
    }
}

#[must_use]
pub fn sample_bezier_surface(
    grid: &[Vec<[f64; 2]>],
    u_samples: usize,
    v_samples: usize,
) -> SurfaceExport {
    let grid: Vec<Vec<Point2>> = grid.iter().map(|row| to_points(row)).collect();
    SurfaceExport::from(&geom::evaluate_bezier_surface(&grid, u_samples, v_samples))
}

#[must_use]
pub fn sample_triangular_surface(
    entries: &[TriangularEntry],
    degree: usize,
    samples: usize,
    domain: Option<[[f64; 2]; 3]>,
) -> Vec<TriangularSampleExport> {
    let control_set: TriangularControlSet = entries
        .iter()
        .map(|e| ((e.i, e.j, e.k), Point2::from(e.point)))
        .collect();
    let domain = domain.map_or_else(DomainTriangle::default, |[a, b, c]| {
        DomainTriangle::new(a.into(), b.into(), c.into())
    });
    geom::evaluate_triangular_surface(&control_set, degree, samples, &domain)
        .into_iter()
        .map(TriangularSampleExport::from)
        .collect()
}

/// Fills a triangle given three vertices and three colors.
///
/// Vertices are rounded to pixels before filling.
pub fn rasterize_triangle(
    vertices: &[[f64; 2]],
    colors: &[[u8; 3]],
) -> Result<Vec<PixelExport>, BindingError> {
    let [p0, p1, p2] = exactly_three("vertices", vertices)?;
    let [c0, c1, c2] = exactly_three("colors", colors)?;
    let pixels = geom::fill_triangle_gradient(
        Point2::from(p0).to_pixel(),
        Point2::from(p1).to_pixel(),
        Point2::from(p2).to_pixel(),
        Color::from(c0),
        Color::from(c1),
        Color::from(c2),
    );
    Ok(pixels.into_iter().map(PixelExport::from).collect())
}

fn exactly_three<T: Copy>(what: &'static str, items: &[T]) -> Result<[T; 3], BindingError> {
    <[T; 3]>::try_from(items).map_err(|_| BindingError::WrongCount {
        what,
        expected: 3,
        actual: items.len(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// wasm entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Samples a Bézier curve through `[[x, y], …]`.
#[wasm_bindgen]
pub fn bezier_curve(
    points: JsValue,
    samples: u32,
    algorithm: Option<String>,
) -> Result<JsValue, JsValue> {
    let points: Vec<[f64; 2]> = decode(points)?;
    let curve =
        sample_bezier_curve(&points, samples as usize, algorithm.as_deref()).map_err(to_js_error)?;
    encode(&curve)
}

/// Samples a B-spline curve. `options` may be omitted for the defaults.
#[wasm_bindgen]
pub fn bspline_curve(points: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<[f64; 2]> = decode(points)?;
    let options: BSplineOptions = if options.is_undefined() || options.is_null() {
        BSplineOptions::default()
    } else {
        decode(options)?
    };
    encode(&sample_bspline_curve(&points, &options))
}

#[wasm_bindgen]
pub fn bezier_surface(grid: JsValue, u_samples: u32, v_samples: u32) -> Result<JsValue, JsValue> {
    let grid: Vec<Vec<[f64; 2]>> = decode(grid)?;
    encode(&sample_bezier_surface(
        &grid,
        u_samples as usize,
        v_samples as usize,
    ))
}

/// Samples a triangular patch. `domain` defaults to the standard triangle.
#[wasm_bindgen]
pub fn triangular_surface(
    entries: JsValue,
    degree: u32,
    samples: u32,
    domain: JsValue,
) -> Result<JsValue, JsValue> {
    let entries: Vec<TriangularEntry> = decode(entries)?;
    let domain: Option<[[f64; 2]; 3]> = if domain.is_undefined() || domain.is_null() {
        None
    } else {
        Some(decode(domain)?)
    };
    encode(&sample_triangular_surface(
        &entries,
        degree as usize,
        samples as usize,
        domain,
    ))
}

#[wasm_bindgen]
pub fn fill_triangle(vertices: JsValue, colors: JsValue) -> Result<JsValue, JsValue> {
    let vertices: Vec<[f64; 2]> = decode(vertices)?;
    let colors: Vec<[u8; 3]> = decode(colors)?;
    let pixels = rasterize_triangle(&vertices, &colors).map_err(to_js_error)?;
    debug_log!("fill_triangle: {} pixels", pixels.len());
    encode(&pixels)
}

fn decode<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|err| to_js_error(BindingError::Decode(err.to_string())))
}

fn encode<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|err| to_js_error(BindingError::Encode(err.to_string())))
}

fn to_js_error<E: fmt::Display>(error: E) -> JsValue {
    js_error(&error.to_string())
}

fn js_error(message: &str) -> JsValue {
    #[cfg(target_arch = "wasm32")]
    {
        JsError::new(message).into()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        JsValue::NULL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::KnotType;

    #[test]
    fn bezier_curve_rounds_to_pixels() {
        let curve = sample_bezier_curve(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]], 2, None).unwrap();
        assert_eq!(
            curve.points,
            vec![Pixel::new(0, 0), Pixel::new(8, 3), Pixel::new(10, 10)]
        );
    }

    #[test]
    fn bezier_curve_accepts_algorithm_names() {
        let points = [[0.0, 0.0], [40.0, 80.0], [90.0, 10.0]];
        let a = sample_bezier_curve(&points, 20, Some("bernstein")).unwrap();
        let b = sample_bezier_curve(&points, 20, Some("de_casteljau")).unwrap();
        assert_eq!(a.points.len(), 21);
        assert_eq!(a.points.first(), b.points.first());
        assert_eq!(a.points.last(), b.points.last());

        let err = sample_bezier_curve(&points, 20, Some("horner")).unwrap_err();
        assert!(matches!(err, BindingError::Algorithm(_)));
    }

    #[test]
    fn bspline_export_reports_knots_and_domain() {
        let points = [[0.0, 0.0], [10.0, 30.0], [20.0, -10.0], [30.0, 20.0], [40.0, 0.0]];
        let export = sample_bspline_curve(&points, &BSplineOptions::new(3, 10, KnotType::Clamped));
        assert_eq!(export.points.len(), 11);
        assert_eq!(export.points[0], Pixel::new(0, 0));
        assert_eq!(export.points[10], Pixel::new(40, 0));
        assert_eq!(export.knots, vec![0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]);
        assert_eq!(export.domain, Some([0.0, 1.0]));
        assert_eq!(export.dropped, 0);
    }

    #[test]
    fn bspline_export_is_empty_for_too_few_points() {
        let export = sample_bspline_curve(&[[0.0, 0.0]], &BSplineOptions::default());
        assert!(export.points.is_empty());
        assert!(export.knots.is_empty());
        assert_eq!(export.domain, None);
    }

    #[test]
    fn surface_export_keeps_grid_shape() {
        let grid = vec![
            vec![[0.0, 0.0], [0.0, 10.0]],
            vec![[10.0, 0.0], [10.0, 10.0]],
        ];
        let export = sample_bezier_surface(&grid, 2, 2);
        assert_eq!(export.points.len(), 3);
        assert_eq!(export.points[1][1], Pixel::new(5, 5));
        assert_eq!(export.v_lines[2][0], Pixel::new(0, 10));
        assert!(sample_bezier_surface(&[], 2, 2).points.is_empty());
    }

    #[test]
    fn triangular_export_uses_default_domain() {
        let entries = [
            TriangularEntry { i: 1, j: 0, k: 0, point: [200.0, 400.0] },
            TriangularEntry { i: 0, j: 1, k: 0, point: [400.0, 100.0] },
            TriangularEntry { i: 0, j: 0, k: 1, point: [600.0, 400.0] },
        ];
        let samples = sample_triangular_surface(&entries, 1, 2, None);
        assert_eq!(samples.len(), 6);
        for sample in &samples {
            assert_eq!(sample.point, sample.domain_point);
        }

        let custom = sample_triangular_surface(
            &entries,
            1,
            1,
            Some([[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]]),
        );
        assert_eq!(custom.len(), 3);
        assert_eq!(custom[0].barycentric, [0.0, 0.0, 1.0]);
        assert_eq!(custom[0].domain_point, Pixel::new(0, 10));
    }

    #[test]
    fn triangular_export_skips_overflowing_indices() {
        let entries = [
            TriangularEntry { i: 1, j: 0, k: 0, point: [200.0, 400.0] },
            TriangularEntry { i: 0, j: 1, k: 0, point: [400.0, 100.0] },
            TriangularEntry { i: 0, j: 0, k: 1, point: [600.0, 400.0] },
        ];
        let mut noisy = entries.to_vec();
        noisy.push(TriangularEntry { i: usize::MAX, j: 1, k: 0, point: [1e6, 1e6] });
        assert_eq!(
            sample_triangular_surface(&noisy, 1, 2, None),
            sample_triangular_surface(&entries, 1, 2, None)
        );
    }

    #[test]
    fn rasterize_triangle_exports_colored_pixels() {
        let pixels = rasterize_triangle(
            &[[0.0, 0.0], [4.0, 0.0], [0.0, 4.0]],
            &[[255, 0, 0], [0, 255, 0], [0, 0, 255]],
        )
        .unwrap();
        assert_eq!(pixels.len(), 15);
        assert!(pixels.contains(&PixelExport { x: 0, y: 0, color: [255, 0, 0] }));
        assert!(pixels.contains(&PixelExport { x: 0, y: 4, color: [0, 0, 255] }));
    }

    #[test]
    fn rasterize_triangle_requires_three_of_each() {
        let err = rasterize_triangle(&[[0.0, 0.0], [1.0, 1.0]], &[[0, 0, 0]; 3]).unwrap_err();
        assert_eq!(
            err,
            BindingError::WrongCount {
                what: "vertices",
                expected: 3,
                actual: 2
            }
        );
        assert!(rasterize_triangle(&[[0.0, 0.0]; 3], &[[0, 0, 0]; 4]).is_err());
    }
}
