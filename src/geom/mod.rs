mod bernstein;
mod binomial;
mod bspline;
mod color;
mod core;
mod curve;
mod de_casteljau;
mod knots;
mod raster;
mod surface;
mod triangular;

pub use bernstein::{bernstein_basis, bezier_point_bernstein, evaluate_bezier_bernstein};
pub use binomial::{binomial_coefficient, factorial, trinomial_coefficient};
pub use bspline::{
    BSplineDiagnostics, BSplineOptions, BasisMemo, bspline_basis, bspline_point,
    evaluate_bspline_curve, evaluate_bspline_curve_with_options,
};
pub use color::{Color, lerp_color};
pub use core::{BBox2, MAX_COORDINATE_MAGNITUDE, Pixel, Point2, Tolerance};
pub use curve::{
    BSplineCurve2, BezierAlgorithm, BezierAlgorithmParseError, BezierCurve2, Curve2, CurveError,
    CurveSamplingOptions, DEFAULT_CURVE_SAMPLES, DEFAULT_SEGMENT_SAMPLES, cubic_bezier,
    quadratic_bezier, tessellate_curve_uniform,
};
pub use de_casteljau::{de_casteljau_point, evaluate_bezier_de_casteljau};
pub use knots::{
    KnotType, KnotTypeParseError, KnotVector, KnotVectorError, generate_clamped_knots,
    generate_uniform_knots,
};
pub use raster::{ColoredPixel, CornerColors, fill_surface_gradient, fill_triangle_gradient};
pub use surface::{
    ControlPointGrid, GridError, SampledSurface, SurfaceSamplingOptions, evaluate_bezier_surface,
};
pub use triangular::{
    BarycentricCoord, DomainTriangle, TriangleIndex, TriangularControlSet, TriangularSample,
    barycentric_to_cartesian, evaluate_triangular_surface, triangular_bernstein_basis,
    triangular_point,
};

#[cfg(test)]
mod tests;
