use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom::{
    BBox2, BSplineCurve2, BezierAlgorithm, BezierCurve2, Curve2, CurveError, CurveSamplingOptions,
    DEFAULT_CURVE_SAMPLES, DEFAULT_SEGMENT_SAMPLES, KnotType, KnotVector, Point2, Tolerance,
    bernstein_basis, binomial_coefficient, cubic_bezier, de_casteljau_point, evaluate_bezier_bernstein, evaluate_bezier_de_casteljau, factorial,
    quadratic_bezier, tessellate_curve_uniform, trinomial_coefficient,
};

fn random_control_points(rng: &mut StdRng) -> Vec<Point2> {
    let count = rng.random_range(2..=9);
    (0..count)
        .map(|_| Point2::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0)))
        .collect()
}

fn assert_relative_close(a: Point2, b: Point2, rel: f64) {
    let scale = a.x.abs().max(a.y.abs()).max(1.0);
    assert!(
        (a.x - b.x).abs() <= rel * scale && (a.y - b.y).abs() <= rel * scale,
        "{a:?} vs {b:?}"
    );
}

#[test]
fn factorial_small_values() {
    assert_eq!(factorial(0), 1);
    assert_eq!(factorial(1), 1);
    assert_eq!(factorial(5), 120);
    assert_eq!(factorial(20), 2_432_902_008_176_640_000);
}

#[test]
fn binomial_coefficient_matches_pascal_triangle() {
    assert_eq!(binomial_coefficient(4, 0), 1);
    assert_eq!(binomial_coefficient(4, 2), 6);
    assert_eq!(binomial_coefficient(20, 10), 184_756);
    assert_eq!(binomial_coefficient(3, -1), 0);
    assert_eq!(binomial_coefficient(3, 4), 0);

    for n in 1..=20i64 {
        for i in 1..n {
            assert_eq!(
                binomial_coefficient(n, i),
                binomial_coefficient(n - 1, i - 1) + binomial_coefficient(n - 1, i)
            );
        }
    }
}

#[test]
fn trinomial_coefficient_requires_matching_sum() {
    assert_eq!(trinomial_coefficient(2, 1, 1, 0), 2);
    assert_eq!(trinomial_coefficient(3, 1, 1, 1), 6);
    assert_eq!(trinomial_coefficient(3, 1, 1, 0), 0);
    assert_eq!(
        trinomial_coefficient(6, 2, 3, 1),
        factorial(6) / (factorial(2) * factorial(3) * factorial(1))
    );
}

#[test]
fn bernstein_basis_partitions_unity() {
    for n in 0..=8 {
        for step in 0..=10u32 {
            let t = f64::from(step) / 10.0;
            let sum: f64 = (0..=n).map(|i| bernstein_basis(i, n, t)).sum();
            assert!((sum - 1.0).abs() < 1e-12, "n={n} t={t} sum={sum}");
        }
    }
    assert_eq!(bernstein_basis(4, 3, 0.5), 0.0);
}

#[test]
fn bernstein_quadratic_example() {
    let points = [Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), Point2::new(10.0, 10.0)];
    let curve = evaluate_bezier_bernstein(&points, 2);
    assert_eq!(
        curve,
        vec![Point2::new(0.0, 0.0), Point2::new(7.5, 2.5), Point2::new(10.0, 10.0)]
    );
}

#[test]
fn fewer_than_two_points_yield_empty_curves() {
    let single = [Point2::new(3.0, 4.0)];
    assert!(evaluate_bezier_bernstein(&single, 10).is_empty());
    assert!(evaluate_bezier_de_casteljau(&single, 10).is_empty());
    assert!(evaluate_bezier_bernstein(&[], 10).is_empty());
    assert!(evaluate_bezier_de_casteljau(&[], 10).is_empty());
    assert_eq!(de_casteljau_point(&[], 0.5), None);
}

#[test]
fn sample_count_is_samples_plus_one() {
    let points = [Point2::new(0.0, 0.0), Point2::new(5.0, 9.0), Point2::new(10.0, 0.0)];
    assert_eq!(evaluate_bezier_bernstein(&points, 100).len(), 101);
    assert_eq!(evaluate_bezier_de_casteljau(&points, 7).len(), 8);
    // A zero count still samples both ends.
    assert_eq!(evaluate_bezier_bernstein(&points, 0).len(), 2);
}

#[test]
fn bernstein_and_de_casteljau_agree() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let points = random_control_points(&mut rng);
        let samples = rng.random_range(1..=40);
        let a = evaluate_bezier_bernstein(&points, samples);
        let b = evaluate_bezier_de_casteljau(&points, samples);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_relative_close(*pa, *pb, 1e-6);
        }
    }
}

#[test]
fn bezier_endpoints_match_control_polygon_ends() {
    let mut rng = StdRng::seed_from_u64(17);
    let tol = Tolerance::new(1e-9);
    for _ in 0..50 {
        let points = random_control_points(&mut rng);
        for algorithm in [BezierAlgorithm::Bernstein, BezierAlgorithm::DeCasteljau] {
            let curve = algorithm.evaluate(&points, 25);
            assert!(tol.approx_eq_point2(curve[0], points[0]));
            assert!(tol.approx_eq_point2(curve[curve.len() - 1], points[points.len() - 1]));
        }
    }
}

#[test]
fn bezier_points_stay_inside_control_bbox() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let points = random_control_points(&mut rng);
        let bbox = BBox2::from_points(&points).unwrap();
        for p in evaluate_bezier_de_casteljau(&points, 30) {
            assert!(bbox.contains_point_with_tolerance(p, Tolerance::new(1e-9)), "{p:?}");
        }
    }
}

#[test]
fn two_point_bezier_is_linear_interpolation() {
    let p0 = Point2::new(-3.0, 2.0);
    let p1 = Point2::new(7.0, -8.0);
    let tol = Tolerance::new(1e-12);
    let curve = evaluate_bezier_bernstein(&[p0, p1], 10);
    for (i, p) in curve.iter().enumerate() {
        let t = i as f64 / 10.0;
        let expected = Point2::new((1.0 - t) * p0.x + t * p1.x, (1.0 - t) * p0.y + t * p1.y);
        assert!(tol.approx_eq_point2(*p, expected), "{p:?} vs {expected:?}");
    }
}

#[test]
fn de_casteljau_leaves_input_untouched() {
    let points = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 8.0), Point2::new(8.0, 0.0)];
    let before = points.clone();
    let mid = de_casteljau_point(&points, 0.5).unwrap();
    assert_eq!(points, before);
    assert_eq!(mid, Point2::new(4.0, 4.0));
}

#[test]
fn bezier_evaluation_is_deterministic() {
    let points = [Point2::new(1.5, 2.5), Point2::new(-4.0, 9.0), Point2::new(6.0, 3.0), Point2::new(8.0, -1.0)];
    assert_eq!(evaluate_bezier_bernstein(&points, 33), evaluate_bezier_bernstein(&points, 33));
}

#[test]
fn quadratic_and_cubic_helpers_match_general_evaluation() {
    let p = [Point2::new(0.0, 0.0), Point2::new(2.0, 5.0), Point2::new(6.0, 5.0), Point2::new(8.0, 0.0)];
    assert_eq!(quadratic_bezier(p[0], p[1], p[2], 50), evaluate_bezier_bernstein(&p[..3], 50));
    assert_eq!(cubic_bezier(p[0], p[1], p[2], p[3], 50), evaluate_bezier_bernstein(&p, 50));
}

#[test]
fn bezier_algorithm_parses_names() {
    assert_eq!("bernstein".parse::<BezierAlgorithm>(), Ok(BezierAlgorithm::Bernstein));
    assert_eq!("De_Casteljau".parse::<BezierAlgorithm>(), Ok(BezierAlgorithm::DeCasteljau));
    assert_eq!("decasteljau".parse::<BezierAlgorithm>(), Ok(BezierAlgorithm::DeCasteljau));
    assert!("horner".parse::<BezierAlgorithm>().is_err());
    assert_eq!(BezierAlgorithm::DeCasteljau.to_string(), "de_casteljau");
}

#[test]
fn bezier_curve_rejects_single_point_and_tessellates() {
    assert_eq!(
        BezierCurve2::new(vec![Point2::ORIGIN], BezierAlgorithm::Bernstein),
        Err(CurveError::NotEnoughBezierPoints { count: 1 })
    );

    let points = vec![Point2::new(0.0, 0.0), Point2::new(5.0, 10.0), Point2::new(10.0, 0.0)];
    let curve = BezierCurve2::new(points.clone(), BezierAlgorithm::DeCasteljau).unwrap();
    assert_eq!(curve.degree(), 2);

    let tol = Tolerance::new(1e-9);
    let tessellated = tessellate_curve_uniform(&curve, 12);
    let sampled = curve.sample(CurveSamplingOptions {
        samples: 12,
        algorithm: BezierAlgorithm::Bernstein,
    });
    assert_eq!(tessellated.len(), 13);
    for (a, b) in tessellated.iter().zip(&sampled) {
        assert!(tol.approx_eq_point2(*a, *b));
    }
}

#[test]
fn bspline_curve_validates_knots() {
    let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)];
    let short = KnotVector::new(vec![0.0, 0.0, 1.0, 1.0]).unwrap();
    assert_eq!(
        BSplineCurve2::new(points.clone(), 2, short),
        Err(CurveError::KnotCountMismatch { expected: 6, actual: 4 })
    );
    assert!(matches!(
        BSplineCurve2::with_knot_type(points.clone(), 3, KnotType::Clamped),
        Err(CurveError::NotEnoughBSplinePoints { degree: 3, required: 4, count: 3 })
    ));

    let curve = BSplineCurve2::with_knot_type(points, 2, KnotType::Clamped).unwrap();
    assert_eq!(curve.domain(), (0.0, 1.0));
    let tol = Tolerance::new(1e-6);
    assert!(tol.approx_eq_point2(curve.point_at(0.0), Point2::new(0.0, 0.0)));
    assert!(tol.approx_eq_point2(curve.point_at(1.0), Point2::new(2.0, 0.0)));
    assert!(tol.approx_eq_point2(curve.point_at(0.5), Point2::new(1.0, 0.5)));
}

#[test]
fn segment_helpers_sample_default_count() {
    let p = [Point2::new(0.0, 0.0), Point2::new(2.0, 5.0), Point2::new(6.0, 5.0), Point2::new(8.0, 0.0)];
    assert_eq!(DEFAULT_SEGMENT_SAMPLES, 50);
    assert_eq!(quadratic_bezier(p[0], p[1], p[2], DEFAULT_SEGMENT_SAMPLES).len(), 51);
    assert_eq!(cubic_bezier(p[0], p[1], p[2], p[3], DEFAULT_SEGMENT_SAMPLES).len(), 51);
    assert_eq!(CurveSamplingOptions::default().samples, DEFAULT_CURVE_SAMPLES);
}

#[test]
fn trinomial_rejects_overflowing_index_sum() {
    assert_eq!(trinomial_coefficient(1, usize::MAX, 1, 0), 0);
    assert_eq!(trinomial_coefficient(usize::MAX, usize::MAX, 1, 0), 0);
    assert_eq!(trinomial_coefficient(1, 1, 0, 0), 1);
}

#[test]
fn bspline_curve_rejects_huge_degree_without_allocating() {
    let points = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 0.0)];
    let degree = usize::MAX / 4;
    assert_eq!(
        BSplineCurve2::with_knot_type(points.clone(), degree, KnotType::Uniform),
        Err(CurveError::NotEnoughBSplinePoints { degree, required: degree + 1, count: 3 })
    );
    let knots = KnotVector::new(vec![0.0, 1.0]).unwrap();
    assert_eq!(
        BSplineCurve2::new(points, usize::MAX, knots),
        Err(CurveError::NotEnoughBSplinePoints {
            degree: usize::MAX,
            required: usize::MAX,
            count: 3
        })
    );
}
