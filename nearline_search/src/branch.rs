// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Branch-and-bound engine for curve/curve closest-point queries.

use alloc::collections::BinaryHeap;
use core::cmp::Ordering;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use nearline_curve::{
    Aabb, CurveAccess, CurveError, PointAccess, Polygon, Polyline, ToleranceCompare, VertexSpan,
    ensure_dimension, mag_sqrd, sub,
};
use nearline_precise::segment_closest_point;

/// Curves smaller than this go straight to brute force; subdivision
/// overhead is not worth it below here.
const SUBDIVIDE_MIN_VERTICES: usize = 6;

/// Span pairs where either side has fewer segments than this are scanned
/// exhaustively instead of being split further.
const BRUTE_FORCE_SEGMENT_FLOOR: usize = 5;

/// Closest pair between two curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePairProximity<const D: usize> {
    /// Index of the winning segment on the first curve.
    pub seg_a: usize,
    /// Index of the winning segment on the second curve.
    pub seg_b: usize,
    /// Parametric position of the witness on segment `seg_a`.
    pub s: f64,
    /// Parametric position of the witness on segment `seg_b`.
    pub t: f64,
    /// Witness point on the first curve.
    pub c1: [f64; D],
    /// Witness point on the second curve.
    pub c2: [f64; D],
    /// Squared distance between the witnesses.
    pub dist_sqrd: f64,
}

impl<const D: usize> CurvePairProximity<D> {
    /// The (non-squared) distance between the witnesses.
    #[inline]
    #[must_use]
    pub fn dist(&self) -> f64 {
        self.dist_sqrd.sqrt()
    }
}

/// A candidate span pair awaiting refinement, keyed by its AABB gap.
///
/// Ordered so that the smallest bound pops first from a max-heap. Equal
/// bounds fall back to span start indices, making pop order (and therefore
/// the reported witness among exact ties) reproducible across runs.
#[derive(Clone, Copy, Debug)]
struct WorkItem {
    bound_sqrd: f64,
    a: VertexSpan,
    b: VertexSpan,
}

impl PartialEq for WorkItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WorkItem {}

impl PartialOrd for WorkItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WorkItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Bounds are finite for finite inputs; NaN coordinates are outside
        // the supported domain.
        other
            .bound_sqrd
            .partial_cmp(&self.bound_sqrd)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.a.lo.cmp(&self.a.lo))
            .then_with(|| other.b.lo.cmp(&self.b.lo))
    }
}

/// Exhaustive narrow-phase scan of every segment pair in two spans.
///
/// Ties go to the first pair encountered: lowest `seg_a`, then lowest
/// `seg_b`. Returns `None` when either span has no segments.
fn span_pair_brute_force<const D: usize, A, B>(
    a: &A,
    span_a: VertexSpan,
    b: &B,
    span_b: VertexSpan,
    cmp: &impl ToleranceCompare,
) -> Option<CurvePairProximity<D>>
where
    A: CurveAccess<D>,
    B: CurveAccess<D>,
{
    let mut best: Option<CurvePairProximity<D>> = None;
    for i in span_a.lo..span_a.hi {
        let (a0, a1) = a.segment(i);
        for j in span_b.lo..span_b.hi {
            let (b0, b1) = b.segment(j);
            let r = segment_closest_point(a0, a1, b0, b1, cmp);
            if best.as_ref().is_none_or(|m| r.dist_sqrd < m.dist_sqrd) {
                best = Some(CurvePairProximity {
                    seg_a: i,
                    seg_b: j,
                    s: r.s,
                    t: r.t,
                    c1: r.c1,
                    c2: r.c2,
                    dist_sqrd: r.dist_sqrd,
                });
            }
        }
    }
    best
}

fn validate_curve<const D: usize, C: CurveAccess<D>>(curve: &C) -> Result<(), CurveError> {
    let required = if curve.is_closed() { 3 } else { 2 };
    if curve.len() < required {
        return Err(CurveError::TooFewVertices {
            required,
            actual: curve.len(),
        });
    }
    Ok(())
}

/// Closest pair between two curves, via branch-and-bound.
///
/// Works on any pair of [`CurveAccess`] implementations (open or closed,
/// mixed is fine). The search keeps a priority queue of span pairs ordered
/// by ascending AABB gap and a best-so-far exact answer:
///
/// 1. Seed with the full spans and a cheap upper bound (the first vertices
///    of each curve).
/// 2. Pop the smallest bound. The queue is sorted, so the first popped
///    bound at or above the current best ends the search: nothing left can
///    improve the answer.
/// 3. Small span pairs are scanned exhaustively; larger ones are split at
///    their midpoint vertices, and each of the four cross combinations is
///    pushed unless its bound already exceeds the current best.
///
/// The best-so-far distance only ever decreases, and spans shrink strictly
/// on every split, so the loop terminates with the exact minimum.
///
/// # Errors
///
/// [`CurveError::TooFewVertices`] or [`CurveError::UnsupportedDimension`]
/// for malformed inputs; both are detected before any geometry runs.
pub fn curve_curve_closest_point<const D: usize, A, B>(
    a: &A,
    b: &B,
    cmp: &impl ToleranceCompare,
) -> Result<CurvePairProximity<D>, CurveError>
where
    A: CurveAccess<D>,
    B: CurveAccess<D>,
{
    ensure_dimension::<D>()?;
    validate_curve(a)?;
    validate_curve(b)?;

    let full_a = VertexSpan::new(0, a.chain_len() - 1);
    let full_b = VertexSpan::new(0, b.chain_len() - 1);

    if a.len() < SUBDIVIDE_MIN_VERTICES || b.len() < SUBDIVIDE_MIN_VERTICES {
        return span_pair_brute_force(a, full_a, b, full_b, cmp).ok_or(CurveError::EmptySpan);
    }

    // Cheap, safe upper bound to prune against from the start.
    let mut best = CurvePairProximity {
        seg_a: 0,
        seg_b: 0,
        s: 0.0,
        t: 0.0,
        c1: a.vertex(0),
        c2: b.vertex(0),
        dist_sqrd: mag_sqrd(sub(a.vertex(0), b.vertex(0))),
    };

    let mut queue = BinaryHeap::new();
    queue.push(WorkItem {
        bound_sqrd: Aabb::of_span(a, full_a)?.gap_sqrd(&Aabb::of_span(b, full_b)?),
        a: full_a,
        b: full_b,
    });

    while let Some(item) = queue.pop() {
        if item.bound_sqrd >= best.dist_sqrd {
            break;
        }

        if item.a.segment_count() < BRUTE_FORCE_SEGMENT_FLOOR
            || item.b.segment_count() < BRUTE_FORCE_SEGMENT_FLOOR
        {
            if let Some(exact) = span_pair_brute_force(a, item.a, b, item.b, cmp)
                && exact.dist_sqrd < best.dist_sqrd
            {
                best = exact;
            }
            continue;
        }

        let (a_lo, a_hi) = item.a.split_mid();
        let (b_lo, b_hi) = item.b.split_mid();
        for span_a in [a_lo, a_hi] {
            let box_a = Aabb::of_span(a, span_a)?;
            for span_b in [b_lo, b_hi] {
                let bound_sqrd = box_a.gap_sqrd(&Aabb::of_span(b, span_b)?);
                if bound_sqrd <= best.dist_sqrd {
                    queue.push(WorkItem {
                        bound_sqrd,
                        a: span_a,
                        b: span_b,
                    });
                }
            }
        }
    }

    Ok(best)
}

/// Squared minimum distance between two curves.
///
/// # Errors
///
/// As [`curve_curve_closest_point`].
#[inline]
pub fn curve_curve_distance_sqrd<const D: usize, A, B>(
    a: &A,
    b: &B,
    cmp: &impl ToleranceCompare,
) -> Result<f64, CurveError>
where
    A: CurveAccess<D>,
    B: CurveAccess<D>,
{
    Ok(curve_curve_closest_point(a, b, cmp)?.dist_sqrd)
}

/// Closest pair between two open polylines given as vertex slices.
///
/// # Errors
///
/// [`CurveError::TooFewVertices`] when either slice has fewer than 2
/// vertices; [`CurveError::UnsupportedDimension`] unless `D` is 2 or 3.
pub fn polyline_polyline_closest_point<const D: usize, P, Q>(
    a: &[P],
    b: &[Q],
    cmp: &impl ToleranceCompare,
) -> Result<CurvePairProximity<D>, CurveError>
where
    P: PointAccess<D>,
    Q: PointAccess<D>,
{
    curve_curve_closest_point(&Polyline::new(a)?, &Polyline::new(b)?, cmp)
}

/// Squared minimum distance between two open polylines.
///
/// # Errors
///
/// As [`polyline_polyline_closest_point`].
#[inline]
pub fn polyline_polyline_distance_sqrd<const D: usize, P, Q>(
    a: &[P],
    b: &[Q],
    cmp: &impl ToleranceCompare,
) -> Result<f64, CurveError>
where
    P: PointAccess<D>,
    Q: PointAccess<D>,
{
    Ok(polyline_polyline_closest_point(a, b, cmp)?.dist_sqrd)
}

/// Minimum distance between two open polylines.
///
/// # Errors
///
/// As [`polyline_polyline_closest_point`].
#[inline]
pub fn polyline_polyline_distance<const D: usize, P, Q>(
    a: &[P],
    b: &[Q],
    cmp: &impl ToleranceCompare,
) -> Result<f64, CurveError>
where
    P: PointAccess<D>,
    Q: PointAccess<D>,
{
    Ok(polyline_polyline_distance_sqrd(a, b, cmp)?.sqrt())
}

/// Closest pair between two closed polygons given as vertex slices.
///
/// The closing segment of each polygon participates in the search; slices
/// must not repeat the first vertex.
///
/// # Errors
///
/// [`CurveError::TooFewVertices`] when either slice has fewer than 3
/// vertices; [`CurveError::UnsupportedDimension`] unless `D` is 2 or 3.
pub fn polygon_polygon_closest_point<const D: usize, P, Q>(
    a: &[P],
    b: &[Q],
    cmp: &impl ToleranceCompare,
) -> Result<CurvePairProximity<D>, CurveError>
where
    P: PointAccess<D>,
    Q: PointAccess<D>,
{
    curve_curve_closest_point(&Polygon::new(a)?, &Polygon::new(b)?, cmp)
}

/// Squared minimum distance between two closed polygons.
///
/// # Errors
///
/// As [`polygon_polygon_closest_point`].
#[inline]
pub fn polygon_polygon_distance_sqrd<const D: usize, P, Q>(
    a: &[P],
    b: &[Q],
    cmp: &impl ToleranceCompare,
) -> Result<f64, CurveError>
where
    P: PointAccess<D>,
    Q: PointAccess<D>,
{
    Ok(polygon_polygon_closest_point(a, b, cmp)?.dist_sqrd)
}

/// Minimum distance between two closed polygons.
///
/// # Errors
///
/// As [`polygon_polygon_closest_point`].
#[inline]
pub fn polygon_polygon_distance<const D: usize, P, Q>(
    a: &[P],
    b: &[Q],
    cmp: &impl ToleranceCompare,
) -> Result<f64, CurveError>
where
    P: PointAccess<D>,
    Q: PointAccess<D>,
{
    Ok(polygon_polygon_distance_sqrd(a, b, cmp)?.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use nearline_curve::{AbsoluteTolerance, lerp};

    const TOL: f64 = 1e-9;

    fn cmp() -> AbsoluteTolerance {
        AbsoluteTolerance::default()
    }

    #[test]
    fn two_unit_squares_two_apart() {
        let a = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let b = [[3.0, 0.0], [4.0, 0.0], [4.0, 1.0], [3.0, 1.0]];
        let d = polygon_polygon_distance::<2, _, _>(&a, &b, &cmp()).unwrap();
        assert!((d - 2.0).abs() < TOL);

        let r = polygon_polygon_closest_point::<2, _, _>(&a, &b, &cmp()).unwrap();
        assert!((r.c1[0] - 1.0).abs() < TOL, "witness on the right edge");
        assert!((r.c2[0] - 3.0).abs() < TOL, "witness on the left edge");
        assert!((r.dist_sqrd - 4.0).abs() < TOL);
    }

    #[test]
    fn crossing_polylines_return_exact_zero() {
        let a = [[-5.0, 0.0], [-1.0, 0.0], [1.0, 0.0], [2.0, 0.0], [3.0, 0.0], [5.0, 0.0], [6.0, 0.0]];
        let b = [[0.0, -5.0], [0.0, -2.0], [0.0, -1.0], [0.0, 1.0], [0.0, 2.0], [0.0, 4.0], [0.0, 6.0]];
        let d = polyline_polyline_distance_sqrd::<2, _, _>(&a, &b, &cmp()).unwrap();
        assert_eq!(d, 0.0, "crossing curves must report exactly zero");
    }

    #[test]
    fn self_distance_is_zero() {
        let pts: Vec<[f64; 2]> = (0..10).map(|i| [f64::from(i), f64::from(i * i)]).collect();
        let d = polyline_polyline_distance_sqrd::<2, _, _>(&pts, &pts, &cmp()).unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn small_curves_take_the_brute_force_path() {
        // Below the subdivision threshold on both sides.
        let a = [[0.0, 0.0], [1.0, 0.0]];
        let b = [[0.0, 3.0], [1.0, 3.0]];
        let r = polyline_polyline_closest_point::<2, _, _>(&a, &b, &cmp()).unwrap();
        assert!((r.dist_sqrd - 9.0).abs() < TOL);
        assert_eq!((r.seg_a, r.seg_b), (0, 0));
    }

    #[test]
    fn witnesses_lie_on_their_segments() {
        let a = [[0.0, 0.0], [2.0, 1.0], [4.0, 0.0], [6.0, 2.0], [8.0, 1.0], [10.0, 3.0], [12.0, 0.0]];
        let b = [[0.0, 6.0], [3.0, 5.0], [5.0, 7.0], [7.0, 5.0], [9.0, 6.0], [11.0, 5.0], [13.0, 7.0]];
        let la = Polyline::new(&a).unwrap();
        let lb = Polyline::new(&b).unwrap();
        let r = curve_curve_closest_point::<2, _, _>(&la, &lb, &cmp()).unwrap();

        let (a0, a1) = la.segment(r.seg_a);
        let (b0, b1) = lb.segment(r.seg_b);
        let c1 = lerp(a0, a1, r.s);
        let c2 = lerp(b0, b1, r.t);
        assert!((c1[0] - r.c1[0]).abs() < TOL && (c1[1] - r.c1[1]).abs() < TOL);
        assert!((c2[0] - r.c2[0]).abs() < TOL && (c2[1] - r.c2[1]).abs() < TOL);
        assert!((mag_sqrd(sub(c1, c2)) - r.dist_sqrd).abs() < TOL);
    }

    #[test]
    fn validation_errors_come_first() {
        let one = [[0.0, 0.0]];
        let ok = [[0.0, 0.0], [1.0, 0.0]];
        assert_eq!(
            polyline_polyline_distance_sqrd::<2, _, _>(&one, &ok, &cmp()).err(),
            Some(CurveError::TooFewVertices {
                required: 2,
                actual: 1
            })
        );
        let two = [[0.0, 0.0], [1.0, 0.0]];
        let tri = [[0.0, 2.0], [1.0, 2.0], [0.5, 3.0]];
        assert_eq!(
            polygon_polygon_distance_sqrd::<2, _, _>(&two, &tri, &cmp()).err(),
            Some(CurveError::TooFewVertices {
                required: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn unsupported_dimension_fails_fast() {
        let a = [[0.0; 4], [1.0; 4]];
        let b = [[2.0; 4], [3.0; 4]];
        assert_eq!(
            polyline_polyline_distance_sqrd::<4, _, _>(&a, &b, &cmp()).err(),
            Some(CurveError::UnsupportedDimension(4))
        );
    }

    #[test]
    fn three_dimensional_curves() {
        let a = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 1.0, 0.0],
            [3.0, 1.0, 1.0],
            [4.0, 0.0, 1.0],
            [5.0, 0.0, 0.0],
        ];
        let b = [
            [0.0, 4.0, 0.0],
            [1.0, 4.0, 1.0],
            [2.0, 5.0, 1.0],
            [3.0, 4.0, 0.0],
            [4.0, 4.0, 0.0],
            [5.0, 5.0, 1.0],
        ];
        let d = polyline_polyline_distance_sqrd::<3, _, _>(&a, &b, &cmp()).unwrap();
        let la = Polyline::new(&a).unwrap();
        let lb = Polyline::new(&b).unwrap();
        assert!((d - all_pairs_min(&la, &lb)).abs() < TOL);
        // Closest approach: the midpoint of (2,1,0)..(3,1,1) against the
        // start of (3,4,0)..(4,4,0).
        assert!((d - 9.5).abs() < 1e-6, "d = {d}");
    }

    #[derive(Clone)]
    struct Rng(u64);

    impl Rng {
        fn new(seed: u64) -> Self {
            Self(seed)
        }
        fn next_u64(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }
        fn next_f64(&mut self) -> f64 {
            let v = self.next_u64() >> 11;
            (v as f64) / ((1u64 << 53) as f64)
        }
    }

    /// A random walk keeps consecutive vertices near each other, which
    /// makes the AABB hierarchy meaningful (pure noise would too, but walks
    /// better resemble digitized curves).
    fn random_walk(rng: &mut Rng, n: usize, origin: [f64; 2]) -> Vec<[f64; 2]> {
        let mut out = Vec::with_capacity(n);
        let mut p = origin;
        for _ in 0..n {
            out.push(p);
            p[0] += rng.next_f64() * 4.0 - 2.0;
            p[1] += rng.next_f64() * 4.0 - 2.0;
        }
        out
    }

    /// Reference all-pairs minimum, written independently of the engine.
    fn all_pairs_min<const D: usize, A: CurveAccess<D>, B: CurveAccess<D>>(
        a: &A,
        b: &B,
    ) -> f64 {
        let mut min = f64::INFINITY;
        for i in 0..a.segment_count() {
            let (a0, a1) = a.segment(i);
            for j in 0..b.segment_count() {
                let (b0, b1) = b.segment(j);
                let d = segment_closest_point(a0, a1, b0, b1, &cmp()).dist_sqrd;
                if d < min {
                    min = d;
                }
            }
        }
        min
    }

    #[test]
    fn matches_brute_force_on_random_polylines() {
        let mut rng = Rng::new(0x5EED_0004);
        for n in [6_usize, 9, 17, 33, 64, 200] {
            let a = random_walk(&mut rng, n, [0.0, 0.0]);
            let b = random_walk(&mut rng, n / 2 + 4, [30.0, 10.0]);
            let la = Polyline::new(&a).unwrap();
            let lb = Polyline::new(&b).unwrap();
            let expected = all_pairs_min(&la, &lb);
            let got = curve_curve_distance_sqrd::<2, _, _>(&la, &lb, &cmp()).unwrap();
            assert!(
                (got - expected).abs() < TOL,
                "n = {n}: engine {got} vs brute force {expected}"
            );
        }
    }

    #[test]
    fn matches_brute_force_on_random_polygons() {
        let mut rng = Rng::new(0x5EED_0005);
        for n in [6_usize, 11, 24, 57, 120] {
            let a = random_walk(&mut rng, n, [0.0, 0.0]);
            let b = random_walk(&mut rng, n, [25.0, -15.0]);
            let pa = Polygon::new(&a).unwrap();
            let pb = Polygon::new(&b).unwrap();
            let expected = all_pairs_min(&pa, &pb);
            let got = curve_curve_distance_sqrd::<2, _, _>(&pa, &pb, &cmp()).unwrap();
            assert!(
                (got - expected).abs() < TOL,
                "n = {n}: engine {got} vs brute force {expected}"
            );
        }
    }

    #[test]
    fn aabb_gap_never_exceeds_exact_subchain_distance() {
        // The pruning invariant, checked against the narrow phase itself.
        let mut rng = Rng::new(0x5EED_0006);
        for _ in 0..40 {
            let a = random_walk(&mut rng, 20, [0.0, 0.0]);
            let b = random_walk(&mut rng, 20, [15.0, 5.0]);
            let la = Polyline::new(&a).unwrap();
            let lb = Polyline::new(&b).unwrap();
            let sa = VertexSpan::new(3, 14);
            let sb = VertexSpan::new(5, 18);
            let bound = Aabb::of_span(&la, sa)
                .unwrap()
                .gap_sqrd(&Aabb::of_span(&lb, sb).unwrap());
            let exact = span_pair_brute_force::<2, _, _>(&la, sa, &lb, sb, &cmp())
                .unwrap()
                .dist_sqrd;
            assert!(
                bound <= exact + TOL,
                "bound {bound} overestimates exact {exact}"
            );
        }
    }

    #[test]
    fn repeated_queries_are_deterministic() {
        let mut rng = Rng::new(0x5EED_0007);
        let a = random_walk(&mut rng, 40, [0.0, 0.0]);
        let b = random_walk(&mut rng, 40, [20.0, 20.0]);
        let first = polyline_polyline_closest_point::<2, _, _>(&a, &b, &cmp()).unwrap();
        let second = polyline_polyline_closest_point::<2, _, _>(&a, &b, &cmp()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_open_and_closed_curves() {
        let square = [[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]];
        let line = [[5.0, 0.0], [5.0, 2.0], [6.0, 3.0], [7.0, 1.0], [8.0, 2.0], [9.0, 0.0]];
        let poly = Polygon::new(&square).unwrap();
        let open = Polyline::new(&line).unwrap();
        let r = curve_curve_closest_point::<2, _, _>(&poly, &open, &cmp()).unwrap();
        // Right edge of the square (x = 2) to the x = 5 start of the line.
        assert!((r.dist_sqrd - 9.0).abs() < TOL);
        assert!((r.c1[0] - 2.0).abs() < TOL);
        assert!((r.c2[0] - 5.0).abs() < TOL);
    }

    #[test]
    fn kurbo_points_through_the_public_surface() {
        let a = [
            kurbo::Point::new(0.0, 0.0),
            kurbo::Point::new(1.0, 0.0),
            kurbo::Point::new(1.0, 1.0),
        ];
        let b = [
            kurbo::Point::new(4.0, 0.0),
            kurbo::Point::new(5.0, 0.0),
            kurbo::Point::new(5.0, 1.0),
        ];
        let d = polyline_polyline_distance::<2, _, _>(&a, &b, &cmp()).unwrap();
        assert!((d - 3.0).abs() < TOL);
    }
}
