// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearline Precise: exact narrow-phase closest-point computations.
//!
//! This crate answers the two primitive proximity questions the rest of the
//! engine is built from:
//!
//! - [`segment_closest_point`] — the closest pair of points between two
//!   finite segments, by clamped minimization of the squared-distance
//!   quadratic. Closed form, no iteration, total over all inputs including
//!   zero-length and parallel segments.
//! - [`point_segment_closest_point`] — the degenerate one-segment case
//!   (project onto the carrying line, clamp to the segment).
//!
//! Every branch decision routes through an injected
//! [`ToleranceCompare`] policy rather than raw comparisons, so behavior for
//! near-degenerate inputs is chosen by the caller. Results carry parametric
//! positions `s, t ∈ [0, 1]` (0 = segment start, 1 = segment end) alongside
//! the witness points and the squared distance; squared distances avoid
//! `sqrt` during pruning, which is monotone-safe for comparisons.

#![no_std]

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use nearline_curve::{ToleranceCompare, add, dot, mag_sqrd, scale, sub};

/// Closest pair between two segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProximity<const D: usize> {
    /// Parametric position of the witness on the first segment.
    pub s: f64,
    /// Parametric position of the witness on the second segment.
    pub t: f64,
    /// Witness point on the first segment.
    pub c1: [f64; D],
    /// Witness point on the second segment.
    pub c2: [f64; D],
    /// Squared distance between the witnesses.
    pub dist_sqrd: f64,
}

impl<const D: usize> SegmentProximity<D> {
    /// The (non-squared) distance between the witnesses.
    #[inline]
    #[must_use]
    pub fn dist(&self) -> f64 {
        self.dist_sqrd.sqrt()
    }
}

/// Closest point on a segment to a query point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointProximity<const D: usize> {
    /// Parametric position of the witness on the segment.
    pub t: f64,
    /// Witness point on the segment.
    pub closest: [f64; D],
    /// Squared distance from the query point to the witness.
    pub dist_sqrd: f64,
}

impl<const D: usize> PointProximity<D> {
    /// The (non-squared) distance from the query point to the witness.
    #[inline]
    #[must_use]
    pub fn dist(&self) -> f64 {
        self.dist_sqrd.sqrt()
    }
}

/// Closest points between segments `p1`→`q1` and `p2`→`q2`.
///
/// Minimizes the squared distance `|p1 + s·d1 − (p2 + t·d2)|²` over the unit
/// square in `(s, t)`: solve the unconstrained minimum, clamp `s`, then
/// derive `t` from the clamped `s` — and when that `t` itself needs
/// clamping, re-derive `s` from the clamped `t` before its own clamp. The
/// second pass is load-bearing: clamping `t` moves the closest point, so
/// the first `s` is stale.
///
/// Degenerate inputs need no special casing by callers: a zero-length
/// segment (as judged by `cmp`) collapses the computation to a
/// point/segment or point/point distance. Exactly-parallel segments take
/// `s = 0`, a deterministic but otherwise arbitrary choice; which pairs
/// count as parallel near the tolerance is defined by `cmp`.
pub fn segment_closest_point<const D: usize>(
    p1: [f64; D],
    q1: [f64; D],
    p2: [f64; D],
    q2: [f64; D],
    cmp: &impl ToleranceCompare,
) -> SegmentProximity<D> {
    let d1 = sub(q1, p1);
    let d2 = sub(q2, p2);
    let r = sub(p1, p2);
    let a = dot(d1, d1);
    let e = dot(d2, d2);
    let f = dot(d2, r);

    let (s, t) = if cmp.zero(a) && cmp.zero(e) {
        // Both segments are points.
        (0.0, 0.0)
    } else if cmp.zero(a) {
        // First segment is a point: project it onto the second.
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = dot(d1, r);
        if cmp.zero(e) {
            // Second segment is a point: project it onto the first.
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = dot(d1, d2);
            let denom = a * e - b * b;
            let s = if cmp.zero(denom) {
                0.0
            } else {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            };
            let t = (b * s + f) / e;
            if cmp.less_than(t, 0.0) {
                ((-c / a).clamp(0.0, 1.0), 0.0)
            } else if cmp.greater_than(t, 1.0) {
                (((b - c) / a).clamp(0.0, 1.0), 1.0)
            } else {
                (s, t)
            }
        }
    };

    let c1 = add(p1, scale(d1, s));
    let c2 = add(p2, scale(d2, t));
    SegmentProximity {
        s,
        t,
        c1,
        c2,
        dist_sqrd: mag_sqrd(sub(c1, c2)),
    }
}

/// Squared distance between two segments.
#[inline]
pub fn segment_distance_sqrd<const D: usize>(
    p1: [f64; D],
    q1: [f64; D],
    p2: [f64; D],
    q2: [f64; D],
    cmp: &impl ToleranceCompare,
) -> f64 {
    segment_closest_point(p1, q1, p2, q2, cmp).dist_sqrd
}

/// Distance between two segments.
#[inline]
pub fn segment_distance<const D: usize>(
    p1: [f64; D],
    q1: [f64; D],
    p2: [f64; D],
    q2: [f64; D],
    cmp: &impl ToleranceCompare,
) -> f64 {
    segment_distance_sqrd(p1, q1, p2, q2, cmp).sqrt()
}

/// Closest point on segment `a`→`b` to `p`.
///
/// Projects `p` onto the carrying line and clamps the parameter to the
/// segment; a zero-length segment (as judged by `cmp`) collapses to the
/// point/point distance with `t = 0`.
pub fn point_segment_closest_point<const D: usize>(
    p: [f64; D],
    a: [f64; D],
    b: [f64; D],
    cmp: &impl ToleranceCompare,
) -> PointProximity<D> {
    let ab = sub(b, a);
    let len_sqrd = dot(ab, ab);
    let t = if cmp.zero(len_sqrd) {
        0.0
    } else {
        (dot(sub(p, a), ab) / len_sqrd).clamp(0.0, 1.0)
    };
    let closest = add(a, scale(ab, t));
    PointProximity {
        t,
        closest,
        dist_sqrd: mag_sqrd(sub(p, closest)),
    }
}

/// Squared distance from `p` to segment `a`→`b`.
#[inline]
pub fn point_segment_distance_sqrd<const D: usize>(
    p: [f64; D],
    a: [f64; D],
    b: [f64; D],
    cmp: &impl ToleranceCompare,
) -> f64 {
    point_segment_closest_point(p, a, b, cmp).dist_sqrd
}

/// Distance from `p` to segment `a`→`b`.
#[inline]
pub fn point_segment_distance<const D: usize>(
    p: [f64; D],
    a: [f64; D],
    b: [f64; D],
    cmp: &impl ToleranceCompare,
) -> f64 {
    point_segment_distance_sqrd(p, a, b, cmp).sqrt()
}

/// Closest points between two [`kurbo::Line`]s.
///
/// Convenience wrapper for 2D hosts that already speak kurbo.
pub fn line_line_closest_point(
    a: kurbo::Line,
    b: kurbo::Line,
    cmp: &impl ToleranceCompare,
) -> SegmentProximity<2> {
    segment_closest_point(
        [a.p0.x, a.p0.y],
        [a.p1.x, a.p1.y],
        [b.p0.x, b.p0.y],
        [b.p1.x, b.p1.y],
        cmp,
    )
}
