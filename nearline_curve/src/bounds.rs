// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned bounding boxes and the broad-phase gap lower bound.

use crate::curve::CurveAccess;
use crate::error::CurveError;
use crate::span::VertexSpan;

/// Axis-aligned bounding box in `D` dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<const D: usize> {
    /// Per-axis minimum.
    pub min: [f64; D],
    /// Per-axis maximum.
    pub max: [f64; D],
}

impl<const D: usize> Aabb<D> {
    /// Creates an AABB from min/max corners.
    #[inline]
    #[must_use]
    pub const fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// The degenerate AABB containing a single point.
    #[inline]
    #[must_use]
    pub const fn from_point(p: [f64; D]) -> Self {
        Self { min: p, max: p }
    }

    /// Grows the box to contain `p`.
    #[inline]
    pub fn include(&mut self, p: [f64; D]) {
        for axis in 0..D {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    /// The smallest AABB enclosing both boxes.
    #[inline]
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = *self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    /// Whether the box contains `p` (boundary inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, p: [f64; D]) -> bool {
        (0..D).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    /// Whether the boxes overlap (shared boundary counts).
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..D).all(|axis| self.min[axis] <= other.max[axis] && other.min[axis] <= self.max[axis])
    }

    /// The AABB of a span of chain vertices.
    ///
    /// This is the broad-phase bound for the sub-chain: the span's segments
    /// connect vertices inside the box, so by convexity the box contains
    /// every point of the sub-chain, not just its vertices.
    ///
    /// # Errors
    ///
    /// [`CurveError::EmptySpan`] or [`CurveError::SpanOutOfBounds`] when the
    /// span does not reference at least one valid chain vertex.
    pub fn of_span<C: CurveAccess<D>>(curve: &C, span: VertexSpan) -> Result<Self, CurveError> {
        span.validate(curve.chain_len())?;
        let mut out = Self::from_point(curve.chain_vertex(span.lo));
        for i in span.lo + 1..=span.hi {
            out.include(curve.chain_vertex(i));
        }
        Ok(out)
    }

    /// The AABB of a whole curve.
    ///
    /// # Errors
    ///
    /// [`CurveError::EmptySpan`] for a curve with no vertices.
    pub fn of_curve<C: CurveAccess<D>>(curve: &C) -> Result<Self, CurveError> {
        if curve.is_empty() {
            return Err(CurveError::EmptySpan);
        }
        Self::of_span(curve, VertexSpan::new(0, curve.chain_len() - 1))
    }

    /// Squared distance between the boxes' closest points.
    ///
    /// Per axis: zero where the projections overlap, the squared projection
    /// gap otherwise; summed across axes. This never exceeds the true
    /// squared distance between any point of `self` and any point of
    /// `other`, which is the invariant the branch-and-bound search relies
    /// on for pruning.
    #[must_use]
    pub fn gap_sqrd(&self, other: &Self) -> f64 {
        let mut acc = 0.0;
        for axis in 0..D {
            let gap = if other.max[axis] < self.min[axis] {
                self.min[axis] - other.max[axis]
            } else if other.min[axis] > self.max[axis] {
                other.min[axis] - self.max[axis]
            } else {
                0.0
            };
            acc += gap * gap;
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{Polygon, Polyline};
    use crate::point::{lerp, mag_sqrd, sub};
    use alloc::vec::Vec;

    #[test]
    fn include_and_union() {
        let mut b = Aabb::from_point([1.0, 2.0]);
        b.include([-1.0, 5.0]);
        assert_eq!(b, Aabb::new([-1.0, 2.0], [1.0, 5.0]));

        let other = Aabb::new([0.0, 0.0], [3.0, 3.0]);
        let u = b.union(&other);
        assert_eq!(u, Aabb::new([-1.0, 0.0], [3.0, 5.0]));
        assert!(u.contains([2.0, 4.0]));
        assert!(!u.contains([4.0, 0.0]));
    }

    #[test]
    fn gap_is_zero_for_overlapping_boxes() {
        let a = Aabb::new([0.0, 0.0], [2.0, 2.0]);
        let b = Aabb::new([1.0, 1.0], [3.0, 3.0]);
        assert!(a.overlaps(&b));
        assert_eq!(a.gap_sqrd(&b), 0.0);
        // Shared edge also counts as contact.
        let c = Aabb::new([2.0, 0.0], [4.0, 2.0]);
        assert_eq!(a.gap_sqrd(&c), 0.0);
    }

    #[test]
    fn gap_sums_per_axis() {
        let a = Aabb::new([0.0, 0.0], [1.0, 1.0]);
        let b = Aabb::new([4.0, 5.0], [6.0, 7.0]);
        // Gaps: 3 on x, 4 on y.
        assert_eq!(a.gap_sqrd(&b), 25.0);
        assert_eq!(b.gap_sqrd(&a), 25.0);
    }

    #[test]
    fn gap_in_three_dimensions() {
        let a = Aabb::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = Aabb::new([2.0, 0.5, 3.0], [3.0, 0.75, 4.0]);
        // Gaps: 1 on x, 0 on y (overlap), 2 on z.
        assert_eq!(a.gap_sqrd(&b), 5.0);
    }

    #[test]
    fn span_aabb_covers_only_the_span() {
        let pts = [[0.0, 0.0], [1.0, 4.0], [2.0, -3.0], [9.0, 0.0]];
        let line = Polyline::new(&pts).unwrap();
        let b = Aabb::of_span(&line, VertexSpan::new(1, 2)).unwrap();
        assert_eq!(b, Aabb::new([1.0, -3.0], [2.0, 4.0]));
        assert_eq!(
            Aabb::of_curve(&line).unwrap(),
            Aabb::new([0.0, -3.0], [9.0, 4.0])
        );
    }

    #[test]
    fn closed_span_reaching_chain_end_includes_first_vertex() {
        let pts = [[0.0, 0.0], [4.0, 0.0], [4.0, 4.0]];
        let poly = Polygon::new(&pts).unwrap();
        // Chain vertex 3 is vertex 0 again; the closing segment's box must
        // cover both its endpoints.
        let b = Aabb::of_span(&poly, VertexSpan::new(2, 3)).unwrap();
        assert_eq!(b, Aabb::new([0.0, 0.0], [4.0, 4.0]));
    }

    #[test]
    fn span_errors() {
        let pts = [[0.0, 0.0], [1.0, 0.0]];
        let line = Polyline::new(&pts).unwrap();
        assert_eq!(
            Aabb::of_span(&line, VertexSpan::new(0, 2)).err(),
            Some(CurveError::SpanOutOfBounds { lo: 0, hi: 2, len: 2 })
        );
        assert_eq!(
            Aabb::of_span(&line, VertexSpan::new(1, 0)).err(),
            Some(CurveError::EmptySpan)
        );
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

    fn random_curve(rng: &mut Rng, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|_| [rng.next_f64() * 100.0 - 50.0, rng.next_f64() * 100.0 - 50.0])
            .collect()
    }

    /// The gap bound must never exceed the distance between any pair of
    /// points sampled from the two sub-chains, including points interior to
    /// segments.
    #[test]
    fn gap_never_overestimates_sampled_subchain_distance() {
        let mut rng = Rng::new(0x5EED_0001);
        for _ in 0..50 {
            let a = random_curve(&mut rng, 12);
            let b = random_curve(&mut rng, 9);
            let la = Polyline::new(&a).unwrap();
            let lb = Polyline::new(&b).unwrap();
            let sa = VertexSpan::new(2, 8);
            let sb = VertexSpan::new(1, 6);
            let bound = Aabb::of_span(&la, sa)
                .unwrap()
                .gap_sqrd(&Aabb::of_span(&lb, sb).unwrap());

            for i in sa.lo..sa.hi {
                for j in sb.lo..sb.hi {
                    for step_a in 0..=4 {
                        for step_b in 0..=4 {
                            let pa = lerp(
                                la.chain_vertex(i),
                                la.chain_vertex(i + 1),
                                f64::from(step_a) / 4.0,
                            );
                            let pb = lerp(
                                lb.chain_vertex(j),
                                lb.chain_vertex(j + 1),
                                f64::from(step_b) / 4.0,
                            );
                            let d = mag_sqrd(sub(pa, pb));
                            assert!(
                                bound <= d + 1e-9,
                                "bound {bound} exceeds sampled distance {d}"
                            );
                        }
                    }
                }
            }
        }
    }
}
