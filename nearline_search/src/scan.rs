// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear-scan solver: one segment against a curve or sub-chain.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use nearline_curve::{CurveAccess, CurveError, ToleranceCompare, VertexSpan};
use nearline_precise::segment_closest_point;

/// Closest pair between a query segment and a curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveProximity<const D: usize> {
    /// Index of the winning curve segment.
    pub segment: usize,
    /// Parametric position of the witness on the query segment.
    pub s: f64,
    /// Parametric position of the witness on the winning curve segment.
    pub t: f64,
    /// Witness point on the query segment.
    pub on_segment: [f64; D],
    /// Witness point on the curve.
    pub on_curve: [f64; D],
    /// Squared distance between the witnesses.
    pub dist_sqrd: f64,
}

impl<const D: usize> CurveProximity<D> {
    /// The (non-squared) distance between the witnesses.
    #[inline]
    #[must_use]
    pub fn dist(&self) -> f64 {
        self.dist_sqrd.sqrt()
    }
}

/// Closest pair between segment `p1`→`p2` and the sub-chain `span` of
/// `curve`.
///
/// Runs the narrow-phase solver once per segment in the span and keeps the
/// minimum. Ties are broken by the first segment encountered (lowest
/// index), with raw IEEE comparison for the minimum so the winner is
/// deterministic regardless of the policy's tolerance; `cmp` governs only
/// the narrow-phase branch decisions.
///
/// # Errors
///
/// [`CurveError::SpanOutOfBounds`] or [`CurveError::EmptySpan`] when the
/// span does not cover at least one segment of the chain.
pub fn segment_span_closest_point<const D: usize, C: CurveAccess<D>>(
    p1: [f64; D],
    p2: [f64; D],
    curve: &C,
    span: VertexSpan,
    cmp: &impl ToleranceCompare,
) -> Result<CurveProximity<D>, CurveError> {
    span.validate(curve.chain_len())?;
    if span.segment_count() == 0 {
        return Err(CurveError::EmptySpan);
    }

    let mut best: Option<CurveProximity<D>> = None;
    for i in span.lo..span.hi {
        let (a, b) = curve.segment(i);
        let r = segment_closest_point(p1, p2, a, b, cmp);
        if best.as_ref().is_none_or(|m| r.dist_sqrd < m.dist_sqrd) {
            best = Some(CurveProximity {
                segment: i,
                s: r.s,
                t: r.t,
                on_segment: r.c1,
                on_curve: r.c2,
                dist_sqrd: r.dist_sqrd,
            });
        }
    }
    best.ok_or(CurveError::EmptySpan)
}

/// Closest pair between segment `p1`→`p2` and the whole of `curve`.
///
/// # Errors
///
/// [`CurveError::EmptySpan`] for a curve with no segments.
pub fn segment_curve_closest_point<const D: usize, C: CurveAccess<D>>(
    p1: [f64; D],
    p2: [f64; D],
    curve: &C,
    cmp: &impl ToleranceCompare,
) -> Result<CurveProximity<D>, CurveError> {
    if curve.chain_len() < 2 {
        return Err(CurveError::EmptySpan);
    }
    segment_span_closest_point(p1, p2, curve, VertexSpan::new(0, curve.chain_len() - 1), cmp)
}
