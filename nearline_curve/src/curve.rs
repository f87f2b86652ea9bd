// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-based curve access and the polyline/polygon borrow wrappers.

use crate::error::CurveError;
use crate::point::PointAccess;

/// Read-only, index-based access to a piecewise-linear curve.
///
/// The query engines consume curves exclusively through this trait; they
/// never own the vertex storage and never retain references beyond a single
/// call. Open and closed curves are treated uniformly through the *chain*
/// view: a closed curve's chain exposes its first vertex again at index
/// [`len`][Self::len], so the closing segment is an ordinary trailing
/// segment and sub-chain spans never need to wrap.
pub trait CurveAccess<const D: usize> {
    /// Number of stored vertices.
    fn len(&self) -> usize;

    /// The vertex at `i` (`i < len`).
    fn vertex(&self, i: usize) -> [f64; D];

    /// Whether the curve closes back from its last vertex to its first.
    fn is_closed(&self) -> bool;

    /// Whether the curve stores no vertices.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the chain view: `len` for open curves, `len + 1` for
    /// closed ones.
    #[inline]
    fn chain_len(&self) -> usize {
        self.len() + usize::from(self.is_closed())
    }

    /// The chain vertex at `i` (`i < chain_len`); index `len` of a closed
    /// curve is the first vertex again.
    #[inline]
    fn chain_vertex(&self, i: usize) -> [f64; D] {
        self.vertex(i % self.len())
    }

    /// Number of segments: `len - 1` open, `len` closed.
    #[inline]
    fn segment_count(&self) -> usize {
        self.chain_len().saturating_sub(1)
    }

    /// Endpoints of segment `i` (`i < segment_count`).
    #[inline]
    fn segment(&self, i: usize) -> ([f64; D], [f64; D]) {
        (self.chain_vertex(i), self.chain_vertex(i + 1))
    }
}

impl<const D: usize, C: CurveAccess<D> + ?Sized> CurveAccess<D> for &C {
    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn vertex(&self, i: usize) -> [f64; D] {
        (**self).vertex(i)
    }

    #[inline]
    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

/// An open curve borrowing a caller-owned vertex slice.
#[derive(Clone, Copy, Debug)]
pub struct Polyline<'a, P> {
    points: &'a [P],
}

impl<'a, P> Polyline<'a, P> {
    /// Wraps a vertex slice as an open curve.
    ///
    /// # Errors
    ///
    /// [`CurveError::TooFewVertices`] unless the slice has at least 2
    /// vertices.
    pub fn new(points: &'a [P]) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewVertices {
                required: 2,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }
}

impl<const D: usize, P: PointAccess<D>> CurveAccess<D> for Polyline<'_, P> {
    #[inline]
    fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn vertex(&self, i: usize) -> [f64; D] {
        self.points[i].to_array()
    }

    #[inline]
    fn is_closed(&self) -> bool {
        false
    }
}

/// A closed curve borrowing a caller-owned vertex slice.
///
/// The closing segment from the last vertex back to the first is implied;
/// the slice does not repeat the first vertex.
#[derive(Clone, Copy, Debug)]
pub struct Polygon<'a, P> {
    points: &'a [P],
}

impl<'a, P> Polygon<'a, P> {
    /// Wraps a vertex slice as a closed curve.
    ///
    /// # Errors
    ///
    /// [`CurveError::TooFewVertices`] unless the slice has at least 3
    /// vertices.
    pub fn new(points: &'a [P]) -> Result<Self, CurveError> {
        if points.len() < 3 {
            return Err(CurveError::TooFewVertices {
                required: 3,
                actual: points.len(),
            });
        }
        Ok(Self { points })
    }
}

impl<const D: usize, P: PointAccess<D>> CurveAccess<D> for Polygon<'_, P> {
    #[inline]
    fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn vertex(&self, i: usize) -> [f64; D] {
        self.points[i].to_array()
    }

    #[inline]
    fn is_closed(&self) -> bool {
        true
    }
}

/// Checks that `D` is a dimensionality the query engines support.
///
/// # Errors
///
/// [`CurveError::UnsupportedDimension`] unless `D` is 2 or 3.
pub const fn ensure_dimension<const D: usize>() -> Result<(), CurveError> {
    match D {
        2 | 3 => Ok(()),
        _ => Err(CurveError::UnsupportedDimension(D)),
    }
}
