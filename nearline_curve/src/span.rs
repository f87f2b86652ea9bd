// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contiguous vertex spans, the unit of subdivision for the search.

use crate::error::CurveError;

/// An inclusive span `lo..=hi` of chain vertex indices.
///
/// A span identifies the sub-chain whose segments connect consecutive
/// vertices `lo..hi`; it covers `hi - lo + 1` vertices and `hi - lo`
/// segments. Spans never wrap: for a closed curve the chain exposes the
/// first vertex again at index `len`, so the closing segment is the final
/// segment of an ordinary contiguous span (see
/// [`CurveAccess::chain_len`][crate::CurveAccess::chain_len]).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexSpan {
    /// First vertex index (inclusive).
    pub lo: usize,
    /// Last vertex index (inclusive).
    pub hi: usize,
}

impl VertexSpan {
    /// Creates a span covering vertices `lo..=hi`.
    #[inline]
    #[must_use]
    pub const fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    /// Number of vertices covered.
    #[inline]
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Number of segments covered.
    #[inline]
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.hi - self.lo
    }

    /// Checks the span against a chain of `chain_len` vertices.
    ///
    /// A span with `lo > hi` covers no vertices and is rejected rather than
    /// treated as a wrap; arbitrary wrap-around sub-chains are unsupported.
    pub fn validate(&self, chain_len: usize) -> Result<(), CurveError> {
        if self.lo > self.hi {
            return Err(CurveError::EmptySpan);
        }
        if self.hi >= chain_len {
            return Err(CurveError::SpanOutOfBounds {
                lo: self.lo,
                hi: self.hi,
                len: chain_len,
            });
        }
        Ok(())
    }

    /// Splits at the midpoint vertex into two halves that share it.
    ///
    /// The shared vertex means no segment is lost: the halves cover segments
    /// `lo..mid` and `mid..hi`. Both halves are strictly smaller than `self`
    /// whenever the span has at least two segments, which is what bounds the
    /// subdivision depth of the search.
    #[inline]
    #[must_use]
    pub const fn split_mid(&self) -> (Self, Self) {
        let mid = self.lo + (self.hi - self.lo) / 2;
        (Self::new(self.lo, mid), Self::new(mid, self.hi))
    }
}
