// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input-validation errors.

use core::fmt;

/// A malformed query input, reported before any computation begins.
///
/// Numeric degeneracies (zero-length segments, parallel segment pairs) are
/// never errors; the solvers handle those as explicit branches and always
/// return finite results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveError {
    /// A curve has too few vertices for its kind (2 for an open polyline,
    /// 3 for a closed polygon).
    TooFewVertices {
        /// The minimum vertex count for the curve's kind.
        required: usize,
        /// The vertex count that was supplied.
        actual: usize,
    },
    /// A vertex span references indices outside the curve's chain.
    SpanOutOfBounds {
        /// Span start (inclusive).
        lo: usize,
        /// Span end (inclusive).
        hi: usize,
        /// The curve's chain length.
        len: usize,
    },
    /// A vertex span covers no vertices (`lo > hi`).
    EmptySpan,
    /// The dimensionality is not supported by the query engines.
    UnsupportedDimension(usize),
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { required, actual } => {
                write!(f, "curve needs at least {required} vertices, got {actual}")
            }
            Self::SpanOutOfBounds { lo, hi, len } => {
                write!(f, "span {lo}..={hi} exceeds chain length {len}")
            }
            Self::EmptySpan => write!(f, "span covers no vertices"),
            Self::UnsupportedDimension(d) => {
                write!(f, "dimension {d} is not supported (expected 2 or 3)")
            }
        }
    }
}

impl core::error::Error for CurveError {}

#[cfg(test)]
mod tests {
    use super::CurveError;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        let e = CurveError::TooFewVertices {
            required: 3,
            actual: 2,
        };
        assert_eq!(e.to_string(), "curve needs at least 3 vertices, got 2");
        assert_eq!(
            CurveError::SpanOutOfBounds { lo: 0, hi: 9, len: 5 }.to_string(),
            "span 0..=9 exceeds chain length 5"
        );
        assert_eq!(
            CurveError::UnsupportedDimension(4).to_string(),
            "dimension 4 is not supported (expected 2 or 3)"
        );
    }
}
