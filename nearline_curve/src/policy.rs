// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Injected tolerance-comparison policies.
//!
//! The narrow-phase solver never compares scalars with raw `<`/`==`; every
//! branch decision goes through a [`ToleranceCompare`] so behavior near ties
//! is chosen by the caller, not hard-coded. Comparisons whose operands fall
//! within a policy's tolerance may legitimately select either branch; that
//! is a property of the policy, not a bug in the engines.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Tolerant scalar comparison capability.
pub trait ToleranceCompare {
    /// Whether `a` is less than `b` beyond the policy's tolerance.
    fn less_than(&self, a: f64, b: f64) -> bool;

    /// Whether `a` is greater than `b` beyond the policy's tolerance.
    fn greater_than(&self, a: f64, b: f64) -> bool;

    /// Whether `a` and `b` are equal within the policy's tolerance.
    fn equals(&self, a: f64, b: f64) -> bool;

    /// Whether `a` is zero within the policy's tolerance.
    #[inline]
    fn zero(&self, a: f64) -> bool {
        self.equals(a, 0.0)
    }
}

/// Comparison with a fixed absolute tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsoluteTolerance {
    /// Values closer than this are considered equal.
    pub eps: f64,
}

impl AbsoluteTolerance {
    /// Creates a policy with the given absolute tolerance.
    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }
}

impl Default for AbsoluteTolerance {
    /// A tolerance suited to coordinates of roughly unit magnitude.
    fn default() -> Self {
        Self { eps: 1e-12 }
    }
}

impl ToleranceCompare for AbsoluteTolerance {
    #[inline]
    fn less_than(&self, a: f64, b: f64) -> bool {
        b - a > self.eps
    }

    #[inline]
    fn greater_than(&self, a: f64, b: f64) -> bool {
        a - b > self.eps
    }

    #[inline]
    fn equals(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }
}

/// Raw IEEE comparison, no tolerance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExactCompare;

impl ToleranceCompare for ExactCompare {
    #[inline]
    fn less_than(&self, a: f64, b: f64) -> bool {
        a < b
    }

    #[inline]
    fn greater_than(&self, a: f64, b: f64) -> bool {
        a > b
    }

    #[inline]
    fn equals(&self, a: f64, b: f64) -> bool {
        a == b
    }
}
