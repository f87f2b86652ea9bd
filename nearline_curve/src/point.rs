// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Point access and small fixed-dimension vector helpers.

/// Read-only access to a point's coordinates.
///
/// Implement this once per concrete point type used by the host application;
/// the query engines never own or mutate points, they only read coordinates
/// by axis index. `D` is the dimensionality (the engines support 2 and 3).
pub trait PointAccess<const D: usize> {
    /// The coordinate on `axis` (0-based, `axis < D`).
    fn coord(&self, axis: usize) -> f64;

    /// The point as a coordinate array.
    #[inline]
    fn to_array(&self) -> [f64; D] {
        core::array::from_fn(|axis| self.coord(axis))
    }
}

impl<const D: usize> PointAccess<D> for [f64; D] {
    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        self[axis]
    }

    #[inline]
    fn to_array(&self) -> [f64; D] {
        *self
    }
}

impl PointAccess<2> for kurbo::Point {
    #[inline]
    fn coord(&self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }
}

/// `a - b`, per axis.
#[inline]
#[must_use]
pub fn sub<const D: usize>(a: [f64; D], b: [f64; D]) -> [f64; D] {
    core::array::from_fn(|i| a[i] - b[i])
}

/// `a + b`, per axis.
#[inline]
#[must_use]
pub fn add<const D: usize>(a: [f64; D], b: [f64; D]) -> [f64; D] {
    core::array::from_fn(|i| a[i] + b[i])
}

/// `v` scaled by `k`.
#[inline]
#[must_use]
pub fn scale<const D: usize>(v: [f64; D], k: f64) -> [f64; D] {
    core::array::from_fn(|i| v[i] * k)
}

/// Dot product.
#[inline]
#[must_use]
pub fn dot<const D: usize>(a: [f64; D], b: [f64; D]) -> f64 {
    let mut acc = 0.0;
    for i in 0..D {
        acc += a[i] * b[i];
    }
    acc
}

/// Squared magnitude.
#[inline]
#[must_use]
pub fn mag_sqrd<const D: usize>(v: [f64; D]) -> f64 {
    dot(v, v)
}

/// The point at parameter `t` on the segment `a` → `b` (`t` in `[0, 1]`).
#[inline]
#[must_use]
pub fn lerp<const D: usize>(a: [f64; D], b: [f64; D], t: f64) -> [f64; D] {
    add(a, scale(sub(b, a), t))
}
