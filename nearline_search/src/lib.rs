// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearline Search: hierarchical closest-point queries between curves.
//!
//! The naive minimum distance between two piecewise-linear curves of `n` and
//! `m` vertices is an all-pairs scan of `n·m` segment pairs. This crate
//! keeps that scan as its base case but reaches it through a broad-phase
//! branch-and-bound search: sub-chains of each curve are bounded by their
//! AABBs, candidate span pairs are ordered in a priority queue by the
//! ascending squared gap between their boxes, and any pair whose lower bound
//! cannot beat the best exact distance found so far is pruned. Expected cost
//! drops to `O((n + m) log(n + m))` while the result stays exactly the
//! brute-force minimum, because the AABB gap never overestimates the true
//! sub-chain distance.
//!
//! Two layers are exposed:
//!
//! - [`segment_curve_closest_point`] / [`segment_span_closest_point`] — the
//!   linear-scan solver for one segment against a curve or sub-chain.
//! - [`curve_curve_closest_point`] and the
//!   `polyline_polyline_*` / `polygon_polygon_*` wrappers — the
//!   branch-and-bound engine for whole curve pairs.
//!
//! Squared distances are used for all comparisons and pruning; only the
//! non-squared convenience wrappers take a square root. Queries are
//! synchronous, single-threaded, and side-effect free: the queue and the
//! running minimum live on the stack of one invocation, so independent
//! queries may run concurrently over shared read-only curves.
//!
//! Malformed inputs (too few vertices, out-of-range spans, unsupported
//! dimensionality) are reported as [`CurveError`] before any computation
//! begins. Numeric degeneracies are not errors; see `nearline_precise`.

#![no_std]

extern crate alloc;

mod branch;
mod scan;

pub use branch::{
    CurvePairProximity, curve_curve_closest_point, curve_curve_distance_sqrd,
    polygon_polygon_closest_point, polygon_polygon_distance, polygon_polygon_distance_sqrd,
    polyline_polyline_closest_point, polyline_polyline_distance, polyline_polyline_distance_sqrd,
};
pub use nearline_curve::CurveError;
pub use scan::{CurveProximity, segment_curve_closest_point, segment_span_closest_point};
