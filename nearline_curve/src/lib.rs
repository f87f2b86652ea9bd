// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearline Curve: shared geometry plumbing for closest-point queries.
//!
//! This crate holds the pieces that the narrow-phase solver
//! (`nearline_precise`) and the broad-phase search (`nearline_search`) both
//! build on:
//!
//! - [`PointAccess`] and [`CurveAccess`] — index-based accessor traits that
//!   let the engines consume any caller-owned point/sequence storage without
//!   copying it. Implementations are provided for `[f64; D]` arrays, for
//!   [`kurbo::Point`] (D = 2), and for the [`Polyline`]/[`Polygon`] borrow
//!   wrappers.
//! - [`VertexSpan`] — a contiguous, inclusive span of chain vertex indices,
//!   the unit of subdivision for the branch-and-bound search.
//! - [`Aabb`] — a D-dimensional axis-aligned bounding box with the squared
//!   gap lower bound used for pruning.
//! - [`ToleranceCompare`] — the injected comparison policy that all
//!   narrow-phase branch decisions route through.
//! - [`CurveError`] — typed input-validation errors surfaced at the API
//!   boundary, before any computation begins.
//!
//! Coordinates are `f64` throughout, matching [`kurbo`]; dimensionality is a
//! const parameter `D`, with 2 and 3 supported by the query engines.
//!
//! ### Float semantics
//!
//! This crate assumes no NaN coordinates. Comparison behavior near a
//! policy's tolerance is policy-defined, not fixed by the engines.

#![no_std]

extern crate alloc;

mod bounds;
mod curve;
mod error;
mod point;
mod policy;
mod span;

pub use bounds::Aabb;
pub use curve::{CurveAccess, Polygon, Polyline, ensure_dimension};
pub use error::CurveError;
pub use point::{PointAccess, add, dot, lerp, mag_sqrd, scale, sub};
pub use policy::{AbsoluteTolerance, ExactCompare, ToleranceCompare};
pub use span::VertexSpan;
