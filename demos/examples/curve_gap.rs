// Copyright 2025 the Nearline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closest-point query between two polygons built from kurbo points.
//!
//! Run with: `cargo run -p nearline_demos --example curve_gap`

use kurbo::Point;
use nearline_curve::AbsoluteTolerance;
use nearline_precise::line_line_closest_point;
use nearline_search::polygon_polygon_closest_point;

fn regular_polygon(center: Point, radius: f64, sides: usize) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let theta = core::f64::consts::TAU * (i as f64) / (sides as f64);
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}

fn main() {
    let cmp = AbsoluteTolerance::default();

    let a = regular_polygon(Point::new(0.0, 0.0), 5.0, 12);
    let b = regular_polygon(Point::new(20.0, 3.0), 4.0, 9);

    let hit = polygon_polygon_closest_point::<2, _, _>(&a, &b, &cmp)
        .expect("both polygons have enough vertices");

    println!(
        "closest pair: segment {} of A at s = {:.4} and segment {} of B at t = {:.4}",
        hit.seg_a, hit.s, hit.seg_b, hit.t
    );
    println!(
        "witnesses: ({:.4}, {:.4}) and ({:.4}, {:.4}), distance {:.6}",
        hit.c1[0],
        hit.c1[1],
        hit.c2[0],
        hit.c2[1],
        hit.dist()
    );

    // The narrow phase is usable on its own for single segment pairs.
    let l1 = kurbo::Line::new((0.0, 0.0), (10.0, 0.0));
    let l2 = kurbo::Line::new((4.0, 6.0), (14.0, 16.0));
    let pair = line_line_closest_point(l1, l2, &cmp);
    println!(
        "single pair: s = {:.2}, t = {:.2}, distance {:.4}",
        pair.s,
        pair.t,
        pair.dist()
    );
}
