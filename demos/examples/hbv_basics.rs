// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HBV basics.
//!
//! Build a hierarchy over a handful of rectangles, query it, move the rectangles, and query again.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example hbv_basics`

use kurbo::{Point, Rect, Vec2};
use understory_hbv::Hbv;

fn main() {
    env_logger::init();

    // Five unit squares on a diagonal.
    let rects: Vec<Rect> = (0..5_i32)
        .map(|i| {
            let o = f64::from(i) * 2.0;
            Rect::new(o, o, o + 1.0, o + 1.0)
        })
        .collect();
    let mut hbv: Hbv = Hbv::from_rects(rects.clone());
    println!(
        "built: {} nodes, height {}, stats {:?}",
        hbv.node_count(),
        hbv.height(),
        hbv.build_stats()
    );

    let mut hits = Vec::new();
    hbv.find_leaf_intersections(Rect::new(0.0, 0.0, 9.0, 9.0), |i| hits.push(i));
    println!("full extent hits: {:?}", hits);

    let mut inside = Vec::new();
    hbv.find_indices_containing(Point::new(4.5, 4.5), |i| inside.push(i));
    println!("containing (4.5, 4.5): {:?}", inside);
    assert_eq!(inside, [2]);

    // Same count: the tree is refreshed in place.
    let root = hbv.root();
    let moved: Vec<Rect> = rects.iter().map(|r| *r + Vec2::new(0.5, 0.0)).collect();
    hbv.update(moved);
    assert!(hbv.is_alive(root), "refresh keeps node handles");

    let mut inside = Vec::new();
    hbv.find_indices_containing(Point::new(4.5, 4.5), |i| inside.push(i));
    println!("containing (4.5, 4.5) after move: {:?}", inside);
    assert!(inside.is_empty(), "the point now sits on the left edge of rect 2");

    // One more rectangle: the tree is rebuilt.
    let mut more = hbv.rects().to_vec();
    more.push(Rect::new(20.0, 20.0, 21.0, 21.0));
    hbv.update(more);
    println!("rebuilt: root handle alive = {}", hbv.is_alive(root));
}
