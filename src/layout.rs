// License: MIT
// Copyright © 2026 The router-topology Authors

//! Circular placement of routers on the diagram canvas.
//!
//! Router `i` of `n` is placed at angle `2π·i/n` on a circle centered on the
//! canvas.  The layout depends only on the router order, so adding or
//! removing a router moves every other router too.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::CanvasConfig;

/// A point on the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Positions of routers on the canvas, keyed by router name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    positions: HashMap<String, Point>,
}

impl Layout {
    /// Returns the position of the given router, if it was laid out.
    pub fn position(&self, router: &str) -> Option<Point> {
        self.positions.get(router).copied()
    }

    /// Returns the number of positioned routers.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no routers were laid out.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lays out the given routers evenly around a circle on the canvas.
pub fn circular_layout<I, S>(routers: I, canvas: &CanvasConfig) -> Layout
where
    I: IntoIterator<Item = S>,
    I::IntoIter: ExactSizeIterator,
    S: AsRef<str>,
{
    let routers = routers.into_iter();
    let count = routers.len();
    let (cx, cy) = canvas.center();
    let radius = canvas.layout_radius();

    let positions = routers
        .enumerate()
        .map(|(i, router)| {
            let angle = 2.0 * PI * i as f64 / count as f64;
            let point = Point {
                x: cx + radius * angle.cos(),
                y: cy + radius * angle.sin(),
            };
            (router.as_ref().to_string(), point)
        })
        .collect();

    Layout { positions }
}
