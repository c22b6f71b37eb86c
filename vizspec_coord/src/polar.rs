// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polar coordinates and arc (pie/donut slice) paths.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};
use core::fmt::Write as _;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::{BezPath, Circle, Point, Shape, Size, Vec2};
use vizspec_scale::ScaleLinear;

/// A point in normalized polar space: both components run over `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarPoint {
    /// Normalized radius: 0 is the inner radius, 1 the outer radius.
    pub radius: f64,
    /// Normalized angle: 0 is the start angle, 1 the end angle.
    pub angle: f64,
}

impl PolarPoint {
    /// Creates a new polar point.
    pub const fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }
}

/// A polar coordinate system over a ring between two radii and two angles.
///
/// Angles are radians measured from the +x axis toward +y (clockwise on a y-down screen).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Polar {
    size: Size,
    origin: Point,
    radius: ScaleLinear,
    angle: ScaleLinear,
}

impl Polar {
    /// Creates a full-circle pie layout centred in a `width × height` box, with the outer radius
    /// touching the shorter side.
    pub fn new(width: f64, height: f64) -> Self {
        let outer = 0.5 * width.min(height);
        Self {
            size: Size::new(width, height),
            origin: Point::new(0.5 * width, 0.5 * height),
            radius: ScaleLinear::new((0.0, 1.0), (0.0, outer)),
            angle: ScaleLinear::new((0.0, 1.0), (0.0, TAU)),
        }
    }

    /// Returns a copy with different inner and outer radii.
    #[must_use]
    pub fn with_radii(mut self, inner: f64, outer: f64) -> Self {
        self.radius = ScaleLinear::new((0.0, 1.0), (inner.max(0.0), outer.max(0.0)));
        self
    }

    /// Returns a copy with different start and end angles.
    #[must_use]
    pub fn with_angles(mut self, start: f64, end: f64) -> Self {
        self.angle = ScaleLinear::new((0.0, 1.0), (start, end));
        self
    }

    /// Returns a copy with a different origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the centre.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the centre. This is the only in-place configuration change.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Returns the layout box size.
    pub fn dimensions(&self) -> Size {
        self.size
    }

    /// Returns the normalized-radius scale.
    pub fn radius_scale(&self) -> &ScaleLinear {
        &self.radius
    }

    /// Returns the normalized-angle scale.
    pub fn angle_scale(&self) -> &ScaleLinear {
        &self.angle
    }

    /// Returns the inner radius.
    pub fn inner_radius(&self) -> f64 {
        self.radius.range().0
    }

    /// Returns the outer radius.
    pub fn outer_radius(&self) -> f64 {
        self.radius.range().1
    }

    /// Returns the start angle.
    pub fn start_angle(&self) -> f64 {
        self.angle.range().0
    }

    /// Returns the end angle.
    pub fn end_angle(&self) -> f64 {
        self.angle.range().1
    }

    /// Maps a normalized polar point to drawing coordinates.
    pub fn to_cartesian(&self, p: PolarPoint) -> Point {
        let r = self.radius.map(p.radius);
        let a = self.angle.map(p.angle);
        self.origin + Vec2::new(r * a.cos(), r * a.sin())
    }

    /// Same as [`Polar::to_cartesian`].
    pub fn to_screen(&self, p: PolarPoint) -> Point {
        self.to_cartesian(p)
    }

    /// Maps drawing coordinates back to a normalized polar point.
    ///
    /// The raw angle is wrapped into `[start, start + 2π)` before normalizing, so a sweep
    /// shorter than a full turn yields values above 1 for points outside it.
    pub fn from_screen(&self, p: Point) -> PolarPoint {
        let d = p - self.origin;
        let r = d.x.hypot(d.y);
        let start = self.start_angle();
        let raw = d.y.atan2(d.x) - start;
        let wrapped = start + raw - TAU * (raw / TAU).floor();
        PolarPoint::new(self.radius.invert(r), self.angle.invert(wrapped))
    }

    /// Returns `(normalized, radians)` pairs for `count` evenly spaced angle ticks.
    pub fn angle_ticks(&self, count: usize) -> Vec<(f64, f64)> {
        self.angle
            .ticks(count)
            .into_iter()
            .map(|t| (t, self.angle.map(t)))
            .collect()
    }

    /// Returns an SVG path for the slice between angles `a0..a1` and radii
    /// `inner..outer` (drawing units and radians, relative to the origin).
    ///
    /// The outer arc runs from `a0` to `a1`. With `inner > 0` the path returns along the inner
    /// arc (a donut slice); otherwise it closes straight through the centre (a pie slice).
    /// Sweeps of a full turn or more are drawn as two half arcs, since a single SVG arc cannot
    /// start and end at the same point.
    pub fn arc_path(&self, a0: f64, a1: f64, inner: f64, outer: f64) -> String {
        let full = (a1 - a0).abs() >= TAU;
        let a1 = match (full, a1 >= a0) {
            (true, true) => a0 + TAU,
            (true, false) => a0 - TAU,
            (false, _) => a1,
        };
        let sweep = u8::from(a1 >= a0);

        let mut d = String::new();
        let start = self.polar_offset(outer, a0);
        let _ = write!(d, "M{},{}", start.x, start.y);
        self.push_arc(&mut d, outer, a0, a1, sweep, full);
        if inner > 0.0 {
            let inner_end = self.polar_offset(inner, a1);
            let _ = write!(d, "L{},{}", inner_end.x, inner_end.y);
            self.push_arc(&mut d, inner, a1, a0, 1 - sweep, full);
        } else {
            let _ = write!(d, "L{},{}", self.origin.x, self.origin.y);
        }
        d.push('Z');
        d
    }

    /// Returns the same slice as [`Polar::arc_path`] as a `BezPath`, approximating arcs with
    /// curves within `tolerance`.
    pub fn arc_bez_path(
        &self,
        a0: f64,
        a1: f64,
        inner: f64,
        outer: f64,
        tolerance: f64,
    ) -> BezPath {
        Circle::new(self.origin, outer)
            .segment(inner.max(0.0), a0, a1 - a0)
            .to_path(tolerance)
    }

    /// Appends arc commands from angle `from` to `to` at radius `r`.
    fn push_arc(&self, d: &mut String, r: f64, from: f64, to: f64, sweep: u8, full: bool) {
        if full {
            let mid = self.polar_offset(r, 0.5 * (from + to));
            let end = self.polar_offset(r, to);
            let _ = write!(d, "A{r},{r},0,0,{sweep},{},{}", mid.x, mid.y);
            let _ = write!(d, "A{r},{r},0,0,{sweep},{},{}", end.x, end.y);
        } else {
            let large_arc = u8::from((to - from).abs() > PI);
            let end = self.polar_offset(r, to);
            let _ = write!(d, "A{r},{r},0,{large_arc},{sweep},{},{}", end.x, end.y);
        }
    }

    fn polar_offset(&self, r: f64, a: f64) -> Point {
        self.origin + Vec2::new(r * a.cos(), r * a.sin())
    }
}
