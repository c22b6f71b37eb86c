// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D Cartesian coordinates.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};
use vizspec_scale::{ScaleContinuous, ScaleLinearSpec};

/// A 2D Cartesian coordinate system: one continuous scale per axis plus an origin offset.
///
/// `to_screen(p) = (x.map(p.x), y.map(p.y)) + origin` and [`Cartesian2D::from_screen`] is its
/// inverse. Whether y grows upward is decided by the y scale's range, not by this type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian2D {
    size: Size,
    x: ScaleContinuous,
    y: ScaleContinuous,
    origin: Point,
}

/// Specification for a [`Cartesian2D`]: plot size, axis domains and options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian2DSpec {
    /// Plot width in drawing units.
    pub width: f64,
    /// Plot height in drawing units.
    pub height: f64,
    /// Horizontal axis scale spec.
    pub x: ScaleLinearSpec,
    /// Vertical axis scale spec.
    pub y: ScaleLinearSpec,
    /// Offset added to every mapped point.
    pub origin: Point,
    /// Build the y range as `(height, 0)` so larger values sit higher on screen.
    pub flip_y: bool,
}

impl Cartesian2DSpec {
    /// Creates a spec with the given size and domains, a zero origin and a flipped y axis.
    pub fn new(width: f64, height: f64, x_domain: (f64, f64), y_domain: (f64, f64)) -> Self {
        Self {
            width,
            height,
            x: ScaleLinearSpec::new(x_domain),
            y: ScaleLinearSpec::new(y_domain),
            origin: Point::ZERO,
            flip_y: true,
        }
    }

    /// Sets whether the y range is inverted.
    #[must_use]
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Sets the origin offset.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Instantiates the coordinate system.
    pub fn instantiate(&self) -> Cartesian2D {
        let y_range = if self.flip_y {
            (self.height, 0.0)
        } else {
            (0.0, self.height)
        };
        Cartesian2D::new(
            Size::new(self.width, self.height),
            self.x.instantiate((0.0, self.width)),
            self.y.instantiate(y_range),
        )
        .with_origin(self.origin)
    }
}

impl Cartesian2D {
    /// Creates a coordinate system from explicit axis scales, with a zero origin.
    pub fn new(size: Size, x: impl Into<ScaleContinuous>, y: impl Into<ScaleContinuous>) -> Self {
        Self {
            size,
            x: x.into(),
            y: y.into(),
            origin: Point::ZERO,
        }
    }

    /// Returns a copy with a different origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Maps a data point to drawing coordinates.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(self.x.map(p.x), self.y.map(p.y)) + self.origin.to_vec2()
    }

    /// Maps drawing coordinates back to a data point.
    pub fn from_screen(&self, p: Point) -> Point {
        let local = p - self.origin.to_vec2();
        Point::new(self.x.invert(local.x), self.y.invert(local.y))
    }

    /// Returns the origin offset.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the origin. This is the only in-place configuration change.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Returns the plot size.
    pub fn dimensions(&self) -> Size {
        self.size
    }

    /// Returns the x axis scale.
    pub fn x_scale(&self) -> &ScaleContinuous {
        &self.x
    }

    /// Returns the y axis scale.
    pub fn y_scale(&self) -> &ScaleContinuous {
        &self.y
    }

    /// Whether the y range runs from bottom to top.
    pub fn is_y_flipped(&self) -> bool {
        let (r0, r1) = self.y.range();
        r0 > r1
    }

    /// Returns `(value, screen x)` pairs for x axis ticks.
    pub fn x_ticks(&self, count: usize) -> Vec<(f64, f64)> {
        let dx = self.origin.x;
        self.x
            .ticks(count)
            .into_iter()
            .map(|v| (v, self.x.map(v) + dx))
            .collect()
    }

    /// Returns `(value, screen y)` pairs for y axis ticks.
    pub fn y_ticks(&self, count: usize) -> Vec<(f64, f64)> {
        let dy = self.origin.y;
        self.y
            .ticks(count)
            .into_iter()
            .map(|v| (v, self.y.map(v) + dy))
            .collect()
    }

    /// Returns the drawing-space rectangle covered by the axis domains.
    pub fn data_bounds(&self) -> Rect {
        let (x0, x1) = self.x.domain();
        let (y0, y1) = self.y.domain();
        Rect::from_points(
            self.to_screen(Point::new(x0, y0)),
            self.to_screen(Point::new(x1, y1)),
        )
    }

    /// Translates by `delta` in drawing units, returning a new system.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        self.with_origin(self.origin + delta)
    }
}
