// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3D Cartesian coordinates projected onto the drawing plane.

use kurbo::{Point, Vec2};
use vizspec_scale::ScaleContinuous;

use crate::{Point3, Projection};

/// A 3D Cartesian coordinate system.
///
/// Data points go through the per-axis scales into *space* (relative to the origin), then
/// through the [`Projection`] onto the plane, then get offset by the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian3D {
    width: f64,
    height: f64,
    depth: f64,
    x: ScaleContinuous,
    y: ScaleContinuous,
    z: ScaleContinuous,
    projection: Projection,
    origin: Point,
}

impl Cartesian3D {
    /// Creates a coordinate system with an orthographic projection and a zero origin.
    pub fn new(
        width: f64,
        height: f64,
        depth: f64,
        x: impl Into<ScaleContinuous>,
        y: impl Into<ScaleContinuous>,
        z: impl Into<ScaleContinuous>,
    ) -> Self {
        Self {
            width,
            height,
            depth,
            x: x.into(),
            y: y.into(),
            z: z.into(),
            projection: Projection::Orthographic,
            origin: Point::ZERO,
        }
    }

    /// Returns a copy with a different projection.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Returns a copy with a different origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the projection.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Returns the origin offset.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the origin.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Returns `(width, height, depth)`.
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (self.width, self.height, self.depth)
    }

    /// Returns the x axis scale.
    pub fn x_scale(&self) -> &ScaleContinuous {
        &self.x
    }

    /// Returns the y axis scale.
    pub fn y_scale(&self) -> &ScaleContinuous {
        &self.y
    }

    /// Returns the z axis scale.
    pub fn z_scale(&self) -> &ScaleContinuous {
        &self.z
    }

    /// Maps a data point into space by applying the axis scales.
    pub fn to_space(&self, p: Point3) -> Point3 {
        Point3::new(self.x.map(p.x), self.y.map(p.y), self.z.map(p.z))
    }

    /// Maps a space point back to data.
    pub fn from_space(&self, p: Point3) -> Point3 {
        Point3::new(self.x.invert(p.x), self.y.invert(p.y), self.z.invert(p.z))
    }

    /// Projects a space point onto the drawing plane, relative to the origin.
    pub fn project(&self, p: Point3) -> Point {
        self.projection.project(p)
    }

    /// Recovers the space point that projects to `p` (relative to the origin), given its depth
    /// in space units.
    pub fn unproject(&self, p: Point, z: f64) -> Point3 {
        self.projection.unproject(p, z)
    }

    /// Maps a data point to drawing coordinates.
    pub fn to_screen(&self, p: Point3) -> Point {
        self.project(self.to_space(p)) + self.origin.to_vec2()
    }

    /// Same as [`Cartesian3D::to_screen`].
    pub fn to_container_coords(&self, p: Point3) -> Point {
        self.to_screen(p)
    }

    /// Maps drawing coordinates back to a data point, given its depth in data units.
    pub fn from_container_coords(&self, p: Point, z: f64) -> Point3 {
        self.from_space(self.unproject(p - self.origin.to_vec2(), self.z.map(z)))
    }

    /// Returns the projected start and end of each axis, in drawing coordinates.
    ///
    /// Each axis runs across its own domain while the other two sit at their domain minimum.
    pub fn axis_endpoints(&self) -> [(Point, Point); 3] {
        let lo = Point3::new(
            self.x.domain_min(),
            self.y.domain_min(),
            self.z.domain_min(),
        );
        let x_end = Point3::new(self.x.domain_max(), lo.y, lo.z);
        let y_end = Point3::new(lo.x, self.y.domain_max(), lo.z);
        let z_end = Point3::new(lo.x, lo.y, self.z.domain_max());
        let start = self.to_screen(lo);
        [
            (start, self.to_screen(x_end)),
            (start, self.to_screen(y_end)),
            (start, self.to_screen(z_end)),
        ]
    }

    /// Translates by `delta` in drawing units, returning a new system.
    #[must_use]
    pub fn translated(&self, delta: Vec2) -> Self {
        self.with_origin(self.origin + delta)
    }
}
