// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spherical coordinates with rotation and projection.

extern crate alloc;

use alloc::vec::Vec;
use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use kurbo::Point;
use vizspec_scale::ScaleContinuous;

use crate::{Point3, Projection, Rotation};

/// A point in spherical data coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphericalPoint {
    /// Radius, in radius-scale domain units.
    pub radius: f64,
    /// Polar angle θ (from +z), in polar-scale domain units.
    pub polar: f64,
    /// Azimuth φ (from +x toward +y), in azimuth-scale domain units.
    pub azimuth: f64,
}

impl SphericalPoint {
    /// Creates a new spherical point.
    pub const fn new(radius: f64, polar: f64, azimuth: f64) -> Self {
        Self {
            radius,
            polar,
            azimuth,
        }
    }
}

/// A spherical coordinate system.
///
/// The radius scale maps to drawing units; the polar and azimuth scales map to radians.
/// Points are converted to Cartesian space, rotated, projected, and offset by the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    radius: ScaleContinuous,
    polar: ScaleContinuous,
    azimuth: ScaleContinuous,
    rotation: Rotation,
    projection: Projection,
    origin: Point,
}

impl Spherical {
    /// Creates a coordinate system with no rotation, an orthographic projection and a zero
    /// origin.
    pub fn new(
        radius: impl Into<ScaleContinuous>,
        polar: impl Into<ScaleContinuous>,
        azimuth: impl Into<ScaleContinuous>,
    ) -> Self {
        Self {
            radius: radius.into(),
            polar: polar.into(),
            azimuth: azimuth.into(),
            rotation: Rotation::IDENTITY,
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

    /// Returns a copy with a different rotation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns a copy with a different origin.
    #[must_use]
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Returns the origin (the projected sphere centre).
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Moves the origin.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Returns the sphere's bounding diameter as `(width, height, depth)`.
    pub fn dimensions(&self) -> (f64, f64, f64) {
        let d = 2.0 * self.sphere_radius();
        (d, d, d)
    }

    /// Returns the projection.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Returns the rotation.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Returns the radius scale.
    pub fn radius_scale(&self) -> &ScaleContinuous {
        &self.radius
    }

    /// Returns the polar angle scale.
    pub fn polar_scale(&self) -> &ScaleContinuous {
        &self.polar
    }

    /// Returns the azimuth scale.
    pub fn azimuth_scale(&self) -> &ScaleContinuous {
        &self.azimuth
    }

    /// The largest radius the radius scale can produce.
    pub fn sphere_radius(&self) -> f64 {
        let (r0, r1) = self.radius.range();
        r0.abs().max(r1.abs())
    }

    /// Converts a data point to rotated Cartesian space, relative to the sphere centre.
    pub fn to_cartesian(&self, p: SphericalPoint) -> Point3 {
        self.view_point(
            self.radius.map(p.radius),
            self.polar.map(p.polar),
            self.azimuth.map(p.azimuth),
        )
    }

    /// Projects a data point onto the drawing plane, relative to the origin.
    pub fn project(&self, p: SphericalPoint) -> Point {
        self.projection.project(self.to_cartesian(p))
    }

    /// Maps a data point to drawing coordinates.
    pub fn to_screen(&self, p: SphericalPoint) -> Point {
        self.project(p) + self.origin.to_vec2()
    }

    /// Approximately maps drawing coordinates back to a data point.
    ///
    /// Projection discards depth, so this guesses it:
    /// - orthographic and isometric assume the point lies at `z = 0` in view space, which is
    ///   exact only on the silhouette plane;
    /// - perspective assumes the point lies on the near side of the sphere of radius
    ///   [`Spherical::sphere_radius`]; pixels outside the sphere's outline snap to the point of
    ///   closest approach along the view ray.
    ///
    /// The resulting view-space point is un-rotated and converted back through the scales. The
    /// azimuth is wrapped into the full turn starting at the low end of the azimuth range.
    pub fn from_screen(&self, p: Point) -> SphericalPoint {
        let local = p - self.origin.to_vec2();
        let z = match self.projection {
            Projection::Perspective { distance } => {
                let big_r = self.sphere_radius();
                let k = (local.x * local.x + local.y * local.y) / (distance * distance);
                let disc = big_r * big_r * (k + 1.0) - k * distance * distance;
                if disc >= 0.0 {
                    (-k * distance - disc.sqrt()) / (k + 1.0)
                } else {
                    -k * distance / (k + 1.0)
                }
            }
            Projection::Orthographic | Projection::Isometric => 0.0,
        };
        let v = self.rotation.transpose().apply(self.projection.unproject(local, z));
        let r = v.length();
        let (theta, phi) = if r > 0.0 {
            ((v.z / r).clamp(-1.0, 1.0).acos(), self.wrap_azimuth(v.y.atan2(v.x)))
        } else {
            (0.0, 0.0)
        };
        SphericalPoint::new(
            self.radius.invert(r),
            self.polar.invert(theta),
            self.azimuth.invert(phi),
        )
    }

    /// Wraps an angle into the full turn starting at the low end of the azimuth range.
    fn wrap_azimuth(&self, phi: f64) -> f64 {
        let (a0, a1) = self.azimuth.range();
        let start = a0.min(a1);
        let raw = phi - start;
        start + raw - TAU * (raw / TAU).floor()
    }

    /// Returns projected polylines (in drawing coordinates) for `parallels` lines of constant
    /// polar angle and `meridians` lines of constant azimuth on the outer sphere, each sampled
    /// with `segments` steps.
    pub fn graticule(
        &self,
        parallels: usize,
        meridians: usize,
        segments: usize,
    ) -> Vec<Vec<Point>> {
        let r = self.sphere_radius();
        let segments = segments.max(1);
        let mut lines = Vec::with_capacity(parallels + meridians);
        for i in 1..=parallels {
            let theta = PI * step(i, parallels + 1);
            lines.push(
                (0..=segments)
                    .map(|s| self.screen_of(self.view_point(r, theta, TAU * step(s, segments))))
                    .collect(),
            );
        }
        for j in 0..meridians {
            let phi = TAU * step(j, meridians);
            lines.push(
                (0..=segments)
                    .map(|s| self.screen_of(self.view_point(r, PI * step(s, segments), phi)))
                    .collect(),
            );
        }
        lines
    }

    fn view_point(&self, r: f64, theta: f64, phi: f64) -> Point3 {
        let (st, ct) = (theta.sin(), theta.cos());
        let (sp, cp) = (phi.sin(), phi.cos());
        self.rotation.apply(Point3::new(r * st * cp, r * st * sp, r * ct))
    }

    fn screen_of(&self, v: Point3) -> Point {
        self.projection.project(v) + self.origin.to_vec2()
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "graticule indices are small counts"
)]
fn step(i: usize, n: usize) -> f64 {
    i as f64 / n as f64
}
