// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projections from 3D space onto the drawing plane.

use kurbo::Point;

use crate::Point3;

/// How a 3D point is flattened onto the 2D drawing plane.
///
/// Space points are relative to the coordinate system origin; the viewer looks along `+z`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Projection {
    /// Drops `z`.
    #[default]
    Orthographic,
    /// Scales `x` and `y` by `distance / (distance + z)`.
    ///
    /// Points at or behind the eye plane (`z <= -distance`) have no meaningful projection and
    /// produce non-finite coordinates.
    Perspective {
        /// Distance from the eye to the `z = 0` plane.
        distance: f64,
    },
    /// `x' = x - z`, `y' = y + x / 2 + z / 2`.
    Isometric,
}

impl Projection {
    /// Default eye distance for [`Projection::perspective`].
    pub const DEFAULT_DISTANCE: f64 = 1000.0;

    /// A perspective projection; non-positive or non-finite distances fall back to
    /// [`Projection::DEFAULT_DISTANCE`].
    pub fn perspective(distance: f64) -> Self {
        let distance = if distance.is_finite() && distance > 0.0 {
            distance
        } else {
            Self::DEFAULT_DISTANCE
        };
        Self::Perspective { distance }
    }

    /// The projection's name, as used in property bags.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Orthographic => "orthographic",
            Self::Perspective { .. } => "perspective",
            Self::Isometric => "isometric",
        }
    }

    /// Projects a space point onto the drawing plane.
    pub fn project(&self, p: Point3) -> Point {
        match *self {
            Self::Orthographic => Point::new(p.x, p.y),
            Self::Perspective { distance } => {
                let f = distance / (distance + p.z);
                Point::new(p.x * f, p.y * f)
            }
            Self::Isometric => Point::new(p.x - p.z, p.y + p.x / 2.0 + p.z / 2.0),
        }
    }

    /// Recovers the space point that projects to `p`, given its depth `z`.
    ///
    /// A projection loses depth, so `z` has to come from the caller.
    pub fn unproject(&self, p: Point, z: f64) -> Point3 {
        match *self {
            Self::Orthographic => Point3::new(p.x, p.y, z),
            Self::Perspective { distance } => {
                let f = (distance + z) / distance;
                Point3::new(p.x * f, p.y * f, z)
            }
            Self::Isometric => {
                let x = p.x + z;
                Point3::new(x, p.y - x / 2.0 - z / 2.0, z)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn orthographic_drops_depth() {
        let p = Projection::Orthographic.project(Point3::new(3.0, 4.0, 99.0));
        assert_eq!(p, Point::new(3.0, 4.0));
    }

    #[test]
    fn perspective_shrinks_distant_points() {
        let proj = Projection::perspective(100.0);
        assert_eq!(proj.project(Point3::new(10.0, 20.0, 100.0)), Point::new(5.0, 10.0));
        assert_eq!(proj.project(Point3::new(10.0, 20.0, 0.0)), Point::new(10.0, 20.0));
        assert_eq!(Projection::perspective(-5.0), Projection::perspective(1000.0));
    }

    #[test]
    fn isometric_follows_its_formula() {
        let p = Projection::Isometric.project(Point3::new(4.0, 1.0, 2.0));
        assert_eq!(p, Point::new(2.0, 4.0));
    }

    #[test]
    fn unproject_inverts_project_at_known_depth() {
        for proj in [
            Projection::Orthographic,
            Projection::perspective(250.0),
            Projection::Isometric,
        ] {
            let p = Point3::new(12.0, -7.5, 30.0);
            let back = proj.unproject(proj.project(p), p.z);
            assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
            assert_eq!(back.z, p.z, "{} keeps the supplied depth", proj.name());
        }
    }
}
