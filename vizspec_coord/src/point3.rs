// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 3D points and rotations.

use core::ops::{Add, Sub};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A point (or vector) in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
    /// The z coordinate.
    pub z: f64,
}

impl Point3 {
    /// The point `(0, 0, 0)`.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new point.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the origin.
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// A 3×3 rotation matrix, stored row-major.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    m: [[f64; 3]; 3],
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotation {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Wraps a row-major matrix. The caller is responsible for it being orthonormal.
    pub const fn from_matrix(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Rotation about x by `rx`, then y by `ry`, then z by `rz` (radians).
    pub fn from_euler(rx: f64, ry: f64, rz: f64) -> Self {
        let (sx, cx) = (rx.sin(), rx.cos());
        let (sy, cy) = (ry.sin(), ry.cos());
        let (sz, cz) = (rz.sin(), rz.cos());
        let x = Self::from_matrix([[1.0, 0.0, 0.0], [0.0, cx, -sx], [0.0, sx, cx]]);
        let y = Self::from_matrix([[cy, 0.0, sy], [0.0, 1.0, 0.0], [-sy, 0.0, cy]]);
        let z = Self::from_matrix([[cz, -sz, 0.0], [sz, cz, 0.0], [0.0, 0.0, 1.0]]);
        x.then(y).then(z)
    }

    /// Returns the matrix rows.
    pub fn matrix(&self) -> [[f64; 3]; 3] {
        self.m
    }

    /// Rotates `p`.
    pub fn apply(&self, p: Point3) -> Point3 {
        let m = &self.m;
        Point3::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z,
            m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z,
            m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z,
        )
    }

    /// The transpose, which is the inverse for a rotation.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_matrix([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// The rotation that applies `self` first and `next` second.
    #[must_use]
    pub fn then(&self, next: Self) -> Self {
        let a = &next.m;
        let b = &self.m;
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Self::from_matrix(out)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use approx::assert_abs_diff_eq;
    use core::f64::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let r = Rotation::from_euler(0.0, 0.0, FRAC_PI_2);
        let p = r.apply(Point3::new(1.0, 0.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn transpose_undoes_the_rotation() {
        let r = Rotation::from_euler(0.3, -1.1, 2.0);
        let p = Point3::new(1.5, -2.0, 0.25);
        let back = r.transpose().apply(r.apply(p));
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-12);
        assert_abs_diff_eq!(back.z, p.z, epsilon = 1e-12);
        assert_abs_diff_eq!(r.apply(p).length(), p.length(), epsilon = 1e-12);
    }

    #[test]
    fn then_composes_in_application_order() {
        let a = Rotation::from_euler(FRAC_PI_2, 0.0, 0.0);
        let b = Rotation::from_euler(0.0, 0.0, FRAC_PI_2);
        let p = Point3::new(0.0, 1.0, 0.0);
        let composed = a.then(b).apply(p);
        let stepwise = b.apply(a.apply(p));
        assert_abs_diff_eq!(composed.x, stepwise.x, epsilon = 1e-12);
        assert_abs_diff_eq!(composed.y, stepwise.y, epsilon = 1e-12);
        assert_abs_diff_eq!(composed.z, stepwise.z, epsilon = 1e-12);
    }
}
