// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The coordinate system value produced by the built-in coordinate types.

use kurbo::Point;
use vizspec_coord::{Cartesian2D, Cartesian3D, Polar, Spherical};

/// One of the four coordinate system families.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordinateSystem {
    /// 2D Cartesian.
    Cartesian2D(Cartesian2D),
    /// 2D polar.
    Polar(Polar),
    /// 3D Cartesian with a projection.
    Cartesian3D(Cartesian3D),
    /// Spherical with a rotation and a projection.
    Spherical(Spherical),
}

impl CoordinateSystem {
    /// The family name, matching the type name it is registered under.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Cartesian2D(_) => "cartesian2d",
            Self::Polar(_) => "polar",
            Self::Cartesian3D(_) => "cartesian3d",
            Self::Spherical(_) => "spherical",
        }
    }

    /// The origin offset applied after mapping.
    pub fn origin(&self) -> Point {
        match self {
            Self::Cartesian2D(c) => c.origin(),
            Self::Polar(c) => c.origin(),
            Self::Cartesian3D(c) => c.origin(),
            Self::Spherical(c) => c.origin(),
        }
    }

    /// Moves the origin in place; nothing else changes.
    pub fn set_origin(&mut self, origin: Point) {
        match self {
            Self::Cartesian2D(c) => c.set_origin(origin),
            Self::Polar(c) => c.set_origin(origin),
            Self::Cartesian3D(c) => c.set_origin(origin),
            Self::Spherical(c) => c.set_origin(origin),
        }
    }

    /// Layout extent as `(width, height, depth)`; depth is 0 for the 2D families.
    pub fn dimensions(&self) -> (f64, f64, f64) {
        match self {
            Self::Cartesian2D(c) => {
                let size = c.dimensions();
                (size.width, size.height, 0.0)
            }
            Self::Polar(c) => {
                let size = c.dimensions();
                (size.width, size.height, 0.0)
            }
            Self::Cartesian3D(c) => c.dimensions(),
            Self::Spherical(c) => c.dimensions(),
        }
    }

    /// Whether the family maps from three data dimensions.
    pub fn is_3d(&self) -> bool {
        matches!(self, Self::Cartesian3D(_) | Self::Spherical(_))
    }

    /// The 2D Cartesian system, if that is what this is.
    pub fn as_cartesian_2d(&self) -> Option<&Cartesian2D> {
        match self {
            Self::Cartesian2D(c) => Some(c),
            _ => None,
        }
    }

    /// The polar system, if that is what this is.
    pub fn as_polar(&self) -> Option<&Polar> {
        match self {
            Self::Polar(c) => Some(c),
            _ => None,
        }
    }

    /// The 3D Cartesian system, if that is what this is.
    pub fn as_cartesian_3d(&self) -> Option<&Cartesian3D> {
        match self {
            Self::Cartesian3D(c) => Some(c),
            _ => None,
        }
    }

    /// The spherical system, if that is what this is.
    pub fn as_spherical(&self) -> Option<&Spherical> {
        match self {
            Self::Spherical(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Cartesian2D> for CoordinateSystem {
    fn from(c: Cartesian2D) -> Self {
        Self::Cartesian2D(c)
    }
}

impl From<Polar> for CoordinateSystem {
    fn from(c: Polar) -> Self {
        Self::Polar(c)
    }
}

impl From<Cartesian3D> for CoordinateSystem {
    fn from(c: Cartesian3D) -> Self {
        Self::Cartesian3D(c)
    }
}

impl From<Spherical> for CoordinateSystem {
    fn from(c: Spherical) -> Self {
        Self::Spherical(c)
    }
}
