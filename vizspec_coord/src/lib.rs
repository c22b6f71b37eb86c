// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate systems for vizspec.
//!
//! A coordinate system composes one scale per axis with an origin (and, in 3D, a projection)
//! to convert data coordinates into drawing coordinates and back:
//! - [`Cartesian2D`]: `x`/`y` scales plus an origin offset.
//! - [`Polar`]: normalized radius/angle mapped onto a ring, plus SVG arc path generation.
//! - [`Cartesian3D`]: `x`/`y`/`z` scales and a [`Projection`] onto the drawing plane.
//! - [`Spherical`]: radius/polar/azimuth scales, a [`Rotation`], and a [`Projection`].
//!
//! The origin is the only field that can be changed in place (`set_origin`). Every other
//! configuration change goes through a consuming `with_*` method that yields a new instance.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod cartesian;
mod cartesian_3d;
#[cfg(not(feature = "std"))]
mod float;
mod point3;
mod polar;
mod projection;
mod spherical;

pub use cartesian::{Cartesian2D, Cartesian2DSpec};
pub use cartesian_3d::Cartesian3D;
pub use point3::{Point3, Rotation};
pub use polar::{Polar, PolarPoint};
pub use projection::Projection;
pub use spherical::{Spherical, SphericalPoint};
