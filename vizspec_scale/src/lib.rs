// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales for declarative visualization specs.
//!
//! A scale maps a value from a *domain* (data space) into a *range* (drawing space):
//! - **Continuous** scales ([`ScaleLinear`], [`ScaleLog`], [`ScaleTime`]) map numbers to numbers
//!   and can be inverted exactly.
//! - **Discrete** scales ([`ScaleBand`], [`ScaleOrdinal`]) map categories to positions or to
//!   arbitrary output values.
//! - [`ScaleColor`] maps numbers onto an interpolated list of color stops.
//!
//! Scales are immutable once built: `domain()` and `range()` echo the constructor inputs, and
//! every configuration change goes through a `with_*` method that returns a new value.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod band;
mod color;
mod continuous;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod ordinal;
mod ticks;

pub use band::{ScaleBand, ScaleBandSpec};
pub use color::ScaleColor;
pub use continuous::{ScaleContinuous, ScaleLinear, ScaleLinearSpec, ScaleLog, ScaleTime};
pub use error::ScaleError;
pub use ordinal::ScaleOrdinal;
