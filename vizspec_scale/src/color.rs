// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sequential color scales.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::ScaleError;

/// Maps a numeric domain onto a list of color stops.
///
/// Stops are spread evenly over the domain. With two stops the output is a straight RGB
/// interpolation; with more, the normalized position picks a segment and interpolates inside
/// it. Mapping clamps to the domain by default.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleColor {
    domain: (f64, f64),
    stops: Vec<Color>,
    clamp: bool,
}

impl ScaleColor {
    /// Creates a color scale from at least two stops.
    pub fn new(domain: (f64, f64), stops: Vec<Color>) -> Result<Self, ScaleError> {
        if stops.len() < 2 {
            return Err(ScaleError::TooFewColorStops(stops.len()));
        }
        Ok(Self {
            domain,
            stops,
            clamp: true,
        })
    }

    /// Creates a color scale from CSS color strings (`#rrggbb`, `rgb(..)`, named colors).
    pub fn from_css<S: AsRef<str>>(domain: (f64, f64), stops: &[S]) -> Result<Self, ScaleError> {
        let stops = stops
            .iter()
            .map(|s| parse_css(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(domain, stops)
    }

    /// Enables or disables clamping of the normalized position to `[0, 1]`.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the color stops.
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    fn normalize(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.0;
        }
        let t = (value - d0) / denom;
        if self.clamp { t.clamp(0.0, 1.0) } else { t }
    }

    /// Maps a value to its interpolated color.
    pub fn map(&self, value: f64) -> Color {
        let t = self.normalize(value);
        let segments = self.stops.len() - 1;
        if segments == 1 {
            return lerp(self.stops[0], self.stops[1], t);
        }
        let scaled = t * segments as f64;
        let index = {
            let i = scaled.floor().clamp(0.0, (segments - 1) as f64);
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "clamped to a valid segment index"
            )]
            {
                i as usize
            }
        };
        lerp(
            self.stops[index],
            self.stops[index + 1],
            scaled - index as f64,
        )
    }

    /// Maps a value to a `#rrggbb` string.
    pub fn map_css(&self, value: f64) -> String {
        let c = self.map(value).to_rgba8();
        alloc::format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
    }

    /// Approximate inverse: the domain position of the stop nearest to `color` in RGB.
    ///
    /// Colors between stops snap to a stop, so this is not an exact inverse of
    /// [`ScaleColor::map`].
    pub fn invert(&self, color: Color) -> f64 {
        let [r, g, b, _] = color.components;
        let mut best = (0, f32::INFINITY);
        for (i, stop) in self.stops.iter().enumerate() {
            let [sr, sg, sb, _] = stop.components;
            let d = (sr - r) * (sr - r) + (sg - g) * (sg - g) + (sb - b) * (sb - b);
            if d < best.1 {
                best = (i, d);
            }
        }
        let (d0, d1) = self.domain;
        let position = best.0 as f64 / (self.stops.len() - 1) as f64;
        d0 + position * (d1 - d0)
    }

    /// [`ScaleColor::invert`] for a CSS color string.
    pub fn invert_css(&self, css: &str) -> Result<f64, ScaleError> {
        parse_css(css).map(|c| self.invert(c))
    }
}

fn parse_css(s: &str) -> Result<Color, ScaleError> {
    parse_color(s)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ScaleError::InvalidColor(s.to_string()))
}

fn lerp(a: Color, b: Color, t: f64) -> Color {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "color components are stored as f32"
    )]
    let t = t as f32;
    let mut out = [0.0_f32; 4];
    for (i, c) in out.iter_mut().enumerate() {
        let v = a.components[i] + (b.components[i] - a.components[i]) * t;
        *c = v.clamp(0.0, 1.0);
    }
    Color::new(out)
}
