// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous scales: linear, log and time.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::ticks::{even_ticks, nice_step, nice_time_step, stepped_ticks};

/// A continuous scale instance.
///
/// Coordinate systems hold one of these per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
    /// Time scale.
    Time(ScaleTime),
}

impl From<ScaleLinear> for ScaleContinuous {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleLog> for ScaleContinuous {
    fn from(value: ScaleLog) -> Self {
        Self::Log(value)
    }
}

impl From<ScaleTime> for ScaleContinuous {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
            Self::Time(s) => s.map(x),
        }
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        match self {
            Self::Linear(s) => s.invert(y),
            Self::Log(s) => s.invert(y),
            Self::Time(s) => s.invert(y),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
        }
    }

    /// Returns the configured domain (as authored).
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain(),
            Self::Log(s) => s.domain(),
            Self::Time(s) => s.domain(),
        }
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Log(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain().0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain().1
    }
}

/// A linear mapping from a continuous domain to a continuous range.
///
/// The domain can be padded by a fraction of its span on both ends, and the normalized
/// position can be clamped to `[0, 1]`. [`ScaleLinear::invert`] is the exact algebraic
/// inverse of [`ScaleLinear::map`] under the same settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
    padding: f64,
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
    /// Whether to clamp mapped values to the range.
    pub clamp: bool,
    /// Domain padding as a fraction of the domain span.
    pub padding: f64,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
            padding: 0.0,
        }
    }

    /// Enables or disables clamping of the normalized position to `[0, 1]`.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Pads the domain on both ends by `padding` times its span.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_finite() {
            padding.max(0.0)
        } else {
            0.0
        };
        self
    }

    /// Returns the configured domain (as authored).
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns whether clamping is enabled.
    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    /// Returns the domain padding fraction.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Returns the domain the mapping actually uses, after padding.
    pub fn padded_domain(&self) -> (f64, f64) {
        let (d0, d1) = self.domain;
        let pad = (d1 - d0) * self.padding;
        (d0 - pad, d1 + pad)
    }

    /// Returns the normalized position of `x` within the padded domain.
    pub fn normalize(&self, x: f64) -> f64 {
        let (d0, d1) = self.padded_domain();
        let denom = d1 - d0;
        if denom == 0.0 {
            return 0.0;
        }
        let t = (x - d0) / denom;
        if self.clamp { t.clamp(0.0, 1.0) } else { t }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        r0 + self.normalize(x) * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    ///
    /// A zero-width range inverts to the start of the (padded) domain.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.padded_domain();
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (y - r0) / denom;
        let t = if self.clamp { t.clamp(0.0, 1.0) } else { t };
        d0 + t * (d1 - d0)
    }

    /// Returns `count` evenly spaced domain values, both endpoints included.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        even_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns “nice” tick values (multiples of 1, 2 or 5 times a power of ten) that cover
    /// the domain.
    pub fn nice_ticks(&self, count: usize) -> Vec<f64> {
        stepped_ticks(self.domain.0, self.domain.1, count, nice_step)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
            clamp: false,
            padding: 0.0,
        }
    }

    /// Enables or disables nice-domain behavior.
    #[must_use]
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Enables or disables clamping.
    #[must_use]
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Sets the domain padding fraction.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = stepped_ticks(self.domain.0, self.domain.1, tick_count, nice_step);
        match (ticks.first(), ticks.last()) {
            (Some(&first), Some(&last)) if ticks.len() >= 2 => {
                if self.domain.0 <= self.domain.1 {
                    (first, last)
                } else {
                    (last, first)
                }
            }
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        self.instantiate_resolved(range, 10)
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
            .with_clamp(self.clamp)
            .with_padding(self.padding)
    }
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a new log scale with base 10.
    ///
    /// Non-positive inputs map to the start of the range.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Sets the log base. Invalid bases fall back to 10.
    #[must_use]
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    /// Returns the log base.
    pub fn base(&self) -> f64 {
        self.base
    }

    fn log_base(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    fn log_domain(&self) -> Option<(f64, f64)> {
        let (d0, d1) = self.domain;
        if d0 <= 0.0 || d1 <= 0.0 {
            return None;
        }
        Some((self.log_base(d0), self.log_base(d1)))
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        let Some((ld0, ld1)) = self.log_domain() else {
            return r0;
        };
        let denom = ld1 - ld0;
        if x <= 0.0 || denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (r0, r1) = self.range;
        let Some((ld0, ld1)) = self.log_domain() else {
            return self.domain.0;
        };
        let denom = r1 - r0;
        if denom == 0.0 {
            return self.domain.0;
        }
        let t = (y - r0) / denom;
        self.base.powf(ld0 + t * (ld1 - ld0))
    }

    /// Returns the powers of `base` that fall within the domain, capped by `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let exponent = |v: f64| {
            let e = v.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let min_e = exponent((self.log_base(min) - 1e-9).ceil());
        let max_e = exponent((self.log_base(max) + 1e-9).floor());
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }

    /// Returns the configured domain (as authored).
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }
}

/// A time scale: a linear scale over numeric timestamps in seconds.
///
/// Its ticks land on second/minute/hour boundaries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a range value back to a timestamp.
    pub fn invert(&self, y: f64) -> f64 {
        self.inner.invert(y)
    }

    /// Returns tick timestamps on clock-friendly steps.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (d0, d1) = self.inner.domain();
        stepped_ticks(d0, d1, count, nice_time_step)
    }

    /// Returns the configured domain (as authored).
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_maps_and_inverts_exactly() {
        let s = ScaleLinear::new((0.0, 100.0), (0.0, 500.0));
        assert_eq!(s.map(50.0), 250.0);
        assert_eq!(s.invert(250.0), 50.0);
        for i in 0..=100 {
            let x = f64::from(i);
            assert!(close(s.invert(s.map(x)), x), "round trip failed for {x}");
        }
    }

    #[test]
    fn linear_clamp_pins_out_of_domain_values() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0)).with_clamp(true);
        assert_eq!(s.map(-5.0), 0.0);
        assert_eq!(s.map(20.0), 100.0);
        assert_eq!(s.invert(150.0), 10.0);
    }

    #[test]
    fn linear_padding_widens_the_domain() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 120.0)).with_padding(0.1);
        assert_eq!(s.padded_domain(), (-1.0, 11.0));
        assert!(close(s.map(-1.0), 0.0));
        assert!(close(s.map(11.0), 120.0));
        assert!(close(s.invert(s.map(4.0)), 4.0));
        assert_eq!(s.domain(), (0.0, 10.0));
    }

    #[test]
    fn linear_zero_width_domain_maps_to_range_start() {
        let s = ScaleLinear::new((5.0, 5.0), (10.0, 20.0));
        assert_eq!(s.map(5.0), 10.0);
        assert_eq!(s.map(100.0), 10.0);
    }

    #[test]
    fn linear_ticks_are_even_and_inclusive() {
        let s = ScaleLinear::new((0.0, 1.0), (0.0, 1.0));
        assert_eq!(s.ticks(3), [0.0, 0.5, 1.0]);
        assert_eq!(s.ticks(1), [0.0]);
        let nice = ScaleLinear::new((0.3, 9.6), (0.0, 1.0)).nice_ticks(5);
        assert_eq!(nice.first().copied(), Some(0.0));
        assert_eq!(nice.last().copied(), Some(10.0));
    }

    #[test]
    fn nice_spec_rounds_domain_outward() {
        let spec = ScaleLinearSpec::new((0.3, 9.6)).with_nice(true);
        assert_eq!(spec.resolved_domain(5), (0.0, 10.0));
        let s = spec.instantiate((0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn log_scale_maps_endpoints_and_inverts() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!(close(s.map(1.0), 0.0));
        assert!(close(s.map(10.0), 5.0));
        assert!(close(s.map(100.0), 10.0));
        assert!(close(s.invert(5.0), 10.0));
        assert_eq!(s.ticks(0), [1.0, 10.0, 100.0]);
    }

    #[test]
    fn time_scale_is_linear_with_clock_ticks() {
        let s = ScaleTime::new((0.0, 3600.0), (0.0, 360.0));
        assert_eq!(s.map(1800.0), 180.0);
        assert_eq!(s.invert(90.0), 900.0);
        let ticks = s.ticks(4);
        assert_eq!(ticks.first().copied(), Some(0.0));
        assert_eq!(ticks.last().copied(), Some(3600.0));
    }

    #[test]
    fn continuous_dispatches_to_inner_scale() {
        let s: ScaleContinuous = ScaleLinear::new((0.0, 2.0), (0.0, 4.0)).into();
        assert_eq!(s.map(1.0), 2.0);
        assert_eq!(s.invert(2.0), 1.0);
        assert_eq!(s.domain_min(), 0.0);
        assert_eq!(s.domain_max(), 2.0);
    }
}
