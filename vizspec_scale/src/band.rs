// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Band scales for categorical axes.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A discrete band scale: `n` categories laid out with uniform spacing over a range.
///
/// Padding is expressed in step units. With `step = width / (n - inner + 2 * outer)`,
/// category `i` starts at `range.0 + outer * step + i * step` and every band is
/// `step * (1 - inner)` wide.
///
/// A reversed range (`range.1 < range.0`) lays the categories out in reverse order: the first
/// category sits at the high end. Bands always extend upward from their position, so
/// `step` and `bandwidth` stay non-negative.
///
/// Paddings are clamped to `[0, 1]`; non-finite paddings become 0.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBand<K> {
    domain: Vec<K>,
    range: (f64, f64),
    padding_inner: f64,
    padding_outer: f64,
}

/// Specification for a band scale (domain + padding, no range yet).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleBandSpec<K> {
    /// Categories, in layout order.
    pub domain: Vec<K>,
    /// Inner padding in step units.
    pub padding_inner: f64,
    /// Outer padding in step units.
    pub padding_outer: f64,
}

fn sanitize_padding(p: f64) -> f64 {
    if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 }
}

impl<K: PartialEq> ScaleBand<K> {
    /// Default inner and outer padding.
    pub const DEFAULT_PADDING: f64 = 0.1;

    /// Creates a new band scale covering `domain` over `range`.
    pub fn new(domain: Vec<K>, range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            padding_inner: Self::DEFAULT_PADDING,
            padding_outer: Self::DEFAULT_PADDING,
        }
    }

    /// Sets both inner and outer padding, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_padding_inner(padding).with_padding_outer(padding)
    }

    /// Sets the padding between bands, in step units, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = sanitize_padding(padding);
        self
    }

    /// Sets the padding before the first and after the last band, in step units, clamped to
    /// `[0, 1]`.
    #[must_use]
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = sanitize_padding(padding);
        self
    }

    /// Returns the categories.
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the inner padding.
    pub fn padding_inner(&self) -> f64 {
        self.padding_inner
    }

    /// Returns the outer padding.
    pub fn padding_outer(&self) -> f64 {
        self.padding_outer
    }

    /// Returns the number of bands.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Returns `true` if the domain has no categories.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// Returns the position of `category` in the domain.
    pub fn index_of(&self, category: &K) -> Option<usize> {
        self.domain.iter().position(|c| c == category)
    }

    fn start(&self) -> f64 {
        self.range.0.min(self.range.1)
    }

    /// Layout slot of `index`, counted from the low end of the range.
    fn slot(&self, index: usize) -> usize {
        if self.range.1 < self.range.0 {
            self.domain.len().saturating_sub(index + 1)
        } else {
            index
        }
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        let n = self.domain.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        let denom = n - self.padding_inner + 2.0 * self.padding_outer;
        if denom <= 0.0 {
            0.0
        } else {
            (self.range.1 - self.range.0).abs() / denom
        }
    }

    /// Returns the width of a single band.
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_inner)
    }

    /// Returns the start position of the band at `index`.
    pub fn position(&self, index: usize) -> f64 {
        let step = self.step();
        self.start() + self.padding_outer * step + self.slot(index) as f64 * step
    }

    /// Returns the start position of `category`'s band, or `NaN` if it is not in the domain.
    pub fn map(&self, category: &K) -> f64 {
        self.index_of(category)
            .map_or(f64::NAN, |index| self.position(index))
    }

    /// Returns the category whose step cell contains `position`.
    pub fn invert(&self, position: f64) -> Option<&K> {
        let step = self.step();
        if step <= 0.0 || !position.is_finite() {
            return None;
        }
        let offset = (position - self.start() - self.padding_outer * step) / step;
        if offset < 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "offset is finite and non-negative"
        )]
        let slot = offset.floor() as usize;
        if slot >= self.domain.len() {
            return None;
        }
        self.domain.get(self.slot(slot))
    }

    /// Returns the tick values for a band axis: the domain itself.
    pub fn ticks(&self) -> &[K] {
        &self.domain
    }
}

impl<K: PartialEq> ScaleBandSpec<K> {
    /// Creates a new band scale spec with default padding.
    pub fn new(domain: Vec<K>) -> Self {
        Self {
            domain,
            padding_inner: ScaleBand::<K>::DEFAULT_PADDING,
            padding_outer: ScaleBand::<K>::DEFAULT_PADDING,
        }
    }

    /// Sets inner and outer padding in step units (clamped to `[0, 1]` on instantiation).
    #[must_use]
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner;
        self.padding_outer = outer;
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand<K>
    where
        K: Clone,
    {
        ScaleBand::new(self.domain.clone(), range)
            .with_padding_inner(self.padding_inner)
            .with_padding_outer(self.padding_outer)
    }
}
