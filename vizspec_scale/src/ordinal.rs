// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordinal scales: categories to arbitrary output values.

extern crate alloc;

use alloc::vec::Vec;

use crate::ScaleError;

/// Maps each domain entry to the range entry at the same index.
///
/// When the domain is longer than the range the range cycles (`index % range.len()`).
/// Values outside the domain map to the `unknown` value, which defaults to the first range
/// entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal<K, V> {
    domain: Vec<K>,
    range: Vec<V>,
    unknown: Option<V>,
}

impl<K: PartialEq, V> ScaleOrdinal<K, V> {
    /// Creates a new ordinal scale. The range must not be empty.
    pub fn new(domain: Vec<K>, range: Vec<V>) -> Result<Self, ScaleError> {
        if range.is_empty() {
            return Err(ScaleError::EmptyRange);
        }
        Ok(Self {
            domain,
            range,
            unknown: None,
        })
    }

    /// Sets the value returned for inputs outside the domain.
    #[must_use]
    pub fn with_unknown(mut self, unknown: V) -> Self {
        self.unknown = Some(unknown);
        self
    }

    /// Returns the domain.
    pub fn domain(&self) -> &[K] {
        &self.domain
    }

    /// Returns the range.
    pub fn range(&self) -> &[V] {
        &self.range
    }

    /// Returns the value used for inputs outside the domain.
    pub fn unknown(&self) -> &V {
        self.unknown.as_ref().unwrap_or(&self.range[0])
    }

    /// Maps a domain value to its output.
    pub fn map(&self, value: &K) -> &V {
        match self.domain.iter().position(|d| d == value) {
            Some(index) => &self.range[index % self.range.len()],
            None => self.unknown(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn ordinal_cycles_through_a_shorter_range() {
        let s = ScaleOrdinal::new(
            vec!["A", "B", "C", "D", "E"],
            vec!["red", "green", "blue"],
        )
        .unwrap();
        assert_eq!(*s.map(&"A"), "red");
        assert_eq!(*s.map(&"C"), "blue");
        assert_eq!(*s.map(&"D"), "red");
        assert_eq!(*s.map(&"E"), "green");
    }

    #[test]
    fn unknown_defaults_to_first_range_value() {
        let s = ScaleOrdinal::new(vec![1, 2], vec!["one", "two"]).unwrap();
        assert_eq!(*s.map(&9), "one");
        let s = s.with_unknown("none");
        assert_eq!(*s.map(&9), "none");
        assert_eq!(*s.map(&2), "two");
    }

    #[test]
    fn empty_range_is_rejected() {
        let err = ScaleOrdinal::<u8, u8>::new(vec![1], vec![]).unwrap_err();
        assert_eq!(err, ScaleError::EmptyRange);
    }
}
