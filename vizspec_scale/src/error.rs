// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// Errors returned when a scale cannot be built from its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleError {
    /// The scale needs at least one domain entry.
    EmptyDomain,
    /// The scale needs at least one range entry.
    EmptyRange,
    /// A color scale needs at least two stops; carries the number supplied.
    TooFewColorStops(usize),
    /// A color stop could not be parsed as a CSS color.
    InvalidColor(String),
    /// A log scale domain must be strictly positive.
    NonPositiveLogDomain,
}

impl fmt::Display for ScaleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDomain => f.write_str("scale domain is empty"),
            Self::EmptyRange => f.write_str("scale range is empty"),
            Self::TooFewColorStops(n) => {
                write!(f, "color scale needs at least 2 stops, got {n}")
            }
            Self::InvalidColor(s) => write!(f, "invalid color stop `{s}`"),
            Self::NonPositiveLogDomain => f.write_str("log scale domain must be positive"),
        }
    }
}

impl core::error::Error for ScaleError {}
