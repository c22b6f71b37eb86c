// Copyright 2025 the vizspec Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick generation shared by the continuous scales.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// `count` evenly spaced values from `d0` to `d1`, both endpoints included.
pub(crate) fn even_ticks(d0: f64, d1: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => alloc::vec![d0],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        d1
                    } else {
                        d0 + (d1 - d0) * (i as f64 / last)
                    }
                })
                .collect()
        }
    }
}

/// Ticks on multiples of a step chosen by `choose_step` from the raw `span / count` step.
///
/// The first and last ticks round outward, so they cover `[min, max]`.
pub(crate) fn stepped_ticks(
    mut min: f64,
    mut max: f64,
    count: usize,
    choose_step: impl Fn(f64) -> f64,
) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = choose_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

/// Rounds a raw step up to 1, 2, 5 or 10 times a power of ten.
pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let base = 10_f64.powf(step.log10().floor());
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// Rounds a raw step (in seconds) up to a clock-friendly second/minute/hour step.
pub(crate) fn nice_time_step(step: f64) -> f64 {
    const MINUTE: f64 = 60.0;
    const HOUR: f64 = 60.0 * MINUTE;
    const STEPS: &[f64] = &[
        1.0,
        2.0,
        5.0,
        10.0,
        15.0,
        30.0,
        MINUTE,
        2.0 * MINUTE,
        5.0 * MINUTE,
        10.0 * MINUTE,
        15.0 * MINUTE,
        30.0 * MINUTE,
        HOUR,
        2.0 * HOUR,
        3.0 * HOUR,
        6.0 * HOUR,
        12.0 * HOUR,
    ];

    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    STEPS
        .iter()
        .copied()
        .find(|&s| s >= step)
        .unwrap_or_else(|| (step / HOUR).ceil().max(1.0) * HOUR)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn even_ticks_include_both_endpoints() {
        assert_eq!(even_ticks(0.0, 100.0, 5), [0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(even_ticks(3.0, 9.0, 1), [3.0]);
        assert!(even_ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn nice_steps_snap_to_one_two_five() {
        assert_eq!(nice_step(0.9), 1.0);
        assert_eq!(nice_step(18.0), 20.0);
        assert_eq!(nice_step(40.0), 50.0);
    }

    #[test]
    fn time_steps_prefer_minutes_for_minute_spans() {
        let ticks = stepped_ticks(0.0, 300.0, 5, nice_time_step);
        assert!(ticks.len() >= 2, "expected at least two ticks");
        assert!(ticks[1] - ticks[0] >= 60.0, "step should be at least a minute");
    }
}
