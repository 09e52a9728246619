// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Numeric tick label formatting.

/// Formats `v` with just enough decimals to distinguish ticks spaced `step` apart.
///
/// Trailing zeros are trimmed and negative zero prints as `0`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let decimals = if step.is_finite() && step > 0.0 {
        let d = (-step.log10().floor()).clamp(0.0, 15.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to 0..=15")]
        {
            d as usize
        }
    } else {
        6
    };
    let s = format!("{v:.decimals$}");
    let s = trim_trailing_zeros(&s);
    if s == "-0" { String::from("0") } else { s }
}

fn trim_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
