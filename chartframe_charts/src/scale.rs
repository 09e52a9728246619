// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! A scale maps a domain interval onto a pixel range. Both kinds here interpolate linearly,
//! extrapolate outside the domain, and may be decreasing (a vertical scale usually is).

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::time::{self, TimeTicks};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = core::f64::consts::SQRT_2;

/// Upper bound on the number of tick intervals generated for one axis.
pub(crate) const MAX_TICKS: usize = 10_000;

/// Which family a [`Scale`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Real-valued domain.
    Linear,
    /// Calendar-instant domain.
    Time,
}

/// A domain value produced by tick generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickValue {
    /// A value on a linear scale.
    Number(f64),
    /// A value on a time scale.
    Instant(DateTime<Utc>),
}

/// Either scale kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Time scale.
    Time(ScaleTime),
}

impl From<ScaleLinear> for Scale {
    fn from(value: ScaleLinear) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleTime> for Scale {
    fn from(value: ScaleTime) -> Self {
        Self::Time(value)
    }
}

impl Scale {
    /// Returns the scale family.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
        }
    }

    /// Returns the output range as authored.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range(),
            Self::Time(s) => s.range(),
        }
    }

    /// Maps a tick value into range space.
    ///
    /// Returns `None` if the value kind does not match the scale kind.
    pub fn map_value(&self, value: &TickValue) -> Option<f64> {
        match (self, value) {
            (Self::Linear(s), TickValue::Number(v)) => Some(s.map(*v)),
            (Self::Time(s), TickValue::Instant(t)) => Some(s.map(*t)),
            _ => None,
        }
    }

    /// Returns tick values inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<TickValue> {
        match self {
            Self::Linear(s) => s.ticks(count).into_iter().map(TickValue::Number).collect(),
            Self::Time(s) => s
                .ticks(count)
                .values
                .into_iter()
                .map(TickValue::Instant)
                .collect(),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    ///
    /// Fails if either interval has equal or non-finite endpoints.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Result<Self, DomainError> {
        check_range(range)?;
        let (d0, d1) = domain;
        if !d0.is_finite() || !d1.is_finite() || !(d1 - d0).is_finite() {
            return Err(DomainError::NonFinite("domain"));
        }
        if d0 == d1 {
            return Err(DomainError::DegenerateDomain(format!("{d0}")));
        }
        tracing::debug!(?domain, ?range, "built linear scale");
        Ok(Self { domain, range })
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (x - d0) / (d1 - d0);
        r0 + t * (r1 - r0)
    }

    /// Maps a range value back into domain space.
    pub fn invert(&self, y: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = (y - r0) / (r1 - r0);
        d0 + t * (d1 - d0)
    }

    /// Returns the domain as authored.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the range as authored.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns round tick values inside the domain, ascending.
    ///
    /// `count` is a hint; the result has roughly that many values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }

    /// Returns the (positive) spacing between [`ScaleLinear::ticks`] for `count`.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.0, self.domain.1, count)
    }

    /// Returns a copy whose domain is extended outward to round tick boundaries.
    pub fn nice(&self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        let mut prestep = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count);
            if step == 0.0 || prestep == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            }
            prestep = Some(step);
        }
        let domain = if reversed { (stop, start) } else { (start, stop) };
        Self {
            domain,
            range: self.range,
        }
    }
}

/// A linear mapping from an interval of UTC instants to a continuous range.
///
/// Instants are interpolated by elapsed microseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    domain: (DateTime<Utc>, DateTime<Utc>),
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    ///
    /// Fails if the instants are equal or the range is degenerate.
    pub fn new(
        domain: (DateTime<Utc>, DateTime<Utc>),
        range: (f64, f64),
    ) -> Result<Self, DomainError> {
        if domain.0 == domain.1 {
            return Err(DomainError::DegenerateDomain(domain.0.to_rfc3339()));
        }
        let inner = ScaleLinear::new((micros(domain.0), micros(domain.1)), range)?;
        Ok(Self { domain, inner })
    }

    /// Maps an instant into range space.
    pub fn map(&self, t: DateTime<Utc>) -> f64 {
        self.inner.map(micros(t))
    }

    /// Maps a range value back to an instant, if representable.
    pub fn invert(&self, y: f64) -> Option<DateTime<Utc>> {
        let us = self.inner.invert(y).round();
        if !us.is_finite() || us < i64::MIN as f64 || us > i64::MAX as f64 {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, reason = "checked against the i64 range")]
        DateTime::from_timestamp_micros(us as i64)
    }

    /// Returns the domain as authored.
    pub fn domain(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        self.domain
    }

    /// Returns the range as authored.
    pub fn range(&self) -> (f64, f64) {
        self.inner.range()
    }

    /// Returns calendar-aligned tick instants inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> TimeTicks {
        time::time_ticks(self.domain.0, self.domain.1, count)
    }
}

fn micros(t: DateTime<Utc>) -> f64 {
    t.timestamp_micros() as f64
}

fn check_range(range: (f64, f64)) -> Result<(), DomainError> {
    let (r0, r1) = range;
    if !r0.is_finite() || !r1.is_finite() || !(r1 - r0).is_finite() {
        return Err(DomainError::NonFinite("range"));
    }
    if r0 == r1 {
        return Err(DomainError::DegenerateRange(r0));
    }
    Ok(())
}

/// Returns `(first index, last index, increment)` for round ticks in `[start, stop]`.
///
/// A negative increment `-k` means ticks are `i / k`, which keeps decimal steps exact.
fn tick_spec(start: f64, stop: f64, count: usize) -> Option<(f64, f64, f64)> {
    let step = (stop - start) / count.max(1) as f64;
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    if power < 0.0 {
        let inc = 10_f64.powf(-power) / factor;
        let mut i1 = (start * inc).round();
        let mut i2 = (stop * inc).round();
        if i1 / inc < start {
            i1 += 1.0;
        }
        if i2 / inc > stop {
            i2 -= 1.0;
        }
        finite_spec(i1, i2, -inc)
    } else {
        let inc = 10_f64.powf(power) * factor;
        let mut i1 = (start / inc).round();
        let mut i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
        finite_spec(i1, i2, inc)
    }
}

// Subnormal or huge spans overflow the increment.
fn finite_spec(i1: f64, i2: f64, inc: f64) -> Option<(f64, f64, f64)> {
    (i1.is_finite() && i2.is_finite() && inc.is_finite() && inc != 0.0).then_some((i1, i2, inc))
}

pub(crate) fn linear_ticks(d0: f64, d1: f64, count: usize) -> Vec<f64> {
    if count == 0 || !d0.is_finite() || !d1.is_finite() {
        return Vec::new();
    }
    let (start, stop) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    if start == stop {
        return vec![start];
    }
    let Some((i1, i2, inc)) = tick_spec(start, stop, count) else {
        return Vec::new();
    };
    if i2 < i1 {
        return Vec::new();
    }
    if i2 - i1 > MAX_TICKS as f64 {
        tracing::warn!(
            count,
            cap = MAX_TICKS,
            "tick count exceeds the cap; ticks cover only the start of the domain"
        );
    }
    let n = {
        let n_f = (i2 - i1).min(MAX_TICKS as f64);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "non-negative and capped at 10k"
        )]
        {
            n_f as u64
        }
    };
    (0..=n)
        .map(|k| {
            let i = i1 + k as f64;
            if inc < 0.0 { i / -inc } else { i * inc }
        })
        .collect()
}

/// Signed increment as returned by [`tick_spec`]; `0.0` if no step exists.
pub(crate) fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count).map_or(0.0, |(_, _, inc)| inc)
}

/// Positive tick spacing for `[d0, d1]` in either order; `0.0` if no step exists.
pub(crate) fn tick_step(d0: f64, d1: f64, count: usize) -> f64 {
    let (start, stop) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    let inc = tick_increment(start, stop, count);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}
