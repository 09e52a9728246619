// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation and formatting helpers.
//!
//! Ticks are calendar-aligned UTC instants:
//! - fixed-length units (milliseconds through days) align to multiples of the step since the
//!   Unix epoch,
//! - weeks start on Sunday,
//! - months and years align to the first of the month / January 1st whose index is a multiple
//!   of the step.
//!
//! Interval selection follows the usual charting heuristic: pick the candidate whose nominal
//! duration is closest (by ratio) to `span / count`.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::scale::{MAX_TICKS, tick_step};

const MS_SECOND: i64 = 1_000;
const MS_MINUTE: i64 = 60 * MS_SECOND;
const MS_HOUR: i64 = 60 * MS_MINUTE;
const MS_DAY: i64 = 24 * MS_HOUR;
const MS_WEEK: i64 = 7 * MS_DAY;
const MS_MONTH: i64 = 30 * MS_DAY;
const MS_YEAR: i64 = 365 * MS_DAY;

// 1970-01-01 was a Thursday; the first Sunday is three days later.
const FIRST_SUNDAY_MS: i64 = 3 * MS_DAY;

/// A calendar unit for time ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeUnit {
    /// Milliseconds.
    Millisecond,
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days.
    Day,
    /// Weeks starting on Sunday.
    Week,
    /// Calendar months.
    Month,
    /// Calendar years.
    Year,
}

impl TimeUnit {
    /// Nominal length in milliseconds (months are 30 days, years 365).
    pub fn nominal_millis(self) -> i64 {
        match self {
            Self::Millisecond => 1,
            Self::Second => MS_SECOND,
            Self::Minute => MS_MINUTE,
            Self::Hour => MS_HOUR,
            Self::Day => MS_DAY,
            Self::Week => MS_WEEK,
            Self::Month => MS_MONTH,
            Self::Year => MS_YEAR,
        }
    }
}

/// Every `step` units of `unit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    /// The calendar unit.
    pub unit: TimeUnit,
    /// How many units between ticks (at least 1).
    pub step: u32,
}

impl TimeInterval {
    /// Creates an interval; a zero step is treated as one.
    pub const fn new(unit: TimeUnit, step: u32) -> Self {
        Self {
            unit,
            step: if step == 0 { 1 } else { step },
        }
    }

    /// Nominal length in milliseconds.
    pub fn nominal_millis(&self) -> i64 {
        self.unit.nominal_millis() * i64::from(self.step)
    }

    /// Returns the latest aligned instant at or before `t`.
    pub fn floor(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let step = i64::from(self.step);
        match self.unit {
            TimeUnit::Millisecond
            | TimeUnit::Second
            | TimeUnit::Minute
            | TimeUnit::Hour
            | TimeUnit::Day => {
                let len = self.nominal_millis();
                let ms = t.timestamp_millis();
                DateTime::from_timestamp_millis(ms.div_euclid(len) * len)
            }
            TimeUnit::Week => {
                let len = self.nominal_millis();
                let ms = t.timestamp_millis() - FIRST_SUNDAY_MS;
                DateTime::from_timestamp_millis(ms.div_euclid(len) * len + FIRST_SUNDAY_MS)
            }
            TimeUnit::Month => {
                let months = month_index(t);
                month_start(months - months.rem_euclid(step))
            }
            TimeUnit::Year => {
                let year = i64::from(t.year());
                year_start(year - year.rem_euclid(step))
            }
        }
    }

    /// Returns the earliest aligned instant at or after `t`.
    pub fn ceil(&self, t: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let floored = self.floor(t)?;
        if floored == t {
            Some(t)
        } else {
            self.offset(floored, 1)
        }
    }

    /// Moves an aligned instant forward by `n` intervals.
    pub fn offset(&self, t: DateTime<Utc>, n: i64) -> Option<DateTime<Utc>> {
        let steps = n.checked_mul(i64::from(self.step))?;
        match self.unit {
            TimeUnit::Month => month_start(month_index(t).checked_add(steps)?),
            TimeUnit::Year => year_start(i64::from(t.year()).checked_add(steps)?),
            _ => {
                let delta = steps.checked_mul(self.unit.nominal_millis())?;
                DateTime::from_timestamp_millis(t.timestamp_millis().checked_add(delta)?)
            }
        }
    }

    /// Returns every aligned instant in `[start, end]`, ascending.
    ///
    /// At most `MAX_TICKS + 1` (10 001) instants are returned, matching linear ticks.
    pub fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
        let mut out = Vec::new();
        let Some(mut t) = self.ceil(start) else {
            return out;
        };
        while t <= end {
            if out.len() > MAX_TICKS {
                tracing::warn!(
                    interval = ?self,
                    cap = MAX_TICKS,
                    "time tick cap reached; ticks cover only the start of the domain"
                );
                break;
            }
            out.push(t);
            match self.offset(t, 1) {
                Some(next) => t = next,
                None => break,
            }
        }
        out
    }

    /// Formats an instant with the precision this interval resolves.
    pub fn format(&self, t: DateTime<Utc>) -> String {
        let pattern = match self.unit {
            TimeUnit::Year => "%Y",
            TimeUnit::Month => "%Y-%m",
            TimeUnit::Week | TimeUnit::Day => "%Y-%m-%d",
            TimeUnit::Hour | TimeUnit::Minute => "%Y-%m-%dT%H:%M",
            TimeUnit::Second => "%Y-%m-%dT%H:%M:%S",
            TimeUnit::Millisecond => "%Y-%m-%dT%H:%M:%S%.3f",
        };
        t.format(pattern).to_string()
    }
}

/// Candidate intervals, ordered by nominal duration.
const TICK_INTERVALS: &[TimeInterval] = &[
    TimeInterval::new(TimeUnit::Second, 1),
    TimeInterval::new(TimeUnit::Second, 5),
    TimeInterval::new(TimeUnit::Second, 15),
    TimeInterval::new(TimeUnit::Second, 30),
    TimeInterval::new(TimeUnit::Minute, 1),
    TimeInterval::new(TimeUnit::Minute, 5),
    TimeInterval::new(TimeUnit::Minute, 15),
    TimeInterval::new(TimeUnit::Minute, 30),
    TimeInterval::new(TimeUnit::Hour, 1),
    TimeInterval::new(TimeUnit::Hour, 3),
    TimeInterval::new(TimeUnit::Hour, 6),
    TimeInterval::new(TimeUnit::Hour, 12),
    TimeInterval::new(TimeUnit::Day, 1),
    TimeInterval::new(TimeUnit::Day, 2),
    TimeInterval::new(TimeUnit::Week, 1),
    TimeInterval::new(TimeUnit::Month, 1),
    TimeInterval::new(TimeUnit::Month, 3),
    TimeInterval::new(TimeUnit::Year, 1),
];

/// Tick instants together with the interval that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeTicks {
    /// The chosen interval; also decides label precision.
    pub interval: TimeInterval,
    /// Aligned instants inside the domain, ascending.
    pub values: Vec<DateTime<Utc>>,
}

/// Chooses the tick interval for roughly `count` ticks between two epoch-millisecond instants.
///
/// Spans too short for whole seconds get millisecond multiples; spans too long for a single
/// year get year multiples.
pub fn tick_interval(start_ms: f64, end_ms: f64, count: usize) -> TimeInterval {
    let target = (end_ms - start_ms).abs() / count.max(1) as f64;
    let i = TICK_INTERVALS
        .iter()
        .position(|iv| iv.nominal_millis() as f64 > target)
        .unwrap_or(TICK_INTERVALS.len());

    if i == TICK_INTERVALS.len() {
        let year = MS_YEAR as f64;
        let step = tick_step(start_ms / year, end_ms / year, count);
        return TimeInterval::new(TimeUnit::Year, step_to_u32(step));
    }
    if i == 0 {
        let step = tick_step(start_ms, end_ms, count);
        return TimeInterval::new(TimeUnit::Millisecond, step_to_u32(step));
    }
    let lo = TICK_INTERVALS[i - 1];
    let hi = TICK_INTERVALS[i];
    if target / (lo.nominal_millis() as f64) < (hi.nominal_millis() as f64) / target {
        lo
    } else {
        hi
    }
}

/// Returns calendar-aligned ticks in `[min(a, b), max(a, b)]`.
pub fn time_ticks(a: DateTime<Utc>, b: DateTime<Utc>, count: usize) -> TimeTicks {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    let interval = tick_interval(
        start.timestamp_millis() as f64,
        end.timestamp_millis() as f64,
        count,
    );
    let values = if count == 0 {
        Vec::new()
    } else {
        interval.range(start, end)
    };
    tracing::trace!(?interval, ticks = values.len(), "chose time tick interval");
    TimeTicks { interval, values }
}

fn step_to_u32(step: f64) -> u32 {
    let step = step.round().clamp(1.0, f64::from(u32::MAX));
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the u32 range")]
    {
        step as u32
    }
}

fn month_index(t: DateTime<Utc>) -> i64 {
    i64::from(t.year()) * 12 + i64::from(t.month0())
}

fn month_start(index: i64) -> Option<DateTime<Utc>> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}

fn year_start(year: i64) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(i32::try_from(year).ok()?, 1, 1, 0, 0, 0)
        .single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("valid date")
    }

    #[test]
    fn one_year_span_uses_monthly_ticks() {
        let ticks = time_ticks(utc(2023, 1, 1, 0, 0), utc(2024, 1, 1, 0, 0), 10);
        assert_eq!(ticks.interval, TimeInterval::new(TimeUnit::Month, 1));
        assert_eq!(ticks.values.len(), 13);
        assert_eq!(ticks.values[0], utc(2023, 1, 1, 0, 0));
        assert_eq!(ticks.values[12], utc(2024, 1, 1, 0, 0));
        assert_eq!(ticks.interval.format(ticks.values[1]), "2023-02");
    }

    #[test]
    fn hour_multiples_align_to_midnight() {
        let iv = TimeInterval::new(TimeUnit::Hour, 6);
        assert_eq!(
            iv.floor(utc(2023, 5, 4, 13, 20)),
            Some(utc(2023, 5, 4, 12, 0))
        );
        assert_eq!(iv.ceil(utc(2023, 5, 4, 13, 20)), Some(utc(2023, 5, 4, 18, 0)));
        assert_eq!(iv.ceil(utc(2023, 5, 4, 12, 0)), Some(utc(2023, 5, 4, 12, 0)));
    }

    #[test]
    fn weeks_start_on_sunday() {
        let iv = TimeInterval::new(TimeUnit::Week, 1);
        // 2023-05-04 is a Thursday.
        let sunday = iv.floor(utc(2023, 5, 4, 9, 0)).expect("in range");
        assert_eq!(sunday, utc(2023, 4, 30, 0, 0));
        assert_eq!(sunday.weekday(), chrono::Weekday::Sun);
    }

    #[test]
    fn quarter_months_align_to_quarters() {
        let iv = TimeInterval::new(TimeUnit::Month, 3);
        assert_eq!(iv.floor(utc(2023, 5, 17, 0, 0)), Some(utc(2023, 4, 1, 0, 0)));
        assert_eq!(
            iv.offset(utc(2023, 10, 1, 0, 0), 1),
            Some(utc(2024, 1, 1, 0, 0))
        );
    }

    #[test]
    fn long_spans_use_year_multiples() {
        let ticks = time_ticks(utc(1900, 1, 1, 0, 0), utc(2000, 1, 1, 0, 0), 10);
        assert_eq!(ticks.interval, TimeInterval::new(TimeUnit::Year, 10));
        assert_eq!(ticks.interval.format(ticks.values[0]), "1900");
        assert_eq!(ticks.values.len(), 11);
    }

    #[test]
    fn sub_second_spans_use_milliseconds() {
        let a = DateTime::from_timestamp_millis(1_000).expect("in range");
        let b = DateTime::from_timestamp_millis(1_500).expect("in range");
        let ticks = time_ticks(a, b, 5);
        assert_eq!(ticks.interval, TimeInterval::new(TimeUnit::Millisecond, 100));
        assert_eq!(ticks.values.len(), 6);
        assert_eq!(ticks.interval.format(ticks.values[1]), "1970-01-01T00:00:01.100");
    }

    #[test]
    fn reversed_domain_ticks_are_ascending() {
        let ticks = time_ticks(utc(2023, 1, 2, 0, 0), utc(2023, 1, 1, 0, 0), 4);
        assert_eq!(ticks.interval, TimeInterval::new(TimeUnit::Hour, 6));
        assert!(ticks.values.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ticks.interval.format(ticks.values[1]), "2023-01-01T06:00");
    }

    #[test]
    fn dense_ranges_are_capped() {
        let a = DateTime::from_timestamp_millis(0).expect("in range");
        let b = DateTime::from_timestamp_millis(60_000).expect("in range");
        let values = TimeInterval::new(TimeUnit::Millisecond, 1).range(a, b);
        assert_eq!(values.len(), MAX_TICKS + 1);
        assert_eq!(values.last().copied(), DateTime::from_timestamp_millis(10_000));
    }

    #[test]
    fn zero_count_yields_no_ticks() {
        let ticks = time_ticks(utc(2023, 1, 1, 0, 0), utc(2024, 1, 1, 0, 0), 0);
        assert!(ticks.values.is_empty());
    }
}
