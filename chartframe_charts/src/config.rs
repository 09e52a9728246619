// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.

use chrono::{DateTime, Utc};

use crate::canvas::{Canvas, Margins};
use crate::error::ChartError;

// 2023-01-01T00:00:00Z and 2024-01-01T00:00:00Z.
const DEFAULT_X_START_SECS: i64 = 1_672_531_200;
const DEFAULT_X_END_SECS: i64 = 1_704_067_200;

/// Everything that shapes a rendered chart frame.
///
/// [`ChartConfig::default`] is a 640×400 canvas with margins 20/20/30/40, the calendar year
/// 2023 on the x axis and `0..100` on the y axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChartConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Top margin in pixels.
    pub margin_top: f64,
    /// Right margin in pixels.
    pub margin_right: f64,
    /// Bottom margin in pixels.
    pub margin_bottom: f64,
    /// Left margin in pixels.
    pub margin_left: f64,
    /// Horizontal (time) domain.
    pub x_domain: (DateTime<Utc>, DateTime<Utc>),
    /// Vertical (linear) domain; the first value sits at the bottom.
    pub y_domain: (f64, f64),
    /// Approximate tick count for the bottom axis.
    pub x_tick_count: usize,
    /// Approximate tick count for the left axis.
    pub y_tick_count: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        let margins = Margins::default();
        Self {
            width: 640.0,
            height: 400.0,
            margin_top: margins.top,
            margin_right: margins.right,
            margin_bottom: margins.bottom,
            margin_left: margins.left,
            x_domain: (
                DateTime::from_timestamp_nanos(DEFAULT_X_START_SECS * 1_000_000_000),
                DateTime::from_timestamp_nanos(DEFAULT_X_END_SECS * 1_000_000_000),
            ),
            y_domain: (0.0, 100.0),
            x_tick_count: 10,
            y_tick_count: 10,
        }
    }
}

impl ChartConfig {
    /// Set the canvas size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set all four margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margin_top = margins.top;
        self.margin_right = margins.right;
        self.margin_bottom = margins.bottom;
        self.margin_left = margins.left;
        self
    }

    /// Set the horizontal time domain.
    pub fn with_x_domain(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.x_domain = (start, end);
        self
    }

    /// Set the vertical linear domain.
    pub fn with_y_domain(mut self, min: f64, max: f64) -> Self {
        self.y_domain = (min, max);
        self
    }

    /// Set the approximate tick counts for both axes.
    pub fn with_tick_counts(mut self, x: usize, y: usize) -> Self {
        self.x_tick_count = x;
        self.y_tick_count = y;
        self
    }

    /// Returns the margins as a struct.
    pub fn margins(&self) -> Margins {
        Margins {
            top: self.margin_top,
            right: self.margin_right,
            bottom: self.margin_bottom,
            left: self.margin_left,
        }
    }

    /// Builds the canvas described by this configuration.
    pub fn canvas(&self) -> Result<Canvas, ChartError> {
        Canvas::new(self.width, self.height, self.margins())
    }
}
