// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed-size drawing surface and its margins.

use kurbo::{Rect, Vec2};

use crate::error::ChartError;

/// Space reserved around the plot area for axes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margins {
    /// Top margin in pixels.
    pub top: f64,
    /// Right margin in pixels.
    pub right: f64,
    /// Bottom margin in pixels.
    pub bottom: f64,
    /// Left margin in pixels.
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 20.0,
            bottom: 30.0,
            left: 40.0,
        }
    }
}

/// A canvas of fixed pixel size with a non-empty plot area inside its margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    margins: Margins,
}

impl Canvas {
    /// Creates a canvas, checking that the margins leave a drawable area.
    pub fn new(width: f64, height: f64, margins: Margins) -> Result<Self, ChartError> {
        let finite = [
            width,
            height,
            margins.top,
            margins.right,
            margins.bottom,
            margins.left,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite
            || width <= margins.left + margins.right
            || height <= margins.top + margins.bottom
        {
            return Err(ChartError::InvalidCanvas { width, height });
        }
        Ok(Self {
            width,
            height,
            margins,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Margins around the plot area.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// The plot area inside the margins.
    pub fn plot_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.width - self.margins.right,
            self.height - self.margins.bottom,
        )
    }

    /// Horizontal pixel range, left to right.
    pub fn x_range(&self) -> (f64, f64) {
        let plot = self.plot_rect();
        (plot.x0, plot.x1)
    }

    /// Vertical pixel range, bottom to top (values grow upward).
    pub fn y_range(&self) -> (f64, f64) {
        let plot = self.plot_rect();
        (plot.y1, plot.y0)
    }

    /// Where a bottom axis group is translated to.
    pub fn bottom_axis_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.height - self.margins.bottom)
    }

    /// Where a left axis group is translated to.
    pub fn left_axis_offset(&self) -> Vec2 {
        Vec2::new(self.margins.left, 0.0)
    }
}
