// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static chart frames rendered to SVG.
//!
//! This crate turns a small [`ChartConfig`] into SVG markup for a coordinate frame:
//! - **Scales** map dates and numbers into pixel coordinates.
//! - **Ticks** are chosen at round values (linear) or calendar boundaries (time).
//! - **Axes** are built as nested elements in a [`chartframe_dom::DrawTree`].
//!
//! No data series are drawn. Rendering is a pure function of the configuration, so the same
//! configuration always yields byte-identical output.
//!
//! ```
//! let svg = chartframe_charts::render_default()?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), chartframe_charts::ChartError>(())
//! ```

mod axis;
mod canvas;
mod chart;
mod config;
mod error;
mod format;
mod scale;
mod time;

pub use axis::{AxisOrient, AxisSpec, AxisStyle, Paint, Tick, TickFormatter};
pub use canvas::{Canvas, Margins};
pub use chart::{Chart, render, render_default, render_with};
pub use config::ChartConfig;
pub use error::{ChartError, CollaboratorUnavailable, DomainError};
pub use format::format_tick_with_step;
pub use scale::{Scale, ScaleKind, ScaleLinear, ScaleTime, TickValue};
pub use time::{TimeInterval, TimeTicks, TimeUnit, tick_interval, time_ticks};

pub use chartframe_dom;
