// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

pub use chartframe_dom::CollaboratorUnavailable;

/// A scale was built over an interval it cannot map.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Both domain endpoints are equal.
    #[error("degenerate domain: both endpoints are {0}")]
    DegenerateDomain(String),
    /// Both range endpoints are equal.
    #[error("degenerate range: both endpoints are {0}")]
    DegenerateRange(f64),
    /// An endpoint is NaN or infinite.
    #[error("non-finite {0} endpoint")]
    NonFinite(&'static str),
}

/// Everything that can make chart rendering fail.
///
/// Rendering never returns partial output: any of these aborts the whole call.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// A scale could not be constructed.
    #[error(transparent)]
    Domain(#[from] DomainError),
    /// The drawable-tree backend could not be created.
    #[error(transparent)]
    CollaboratorUnavailable(#[from] CollaboratorUnavailable),
    /// The margins leave no drawable area.
    #[error("canvas {width}x{height} has no drawable area inside its margins")]
    InvalidCanvas {
        /// Canvas width in pixels.
        width: f64,
        /// Canvas height in pixels.
        height: f64,
    },
}
