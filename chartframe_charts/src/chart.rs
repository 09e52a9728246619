// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The chart frame: an SVG root with a bottom time axis and a left value axis.

use chartframe_dom::{DrawTree, DrawTreeProvider, NodeId, SvgDocumentProvider};

use crate::axis::{AxisSpec, AxisStyle};
use crate::canvas::Canvas;
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::scale::{ScaleLinear, ScaleTime};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// A validated chart frame, ready to render any number of times.
#[derive(Clone, Debug)]
pub struct Chart {
    canvas: Canvas,
    x_scale: ScaleTime,
    y_scale: ScaleLinear,
    x_axis: AxisSpec,
    y_axis: AxisSpec,
}

impl Chart {
    /// Builds the canvas, both scales and both axes described by `config`.
    ///
    /// The time scale spans the plot horizontally; the linear scale spans it vertically with
    /// its first domain value at the bottom.
    pub fn new(config: &ChartConfig) -> Result<Self, ChartError> {
        let canvas = config.canvas()?;
        let x_scale = ScaleTime::new(config.x_domain, canvas.x_range())?;
        let y_scale = ScaleLinear::new(config.y_domain, canvas.y_range())?;
        let x_axis = AxisSpec::bottom(x_scale).with_tick_count(config.x_tick_count);
        let y_axis = AxisSpec::left(y_scale).with_tick_count(config.y_tick_count);
        Ok(Self {
            canvas,
            x_scale,
            y_scale,
            x_axis,
            y_axis,
        })
    }

    /// Restyle both axes.
    pub fn with_axis_style(mut self, style: AxisStyle) -> Self {
        self.x_axis.style = style.clone();
        self.y_axis.style = style;
        self
    }

    /// The canvas this chart draws on.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The horizontal time scale.
    pub fn x_scale(&self) -> &ScaleTime {
        &self.x_scale
    }

    /// The vertical linear scale.
    pub fn y_scale(&self) -> &ScaleLinear {
        &self.y_scale
    }

    /// The bottom axis.
    pub fn x_axis(&self) -> &AxisSpec {
        &self.x_axis
    }

    /// The left axis.
    pub fn y_axis(&self) -> &AxisSpec {
        &self.y_axis
    }

    /// Builds the `<svg>` root and both axes in `tree`, returning the root.
    ///
    /// The root is created detached; callers decide where (or whether) to attach it.
    pub fn render_into(&self, tree: &mut dyn DrawTree) -> NodeId {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let svg = tree.create_element("svg");
        tree.set_attribute(svg, "xmlns", SVG_NS);
        tree.set_attribute(svg, "width", &format!("{w}"));
        tree.set_attribute(svg, "height", &format!("{h}"));
        tree.set_attribute(svg, "viewBox", &format!("0 0 {w} {h}"));

        self.x_axis.render(tree, svg, self.canvas.bottom_axis_offset());
        self.y_axis.render(tree, svg, self.canvas.left_axis_offset());
        svg
    }

    /// Renders into a fresh tree obtained from `provider` and serializes it.
    pub fn render_with<P: DrawTreeProvider>(&self, provider: &P) -> Result<String, ChartError> {
        let mut tree = provider.create()?;
        let root = self.render_into(&mut tree);
        let out = tree.serialize(root);
        tracing::debug!(
            width = self.canvas.width(),
            height = self.canvas.height(),
            bytes = out.len(),
            "rendered chart"
        );
        Ok(out)
    }

    /// Renders with the built-in [`SvgDocument`](chartframe_dom::SvgDocument) backend.
    pub fn to_svg_string(&self) -> Result<String, ChartError> {
        self.render_with(&SvgDocumentProvider)
    }
}

/// Renders the chart described by `config` to an SVG string.
pub fn render(config: &ChartConfig) -> Result<String, ChartError> {
    render_with(&SvgDocumentProvider, config)
}

/// Renders the default chart (see [`ChartConfig::default`]).
pub fn render_default() -> Result<String, ChartError> {
    render(&ChartConfig::default())
}

/// Renders the chart described by `config` into a tree created by `provider`.
pub fn render_with<P: DrawTreeProvider>(
    provider: &P,
    config: &ChartConfig,
) -> Result<String, ChartError> {
    Chart::new(config)?.render_with(provider)
}
