// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis rendering.
//!
//! An [`AxisSpec`] pairs a [`Scale`] with an orientation and emits a self-contained group into
//! a [`DrawTree`]:
//!
//! ```text
//! <g transform="translate(..)" fill="none" font-size="10" font-family="sans-serif" text-anchor="..">
//!   <path class="domain" stroke="currentColor" d=".."></path>
//!   <g class="tick" opacity="1" transform="translate(..)">
//!     <line stroke="currentColor" y2="6"></line>
//!     <text fill="currentColor" y="9" dy="0.71em">label</text>
//!   </g>
//!   ...
//! </g>
//! ```
//!
//! Tick marks and labels point away from the plot: down for `bottom`, left for `left`.

use std::sync::Arc;

use chartframe_dom::{DrawTree, NodeId};
use kurbo::{BezPath, Vec2};
use peniko::{Brush, Color};

use crate::format::format_tick_with_step;
use crate::scale::{Scale, TickValue};

/// A paint for strokes and fills.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Paint {
    /// Inherit the host document's text color (`currentColor`).
    #[default]
    CurrentColor,
    /// An explicit paint.
    Brush(Brush),
}

impl Paint {
    /// Returns the SVG paint value and an optional opacity.
    pub fn svg_value(&self) -> (String, Option<f64>) {
        match self {
            Self::CurrentColor => (String::from("currentColor"), None),
            Self::Brush(Brush::Solid(color)) => {
                let rgba = color.to_rgba8();
                let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
                let opacity = if rgba.a == 255 {
                    None
                } else {
                    Some(f64::from(rgba.a) / 255.0)
                };
                (value, opacity)
            }
            Self::Brush(_) => (String::from("none"), None),
        }
    }
}

impl From<Brush> for Paint {
    fn from(value: Brush) -> Self {
        Self::Brush(value)
    }
}

impl From<Color> for Paint {
    fn from(value: Color) -> Self {
        Self::Brush(Brush::Solid(value))
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Paint for the baseline and tick marks.
    pub stroke: Paint,
    /// Paint for tick labels.
    pub label_fill: Paint,
    /// Font size for tick labels.
    pub font_size: f64,
    /// Font family for tick labels.
    pub font_family: String,
}

impl Default for AxisStyle {
    fn default() -> Self {
        Self {
            stroke: Paint::CurrentColor,
            label_fill: Paint::CurrentColor,
            font_size: 10.0,
            font_family: String::from("sans-serif"),
        }
    }
}

/// Axis orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisOrient {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisOrient {
    fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// `-1` when marks point toward negative coordinates (top, left), `+1` otherwise.
    fn direction(self) -> f64 {
        match self {
            Self::Top | Self::Left => -1.0,
            Self::Bottom | Self::Right => 1.0,
        }
    }

    fn text_anchor(self) -> &'static str {
        match self {
            Self::Right => "start",
            Self::Left => "end",
            Self::Top | Self::Bottom => "middle",
        }
    }

    fn label_dy(self) -> &'static str {
        match self {
            Self::Top => "0em",
            Self::Bottom => "0.71em",
            Self::Left | Self::Right => "0.32em",
        }
    }
}

/// One labeled reference point along an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Domain value of the tick.
    pub value: TickValue,
    /// Pixel coordinate along the axis (before the crisp-edge offset).
    pub position: f64,
    /// Formatted label.
    pub label: String,
}

/// Formats a tick value into a label.
pub type TickFormatter = Arc<dyn Fn(&TickValue) -> String>;

/// An axis specification: a scale, an orientation and tick/label styling.
#[derive(Clone)]
pub struct AxisSpec {
    /// The scale this axis renders.
    pub scale: Scale,
    /// Axis placement relative to the plot.
    pub orient: AxisOrient,
    /// Approximate number of ticks.
    pub tick_count: usize,
    /// Length of the per-tick marks.
    pub tick_size_inner: f64,
    /// Length of the marks at both ends of the baseline.
    pub tick_size_outer: f64,
    /// Gap between a tick mark and its label.
    pub tick_padding: f64,
    /// Added to every coordinate so 1px strokes land on pixel centers.
    pub offset: f64,
    /// Axis styling.
    pub style: AxisStyle,
    /// Optional label formatter replacing the default for the scale kind.
    pub tick_formatter: Option<TickFormatter>,
}

impl core::fmt::Debug for AxisSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AxisSpec")
            .field("scale", &self.scale)
            .field("orient", &self.orient)
            .field("tick_count", &self.tick_count)
            .field("tick_size_inner", &self.tick_size_inner)
            .field("tick_size_outer", &self.tick_size_outer)
            .field("tick_padding", &self.tick_padding)
            .field("offset", &self.offset)
            .field("style", &self.style)
            .field("tick_formatter", &self.tick_formatter.is_some())
            .finish()
    }
}

impl AxisSpec {
    /// Creates a new axis specification.
    ///
    /// The returned axis has:
    /// - `tick_count = 10`
    /// - `tick_size_inner = tick_size_outer = 6`
    /// - `tick_padding = 3`
    /// - `offset = 0.5`
    /// - `style = AxisStyle::default()`
    pub fn new(scale: impl Into<Scale>, orient: AxisOrient) -> Self {
        Self {
            scale: scale.into(),
            orient,
            tick_count: 10,
            tick_size_inner: 6.0,
            tick_size_outer: 6.0,
            tick_padding: 3.0,
            offset: 0.5,
            style: AxisStyle::default(),
            tick_formatter: None,
        }
    }

    /// Convenience constructor for a `bottom` axis.
    pub fn bottom(scale: impl Into<Scale>) -> Self {
        Self::new(scale, AxisOrient::Bottom)
    }

    /// Convenience constructor for a `top` axis.
    pub fn top(scale: impl Into<Scale>) -> Self {
        Self::new(scale, AxisOrient::Top)
    }

    /// Convenience constructor for a `left` axis.
    pub fn left(scale: impl Into<Scale>) -> Self {
        Self::new(scale, AxisOrient::Left)
    }

    /// Convenience constructor for a `right` axis.
    pub fn right(scale: impl Into<Scale>) -> Self {
        Self::new(scale, AxisOrient::Right)
    }

    /// Set the approximate tick count.
    ///
    /// Tick generation stops after 10 001 ticks, so very large counts cover only the start of
    /// the domain.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Set both inner and outer tick sizes.
    pub fn with_tick_size(mut self, tick_size: f64) -> Self {
        self.tick_size_inner = tick_size;
        self.tick_size_outer = tick_size;
        self
    }

    /// Set the per-tick mark length.
    pub fn with_tick_size_inner(mut self, tick_size: f64) -> Self {
        self.tick_size_inner = tick_size;
        self
    }

    /// Set the baseline end-mark length; `0` draws a bare baseline.
    pub fn with_tick_size_outer(mut self, tick_size: f64) -> Self {
        self.tick_size_outer = tick_size;
        self
    }

    /// Set the gap between tick marks and labels.
    pub fn with_tick_padding(mut self, tick_padding: f64) -> Self {
        self.tick_padding = tick_padding;
        self
    }

    /// Set the crisp-edge offset (use `0` on high-density displays).
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Set the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Set a custom tick label formatter.
    pub fn with_tick_formatter(mut self, f: impl Fn(&TickValue) -> String + 'static) -> Self {
        self.tick_formatter = Some(Arc::new(f));
        self
    }

    /// Returns the ticks for the current scale, ordered by domain value.
    ///
    /// Every position lies within the scale's range.
    pub fn ticks(&self) -> Vec<Tick> {
        let (r0, r1) = self.scale.range();
        let (lo, hi) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
        let in_range = |p: f64| p >= lo - 1.0e-9 && p <= hi + 1.0e-9;

        let ticks: Vec<Tick> = match &self.scale {
            Scale::Linear(s) => {
                let step = s.tick_step(self.tick_count);
                s.ticks(self.tick_count)
                    .into_iter()
                    .map(|v| {
                        let value = TickValue::Number(v);
                        let label = match &self.tick_formatter {
                            Some(f) => f(&value),
                            None => format_tick_with_step(v, step),
                        };
                        Tick {
                            value,
                            position: s.map(v),
                            label,
                        }
                    })
                    .collect()
            }
            Scale::Time(s) => {
                let ticks = s.ticks(self.tick_count);
                ticks
                    .values
                    .into_iter()
                    .map(|t| {
                        let value = TickValue::Instant(t);
                        let label = match &self.tick_formatter {
                            Some(f) => f(&value),
                            None => ticks.interval.format(t),
                        };
                        Tick {
                            value,
                            position: s.map(t),
                            label,
                        }
                    })
                    .collect()
            }
        };
        ticks.into_iter().filter(|t| in_range(t.position)).collect()
    }

    /// Appends this axis under `parent`, translated by `translate`, and returns its group.
    pub fn render(&self, tree: &mut dyn DrawTree, parent: NodeId, translate: Vec2) -> NodeId {
        let orient = self.orient;
        let k = orient.direction();
        let spacing = self.tick_size_inner.max(0.0) + self.tick_padding;
        // Tick marks and labels are offset along `x` for vertical axes, `y` otherwise.
        let across = if orient.is_vertical() { "x" } else { "y" };
        let (stroke, stroke_opacity) = self.style.stroke.svg_value();
        let (fill, fill_opacity) = self.style.label_fill.svg_value();

        let g = tree.create_element("g");
        tree.set_attribute(
            g,
            "transform",
            &format!("translate({},{})", translate.x, translate.y),
        );
        tree.set_attribute(g, "fill", "none");
        tree.set_attribute(g, "font-size", &format!("{}", self.style.font_size));
        tree.set_attribute(g, "font-family", &self.style.font_family);
        tree.set_attribute(g, "text-anchor", orient.text_anchor());
        tree.append_child(parent, g);

        let domain = tree.create_element("path");
        tree.set_attribute(domain, "class", "domain");
        set_paint(tree, domain, "stroke", &stroke, stroke_opacity);
        tree.set_attribute(domain, "d", &self.domain_path().to_svg());
        tree.append_child(g, domain);

        let ticks = self.ticks();
        for tick in &ticks {
            let p = tick.position + self.offset;
            let node = tree.create_element("g");
            tree.set_attribute(node, "class", "tick");
            tree.set_attribute(node, "opacity", "1");
            let transform = if orient.is_vertical() {
                format!("translate(0,{p})")
            } else {
                format!("translate({p},0)")
            };
            tree.set_attribute(node, "transform", &transform);

            let line = tree.create_element("line");
            set_paint(tree, line, "stroke", &stroke, stroke_opacity);
            tree.set_attribute(
                line,
                &format!("{across}2"),
                &format!("{}", k * self.tick_size_inner),
            );
            tree.append_child(node, line);

            let text = tree.create_element("text");
            set_paint(tree, text, "fill", &fill, fill_opacity);
            tree.set_attribute(text, across, &format!("{}", k * spacing));
            tree.set_attribute(text, "dy", orient.label_dy());
            tree.set_text(text, &tick.label);
            tree.append_child(node, text);

            tree.append_child(g, node);
        }
        tracing::debug!(?orient, ticks = ticks.len(), "rendered axis");
        g
    }

    /// The baseline across the full range, with outer tick marks at both ends.
    fn domain_path(&self) -> BezPath {
        let (r0, r1) = self.scale.range();
        let (r0, r1) = (r0 + self.offset, r1 + self.offset);
        let outer = self.orient.direction() * self.tick_size_outer;
        let o = self.offset;
        let vertical = self.orient.is_vertical();
        // Points are (along-axis, across-axis) until the final swap.
        let pts: Vec<(f64, f64)> = if self.tick_size_outer != 0.0 {
            vec![(r0, outer), (r0, o), (r1, o), (r1, outer)]
        } else {
            vec![(r0, o), (r1, o)]
        };
        let mut path = BezPath::new();
        for (i, (a, c)) in pts.into_iter().enumerate() {
            let pt = if vertical { (c, a) } else { (a, c) };
            if i == 0 {
                path.move_to(pt);
            } else {
                path.line_to(pt);
            }
        }
        path
    }
}

fn set_paint(
    tree: &mut dyn DrawTree,
    node: NodeId,
    name: &str,
    value: &str,
    opacity: Option<f64>,
) {
    tree.set_attribute(node, name, value);
    if let Some(o) = opacity {
        tree.set_attribute(node, &format!("{name}-opacity"), &format!("{o}"));
    }
}

#[cfg(test)]
mod tests {
    use chartframe_dom::SvgDocument;
    use chrono::{DateTime, TimeZone, Utc};
    use kurbo::Shape;
    use peniko::color::palette::css;

    use super::*;
    use crate::scale::{ScaleLinear, ScaleTime};

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("valid date")
    }

    fn y_scale() -> ScaleLinear {
        ScaleLinear::new((0.0, 100.0), (370.0, 20.0)).expect("valid scale")
    }

    fn x_scale() -> ScaleTime {
        ScaleTime::new((utc(2023, 1, 1), utc(2024, 1, 1)), (40.0, 620.0)).expect("valid scale")
    }

    fn render(axis: &AxisSpec) -> (SvgDocument, NodeId) {
        let mut doc = SvgDocument::new();
        let root = doc.create_element("svg");
        let g = axis.render(&mut doc, root, Vec2::new(0.0, 370.0));
        (doc, g)
    }

    #[test]
    fn left_ticks_are_monotonic_and_in_range() {
        let axis = AxisSpec::left(y_scale());
        let ticks = axis.ticks();
        assert_eq!(ticks.len(), 11);
        assert!(ticks.windows(2).all(|w| w[0].position > w[1].position));
        assert!(ticks.iter().all(|t| (20.0..=370.0).contains(&t.position)));
        assert_eq!(ticks[0].label, "0");
        assert_eq!(ticks[10].label, "100");
    }

    #[test]
    fn bottom_time_ticks_are_monotonic_and_in_range() {
        let axis = AxisSpec::bottom(x_scale());
        let ticks = axis.ticks();
        assert!(ticks.len() >= 2);
        assert!(ticks.windows(2).all(|w| w[0].position < w[1].position));
        assert!(ticks.iter().all(|t| (40.0..=620.0).contains(&t.position)));
        assert_eq!(ticks[0].position, 40.0);
        assert_eq!(ticks[0].label, "2023-01");
    }

    #[test]
    fn bottom_axis_group_structure() {
        let axis = AxisSpec::bottom(x_scale());
        let (doc, g) = render(&axis);

        assert_eq!(doc.attribute(g, "transform"), Some("translate(0,370)"));
        assert_eq!(doc.attribute(g, "text-anchor"), Some("middle"));
        let children = doc.children(g);
        assert_eq!(doc.name(children[0]), "path");
        assert_eq!(doc.attribute(children[0], "class"), Some("domain"));
        assert_eq!(children.len(), 1 + axis.ticks().len());

        let tick = children[1];
        assert_eq!(doc.attribute(tick, "class"), Some("tick"));
        assert_eq!(doc.attribute(tick, "transform"), Some("translate(40.5,0)"));
        let parts = doc.children(tick);
        assert_eq!(doc.name(parts[0]), "line");
        assert_eq!(doc.attribute(parts[0], "y2"), Some("6"));
        assert_eq!(doc.name(parts[1]), "text");
        assert_eq!(doc.attribute(parts[1], "y"), Some("9"));
        assert_eq!(doc.attribute(parts[1], "dy"), Some("0.71em"));
        assert_eq!(doc.text(parts[1]), Some("2023-01"));
    }

    #[test]
    fn left_axis_marks_point_left() {
        let axis = AxisSpec::left(y_scale());
        let (doc, g) = render(&axis);

        assert_eq!(doc.attribute(g, "text-anchor"), Some("end"));
        let tick = doc.children(g)[1];
        assert_eq!(doc.attribute(tick, "transform"), Some("translate(0,370.5)"));
        let parts = doc.children(tick);
        assert_eq!(doc.attribute(parts[0], "x2"), Some("-6"));
        assert_eq!(doc.attribute(parts[1], "x"), Some("-9"));
        assert_eq!(doc.attribute(parts[1], "dy"), Some("0.32em"));
    }

    #[test]
    fn domain_path_spans_range_with_outer_ticks() {
        let bottom = AxisSpec::bottom(x_scale());
        let b = bottom.domain_path().bounding_box();
        assert_eq!((b.x0, b.x1), (40.5, 620.5));
        assert_eq!((b.y0, b.y1), (0.5, 6.0));

        let left = AxisSpec::left(y_scale()).with_tick_size_outer(0.0);
        let l = left.domain_path().bounding_box();
        assert_eq!((l.x0, l.x1), (0.5, 0.5));
        assert_eq!((l.y0, l.y1), (20.5, 370.5));
    }

    #[test]
    fn custom_formatter_overrides_labels() {
        let axis = AxisSpec::left(y_scale())
            .with_tick_count(2)
            .with_tick_formatter(|v| match v {
                TickValue::Number(n) => format!("{n}%"),
                TickValue::Instant(_) => String::from("?"),
            });
        let labels: Vec<String> = axis.ticks().into_iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["0%", "50%", "100%"]);
    }

    #[test]
    fn explicit_paint_emits_hex_and_opacity() {
        let style = AxisStyle {
            stroke: Paint::from(css::RED.with_alpha(0.5)),
            ..AxisStyle::default()
        };
        let axis = AxisSpec::right(y_scale()).with_style(style);
        let (doc, g) = render(&axis);
        let domain = doc.children(g)[0];
        assert_eq!(doc.attribute(domain, "stroke"), Some("#ff0000"));
        assert!(doc.attribute(domain, "stroke-opacity").is_some());
        assert_eq!(doc.attribute(g, "text-anchor"), Some("start"));
    }

    #[test]
    fn zero_tick_count_renders_baseline_only() {
        let axis = AxisSpec::top(x_scale()).with_tick_count(0);
        let (doc, g) = render(&axis);
        assert_eq!(doc.children(g).len(), 1);
    }
}
