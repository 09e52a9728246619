// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders chart frames to `chartframe.svg` and `chartframe.html`.

mod html;

use anyhow::{Context, Result};
use chartframe_charts::{AxisStyle, Chart, ChartConfig, Paint, render_default};
use chrono::{DateTime, TimeZone, Utc};
use peniko::color::palette::css;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let svg = render_default().context("render default chart")?;
    tracing::info!(bytes = svg.len(), "rendered default chart");
    std::fs::write("chartframe.svg", &svg).context("write chartframe.svg")?;
    println!("wrote chartframe.svg");

    let sections = vec![
        html::HtmlSection {
            title: String::from("Default frame"),
            description: String::from("Calendar year 2023 against 0..100."),
            svg,
        },
        single_day_demo()?,
        styled_demo()?,
    ];
    let page = html::render_report("ChartFrame", &sections);
    std::fs::write("chartframe.html", page).context("write chartframe.html")?;
    println!("wrote chartframe.html");
    Ok(())
}

fn utc(y: i32, m: u32, d: u32, h: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .with_context(|| format!("invalid date {y}-{m}-{d}T{h}"))
}

fn single_day_demo() -> Result<html::HtmlSection> {
    let config = ChartConfig::default()
        .with_x_domain(utc(2023, 3, 1, 0)?, utc(2023, 3, 2, 0)?)
        .with_y_domain(-1.0, 1.0)
        .with_tick_counts(8, 5);
    let svg = chartframe_charts::render(&config).context("render single-day chart")?;
    Ok(html::HtmlSection {
        title: String::from("One day"),
        description: String::from("Hourly ticks over a day against a symmetric value range."),
        svg,
    })
}

fn styled_demo() -> Result<html::HtmlSection> {
    let config = ChartConfig::default()
        .with_size(480.0, 240.0)
        .with_x_domain(utc(2020, 1, 1, 0)?, utc(2030, 1, 1, 0)?)
        .with_y_domain(0.0, 0.5);
    let style = AxisStyle {
        stroke: Paint::from(css::SLATE_GRAY),
        label_fill: Paint::from(css::DARK_SLATE_GRAY),
        font_size: 11.0,
        ..AxisStyle::default()
    };
    let svg = Chart::new(&config)
        .context("build styled chart")?
        .with_axis_style(style)
        .to_svg_string()
        .context("render styled chart")?;
    Ok(html::HtmlSection {
        title: String::from("Styled axes"),
        description: String::from("A decade of yearly ticks with custom stroke and label paint."),
        svg,
    })
}
