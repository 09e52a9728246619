// Copyright 2025 the ChartFrame Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end rendering of chart frames.

use chartframe_charts::chartframe_dom::{
    CollaboratorUnavailable, DrawTreeProvider, SvgDocument, SvgDocumentProvider,
};
use chartframe_charts::{
    Chart, ChartConfig, ChartError, DomainError, Margins, render, render_default, render_with,
};
use chrono::{TimeZone, Utc};

struct Offline;

impl DrawTreeProvider for Offline {
    type Tree = SvgDocument;

    fn create(&self) -> Result<SvgDocument, CollaboratorUnavailable> {
        Err(CollaboratorUnavailable::new("no display"))
    }
}

#[test]
fn default_chart_renders_svg_root() {
    let svg = render_default().unwrap();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="640" height="400" viewBox="0 0 640 400">"#));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"<g transform="translate(0,370)""#));
    assert!(svg.contains(r#"<g transform="translate(40,0)""#));
}

#[test]
fn default_chart_labels() {
    let svg = render_default().unwrap();
    assert!(svg.contains(r#"<g class="tick" opacity="1" transform="translate(40.5,0)">"#));
    assert!(svg.contains(r#"<g class="tick" opacity="1" transform="translate(0,370.5)">"#));
    assert!(svg.contains(">2023-01</text>"));
    assert!(svg.contains(">2024-01</text>"));
    assert!(svg.contains(">0</text>"));
    assert!(svg.contains(">100</text>"));
    assert_eq!(svg.matches(r#"class="tick""#).count(), 13 + 11);
    assert_eq!(svg.matches(r#"class="domain""#).count(), 2);
}

#[test]
fn rendering_twice_is_byte_identical() {
    let config = ChartConfig::default();
    assert_eq!(render(&config).unwrap(), render(&config).unwrap());
    assert_eq!(render(&config).unwrap(), render_default().unwrap());
}

#[test]
fn default_mapping_endpoints() {
    let chart = Chart::new(&ChartConfig::default()).unwrap();
    let start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(chart.x_scale().map(start), 40.0);
    assert_eq!(chart.x_scale().map(end), 620.0);
    assert_eq!(chart.y_scale().map(0.0), 370.0);
    assert_eq!(chart.y_scale().map(100.0), 20.0);

    let mid = Utc.with_ymd_and_hms(2023, 7, 2, 12, 0, 0).unwrap();
    let x = chart.x_scale().map(mid);
    assert!(x > 40.0 && x < 620.0);
}

#[test]
fn tick_positions_are_monotonic_and_in_range() {
    let chart = Chart::new(&ChartConfig::default()).unwrap();

    let xs: Vec<f64> = chart.x_axis().ticks().iter().map(|t| t.position).collect();
    assert!(xs.windows(2).all(|w| w[0] < w[1]));
    assert!(xs.iter().all(|&p| (40.0..=620.0).contains(&p)));

    let ys: Vec<f64> = chart.y_axis().ticks().iter().map(|t| t.position).collect();
    assert!(ys.windows(2).all(|w| w[0] > w[1]));
    assert!(ys.iter().all(|&p| (20.0..=370.0).contains(&p)));
}

#[test]
fn degenerate_y_domain_fails_without_output() {
    let config = ChartConfig::default().with_y_domain(5.0, 5.0);
    assert!(matches!(
        render(&config),
        Err(ChartError::Domain(DomainError::DegenerateDomain(_)))
    ));
}

#[test]
fn degenerate_x_domain_fails() {
    let t = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let config = ChartConfig::default().with_x_domain(t, t);
    assert!(matches!(render(&config), Err(ChartError::Domain(_))));
}

#[test]
fn non_finite_y_domain_fails() {
    let config = ChartConfig::default().with_y_domain(0.0, f64::NAN);
    assert_eq!(
        render(&config),
        Err(ChartError::Domain(DomainError::NonFinite("domain")))
    );
}

#[test]
fn overflowing_y_domain_fails() {
    let config = ChartConfig::default().with_y_domain(-1e308, 1e308);
    assert_eq!(
        render(&config),
        Err(ChartError::Domain(DomainError::NonFinite("domain")))
    );
}

#[test]
fn oversized_margins_fail() {
    let config = ChartConfig::default().with_margins(Margins {
        top: 200.0,
        right: 20.0,
        bottom: 200.0,
        left: 40.0,
    });
    assert!(matches!(
        render(&config),
        Err(ChartError::InvalidCanvas { .. })
    ));
}

#[test]
fn unavailable_tree_is_reported() {
    let err = render_with(&Offline, &ChartConfig::default()).unwrap_err();
    assert_eq!(
        err,
        ChartError::CollaboratorUnavailable(CollaboratorUnavailable::new("no display"))
    );
    assert_eq!(err.to_string(), "drawing surface unavailable: no display");
}

#[test]
fn provider_and_free_function_agree() {
    let config = ChartConfig::default().with_y_domain(-50.0, 50.0);
    let via_provider = render_with(&SvgDocumentProvider, &config).unwrap();
    let via_chart = Chart::new(&config).unwrap().to_svg_string().unwrap();
    assert_eq!(via_provider, via_chart);
    assert!(via_provider.contains(">-50</text>"));
    assert!(via_provider.contains(">0</text>"));
}

#[test]
fn reversed_y_domain_keeps_labels_in_place() {
    let config = ChartConfig::default().with_y_domain(100.0, 0.0);
    let chart = Chart::new(&config).unwrap();
    assert_eq!(chart.y_scale().map(100.0), 370.0);
    assert_eq!(chart.y_scale().map(0.0), 20.0);
    let ys: Vec<f64> = chart.y_axis().ticks().iter().map(|t| t.position).collect();
    assert!(ys.windows(2).all(|w| w[0] < w[1]));
}
