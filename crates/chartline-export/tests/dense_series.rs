//! Integration test: render dense series through the viewport and reducer, then export to SVG.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chartline_export::{StyledPath, SvgMetadata, to_svg};
use chartline_reduce::{Dimensions, Point, RenderConfig, render};

/// A noisy waveform with `n` samples.
fn waveform(n: u32) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = f64::from(i);
            let noise = f64::from(i.wrapping_mul(2_654_435_761) % 13) / 13.0;
            Point::new(t, (t * 0.01).sin().mul_add(10.0, noise))
        })
        .collect()
}

#[test]
fn dense_series_reduces_and_exports() {
    let samples = waveform(50_000);
    let dims = Dimensions {
        width: 400,
        height: 120,
    };

    let chart = render(&samples, dims, &RenderConfig::default()).expect("render should succeed");

    eprintln!(
        "Reduced {} points to {} across {} columns",
        chart.raw.len(),
        chart.reduced.len(),
        chart.diagnostics.columns,
    );
    assert_eq!(chart.raw.len(), 50_000);
    assert!(chart.reduced.len() <= 4 * chart.diagnostics.columns);
    assert!(chart.diagnostics.columns <= 401);
    assert!(
        chart
            .reduced
            .first_point()
            .unwrap()
            .approx_eq(chart.raw.first_point().unwrap())
    );
    assert!(
        chart
            .reduced
            .current_point()
            .unwrap()
            .approx_eq(chart.raw.current_point().unwrap())
    );

    let config_json = serde_json::to_string(&RenderConfig::default()).unwrap();
    let metadata = SvgMetadata {
        title: Some("waveform"),
        description: None,
        config_json: Some(&config_json),
    };
    let svg = to_svg(
        &[
            StyledPath::line(&chart.raw, "#cccccc"),
            StyledPath::line(&chart.reduced, "black"),
        ],
        dims,
        &metadata,
    );

    assert!(svg.contains("<svg"));
    assert_eq!(svg.matches("<path").count(), 2);
    assert!(svg.contains("</svg>"));
    assert!(svg.contains("<title>waveform</title>"));
}

#[test]
fn filled_stepped_series_exports_closed_area() {
    let samples = waveform(5_000);
    let dims = Dimensions {
        width: 200,
        height: 80,
    };
    let config = RenderConfig {
        stepped: true,
        filled: true,
    };

    let chart = render(&samples, dims, &config).expect("render should succeed");
    assert!(chart.diagnostics.halted_at.is_some());
    assert!(!chart.diagnostics.fill_mismatch);
    assert_eq!(chart.reduced.current_point(), Some(Point::new(0.0, 80.0)));

    let svg = to_svg(
        &[StyledPath {
            path: &chart.reduced,
            stroke: "steelblue",
            filled: true,
        }],
        dims,
        &SvgMetadata::default(),
    );
    assert!(svg.contains(r#"fill="steelblue""#));
    assert!(svg.contains(" z\""));
}
