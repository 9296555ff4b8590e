//! chartline-reduce: Pure line-chart path reduction (sans-IO).
//!
//! Turns dense chart series into paths with a handful of vertices per
//! pixel column:
//! data samples -> pixel-space path (viewport) -> pixel-column reduction.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! points and returns structured data. Reading series files and writing
//! output lives in `chartline-bench`; SVG serialization lives in
//! `chartline-export`.

pub mod chart;
pub mod diagnostics;
pub mod reduce;
pub mod types;

pub use chart::{ChartViewport, DataRange, Dimensions, RenderedChart};
pub use diagnostics::ReductionDiagnostics;
pub use reduce::{DataReducer, LineChartReducer};
pub use types::{EPSILON, LinePath, PathError, PathSegment, Point, RenderConfig, approx_eq};

/// Fit a viewport to `points`, then build and reduce their path.
///
/// Convenience for the common case of drawing one series across the
/// whole canvas with [`LineChartReducer`].
///
/// # Errors
///
/// Returns [`PathError::NonFiniteCoordinate`] if any point is NaN or
/// infinite.
///
/// # Examples
///
/// ```
/// use chartline_reduce::{Dimensions, Point, RenderConfig, render};
///
/// let samples: Vec<Point> = (0..1000_u32)
///     .map(|i| Point::new(f64::from(i), f64::from(i % 10)))
///     .collect();
/// let dims = Dimensions { width: 50, height: 20 };
/// let chart = render(&samples, dims, &RenderConfig::default()).unwrap();
/// assert!(chart.reduced.len() < chart.raw.len());
/// ```
pub fn render(
    points: &[Point],
    dimensions: Dimensions,
    config: &RenderConfig,
) -> Result<RenderedChart, PathError> {
    ChartViewport::fit(points, dimensions)?.render(points, config, &LineChartReducer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn render_empty_series() {
        let chart = render(
            &[],
            Dimensions {
                width: 10,
                height: 10,
            },
            &RenderConfig::default(),
        )
        .unwrap();
        assert!(chart.raw.is_empty());
        assert!(chart.reduced.is_empty());
    }

    #[test]
    fn render_rejects_nan() {
        let result = render(
            &[Point::new(f64::NAN, 0.0)],
            Dimensions {
                width: 10,
                height: 10,
            },
            &RenderConfig::default(),
        );
        assert_eq!(
            result.map(|c| c.reduced),
            Err(PathError::NonFiniteCoordinate { index: 0 })
        );
    }

    #[test]
    fn render_stepped_keeps_endpoints() {
        let samples = [
            Point::new(0.0, 1.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 2.0),
        ];
        let dims = Dimensions {
            width: 20,
            height: 10,
        };
        let config = RenderConfig {
            stepped: true,
            ..RenderConfig::default()
        };
        let chart = render(&samples, dims, &config).unwrap();
        assert_eq!(chart.reduced.first_point(), chart.raw.first_point());
        assert_eq!(chart.reduced.current_point(), chart.raw.current_point());
    }
}
