//! Chart viewport: map data-space samples into pixel space and render them.
//!
//! Reduction works on pixel columns, so a series has to be scaled to the
//! canvas before it is reduced. [`ChartViewport`] does that mapping and
//! builds the line (or filled outline) path the reducer consumes.
//! Re-run [`ChartViewport::render`] whenever the data or the canvas size
//! changes; nothing is cached.

use serde::{Deserialize, Serialize};

use crate::diagnostics::ReductionDiagnostics;
use crate::reduce::DataReducer;
use crate::types::{LinePath, PathError, Point, RenderConfig};

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// A closed interval of data values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl DataRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidRange`] if either bound is not finite or
    /// `max < min`.
    pub fn new(min: f64, max: f64) -> Result<Self, PathError> {
        if !min.is_finite() || !max.is_finite() || max < min {
            return Err(PathError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Tight bounds of `values`.
    ///
    /// Returns `None` if `values` is empty or contains a non-finite value.
    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for v in values {
            if !v.is_finite() {
                return None;
            }
            bounds = Some(bounds.map_or(Self { min: v, max: v }, |b| Self {
                min: b.min.min(v),
                max: b.max.max(v),
            }));
        }
        bounds
    }

    /// `max - min`.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen a zero-width range by half a unit on each side.
    fn widened(self) -> Self {
        if self.span() > 0.0 {
            self
        } else {
            Self {
                min: self.min - 0.5,
                max: self.max + 0.5,
            }
        }
    }
}

/// Maps data coordinates onto a pixel canvas.
///
/// X maps linearly onto `[0, width]`. Y maps onto `[height, 0]` so larger
/// values are drawn higher up, as screen Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartViewport {
    /// Canvas size.
    pub dimensions: Dimensions,
    /// Data range shown across the width.
    pub x_range: DataRange,
    /// Data range shown across the height.
    pub y_range: DataRange,
}

/// Result of rendering one series through a [`ChartViewport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    /// The full-resolution path in pixel space.
    pub raw: LinePath,
    /// The reduced path, ready to draw.
    pub reduced: LinePath,
    /// What the reducer saw.
    pub diagnostics: ReductionDiagnostics,
}

impl ChartViewport {
    /// Create a viewport showing the given ranges.
    ///
    /// Zero-width ranges are widened so the mapping stays finite.
    #[must_use]
    pub fn new(dimensions: Dimensions, x_range: DataRange, y_range: DataRange) -> Self {
        Self {
            dimensions,
            x_range: x_range.widened(),
            y_range: y_range.widened(),
        }
    }

    /// Create a viewport whose ranges tightly enclose `points`.
    ///
    /// An empty series gets the unit range on both axes.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NonFiniteCoordinate`] if any point is NaN or
    /// infinite.
    pub fn fit(points: &[Point], dimensions: Dimensions) -> Result<Self, PathError> {
        check_finite(points)?;
        let unit = DataRange { min: 0.0, max: 1.0 };
        let x_range = DataRange::of(points.iter().map(|p| p.x)).unwrap_or(unit);
        let y_range = DataRange::of(points.iter().map(|p| p.y)).unwrap_or(unit);
        Ok(Self::new(dimensions, x_range, y_range))
    }

    /// Map a data point to pixel coordinates.
    #[must_use]
    pub fn to_pixel(&self, point: Point) -> Point {
        let width = f64::from(self.dimensions.width);
        let height = f64::from(self.dimensions.height);
        let x = (point.x - self.x_range.min) / self.x_range.span() * width;
        let y = (1.0 - (point.y - self.y_range.min) / self.y_range.span()) * height;
        Point::new(x, y)
    }

    /// Build the pixel-space path for `points`.
    ///
    /// With [`RenderConfig::filled`] the path continues down to the
    /// baseline at the last sample and back to the baseline under the
    /// first sample, outlining the area below the line.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NonFiniteCoordinate`] if any point is NaN or
    /// infinite.
    pub fn build_path(&self, points: &[Point], config: &RenderConfig) -> Result<LinePath, PathError> {
        check_finite(points)?;
        let mapped: Vec<Point> = points.iter().map(|&p| self.to_pixel(p)).collect();
        let mut path = LinePath::from_points(&mapped)?;

        if config.filled
            && let (Some(first), Some(last)) = (mapped.first(), mapped.last())
        {
            let baseline = f64::from(self.dimensions.height);
            path.line_to(Point::new(last.x, baseline));
            path.line_to(Point::new(first.x, baseline));
        }
        Ok(path)
    }

    /// Build the path for `points` and reduce it with `reducer`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NonFiniteCoordinate`] if any point is NaN or
    /// infinite.
    pub fn render<R: DataReducer + ?Sized>(
        &self,
        points: &[Point],
        config: &RenderConfig,
        reducer: &R,
    ) -> Result<RenderedChart, PathError> {
        let raw = self.build_path(points, config)?;
        let (output, diagnostics) = reducer.reduce_with_diagnostics(&raw, config);
        Ok(RenderedChart {
            raw,
            reduced: output,
            diagnostics,
        })
    }
}

fn check_finite(points: &[Point]) -> Result<(), PathError> {
    points
        .iter()
        .position(|p| !p.is_finite())
        .map_or(Ok(()), |index| Err(PathError::NonFiniteCoordinate { index }))
}
