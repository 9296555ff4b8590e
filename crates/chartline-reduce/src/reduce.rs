//! Line-chart data reduction: keep only the vertices a 1px line can show.
//!
//! A dense series drawn at a given pixel scale puts many vertices into
//! each pixel column. With a 1px stroke only four of them matter for the
//! rendered silhouette: the first point in the column, the last one, and
//! the points with the minimum and maximum Y. The reducer sweeps the path
//! once, left to right, and emits just those.
//!
//! The [`DataReducer`] trait is the seam a chart renderer calls through;
//! [`LineChartReducer`] is the pixel-column implementation.

use tracing::{debug, warn};

use crate::diagnostics::ReductionDiagnostics;
use crate::types::{LinePath, Point, RenderConfig, approx_eq};

/// Trait for path reduction strategies.
///
/// Input: a path in pixel space, ascending in X.
/// Output: a new path that renders the same at the current scale.
pub trait DataReducer {
    /// Reduce `path` and report what the reduction saw.
    ///
    /// An empty input is returned unchanged.
    fn reduce_with_diagnostics(
        &self,
        path: &LinePath,
        config: &RenderConfig,
    ) -> (LinePath, ReductionDiagnostics);

    /// Reduce `path` for rendering with the given config.
    fn reduce(&self, path: &LinePath, config: &RenderConfig) -> LinePath {
        self.reduce_with_diagnostics(path, config).0
    }
}

/// Pixel-column reducer for line charts.
///
/// Emits at most four vertices per pixel column (entry, minimum, maximum,
/// exit), so the output size is bounded by the number of columns the path
/// spans rather than by its input point count.
///
/// A path whose X decreases is treated as a filled outline that has
/// turned back along the baseline: the sweep stops there and the
/// decreasing point becomes the terminal vertex.
///
/// # Examples
///
/// ```
/// use chartline_reduce::{DataReducer, LineChartReducer, LinePath, Point, RenderConfig};
///
/// let path = LinePath::from_points(&[
///     Point::new(0.1, 1.0),
///     Point::new(0.3, 4.0),
///     Point::new(0.5, 5.0),
///     Point::new(0.7, 3.0),
///     Point::new(0.9, 2.0),
/// ])
/// .unwrap();
/// let reduced = LineChartReducer.reduce(&path, &RenderConfig::default());
/// assert_eq!(
///     reduced.into_points(),
///     vec![Point::new(0.1, 1.0), Point::new(0.5, 5.0), Point::new(0.9, 2.0)],
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineChartReducer;

impl DataReducer for LineChartReducer {
    fn reduce_with_diagnostics(
        &self,
        path: &LinePath,
        config: &RenderConfig,
    ) -> (LinePath, ReductionDiagnostics) {
        let mut diagnostics = ReductionDiagnostics {
            input_points: path.len(),
            ..ReductionDiagnostics::default()
        };

        let mut points = path.points().enumerate();
        let Some((_, first)) = points.next() else {
            return (path.clone(), diagnostics);
        };

        let mut out = Emitter::new(config.stepped);
        let mut column = Column::enter(0, first);
        diagnostics.columns = 1;
        out.push(first);

        let mut current = first;
        for (index, point) in points {
            let last = current;
            current = point;

            if point.x < last.x {
                // Filled outline returning along the baseline. The point
                // before the turn should be the column's maximum.
                diagnostics.halted_at = Some(index);
                if !column.max.point.approx_eq(last) {
                    diagnostics.fill_mismatch = true;
                    warn!(
                        index,
                        last_x = last.x,
                        last_y = last.y,
                        max_x = column.max.point.x,
                        max_y = column.max.point.y,
                        "decreasing x does not follow the column maximum"
                    );
                }
                break;
            }

            if point.x >= column.boundary {
                out.push_extremes(&column);
                out.push(last);

                column = Column::enter(index, point);
                diagnostics.columns += 1;
                out.push(point);
            } else {
                column.track(index, point);
            }
        }

        out.push_extremes(&column);
        out.push(current);

        if config.stepped
            && out
                .path
                .current_point()
                .is_none_or(|p| approx_eq(p.y, current.y))
        {
            // The final horizontal run has no vertical step to close it.
            out.push_straight(current);
        }

        let reduced = out.path;
        diagnostics.output_points = reduced.len();
        debug!(
            input = diagnostics.input_points,
            output = diagnostics.output_points,
            columns = diagnostics.columns,
            stepped = config.stepped,
            "reduced line path"
        );
        (reduced, diagnostics)
    }
}

/// A vertex together with its position in the input path.
#[derive(Debug, Clone, Copy)]
struct Indexed {
    index: usize,
    point: Point,
}

/// Running extremes of the pixel column the sweep is in.
#[derive(Debug, Clone, Copy)]
struct Column {
    /// Exclusive upper X bound: `floor(entry.x) + 1`.
    boundary: f64,
    min: Indexed,
    max: Indexed,
}

impl Column {
    fn enter(index: usize, point: Point) -> Self {
        let entry = Indexed { index, point };
        Self {
            boundary: point.x.floor() + 1.0,
            min: entry,
            max: entry,
        }
    }

    /// Strict `<` keeps the earliest minimum; `>=` keeps the latest maximum.
    fn track(&mut self, index: usize, point: Point) {
        if point.y < self.min.point.y {
            self.min = Indexed { index, point };
        }
        if point.y >= self.max.point.y {
            self.max = Indexed { index, point };
        }
    }

    /// Minimum and maximum in input order.
    const fn extremes(&self) -> [Point; 2] {
        if self.min.index < self.max.index {
            [self.min.point, self.max.point]
        } else {
            [self.max.point, self.min.point]
        }
    }
}

/// Appends vertices to the reduced path without repeating itself.
struct Emitter {
    path: LinePath,
    stepped: bool,
}

impl Emitter {
    const fn new(stepped: bool) -> Self {
        Self {
            path: LinePath::new(),
            stepped,
        }
    }

    fn push(&mut self, point: Point) {
        if self.stepped {
            self.push_stepped(point);
        } else {
            self.push_straight(point);
        }
    }

    fn push_extremes(&mut self, column: &Column) {
        for point in column.extremes() {
            self.push(point);
        }
    }

    /// Append a line unless it would have zero length.
    fn push_straight(&mut self, point: Point) {
        match self.path.current_point() {
            None => self.path.move_to(point),
            Some(current) if current.approx_eq(point) => {}
            Some(_) => self.path.line_to(point),
        }
    }

    /// Append a horizontal-then-vertical step when Y changes.
    ///
    /// Same-Y points are dropped; the run continues implicitly until the
    /// next step or the final point.
    fn push_stepped(&mut self, point: Point) {
        match self.path.current_point() {
            None => self.path.move_to(point),
            Some(current) if !approx_eq(point.y, current.y) => {
                self.push_straight(Point::new(point.x, current.y));
                self.push_straight(point);
            }
            Some(_) => {}
        }
    }
}
