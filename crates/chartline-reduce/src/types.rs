//! Shared types for chartline path reduction.

use serde::{Deserialize, Serialize};

/// Tolerance used for every coordinate equality comparison.
///
/// Two coordinates whose absolute difference is at most `EPSILON` are
/// considered equal. This suppresses zero-length segments caused by
/// floating-point noise.
pub const EPSILON: f64 = 1e-6;

/// Returns `true` if `a` and `b` differ by at most [`EPSILON`].
#[must_use]
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPSILON
}

/// A 2D point in chart coordinates.
///
/// In pixel space `x` grows to the right and `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `true` if both coordinates match `other` within [`EPSILON`].
    #[must_use]
    pub fn approx_eq(self, other: Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y)
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One segment of a [`LinePath`].
///
/// Only straight segments exist: curves and close commands cannot be
/// expressed, so a reducer never has to reject them at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new subpath at the given point.
    MoveTo(Point),
    /// Draw a straight line from the current point to the given point.
    LineTo(Point),
}

impl PathSegment {
    /// The endpoint of this segment.
    #[must_use]
    pub const fn point(self) -> Point {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => p,
        }
    }
}

/// An ordered sequence of move/line segments.
///
/// A non-empty path always starts with [`PathSegment::MoveTo`]. Paths
/// built through [`line_to`](Self::line_to) uphold this automatically;
/// [`from_segments`](Self::from_segments) checks it, and deserialization
/// goes through the same check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathSegment>", into = "Vec<PathSegment>")]
pub struct LinePath(Vec<PathSegment>);

impl LinePath {
    /// Create an empty path.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Create an empty path with room for `capacity` segments.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Build a path from raw segments.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::MissingMoveTo`] if the first segment is a
    /// `LineTo`, or [`PathError::NonFiniteCoordinate`] if any coordinate is
    /// NaN or infinite.
    pub fn from_segments(segments: Vec<PathSegment>) -> Result<Self, PathError> {
        if let Some(PathSegment::LineTo(_)) = segments.first() {
            return Err(PathError::MissingMoveTo);
        }
        if let Some(index) = segments.iter().position(|s| !s.point().is_finite()) {
            return Err(PathError::NonFiniteCoordinate { index });
        }
        Ok(Self(segments))
    }

    /// Build a path that moves to the first point and draws lines through
    /// the rest.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NonFiniteCoordinate`] if any coordinate is NaN
    /// or infinite.
    pub fn from_points(points: &[Point]) -> Result<Self, PathError> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFiniteCoordinate { index });
        }
        let mut path = Self::with_capacity(points.len());
        for &p in points {
            path.line_to(p);
        }
        Ok(path)
    }

    /// Append a `MoveTo` segment.
    pub fn move_to(&mut self, point: Point) {
        self.0.push(PathSegment::MoveTo(point));
    }

    /// Append a `LineTo` segment.
    ///
    /// On an empty path this starts the path with a `MoveTo` instead.
    pub fn line_to(&mut self, point: Point) {
        if self.0.is_empty() {
            self.move_to(point);
        } else {
            self.0.push(PathSegment::LineTo(point));
        }
    }

    /// Returns `true` if the path has no segments.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of segments (equivalently, vertices).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all segments.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Iterate over the segment endpoints in order.
    #[must_use]
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.0.iter().map(|s| s.point())
    }

    /// Returns the first vertex, if any.
    #[must_use]
    pub fn first_point(&self) -> Option<Point> {
        self.0.first().map(|s| s.point())
    }

    /// Returns the last vertex, if any.
    #[must_use]
    pub fn current_point(&self) -> Option<Point> {
        self.0.last().map(|s| s.point())
    }

    /// Consumes the path and returns its vertices.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0.into_iter().map(PathSegment::point).collect()
    }
}

impl TryFrom<Vec<PathSegment>> for LinePath {
    type Error = PathError;

    fn try_from(segments: Vec<PathSegment>) -> Result<Self, Self::Error> {
        Self::from_segments(segments)
    }
}

impl From<LinePath> for Vec<PathSegment> {
    fn from(path: LinePath) -> Self {
        path.0
    }
}

/// Rendering options for a single chart line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Connect points with horizontal-then-vertical steps instead of
    /// direct diagonals.
    pub stepped: bool,

    /// Close the line along the chart baseline so it can be filled.
    ///
    /// Only the chart viewport reads this flag; the reducer recognizes a
    /// filled outline by its decreasing X on the way back.
    pub filled: bool,
}

/// Errors raised while constructing paths or chart viewports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// A non-empty path began with a `LineTo` segment.
    #[error("path must start with a move-to segment")]
    MissingMoveTo,

    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate at index {index}")]
    NonFiniteCoordinate {
        /// Position of the offending point or segment.
        index: usize,
    },

    /// A data range was not finite or had `max < min`.
    #[error("invalid data range [{min}, {max}]")]
    InvalidRange {
        /// Lower bound as given.
        min: f64,
        /// Upper bound as given.
        max: f64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_within_epsilon() {
        assert!(approx_eq(1.0, 1.0 + 5e-7));
        assert!(!approx_eq(1.0, 1.0 + 1e-5));
        assert!(Point::new(0.0, 0.0).approx_eq(Point::new(1e-7, -1e-7)));
    }

    #[test]
    fn line_to_on_empty_path_starts_with_move_to() {
        let mut path = LinePath::new();
        path.line_to(Point::new(1.0, 2.0));
        path.line_to(Point::new(3.0, 4.0));
        assert_eq!(
            path.segments(),
            &[
                PathSegment::MoveTo(Point::new(1.0, 2.0)),
                PathSegment::LineTo(Point::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn from_segments_rejects_leading_line_to() {
        let result = LinePath::from_segments(vec![PathSegment::LineTo(Point::new(0.0, 0.0))]);
        assert_eq!(result, Err(PathError::MissingMoveTo));
    }

    #[test]
    fn from_segments_accepts_interior_move_to() {
        let path = LinePath::from_segments(vec![
            PathSegment::MoveTo(Point::new(0.0, 0.0)),
            PathSegment::MoveTo(Point::new(1.0, 1.0)),
        ])
        .unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn from_points_rejects_nan() {
        let result = LinePath::from_points(&[Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]);
        assert_eq!(result, Err(PathError::NonFiniteCoordinate { index: 1 }));
    }

    #[test]
    fn empty_path_has_no_current_point() {
        let path = LinePath::from_points(&[]).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.current_point(), None);
        assert_eq!(path.first_point(), None);
    }

    #[test]
    fn deserialize_rejects_leading_line_to() {
        let err = serde_json::from_str::<LinePath>(r#"[{"LineTo":{"x":0.0,"y":0.0}}]"#)
            .unwrap_err();
        assert!(err.to_string().contains("move-to"), "{err}");
    }

    #[test]
    fn deserialize_accepts_valid_segments() {
        let json = r#"[{"MoveTo":{"x":0.0,"y":1.0}},{"LineTo":{"x":2.0,"y":3.0}}]"#;
        let path: LinePath = serde_json::from_str(json).unwrap();
        assert_eq!(
            path.into_points(),
            vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)]
        );
    }

    #[test]
    fn serializes_as_segment_list() {
        let path = LinePath::from_points(&[Point::new(0.0, 1.0), Point::new(2.0, 3.0)]).unwrap();
        assert_eq!(
            serde_json::to_string(&path).unwrap(),
            r#"[{"MoveTo":{"x":0.0,"y":1.0}},{"LineTo":{"x":2.0,"y":3.0}}]"#
        );
    }

    #[test]
    fn render_config_defaults_missing_fields() {
        let config: RenderConfig = serde_json::from_str(r#"{"stepped":true}"#).unwrap();
        assert!(config.stepped);
        assert!(!config.filled);
    }
}
