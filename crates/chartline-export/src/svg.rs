//! SVG export serializer.
//!
//! Converts chart paths into an SVG string with `<path>` elements using
//! the [`svg`] crate for document construction, XML escaping, and path
//! data formatting.
//!
//! Each [`StyledPath`] becomes a separate `<path>` element using `M`
//! (move to) and `L` (line to) commands. Filled paths are closed with
//! `Z` and get a translucent fill in their stroke colour.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Element, Path, Title};
use svg::node::{Node, Text, Value};

use chartline_reduce::{Dimensions, LinePath, PathSegment};

/// Opacity of the area under a filled path.
const FILL_OPACITY: f64 = 0.25;

/// Metadata to embed in the SVG document.
///
/// All fields are optional. Text values are XML-escaped automatically by
/// the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, emitted as `<title>`.
    pub title: Option<&'a str>,

    /// Document description, emitted as `<desc>`.
    pub description: Option<&'a str>,

    /// Serialized render configuration, emitted inside a `<metadata>`
    /// element wrapped in a namespaced `<chartline:config>` element so
    /// exported files carry machine-parseable settings.
    pub config_json: Option<&'a str>,
}

/// A path plus how to draw it.
#[derive(Debug, Clone, Copy)]
pub struct StyledPath<'a> {
    /// Geometry in pixel space.
    pub path: &'a LinePath,
    /// Stroke colour (any SVG paint value).
    pub stroke: &'a str,
    /// Close the path and fill the enclosed area.
    pub filled: bool,
}

impl<'a> StyledPath<'a> {
    /// An unfilled path with the given stroke colour.
    #[must_use]
    pub const fn line(path: &'a LinePath, stroke: &'a str) -> Self {
        Self {
            path,
            stroke,
            filled: false,
        }
    }
}

/// Build an SVG path `d` attribute string from a line path.
///
/// `MoveTo` segments become `M` commands and `LineTo` segments become `L`
/// commands. Returns an empty string for paths with fewer than 2 vertices.
///
/// Coordinates are formatted by the [`svg`] crate using `f32` precision
/// (sufficient for pixel-space coordinates).
///
/// # Examples
///
/// ```
/// use chartline_reduce::{LinePath, Point};
/// use chartline_export::build_path_data;
///
/// let path = LinePath::from_points(&[
///     Point::new(10.0, 20.0),
///     Point::new(30.0, 40.0),
/// ])
/// .unwrap();
/// assert_eq!(build_path_data(&path), "M10,20 L30,40");
/// ```
#[must_use]
pub fn build_path_data(path: &LinePath) -> String {
    path_data(path, false)
}

fn path_data(path: &LinePath, close: bool) -> String {
    if path.len() < 2 {
        return String::new();
    }

    let mut data = Data::new();
    for segment in path.segments() {
        data = match *segment {
            PathSegment::MoveTo(p) => data.move_to((p.x, p.y)),
            PathSegment::LineTo(p) => data.line_to((p.x, p.y)),
        };
    }
    if close {
        data = data.close();
    }
    String::from(Value::from(data))
}

/// Serialize chart paths into an SVG document string.
///
/// The `viewBox` is set from [`Dimensions`] so the SVG coordinate space
/// matches the chart's pixel grid. Paths with fewer than 2 vertices are
/// skipped. Later paths are drawn on top of earlier ones.
///
/// # Examples
///
/// ```
/// use chartline_reduce::{Dimensions, LinePath, Point};
/// use chartline_export::{StyledPath, SvgMetadata, to_svg};
///
/// let path = LinePath::from_points(&[Point::new(10.0, 15.0), Point::new(12.5, 18.3)]).unwrap();
/// let dims = Dimensions { width: 800, height: 600 };
/// let metadata = SvgMetadata {
///     title: Some("cpu"),
///     description: Some("Exported by chartline"),
///     ..SvgMetadata::default()
/// };
/// let svg = to_svg(&[StyledPath::line(&path, "black")], dims, &metadata);
/// assert!(svg.contains("<title>cpu</title>"));
/// assert!(svg.contains("<desc>Exported by chartline</desc>"));
/// assert!(svg.contains("M10,15 L12.5,18.3"));
/// ```
#[must_use]
pub fn to_svg(paths: &[StyledPath<'_>], dimensions: Dimensions, metadata: &SvgMetadata<'_>) -> String {
    let w = dimensions.width;
    let h = dimensions.height;
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    if let Some(config_json) = metadata.config_json {
        let mut config_el = Element::new("chartline:config");
        config_el.assign("xmlns:chartline", "https://chartline.dev/ns/1");
        config_el.append(Text::new(config_json));
        let mut metadata_el = Element::new("metadata");
        metadata_el.append(config_el);
        doc = doc.add(metadata_el);
    }

    for styled in paths {
        let d = path_data(styled.path, styled.filled);
        if d.is_empty() {
            continue;
        }

        let mut path = Path::new()
            .set("d", d)
            .set("stroke", styled.stroke)
            .set("stroke-width", 1);
        path = if styled.filled {
            path.set("fill", styled.stroke)
                .set("fill-opacity", FILL_OPACITY)
        } else {
            path.set("fill", "none")
        };
        doc = doc.add(path);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
