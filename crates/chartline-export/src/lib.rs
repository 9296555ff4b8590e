//! chartline-export: Pure format serializers (sans-IO)
//!
//! Converts chart paths into output formats. Currently supports SVG.

pub mod svg;

pub use svg::{StyledPath, SvgMetadata, build_path_data, to_svg};
