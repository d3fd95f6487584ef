//! Drawing sources and the parsed drawing model.

/// Elements, segments and contour splitting.
pub mod model;
/// SVG and path-data parsing.
pub mod parse;
