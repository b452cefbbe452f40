//! Path-geometry normalization of SVG documents.
//!
//! Two logical components in a pipeline:
//!
//! - `scan_geometry`: read-only extraction of the endpoint bounding box
//!   over every `path` element
//! - `normalize_svg` / [`normalize_file`]: translation of all path
//!   coordinates by the negated minimum corner plus the root
//!   `viewBox`/`width`/`height` rewrite
//!
//! The box must be globally known before any path is rewritten, so the
//! split is structural: extraction returns an immutable `BoundingBox`
//! that the rewrite pass consumes.

mod bounds;
mod error;
mod normalize;
mod path;

pub use normalize::normalize_file;
