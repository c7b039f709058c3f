//! Emission adapters.
//!
//! Every adapter consumes a [`crate::TableLayout`]; none of them computes placement on its own.

/// Styled HTML markup.
pub mod html;
/// On-screen seat views.
pub mod interactive;
/// SVG to PNG capture.
pub mod raster;
/// Shared visual constants.
pub mod style;
/// Self-contained SVG documents.
pub mod svg;
