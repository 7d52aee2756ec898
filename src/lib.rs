#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod color;
pub mod config;
pub mod contour;
pub mod convert;
pub mod error;
pub mod image;
pub mod label;
pub mod svg;

// Numeric building blocks shared by the preprocessing stages.
pub mod filters;
pub mod preprocess;

// --- High-level re-exports -------------------------------------------------

// Main entry points: converter + results.
pub use crate::convert::{Conversion, Converter, ConvertParams, Shape, ShapeSet};
pub use crate::error::Error;

use std::path::Path;

/// Small prelude for quick experiments.
///
/// ```no_run
/// use pixel_tracer::prelude::*;
///
/// # fn main() -> Result<(), String> {
/// let raster = pixel_tracer::image::io::load_rgba_image(std::path::Path::new("in.png"))?;
/// let shapes = Converter::new(ConvertParams::default())
///     .convert(&raster)
///     .map_err(|e| e.to_string())?;
/// println!("traced {} shapes", shapes.shape_count());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::convert::{Conversion, Converter, ConvertParams, Shape, ShapeSet};
    pub use crate::image::RasterRgba;
    pub use crate::svg::SvgDocument;
}

/// Convert a bitmap file into an SVG document in one call.
///
/// Wires the raster reader, the converter, and the renderer; library users
/// wanting intermediate results use [`Converter`] directly.
pub fn trace_file(path: &Path, params: &ConvertParams) -> Result<svg::SvgDocument, String> {
    let raster = image::io::load_rgba_image(path)?;
    let conversion = Converter::new(params.clone())
        .convert_with_diagnostics(&raster)
        .map_err(|e| format!("Conversion failed for {}: {e}", path.display()))?;
    Ok(svg::render_document(&conversion))
}
