//! I/O helpers for RGBA rasters and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG/etc. into an owned RGBA raster.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! The loader normalizes every fully-transparent pixel to
//! [`Rgba::TRANSPARENT`] so downstream color-identity comparisons treat all
//! transparency as one color class.
use super::RasterRgba;
use crate::color::Rgba;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to an RGBA raster.
pub fn load_rgba_image(path: &Path) -> Result<RasterRgba, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .pixels()
        .map(|p| {
            if p.0[3] == 0 {
                Rgba::TRANSPARENT
            } else {
                Rgba::new(p.0[0], p.0[1], p.0[2], p.0[3])
            }
        })
        .collect();
    RasterRgba::from_pixels(width, height, data)
        .map_err(|e| format!("Failed to load {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_rgba_image;
    use crate::color::Rgba;
    use image::{ImageBuffer, Rgba as ImgRgba};

    #[test]
    fn loader_normalizes_fully_transparent_pixels() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("pixels.png");

        let img = ImageBuffer::from_fn(2, 1, |x, _| {
            if x == 0 {
                ImgRgba([10u8, 20, 30, 0])
            } else {
                ImgRgba([10u8, 20, 30, 255])
            }
        });
        img.save(&path).expect("save png");

        let raster = load_rgba_image(&path).expect("load png");
        assert_eq!(raster.get(0, 0), Rgba::TRANSPARENT);
        assert_eq!(raster.get(1, 0), Rgba::new(10, 20, 30, 255));
    }
}
