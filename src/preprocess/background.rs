//! Heuristic background removal.
//!
//! Assumes a solid opaque background (or solid plus anti-aliasing): detects
//! the subject's edge structure in a blurred luminance map, grows a strict
//! and a loose coverage mask from it, and reclassifies same-color blobs
//! falling mostly outside both as fully transparent. Small blobs that only
//! the loose mask covers survive, so fine detail near the subject's edge is
//! kept while large, far, low-detail regions are removed.
//!
//! The percentile and overlap thresholds below are inherited tuning knobs;
//! their exact interaction is preserved, not re-derived.
use log::debug;

use crate::color::Rgba;
use crate::filters::{fill_holes, gaussian_blur_u8, percentile, sobel_gradients};
use crate::image::{ImageF32, RasterRgba};
use crate::label::ComponentLabeler;

/// Skip removal entirely when any pixel's alpha is below this fraction of
/// full opacity: the image already has a soft or cut-out background.
const OPAQUE_GUARD_FRACTION: f64 = 0.95;
/// Gradient magnitudes above this percentile of their own distribution form
/// the strict edge mask.
const BASE_MASK_PERCENTILE: f64 = 50.0;
/// The re-blurred strict mask is thresholded at this percentile to form the
/// loose mask.
const DILATED_MASK_PERCENTILE: f64 = 20.0;
/// Blur sigma is `background_tolerance / this * width`.
const BLUR_WIDTH_DIVISOR: f64 = 128.0;
/// A blob is covered by a mask when more than this fraction of its pixels
/// fall inside it.
const MASK_OVERLAP_FRACTION: f64 = 0.5;

/// Reclassify background blobs of `raster` as fully transparent.
///
/// `background_tolerance` scales the blur used for edge detection;
/// `max_artifact_size` (percent of total pixels) caps the size of blobs the
/// loose mask may rescue.
pub fn remove_background(
    raster: &RasterRgba,
    background_tolerance: f64,
    max_artifact_size: f64,
    labeler: &dyn ComponentLabeler,
) -> RasterRgba {
    let Some(min_alpha) = raster.min_alpha() else {
        return raster.clone();
    };
    if (min_alpha as f64) < OPAQUE_GUARD_FRACTION * 255.0 {
        debug!("remove_background skipped: min_alpha={min_alpha} below opaque guard");
        return raster.clone();
    }

    let (w, h) = (raster.w, raster.h);
    let sigma = background_tolerance / BLUR_WIDTH_DIVISOR * w as f64;
    let artifact_limit = max_artifact_size / 100.0 * (w * h) as f64;

    // alpha-weighted luminance, rounded to 8 bits
    let gray: Vec<u8> = raster
        .pixels()
        .iter()
        .map(|px| px.luminance().round() as u8)
        .collect();
    let blurred = gaussian_blur_u8(&gray, w, h, sigma);
    let grad = sobel_gradients(&ImageF32::from_u8(w, h, &blurred));

    let magnitudes: Vec<f64> = grad.mag.data.iter().map(|&v| v as f64).collect();
    let cut = percentile(magnitudes.clone(), BASE_MASK_PERCENTILE);
    let mut base_mask: Vec<bool> = magnitudes.iter().map(|&v| v > cut).collect();
    // interior regions enclosed by detected edges belong to the subject
    fill_holes(&mut base_mask, w, h);

    let mask_gray: Vec<u8> = base_mask.iter().map(|&b| if b { 255 } else { 0 }).collect();
    let loose = gaussian_blur_u8(&mask_gray, w, h, sigma);
    let cut = percentile(loose.iter().map(|&v| v as f64).collect(), DILATED_MASK_PERCENTILE);
    let dilated_mask: Vec<bool> = loose.iter().map(|&v| (v as f64) > cut).collect();

    let components = labeler.label(&raster.id_grid(), w, h);
    let mut out = raster.clone();
    let mut removed = 0usize;
    for component in &components {
        let area = component.pixels.len();
        let base_overlap = component.pixels.iter().filter(|&&i| base_mask[i]).count();
        if base_overlap as f64 > MASK_OVERLAP_FRACTION * area as f64 {
            continue;
        }

        let dilated_overlap = component.pixels.iter().filter(|&&i| dilated_mask[i]).count();
        if dilated_overlap as f64 > MASK_OVERLAP_FRACTION * area as f64
            && (area as f64) < artifact_limit
        {
            continue;
        }

        for &i in &component.pixels {
            out.data[i] = Rgba::TRANSPARENT;
        }
        removed += 1;
    }

    debug!(
        "remove_background sigma={:.3} blobs={} removed={}",
        sigma,
        components.len(),
        removed
    );
    out
}

#[cfg(test)]
mod tests {
    use super::remove_background;
    use crate::color::Rgba;
    use crate::image::RasterRgba;
    use crate::label::FloodFill;

    const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    const BLACK: Rgba = Rgba::new(0, 0, 0, 255);

    #[test]
    fn soft_background_skips_removal() {
        let mut raster = RasterRgba::new(4, 4);
        for px in &mut raster.data {
            *px = WHITE;
        }
        raster.set(0, 0, Rgba::new(255, 255, 255, 200));

        let out = remove_background(&raster, 1.0, 2.0, &FloodFill);
        assert_eq!(out, raster);
    }

    #[test]
    fn solid_background_around_a_subject_turns_transparent() {
        let mut raster = RasterRgba::new(16, 16);
        for px in &mut raster.data {
            *px = WHITE;
        }
        for y in 6..10 {
            for x in 6..10 {
                raster.set(x, y, BLACK);
            }
        }

        let out = remove_background(&raster, 1.0, 2.0, &FloodFill);
        assert_eq!(out.get(8, 8), BLACK, "subject must survive");
        assert_eq!(out.get(0, 0), Rgba::TRANSPARENT, "background removed");
        assert_eq!(out.get(15, 15), Rgba::TRANSPARENT);
    }

    #[test]
    fn empty_raster_is_returned_as_is() {
        let raster = RasterRgba::new(0, 0);
        assert_eq!(remove_background(&raster, 1.0, 2.0, &FloodFill), raster);
    }
}
