//! Perceptual color-tolerance merging.
//!
//! Quantizes every channel by a tolerance-scaled step, weighted inversely by
//! the channel's luminance contribution (a channel the eye weighs less is
//! merged more coarsely), groups 4-connected same-quantized-color regions,
//! and rewrites each region with one representative original color. This
//! keeps sensor and compression noise from fragmenting flat areas into
//! thousands of tiny blobs.
//!
//! The alpha step derives from the image's own alpha range over non-zero
//! alphas; fully transparent pixels stay in their own bucket.
use std::collections::HashMap;

use log::debug;

use crate::color::{Rgba, LUMA_B, LUMA_G, LUMA_R};
use crate::filters::percentile;
use crate::image::RasterRgba;
use crate::label::ComponentLabeler;

/// The smallest merged luminosity difference: 1 on the blue channel.
const BLUE_TOLERANCE_UNIT: f64 = 1.0;
/// Green merges more coarsely in proportion to its luminance weight.
const GREEN_TOLERANCE_UNIT: f64 = BLUE_TOLERANCE_UNIT * LUMA_B / LUMA_G;
const RED_TOLERANCE_UNIT: f64 = BLUE_TOLERANCE_UNIT * LUMA_B / LUMA_R;
/// The observed alpha range is split into this many tolerance steps.
const ALPHA_RANGE_STEPS: f64 = 5.0;

/// A representative color must clear this alpha percentile of its region...
const ALPHA_HIGH_PERCENTILE: f64 = 90.0;
/// ...or sit inside this central alpha band.
const ALPHA_BAND_UPPER_PERCENTILE: f64 = 75.0;
const ALPHA_BAND_LOWER_PERCENTILE: f64 = 25.0;

/// Merge perceptually-close colors into single representative colors.
///
/// `tolerance` of 0 disables the stage and returns the input unchanged, as
/// does an image with no non-transparent pixel.
pub fn apply_color_tolerance(
    raster: &RasterRgba,
    tolerance: u32,
    labeler: &dyn ComponentLabeler,
) -> RasterRgba {
    if tolerance == 0 {
        return raster.clone();
    }
    let Some(alpha_unit) = alpha_tolerance_unit(raster) else {
        return raster.clone();
    };

    let factors = [
        RED_TOLERANCE_UNIT,
        GREEN_TOLERANCE_UNIT,
        BLUE_TOLERANCE_UNIT,
        alpha_unit,
    ]
    .map(|unit| (1.0 + 2.0 * tolerance as f64 * unit).min(255.0));

    let quantized: Vec<u32> = raster
        .pixels()
        .iter()
        .map(|&px| quantize(px, &factors).to_id())
        .collect();

    let components = labeler.label(&quantized, raster.w, raster.h);
    debug!(
        "apply_color_tolerance tolerance={} components={}",
        tolerance,
        components.len()
    );

    let mut out = raster.clone();
    for component in &components {
        let representative = representative_color(raster, &component.pixels);
        for &i in &component.pixels {
            out.data[i] = representative;
        }
    }
    out
}

/// One alpha tolerance step, from the image's own non-zero alpha range.
/// `None` when the image has no non-transparent pixel.
fn alpha_tolerance_unit(raster: &RasterRgba) -> Option<f64> {
    let mut min_a = u8::MAX;
    let mut max_a = u8::MIN;
    let mut any = false;
    for px in raster.pixels() {
        if px.a == 0 {
            continue;
        }
        any = true;
        min_a = min_a.min(px.a);
        max_a = max_a.max(px.a);
    }
    any.then(|| (max_a - min_a) as f64 / 255.0 / ALPHA_RANGE_STEPS)
}

fn quantize(px: Rgba, factors: &[f64; 4]) -> Rgba {
    let r = (px.r as f64 / factors[0]).floor();
    let g = (px.g as f64 / factors[1]).floor();
    let b = (px.b as f64 / factors[2]).floor();
    let mut a = (px.a as f64 / factors[3]).floor();
    // alpha above the first step shifts up one bucket, reserving bucket 0
    // for full and near-full transparency
    if a > 0.0 && a != 255.0 {
        a += 1.0;
    }
    Rgba::new(r as u8, g as u8, b as u8, a as u8)
}

/// Pick the region's representative: among the original colors present,
/// ordered by pixel count, the first whose alpha clears the region's 90th
/// percentile or sits within its 25th–75th band; most frequent otherwise.
fn representative_color(raster: &RasterRgba, pixels: &[usize]) -> Rgba {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for &i in pixels {
        *counts.entry(raster.data[i].to_id()).or_default() += 1;
    }

    let mut by_area: Vec<(u32, usize)> = counts.into_iter().collect();
    by_area.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let alphas: Vec<f64> = by_area.iter().map(|&(id, _)| (id & 0xff) as f64).collect();
    let p90 = percentile(alphas.clone(), ALPHA_HIGH_PERCENTILE);
    let p75 = percentile(alphas.clone(), ALPHA_BAND_UPPER_PERCENTILE);
    let p25 = percentile(alphas, ALPHA_BAND_LOWER_PERCENTILE);

    for &(id, _) in &by_area {
        let a = (id & 0xff) as f64;
        if a > p90 || (p25 <= a && a <= p75) {
            return Rgba::from_id(id);
        }
    }
    Rgba::from_id(by_area[0].0)
}
