//! Conversion pipeline driving raster→polygon extraction end-to-end.
//!
//! The [`Converter`] exposes a simple API: feed an RGBA raster and get the
//! traced shapes, optionally grouped by color. Internally it sequences the
//! optional preprocessing stages, labels same-color blobs, and runs
//! trace→classify→simplify per blob. Everything is synchronous and
//! deterministic; an invariant violation aborts the whole conversion.
//!
//! Typical usage:
//! ```no_run
//! use pixel_tracer::convert::{Converter, ConvertParams};
//! use pixel_tracer::image::RasterRgba;
//!
//! # fn example(raster: RasterRgba) {
//! let converter = Converter::new(ConvertParams::default());
//! match converter.convert(&raster) {
//!     Ok(shapes) => println!("traced {} shapes", shapes.shape_count()),
//!     Err(e) => eprintln!("conversion failed: {e}"),
//! }
//! # }
//! ```
use std::time::Instant;

use log::debug;

use crate::color::Rgba;
use crate::contour::simplify::minimal_polygon;
use crate::contour::trace::trace_blob;
use crate::contour::{classify_loops, Contours};
use crate::convert::diagnostics::{ConvertReport, InputDescriptor, ShapeStats, TimingBreakdown};
use crate::convert::params::ConvertParams;
use crate::error::Error;
use crate::image::RasterRgba;
use crate::label::{BlobMask, ComponentLabeler, FloodFill};
use crate::preprocess::{apply_color_tolerance, remove_background};

/// One traced blob: its boundary geometry, fill color, and pixel area.
///
/// Area is a sort key only; it never feeds geometric computation.
#[derive(Clone, Debug)]
pub struct Shape {
    pub contours: Contours,
    pub color: Rgba,
    pub area: usize,
}

/// All shapes of one color, ordered by area descending.
#[derive(Clone, Debug)]
pub struct ColorGroup {
    pub color: Rgba,
    pub shapes: Vec<Shape>,
}

/// Output of one conversion: grouped by color or flat, both ordered by
/// area descending (groups by total area). Orderings are stable, so blobs
/// of equal area keep their discovery order.
#[derive(Clone, Debug)]
pub enum ShapeSet {
    Grouped(Vec<ColorGroup>),
    Flat(Vec<Shape>),
}

impl ShapeSet {
    pub fn shape_count(&self) -> usize {
        match self {
            Self::Grouped(groups) => groups.iter().map(|g| g.shapes.len()).sum(),
            Self::Flat(shapes) => shapes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shape_count() == 0
    }

    /// All shapes in output order, ignoring grouping.
    pub fn iter_shapes(&self) -> Box<dyn Iterator<Item = &Shape> + '_> {
        match self {
            Self::Grouped(groups) => Box::new(groups.iter().flat_map(|g| g.shapes.iter())),
            Self::Flat(shapes) => Box::new(shapes.iter()),
        }
    }
}

/// A [`ShapeSet`] plus what the renderer needs to build a document.
#[derive(Clone, Debug)]
pub struct Conversion {
    pub shapes: ShapeSet,
    /// Raster width, in pixels = lattice units.
    pub width: usize,
    pub height: usize,
    /// Whether the working raster carried any alpha below 255; drives
    /// opacity emission in the renderer.
    pub has_opacity: bool,
    pub report: ConvertReport,
}

/// Orchestrates preprocessing, blob labeling, and per-blob tracing.
pub struct Converter {
    params: ConvertParams,
    labeler: Box<dyn ComponentLabeler>,
}

impl Converter {
    /// Create a converter with the supplied parameters and the default
    /// flood-fill labeler.
    pub fn new(params: ConvertParams) -> Self {
        Self {
            params,
            labeler: Box::new(FloodFill),
        }
    }

    /// Swap in a different connected-component labeler.
    pub fn with_labeler(params: ConvertParams, labeler: Box<dyn ComponentLabeler>) -> Self {
        Self { params, labeler }
    }

    pub fn params(&self) -> &ConvertParams {
        &self.params
    }

    /// Run the conversion, returning the shapes only.
    pub fn convert(&self, raster: &RasterRgba) -> Result<ShapeSet, Error> {
        self.convert_with_diagnostics(raster).map(|c| c.shapes)
    }

    /// Run the conversion and return shapes plus a diagnostics report.
    pub fn convert_with_diagnostics(&self, raster: &RasterRgba) -> Result<Conversion, Error> {
        self.params.validate()?;
        let (width, height) = (raster.w, raster.h);
        debug!(
            "Converter::convert start w={} h={} tolerance={} remove_background={}",
            width, height, self.params.color_tolerance, self.params.remove_background
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        // preprocessing stages each produce a new working raster
        let mut working: Option<RasterRgba> = None;
        if self.params.color_tolerance > 0 {
            let stage_start = Instant::now();
            working = Some(apply_color_tolerance(
                raster,
                self.params.color_tolerance,
                self.labeler.as_ref(),
            ));
            timings.push(
                "color_tolerance",
                stage_start.elapsed().as_secs_f64() * 1000.0,
            );
        }
        if self.params.remove_background {
            let stage_start = Instant::now();
            let src = working.as_ref().unwrap_or(raster);
            working = Some(remove_background(
                src,
                self.params.background_tolerance,
                self.params.max_artifact_size,
                self.labeler.as_ref(),
            ));
            timings.push(
                "remove_background",
                stage_start.elapsed().as_secs_f64() * 1000.0,
            );
        }
        let src = working.as_ref().unwrap_or(raster);

        let stage_start = Instant::now();
        let components = self.labeler.as_ref().label(&src.id_grid(), width, height);
        timings.push("labeling", stage_start.elapsed().as_secs_f64() * 1000.0);

        let stage_start = Instant::now();
        let mut shapes = Vec::new();
        let mut skipped_transparent = 0usize;
        for component in &components {
            let color = src.data[component.pixels[0]];
            if color.is_transparent() {
                skipped_transparent += 1;
                continue;
            }

            let mask = BlobMask::from_component(component, width, height);
            let loops = trace_blob(&mask).map_err(|e| e.for_blob(color.to_id()))?;
            let contours = classify_loops(loops).map_err(|e| e.for_blob(color.to_id()))?;
            let contours = Contours {
                outer: minimal_polygon(&contours.outer),
                holes: contours
                    .holes
                    .iter()
                    .map(|hole| minimal_polygon(hole))
                    .collect(),
            };
            shapes.push(Shape {
                contours,
                color,
                area: component.pixels.len(),
            });
        }
        timings.push("tracing", stage_start.elapsed().as_secs_f64() * 1000.0);

        let has_opacity = src.pixels().iter().any(|px| px.a < 255);
        let stats = ShapeStats {
            blobs: components.len(),
            shapes: shapes.len(),
            skipped_transparent,
            colors: count_distinct_colors(&shapes),
        };
        let shape_set = if self.params.group_by_color {
            ShapeSet::Grouped(group_by_color(shapes))
        } else {
            ShapeSet::Flat(sort_by_area(shapes))
        };

        let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timings.total_ms = total_ms;
        debug!(
            "Converter::convert done shapes={} skipped_transparent={} latency_ms={:.3}",
            stats.shapes, skipped_transparent, total_ms
        );

        Ok(Conversion {
            shapes: shape_set,
            width,
            height,
            has_opacity,
            report: ConvertReport {
                input: InputDescriptor {
                    width,
                    height,
                    pixels: width * height,
                },
                timings,
                stats,
            },
        })
    }
}

fn count_distinct_colors(shapes: &[Shape]) -> usize {
    let mut seen: Vec<u32> = shapes.iter().map(|s| s.color.to_id()).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

fn sort_by_area(mut shapes: Vec<Shape>) -> Vec<Shape> {
    shapes.sort_by(|a, b| b.area.cmp(&a.area));
    shapes
}

fn group_by_color(shapes: Vec<Shape>) -> Vec<ColorGroup> {
    let mut groups: Vec<ColorGroup> = Vec::new();
    for shape in shapes {
        match groups.iter_mut().find(|g| g.color == shape.color) {
            Some(group) => group.shapes.push(shape),
            None => groups.push(ColorGroup {
                color: shape.color,
                shapes: vec![shape],
            }),
        }
    }
    for group in &mut groups {
        group.shapes.sort_by(|a, b| b.area.cmp(&a.area));
    }
    groups.sort_by(|a, b| {
        let total_a: usize = a.shapes.iter().map(|s| s.area).sum();
        let total_b: usize = b.shapes.iter().map(|s| s.area).sum();
        total_b.cmp(&total_a)
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::{Converter, ShapeSet};
    use crate::color::Rgba;
    use crate::convert::params::ConvertParams;
    use crate::image::RasterRgba;

    fn flat_params() -> ConvertParams {
        ConvertParams {
            group_by_color: false,
            ..Default::default()
        }
    }

    #[test]
    fn empty_raster_produces_empty_output() {
        let converter = Converter::new(flat_params());
        let shapes = converter.convert(&RasterRgba::new(0, 0)).expect("convert");
        assert!(shapes.is_empty());
    }

    #[test]
    fn fully_transparent_raster_produces_empty_output() {
        let converter = Converter::new(flat_params());
        let conversion = converter
            .convert_with_diagnostics(&RasterRgba::new(4, 4))
            .expect("convert");
        assert!(conversion.shapes.is_empty());
        assert_eq!(conversion.report.stats.skipped_transparent, 1);
        assert!(conversion.has_opacity);
    }

    #[test]
    fn invalid_parameters_fail_before_processing() {
        let converter = Converter::new(ConvertParams {
            background_tolerance: -1.0,
            ..Default::default()
        });
        assert!(converter.convert(&RasterRgba::new(2, 2)).is_err());
    }

    #[test]
    fn flat_output_sorts_by_area_descending() {
        // row: A BB CCC
        let a = Rgba::new(1, 0, 0, 255);
        let b = Rgba::new(2, 0, 0, 255);
        let c = Rgba::new(3, 0, 0, 255);
        let raster = RasterRgba::from_pixels(6, 1, vec![a, b, b, c, c, c]).unwrap();

        let converter = Converter::new(flat_params());
        let ShapeSet::Flat(shapes) = converter.convert(&raster).expect("convert") else {
            panic!("expected flat output");
        };
        let areas: Vec<_> = shapes.iter().map(|s| s.area).collect();
        assert_eq!(areas, vec![3, 2, 1]);
        assert_eq!(shapes[0].color, c);
    }

    #[test]
    fn grouping_orders_colors_by_total_area_with_stable_ties() {
        // A BB A: color A has two 1-pixel blobs, color B one 2-pixel blob
        let a = Rgba::new(1, 0, 0, 255);
        let b = Rgba::new(2, 0, 0, 255);
        let raster = RasterRgba::from_pixels(4, 1, vec![a, b, b, a]).unwrap();
        // totals tie at 2; A was discovered first and must stay first
        let converter = Converter::new(ConvertParams::default());
        let ShapeSet::Grouped(groups) = converter.convert(&raster).expect("convert") else {
            panic!("expected grouped output");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].color, a);
        assert_eq!(groups[0].shapes.len(), 2);
        assert_eq!(groups[1].color, b);
        assert_eq!(groups[1].shapes.len(), 1);
    }

    #[test]
    fn single_pixel_raster_traces_one_unit_square() {
        let color = Rgba::new(9, 9, 9, 255);
        let raster = RasterRgba::from_pixels(1, 1, vec![color]).unwrap();
        let converter = Converter::new(flat_params());
        let ShapeSet::Flat(shapes) = converter.convert(&raster).expect("convert") else {
            panic!("expected flat output");
        };
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].area, 1);
        assert_eq!(shapes[0].contours.outer.len(), 4);
        assert!(shapes[0].contours.holes.is_empty());
    }
}
