use pixel_tracer::color::Rgba;
use pixel_tracer::image::RasterRgba;

/// Generates a raster filled with one opaque color.
pub fn solid(width: usize, height: usize, color: Rgba) -> RasterRgba {
    let mut raster = RasterRgba::new(width, height);
    for px in &mut raster.data {
        *px = color;
    }
    raster
}

/// Generates a 3×3 raster with a distinct opaque color at every pixel.
pub fn distinct_colors_3x3() -> RasterRgba {
    let mut raster = RasterRgba::new(3, 3);
    for y in 0..3 {
        for x in 0..3 {
            let v = (y * 3 + x) as u8;
            raster.set(x, y, Rgba::new(10 + v, 20 + v, 30 + v, 255));
        }
    }
    raster
}

/// Generates a two-color checkerboard with 1×1 cells.
pub fn checkerboard(width: usize, height: usize, a: Rgba, b: Rgba) -> RasterRgba {
    let mut raster = RasterRgba::new(width, height);
    for y in 0..height {
        for x in 0..width {
            raster.set(x, y, if (x + y) & 1 == 0 { a } else { b });
        }
    }
    raster
}

/// Generates a transparent raster with an opaque square ring: an
/// `outer`-sized square whose inner `outer - 2*thickness` square is left
/// transparent.
pub fn square_ring(outer: usize, thickness: usize, color: Rgba) -> RasterRgba {
    assert!(outer > 2 * thickness, "ring must enclose a hole");
    let mut raster = RasterRgba::new(outer, outer);
    for y in 0..outer {
        for x in 0..outer {
            let inside_hole = (thickness..outer - thickness).contains(&x)
                && (thickness..outer - thickness).contains(&y);
            if !inside_hole {
                raster.set(x, y, color);
            }
        }
    }
    raster
}
