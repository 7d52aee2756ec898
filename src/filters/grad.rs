//! Image gradients (3×3 Sobel) with magnitude.
//!
//! Convolves the Sobel kernel pair with border clamping and outputs
//! per-pixel `gx`, `gy`, `mag = sqrt(gx^2 + gy^2)`. The background stage
//! thresholds the magnitude against its own percentile, so no normalization
//! is applied.
use crate::image::ImageF32;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [l.row(y_idx[0]), l.row(y_idx[1]), l.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                sum_x += row[x_idx[0]] * kx_row[0]
                    + row[x_idx[1]] * kx_row[1]
                    + row[x_idx[2]] * kx_row[2];
                sum_y += row[x_idx[0]] * ky_row[0]
                    + row[x_idx[1]] * ky_row[1]
                    + row[x_idx[2]] * ky_row[2];
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
        }
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::sobel_gradients;
    use crate::image::ImageF32;

    #[test]
    fn flat_image_has_zero_gradient() {
        let mut img = ImageF32::new(4, 4);
        for v in &mut img.data {
            *v = 10.0;
        }
        let grad = sobel_gradients(&img);
        assert!(grad.mag.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn vertical_step_yields_horizontal_gradient() {
        let mut img = ImageF32::new(4, 4);
        for y in 0..4 {
            for x in 2..4 {
                img.set(x, y, 100.0);
            }
        }
        let grad = sobel_gradients(&img);
        // strongest response on the step columns, none far from it
        assert!(grad.mag.get(1, 1) > 0.0);
        assert!(grad.mag.get(2, 1) > 0.0);
        assert_eq!(grad.gy.get(1, 1), 0.0);
        assert_eq!(grad.mag.get(0, 1), 0.0);
    }
}
