pub mod blur;
pub mod grad;
pub mod mask;

pub use self::blur::gaussian_blur_u8;
pub use self::grad::{sobel_gradients, Grad};
pub use self::mask::{fill_holes, percentile};
