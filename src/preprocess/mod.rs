pub mod background;
pub mod color_reduce;

pub use self::background::remove_background;
pub use self::color_reduce::apply_color_tolerance;
