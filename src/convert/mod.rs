pub mod diagnostics;
pub mod params;
pub mod pipeline;

pub use self::diagnostics::{ConvertReport, InputDescriptor, ShapeStats, TimingBreakdown};
pub use self::params::ConvertParams;
pub use self::pipeline::{ColorGroup, Conversion, Converter, Shape, ShapeSet};
