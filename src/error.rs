//! Error taxonomy of the conversion pipeline.
//!
//! Invariant violations abort the whole conversion with a diagnostic naming
//! the offending blob or segment; degenerate inputs are not errors and never
//! reach this type. The pipeline is deterministic, so nothing here is
//! retryable.
use crate::contour::Point;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "contour walk stuck at segment ({from:?} -> {to:?}) with {remaining} segments unconsumed"
    )]
    ChainStuck {
        from: Point,
        to: Point,
        remaining: usize,
    },

    #[error("no single loop attains all four bounding-box extremes among {loops} loops")]
    AmbiguousOuterLoop { loops: usize },

    #[error("blob mask has no set cells")]
    EmptyBlob,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("blob with color {color:#010x}: {source}")]
    Blob { color: u32, source: Box<Error> },
}

impl Error {
    /// Attach the owning blob's color identity to a geometry error.
    pub(crate) fn for_blob(self, color: u32) -> Error {
        Error::Blob {
            color,
            source: Box::new(self),
        }
    }
}
