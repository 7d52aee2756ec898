//! Serializable report describing one conversion run.
//!
//! Emitted by `convert_with_diagnostics` and written as pretty JSON by the
//! report tool; geometry itself is not duplicated here, only descriptors.
use serde::Serialize;

/// Dimensions of the raster fed into the pipeline.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub pixels: usize,
}

/// Wall-clock timings per stage, in milliseconds.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StageTiming {
    pub name: &'static str,
    pub elapsed_ms: f64,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &'static str, elapsed_ms: f64) {
        self.stages.push(StageTiming { name, elapsed_ms });
    }
}

/// Counts of what the blob pass produced.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ShapeStats {
    /// Components found by the labeler, transparent ones included.
    pub blobs: usize,
    /// Shapes that made it into the output.
    pub shapes: usize,
    /// Blobs dropped for being fully transparent.
    pub skipped_transparent: usize,
    /// Distinct colors among the emitted shapes.
    pub colors: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct ConvertReport {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub stats: ShapeStats,
}
