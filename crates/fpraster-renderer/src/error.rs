use thiserror::Error;

use fpraster_core::{CoreError, LayerName};

/// Failure of a single primitive's draw call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("{primitive} has a non-finite coordinate")]
    NonFinite { primitive: &'static str },

    #[error("{primitive} has negative {field} ({value})")]
    NegativeExtent {
        primitive: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),

    #[error("{primitive} produced an empty path")]
    EmptyPath { primitive: &'static str },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("layer {layer}: failed to draw {primitive}: {source}")]
    PrimitiveDraw {
        layer: LayerName,
        primitive: String,
        #[source]
        source: DrawError,
    },

    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("invalid background gradient")]
    InvalidBackground,

    #[error("invalid viewport span {0} mm")]
    InvalidViewport(f64),
}
