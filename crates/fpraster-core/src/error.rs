use thiserror::Error;

use crate::layer::LayerName;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("pad {pad}: shape '{shape}' is not supported")]
    UnsupportedPadShape { pad: String, shape: String },

    #[error("{context} references unknown layer '{layer}'")]
    UnknownLayerReference { layer: String, context: String },

    #[error("layer {0} is declared more than once")]
    DuplicateLayer(LayerName),

    #[error("pad placement needs [x, y] or [x, y, angle], got {0} values")]
    InvalidPlacement(usize),
}
