//! # fpraster Core
//!
//! The in-memory footprint model handed over by a footprint parser, the
//! geometric primitives it is rendered with, the layer table, and pad shape
//! translation.
//!
//! Nothing in this crate touches pixels; see `fpraster-renderer`.

pub mod error;
pub mod footprint;
pub mod geometry;
pub mod layer;
pub mod pad;

pub use error::CoreError;
pub use footprint::{
    ArcRecord, CircleRecord, Footprint, LineRecord, PadAttributes, PadRecord, PadShape, Placement,
};
pub use geometry::{Arc, BBox, Circle, Line, Point, Polygon, Primitive, Rectangle};
pub use layer::{LayerColor, LayerName, LayerSpec, LayerStack, MarginKind};
pub use pad::translate_pad;
