//! # fpraster Renderer
//!
//! CPU raster renderer for footprints. Records are routed into per-layer
//! buckets, each bucket is drawn into an isolated buffer with the layer
//! color and blended onto the canvas at the layer opacity, in layer-table
//! order.
//!
//! Drawing goes through [`Surface`], a tiny-skia pixmap with a transform
//! stack; [`Draw`] maps the geometric primitives from `fpraster-core` onto
//! it.

pub mod canvas;
pub mod compositor;
pub mod draw;
pub mod error;
pub mod render_data;
pub mod scene;
pub mod surface;
pub mod viewport;

pub use canvas::{setup_canvas, Background, RenderOptions};
pub use compositor::LayerBucket;
pub use draw::Draw;
pub use error::{DrawError, RenderError};
pub use render_data::{LayerSummary, RenderSummary};
pub use scene::{render, Rendering, Scene};
pub use surface::{SavedState, Surface};
pub use viewport::Viewport;
