use serde::{Deserialize, Serialize};

use fpraster_core::LayerName;

/// What one composited layer contributed to the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub name: LayerName,
    pub color: [f32; 4], // RGBA, alpha = effective opacity
    pub visible: bool,
    pub primitive_count: usize,
}

/// Summary of a finished render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSummary {
    pub footprint: String,
    pub viewport: super::Viewport,
    /// Layers in compositing order.
    pub layers: Vec<LayerSummary>,
}

impl RenderSummary {
    pub fn layer(&self, name: LayerName) -> Option<&LayerSummary> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn total_primitives(&self) -> usize {
        self.layers.iter().map(|l| l.primitive_count).sum()
    }
}
