//! Per-layer compositing.
//!
//! A [`LayerBucket`] collects the primitives of one layer. Compositing
//! consumes the bucket: its primitives are drawn into an isolated buffer in
//! insertion order with the layer color, and the buffer is blended onto the
//! destination at the layer's opacity.

use fpraster_core::{LayerName, LayerSpec, Primitive};

use crate::draw::Draw;
use crate::error::RenderError;
use crate::render_data::LayerSummary;
use crate::surface::Surface;

#[derive(Debug, Clone)]
pub struct LayerBucket {
    spec: LayerSpec,
    primitives: Vec<Primitive>,
}

impl LayerBucket {
    pub fn new(spec: LayerSpec) -> Self {
        Self {
            spec,
            primitives: Vec::new(),
        }
    }

    pub fn name(&self) -> LayerName {
        self.spec.name
    }

    pub fn add(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Draw the layer and blend it onto `surface`.
    ///
    /// Aborts on the first primitive that fails to draw; nothing of this
    /// layer reaches `surface` in that case.
    pub fn composite(self, surface: &mut Surface) -> Result<LayerSummary, RenderError> {
        let name = self.spec.name;
        let opacity = self.spec.effective_opacity();

        let mut group = surface.push_group()?;
        group.set_color(self.spec.color);
        for (index, primitive) in self.primitives.iter().enumerate() {
            if let Err(source) = primitive.draw(&mut group) {
                log::error!("layer {name}: primitive #{index} failed to draw: {primitive:?}");
                return Err(RenderError::PrimitiveDraw {
                    layer: name,
                    primitive: format!("{} #{index} {primitive:?}", primitive.kind()),
                    source,
                });
            }
        }
        surface.paint_with_alpha(&group, opacity);

        log::debug!(
            "composited {name}: {} primitives at opacity {opacity}",
            self.primitives.len()
        );
        Ok(LayerSummary {
            name,
            color: self.spec.color.to_f32_array(opacity),
            visible: self.spec.visible,
            primitive_count: self.primitives.len(),
        })
    }
}
