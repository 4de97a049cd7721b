//! Scene assembly: routing footprint records into layer buckets and
//! compositing them in layer-table order.

use tiny_skia::Pixmap;

use fpraster_core::{translate_pad, CoreError, Footprint, LayerName, LayerStack, Primitive};

use crate::canvas::{setup_canvas, RenderOptions};
use crate::compositor::LayerBucket;
use crate::error::RenderError;
use crate::render_data::{LayerSummary, RenderSummary};
use crate::surface::Surface;

/// One bucket per configured layer, in compositing order.
#[derive(Debug, Clone)]
pub struct Scene {
    buckets: Vec<LayerBucket>,
}

impl Scene {
    /// Empty buckets for every layer of `stack`.
    pub fn new(stack: &LayerStack) -> Self {
        Self {
            buckets: stack
                .all_layers()
                .iter()
                .cloned()
                .map(LayerBucket::new)
                .collect(),
        }
    }

    /// Build the scene for `footprint`: graphic lines, arcs and circles go
    /// to the layer they name; every pad contributes one primitive per layer
    /// it is on.
    pub fn assemble(footprint: &Footprint, stack: &LayerStack) -> Result<Self, RenderError> {
        let mut scene = Self::new(stack);

        for (i, line) in footprint.lines.iter().enumerate() {
            let layer = parse_record_layer(&line.layer, || format!("line #{i}"))?;
            scene.add(layer, Primitive::Line(line.to_line()))?;
        }
        for (i, arc) in footprint.arcs.iter().enumerate() {
            let layer = parse_record_layer(&arc.layer, || format!("arc #{i}"))?;
            scene.add(layer, Primitive::Arc(arc.to_arc()))?;
        }
        for (i, circle) in footprint.circles.iter().enumerate() {
            let layer = parse_record_layer(&circle.layer, || format!("circle #{i}"))?;
            scene.add(layer, Primitive::Circle(circle.to_circle()))?;
        }
        for pad in &footprint.pads {
            for layer_name in &pad.layers {
                let layer = LayerName::resolve_pad_layer(layer_name).map_err(|_| {
                    CoreError::UnknownLayerReference {
                        layer: layer_name.clone(),
                        context: format!("pad {}", pad.label()),
                    }
                })?;
                scene.add(layer, translate_pad(pad, layer)?)?;
            }
        }

        log::debug!(
            "assembled '{}': {} primitives from {} records",
            footprint.name,
            scene.primitive_count(),
            footprint.record_count()
        );
        Ok(scene)
    }

    /// Append `primitive` to the bucket of `layer`.
    pub fn add(&mut self, layer: LayerName, primitive: Primitive) -> Result<(), RenderError> {
        let bucket = self
            .buckets
            .iter_mut()
            .find(|b| b.name() == layer)
            .ok_or_else(|| CoreError::UnknownLayerReference {
                layer: layer.to_string(),
                context: "layer table".to_string(),
            })?;
        log::trace!("{layer} <- {}", primitive.kind());
        bucket.add(primitive);
        Ok(())
    }

    pub fn bucket(&self, layer: LayerName) -> Option<&LayerBucket> {
        self.buckets.iter().find(|b| b.name() == layer)
    }

    pub fn primitive_count(&self) -> usize {
        self.buckets.iter().map(LayerBucket::len).sum()
    }

    /// Composite every layer onto `surface`, in order. Stops at the first
    /// failing layer.
    pub fn composite(self, surface: &mut Surface) -> Result<Vec<LayerSummary>, RenderError> {
        self.buckets
            .into_iter()
            .map(|bucket| bucket.composite(surface))
            .collect()
    }
}

fn parse_record_layer(
    layer: &str,
    context: impl FnOnce() -> String,
) -> Result<LayerName, CoreError> {
    layer
        .parse()
        .map_err(|_| CoreError::UnknownLayerReference {
            layer: layer.to_string(),
            context: context(),
        })
}

/// A finished render: the canvas plus what went into it.
pub struct Rendering {
    pub pixmap: Pixmap,
    pub summary: RenderSummary,
}

/// Render `footprint` with the layer table `stack`.
///
/// The scene is assembled before any pixels are allocated, so routing and
/// pad shape errors surface without touching a canvas.
pub fn render(
    footprint: &Footprint,
    stack: &LayerStack,
    options: &RenderOptions,
) -> Result<Rendering, RenderError> {
    let scene = Scene::assemble(footprint, stack)?;
    let viewport = options.viewport_for(footprint)?;
    let mut surface = setup_canvas(options, &viewport)?;
    let layers = scene.composite(&mut surface)?;

    let summary = RenderSummary {
        footprint: footprint.name.clone(),
        viewport,
        layers,
    };
    log::info!(
        "rendered '{}' at {}x{} ({} primitives, {:.3} mm span)",
        summary.footprint,
        options.width,
        options.height,
        summary.total_primitives(),
        viewport.span_mm()
    );
    Ok(Rendering {
        pixmap: surface.into_pixmap(),
        summary,
    })
}
