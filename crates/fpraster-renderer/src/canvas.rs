//! Canvas setup: output surface size, viewport and background.

use serde::{Deserialize, Serialize};
use tiny_skia::{Color, GradientStop, LinearGradient, Paint, Point, Rect, SpreadMode, Transform};

use fpraster_core::Footprint;

use crate::error::RenderError;
use crate::surface::Surface;
use crate::viewport::Viewport;

/// Span used when the options ask for a fitted viewport but the footprint
/// has no extent.
const FALLBACK_SPAN_MM: f64 = 2.0;

/// Vertical background gradient, straight RGBA in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Background {
    pub top: [f32; 4],
    pub bottom: [f32; 4],
}

impl Default for Background {
    fn default() -> Self {
        Self {
            top: [0.9, 0.7, 0.2, 1.0],
            bottom: [0.7, 0.0, 0.0, 0.5],
        }
    }
}

/// Output canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Millimetres shown across the canvas. `None` fits the footprint.
    pub span_mm: Option<f64>,
    #[serde(default = "default_anti_alias")]
    pub anti_alias: bool,
    /// `None` leaves the canvas transparent.
    #[serde(default = "default_background")]
    pub background: Option<Background>,
}

fn default_anti_alias() -> bool {
    true
}

fn default_background() -> Option<Background> {
    Some(Background::default())
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::square(2048, 2.0)
    }
}

impl RenderOptions {
    pub fn square(size: u32, span_mm: f64) -> Self {
        Self {
            width: size,
            height: size,
            span_mm: Some(span_mm),
            anti_alias: true,
            background: default_background(),
        }
    }

    pub fn fitted(size: u32) -> Self {
        Self {
            span_mm: None,
            ..Self::square(size, FALLBACK_SPAN_MM)
        }
    }

    pub fn without_background(mut self) -> Self {
        self.background = None;
        self
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn viewport_for(&self, footprint: &Footprint) -> Result<Viewport, RenderError> {
        let (w, h) = (self.width as f64, self.height as f64);
        match self.span_mm {
            Some(span) if span.is_finite() && span > 0.0 => Ok(Viewport::with_span(w, h, span)),
            Some(span) => Err(RenderError::InvalidViewport(span)),
            None => {
                let mut viewport = Viewport::with_span(w, h, FALLBACK_SPAN_MM);
                if let Some(bbox) = footprint.bbox() {
                    viewport.fit_bbox(&bbox);
                }
                Ok(viewport)
            }
        }
    }
}

/// Allocate the output surface, paint the background and install the
/// viewport transform.
pub fn setup_canvas(options: &RenderOptions, viewport: &Viewport) -> Result<Surface, RenderError> {
    let mut surface = Surface::new(options.width, options.height)?;
    surface.set_anti_alias(options.anti_alias);
    if let Some(background) = &options.background {
        paint_background(&mut surface, background)?;
    }
    surface.set_transform(viewport.transform());
    Ok(surface)
}

/// Fill the whole canvas with the background gradient, top to bottom.
pub fn paint_background(surface: &mut Surface, background: &Background) -> Result<(), RenderError> {
    let height = surface.height() as f32;
    let width = surface.width() as f32;
    let stops = vec![
        GradientStop::new(0.0, rgba(background.top)?),
        GradientStop::new(1.0, rgba(background.bottom)?),
    ];
    let shader = LinearGradient::new(
        Point::from_xy(0.0, 0.0),
        Point::from_xy(0.0, height),
        stops,
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or(RenderError::InvalidBackground)?;

    let mut paint = Paint::default();
    paint.shader = shader;
    let rect = Rect::from_xywh(0.0, 0.0, width, height).ok_or(RenderError::InvalidBackground)?;
    surface
        .pixmap_mut()
        .fill_rect(rect, &paint, Transform::identity(), None);
    Ok(())
}

fn rgba([r, g, b, a]: [f32; 4]) -> Result<Color, RenderError> {
    Color::from_rgba(r, g, b, a).ok_or(RenderError::InvalidBackground)
}
