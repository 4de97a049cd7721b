//! Immediate-mode drawing surface over a `tiny_skia::Pixmap`.
//!
//! Keeps a current transform, fill color and stroke settings, with a
//! save/restore stack. `Surface::save` hands out a guard that restores the
//! saved state when dropped, including during unwinding.

use std::ops::{Deref, DerefMut};

use tiny_skia::{
    BlendMode, FillRule, FilterQuality, LineCap, LineJoin, Paint, Path, Pixmap,
    PixmapPaint, Stroke, Transform,
};

use fpraster_core::LayerColor;

use crate::error::RenderError;

#[derive(Debug, Clone, Copy)]
struct GraphicsState {
    transform: Transform,
    line_width: f32,
}

pub struct Surface {
    pixmap: Pixmap,
    transform: Transform,
    paint: Paint<'static>,
    stroke: Stroke,
    saved: Vec<GraphicsState>,
}

impl Surface {
    /// A transparent surface with round line caps and joins.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::SurfaceAllocation { width, height })?;
        let mut paint = Paint::default();
        paint.anti_alias = true;
        let stroke = Stroke {
            width: 1.0,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Stroke::default()
        };
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            paint,
            stroke,
            saved: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    // ── Transform ────────────────────────────────────────────────────

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.pre_translate(dx as f32, dy as f32);
    }

    /// Rotate the user space by `degrees` (clockwise on screen).
    pub fn rotate(&mut self, degrees: f64) {
        self.transform = self.transform.pre_rotate(degrees as f32);
    }

    // ── Paint state ──────────────────────────────────────────────────

    pub fn set_color(&mut self, color: LayerColor) {
        self.paint.set_color_rgba8(color.r, color.g, color.b, 255);
    }

    pub fn set_anti_alias(&mut self, anti_alias: bool) {
        self.paint.anti_alias = anti_alias;
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.stroke.width = width as f32;
    }

    pub fn line_width(&self) -> f64 {
        self.stroke.width as f64
    }

    // ── Drawing ──────────────────────────────────────────────────────

    pub fn fill_path(&mut self, path: &Path) {
        self.pixmap
            .fill_path(path, &self.paint, FillRule::Winding, self.transform, None);
    }

    pub fn stroke_path(&mut self, path: &Path) {
        self.pixmap
            .stroke_path(path, &self.paint, &self.stroke, self.transform, None);
    }

    // ── State stack ──────────────────────────────────────────────────

    /// Save the transform and line width; they are restored when the
    /// returned guard goes out of scope.
    pub fn save(&mut self) -> SavedState<'_> {
        let depth = self.saved.len();
        self.saved.push(GraphicsState {
            transform: self.transform,
            line_width: self.stroke.width,
        });
        SavedState {
            surface: self,
            depth,
        }
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    fn restore_to(&mut self, depth: usize) {
        if let Some(state) = self.saved.get(depth).copied() {
            self.transform = state.transform;
            self.stroke.width = state.line_width;
            self.saved.truncate(depth);
        }
    }

    // ── Groups ───────────────────────────────────────────────────────

    /// A blank surface of the same size that shares this surface's
    /// transform, stroke and anti-aliasing settings.
    pub fn push_group(&self) -> Result<Surface, RenderError> {
        let mut group = Surface::new(self.width(), self.height())?;
        group.transform = self.transform;
        group.stroke = self.stroke.clone();
        group.paint.anti_alias = self.paint.anti_alias;
        Ok(group)
    }

    /// Blend `group` onto this surface with a uniform `alpha`.
    pub fn paint_with_alpha(&mut self, group: &Surface, alpha: f32) {
        let paint = PixmapPaint {
            opacity: alpha.clamp(0.0, 1.0),
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Nearest,
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            group.pixmap.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }

    // ── Pixels ───────────────────────────────────────────────────────

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Straight (non-premultiplied) RGBA of one pixel.
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }
}

/// Guard returned by [`Surface::save`].
pub struct SavedState<'a> {
    surface: &'a mut Surface,
    depth: usize,
}

impl Deref for SavedState<'_> {
    type Target = Surface;

    fn deref(&self) -> &Surface {
        &*self.surface
    }
}

impl DerefMut for SavedState<'_> {
    fn deref_mut(&mut self) -> &mut Surface {
        &mut *self.surface
    }
}

impl Drop for SavedState<'_> {
    fn drop(&mut self) {
        self.surface.restore_to(self.depth);
    }
}
