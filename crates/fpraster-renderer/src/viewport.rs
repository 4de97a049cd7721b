use serde::{Deserialize, Serialize};
use tiny_skia::Transform;

use fpraster_core::BBox;

/// Mapping from footprint millimetres to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Center X in footprint coordinates.
    pub center_x: f64,
    /// Center Y in footprint coordinates.
    pub center_y: f64,
    /// Pixels per millimetre.
    pub zoom: f64,
    /// Canvas width in pixels.
    pub canvas_width: f64,
    /// Canvas height in pixels.
    pub canvas_height: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            zoom: 1.0,
            canvas_width,
            canvas_height,
        }
    }

    /// A viewport showing `span_mm` millimetres across the shorter canvas
    /// side, with footprint (0, 0) in the middle.
    pub fn with_span(canvas_width: f64, canvas_height: f64, span_mm: f64) -> Self {
        let mut viewport = Self::new(canvas_width, canvas_height);
        viewport.zoom = canvas_width.min(canvas_height) / span_mm;
        viewport
    }

    /// Millimetres visible across the shorter canvas side.
    pub fn span_mm(&self) -> f64 {
        self.canvas_width.min(self.canvas_height) / self.zoom
    }

    /// Zoom to fit a bounding box, keeping a 10% margin.
    pub fn fit_bbox(&mut self, bbox: &BBox) {
        let width = bbox.width();
        let height = bbox.height();
        if width <= 0.0 && height <= 0.0 {
            return;
        }

        let center = bbox.center();
        self.center_x = center.x;
        self.center_y = center.y;

        let zoom_x = if width > 0.0 { self.canvas_width / width } else { f64::MAX };
        let zoom_y = if height > 0.0 { self.canvas_height / height } else { f64::MAX };
        self.zoom = zoom_x.min(zoom_y) * 0.9;
    }

    /// Convert layout X coordinate to screen coordinate.
    pub fn layout_to_screen_x(&self, layout_x: f64) -> f64 {
        (layout_x - self.center_x) * self.zoom + self.canvas_width / 2.0
    }

    /// Convert layout Y coordinate to screen coordinate.
    pub fn layout_to_screen_y(&self, layout_y: f64) -> f64 {
        (layout_y - self.center_y) * self.zoom + self.canvas_height / 2.0
    }

    /// The canvas transform for this viewport: scale to pixels, then move
    /// the viewport centre to the canvas centre.
    pub fn transform(&self) -> Transform {
        Transform::from_row(
            self.zoom as f32,
            0.0,
            0.0,
            self.zoom as f32,
            self.layout_to_screen_x(0.0) as f32,
            self.layout_to_screen_y(0.0) as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpraster_core::Point;

    #[test]
    fn test_span_maps_to_canvas() {
        let vp = Viewport::with_span(256.0, 256.0, 8.0);
        assert_eq!(vp.zoom, 32.0);
        assert_eq!(vp.layout_to_screen_x(0.0), 128.0);
        assert_eq!(vp.layout_to_screen_x(-4.0), 0.0);
        assert_eq!(vp.layout_to_screen_y(4.0), 256.0);
        assert_eq!(vp.span_mm(), 8.0);
    }

    #[test]
    fn test_two_mm_span_matches_unit_square() {
        // A 2 mm span puts (-1, -1) and (1, 1) on the canvas corners.
        let vp = Viewport::with_span(2048.0, 2048.0, 2.0);
        assert_eq!(vp.layout_to_screen_x(-1.0), 0.0);
        assert_eq!(vp.layout_to_screen_y(1.0), 2048.0);
        assert_eq!(vp.layout_to_screen_x(1.0), 2048.0);
        assert_eq!(vp.layout_to_screen_y(-1.0), 0.0);
    }

    #[test]
    fn test_offset_centre_on_wide_canvas() {
        // Shorter side governs the span; the centre lands mid-canvas.
        let mut vp = Viewport::with_span(200.0, 100.0, 5.0);
        vp.center_x = 1.5;
        vp.center_y = -0.5;
        assert_eq!(vp.zoom, 20.0);
        assert_eq!(vp.layout_to_screen_x(1.5), 100.0);
        assert_eq!(vp.layout_to_screen_y(-0.5), 50.0);
        assert_eq!(vp.layout_to_screen_x(2.0), 110.0);
    }

    #[test]
    fn test_fit_bbox() {
        let mut vp = Viewport::new(100.0, 100.0);
        vp.fit_bbox(&BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 5.0)));
        assert_eq!(vp.center_x, 5.0);
        assert_eq!(vp.center_y, 2.5);
        assert!((vp.zoom - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_fit_flat_bbox_uses_other_axis() {
        let mut vp = Viewport::new(100.0, 100.0);
        vp.fit_bbox(&BBox::new(Point::new(-2.0, 1.0), Point::new(2.0, 1.0)));
        assert!((vp.zoom - 22.5).abs() < 1e-10);
        assert_eq!(vp.center_y, 1.0);
    }

    #[test]
    fn test_transform_maps_origin_to_centre() {
        let vp = Viewport::with_span(256.0, 256.0, 8.0);
        let mut points = [tiny_skia::Point::from_xy(1.0, -0.5)];
        vp.transform().map_points(&mut points);
        assert_eq!((points[0].x, points[0].y), (160.0, 112.0));
    }
}
