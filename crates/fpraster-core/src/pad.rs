//! Pad shape translation.
//!
//! Turns a pad record into the primitive that represents it on one layer.
//! The same pad can produce differently sized primitives on different
//! layers, since solder-mask and solder-paste margins only apply to their
//! own layer.

use crate::error::CoreError;
use crate::footprint::{PadRecord, PadShape};
use crate::geometry::{Circle, Line, Point, Polygon, Primitive, Rectangle};
use crate::layer::LayerName;

/// Translate `pad` into the primitive drawn for it on `layer`.
pub fn translate_pad(pad: &PadRecord, layer: LayerName) -> Result<Primitive, CoreError> {
    let (width, height) = size_on_layer(pad, layer);
    let at = pad.at.position();
    let angle = pad.at.angle_or_zero();

    let primitive = match &pad.shape {
        PadShape::Rect => {
            Primitive::Rectangle(Rectangle::new(at, width, height).with_rotation(at, angle))
        }
        PadShape::Trapezoid => {
            let delta = pad.rect_delta.unwrap_or([0.0, 0.0]);
            Primitive::Polygon(Polygon::new(trapezoid_corners(at, width, height, delta), at, angle))
        }
        PadShape::Circle => Primitive::Circle(Circle::filled(at, width / 2.0)),
        PadShape::Oval => Primitive::Line(capsule_line(at, width, height, angle)),
        PadShape::Other(shape) => {
            return Err(CoreError::UnsupportedPadShape {
                pad: pad.label(),
                shape: shape.clone(),
            })
        }
    };

    log::trace!(
        "pad {} on {}: {} {}x{}",
        pad.label(),
        layer,
        primitive.kind(),
        width,
        height
    );
    Ok(primitive)
}

/// Pad size on `layer`, including that layer's margin if one is set.
pub fn size_on_layer(pad: &PadRecord, layer: LayerName) -> (f64, f64) {
    let margin = layer
        .margin_kind()
        .map(|kind| pad.attributes.margin(kind))
        .unwrap_or(0.0);
    (pad.size[0] + margin, pad.size[1] + margin)
}

/// Corners of a trapezoid pad: top-left, top-right, bottom-right,
/// bottom-left.
///
/// `rect_delta[0]` skews the y offsets and `rect_delta[1]` skews the x
/// offsets.
fn trapezoid_corners(at: Point, width: f64, height: f64, rect_delta: [f64; 2]) -> Vec<Point> {
    let xoff = width / 2.0;
    let yoff = height / 2.0;
    let xdelt = rect_delta[1] / 2.0;
    let ydelt = rect_delta[0] / 2.0;
    vec![
        Point::new(at.x - xoff + xdelt, at.y - yoff - ydelt),
        Point::new(at.x + xoff - xdelt, at.y - yoff + ydelt),
        Point::new(at.x + xoff + xdelt, at.y + yoff - ydelt),
        Point::new(at.x - xoff - xdelt, at.y + yoff + ydelt),
    ]
}

/// An oval pad drawn as a thick round-capped line along its longer axis.
fn capsule_line(at: Point, width: f64, height: f64, angle: f64) -> Line {
    let (half_len, thickness, horizontal) = if width >= height {
        ((width - height) / 2.0, height, true)
    } else {
        ((height - width) / 2.0, width, false)
    };
    let (start, end) = if horizontal {
        (at.translate(-half_len, 0.0), at.translate(half_len, 0.0))
    } else {
        (at.translate(0.0, -half_len), at.translate(0.0, half_len))
    };
    Line::new(
        start.rotate_about(&at, angle),
        end.rotate_about(&at, angle),
        thickness,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footprint::Placement;

    fn rect_pad() -> PadRecord {
        PadRecord::new(Placement::new(1.0, 2.0), [1.5, 0.8], "rect", &["F.Cu", "F.Mask"])
    }

    fn expect_rect(p: Primitive) -> Rectangle {
        match p {
            Primitive::Rectangle(r) => r,
            other => panic!("expected rectangle, got {other:?}"),
        }
    }

    #[test]
    fn test_rect_without_margin_keeps_raw_size() {
        let pad = rect_pad().with_mask_margin(0.1);
        for layer in [LayerName::FrontCopper, LayerName::FrontSilkscreen, LayerName::FrontFab] {
            let rect = expect_rect(translate_pad(&pad, layer).unwrap());
            assert_eq!(rect.width, 1.5);
            assert_eq!(rect.height, 0.8);
        }
    }

    #[test]
    fn test_rect_mask_margin_on_both_axes() {
        let pad = rect_pad().with_mask_margin(0.1);
        let rect = expect_rect(translate_pad(&pad, LayerName::FrontMask).unwrap());
        assert!((rect.width - 1.6).abs() < 1e-12);
        assert!((rect.height - 0.9).abs() < 1e-12);
        assert_eq!(rect.center, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_paste_margin_only_on_paste_layer() {
        let pad = rect_pad().with_paste_margin(-0.2);
        let paste = expect_rect(translate_pad(&pad, LayerName::FrontPaste).unwrap());
        assert!((paste.width - 1.3).abs() < 1e-12);
        assert!((paste.height - 0.6).abs() < 1e-12);
        let mask = expect_rect(translate_pad(&pad, LayerName::FrontMask).unwrap());
        assert_eq!((mask.width, mask.height), (1.5, 0.8));
    }

    #[test]
    fn test_rect_rotates_around_placement() {
        let pad = PadRecord::new(Placement::rotated(1.0, 2.0, 45.0), [1.0, 1.0], "rect", &["F.Cu"]);
        let rect = expect_rect(translate_pad(&pad, LayerName::FrontCopper).unwrap());
        assert_eq!(rect.origin, Point::new(1.0, 2.0));
        assert_eq!(rect.angle, 45.0);
    }

    #[test]
    fn test_oval_becomes_line() {
        let pad = PadRecord::new(Placement::new(0.0, 0.0), [3.0, 1.0], "oval", &["F.Cu"]);
        let line = match translate_pad(&pad, LayerName::FrontCopper).unwrap() {
            Primitive::Line(l) => l,
            other => panic!("expected line, got {other:?}"),
        };
        assert_eq!(line.width, 1.0);
        assert_eq!(line.start.distance_to(&line.end), 2.0);
        assert_eq!(line.start, Point::new(-1.0, 0.0));
        assert_eq!(line.end, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_tall_oval_runs_along_y() {
        let pad = PadRecord::new(Placement::new(2.0, 1.0), [1.0, 4.0], "oval", &["F.Cu"]);
        let Primitive::Line(line) = translate_pad(&pad, LayerName::FrontCopper).unwrap() else {
            panic!("expected line");
        };
        assert_eq!(line.width, 1.0);
        assert_eq!(line.start, Point::new(2.0, -0.5));
        assert_eq!(line.end, Point::new(2.0, 2.5));
    }

    #[test]
    fn test_rotated_oval_endpoints() {
        let pad = PadRecord::new(Placement::rotated(0.0, 0.0, 90.0), [3.0, 1.0], "oval", &["F.Cu"]);
        let Primitive::Line(line) = translate_pad(&pad, LayerName::FrontCopper).unwrap() else {
            panic!("expected line");
        };
        assert!(line.start.x.abs() < 1e-12);
        assert!((line.start.y + 1.0).abs() < 1e-12);
        assert!((line.end.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_trapezoid_without_delta_is_rectangle() {
        let pad = PadRecord::new(Placement::new(1.0, 1.0), [2.0, 1.0], "trapezoid", &["F.Cu"])
            .with_rect_delta(0.0, 0.0);
        let Primitive::Polygon(poly) = translate_pad(&pad, LayerName::FrontCopper).unwrap() else {
            panic!("expected polygon");
        };
        assert_eq!(
            poly.points,
            vec![
                Point::new(0.0, 0.5),
                Point::new(2.0, 0.5),
                Point::new(2.0, 1.5),
                Point::new(0.0, 1.5),
            ]
        );
        assert_eq!(poly.origin, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_trapezoid_delta_is_cross_assigned() {
        // A delta along the first component skews the y offsets.
        let pad = PadRecord::new(Placement::new(0.0, 0.0), [2.0, 2.0], "trapezoid", &["F.Cu"])
            .with_rect_delta(0.4, 0.0);
        let Primitive::Polygon(poly) = translate_pad(&pad, LayerName::FrontCopper).unwrap() else {
            panic!("expected polygon");
        };
        let xs: Vec<f64> = poly.points.iter().map(|p| p.x).collect();
        let ys: Vec<f64> = poly.points.iter().map(|p| p.y).collect();
        assert_eq!(xs, vec![-1.0, 1.0, 1.0, -1.0]);
        assert!((ys[0] + 1.2).abs() < 1e-12);
        assert!((ys[1] + 0.8).abs() < 1e-12);
        assert!((ys[2] - 0.8).abs() < 1e-12);
        assert!((ys[3] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_trapezoid_mask_margin_widens_corners() {
        let pad = PadRecord::new(Placement::new(0.0, 0.0), [2.0, 1.0], "trapezoid", &["F.Cu", "F.Mask"])
            .with_rect_delta(0.4, 0.2)
            .with_mask_margin(0.2);
        let corners = |layer| match translate_pad(&pad, layer).unwrap() {
            Primitive::Polygon(p) => p.points,
            other => panic!("expected polygon, got {other:?}"),
        };
        let copper = corners(LayerName::FrontCopper);
        let mask = corners(LayerName::FrontMask);

        // Each corner moves outward by half the margin on both axes; the
        // delta skew is unchanged.
        let outward = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for ((c, m), (sx, sy)) in copper.iter().zip(&mask).zip(outward) {
            assert!((m.x - c.x - sx * 0.1).abs() < 1e-12, "{c:?} -> {m:?}");
            assert!((m.y - c.y - sy * 0.1).abs() < 1e-12, "{c:?} -> {m:?}");
        }
    }

    #[test]
    fn test_oval_paste_margin() {
        let pad = PadRecord::new(Placement::new(0.0, 0.0), [3.0, 1.0], "oval", &["F.Cu", "F.Paste"])
            .with_paste_margin(0.2);
        let Primitive::Line(copper) = translate_pad(&pad, LayerName::FrontCopper).unwrap() else {
            panic!("expected line");
        };
        let Primitive::Line(paste) = translate_pad(&pad, LayerName::FrontPaste).unwrap() else {
            panic!("expected line");
        };
        assert_eq!(copper.width, 1.0);
        assert!((paste.width - 1.2).abs() < 1e-12);
        // Both axes grow by the margin, so the straight part keeps its length
        // and the capsule's overall extent is 3.2 x 1.2.
        assert!((paste.start.distance_to(&paste.end) - 2.0).abs() < 1e-12);
        let bbox = paste.bbox().unwrap();
        assert!((bbox.width() - 3.2).abs() < 1e-12);
        assert!((bbox.height() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_circle_diameter_with_margin() {
        let pad = PadRecord::new(Placement::new(0.0, 0.0), [1.0, 1.0], "circle", &["F.Mask"])
            .with_mask_margin(0.2);
        let Primitive::Circle(c) = translate_pad(&pad, LayerName::FrontMask).unwrap() else {
            panic!("expected circle");
        };
        assert!((c.radius - 0.6).abs() < 1e-12);
        assert!(c.filled);
    }

    #[test]
    fn test_unsupported_shape() {
        let pad = PadRecord::new(Placement::new(0.0, 0.0), [1.0, 1.0], "custom", &["F.Cu"])
            .with_number("7");
        let err = translate_pad(&pad, LayerName::FrontCopper).unwrap_err();
        assert_eq!(
            err,
            CoreError::UnsupportedPadShape {
                pad: "'7'".into(),
                shape: "custom".into(),
            }
        );
    }
}
