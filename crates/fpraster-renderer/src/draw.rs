//! Drawing of footprint primitives onto a [`Surface`].
//!
//! The caller (a layer) sets the fill color. Primitives that carry their own
//! stroke width set it themselves.

use std::f64::consts::{FRAC_PI_2, TAU};

use tiny_skia::{Path, PathBuilder};

use fpraster_core::{Arc, Circle, Line, Point, Polygon, Primitive, Rectangle};

use crate::error::DrawError;
use crate::surface::Surface;

pub trait Draw {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError>;
}

impl Draw for Primitive {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError> {
        match self {
            Primitive::Line(l) => l.draw(surface),
            Primitive::Rectangle(r) => r.draw(surface),
            Primitive::Arc(a) => a.draw(surface),
            Primitive::Circle(c) => c.draw(surface),
            Primitive::Polygon(p) => p.draw(surface),
        }
    }
}

impl Draw for Line {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError> {
        ensure_finite("line", &[self.start.x, self.start.y, self.end.x, self.end.y, self.width])?;
        ensure_non_negative("line", "width", self.width)?;

        let mut pb = PathBuilder::new();
        pb.move_to(self.start.x as f32, self.start.y as f32);
        pb.line_to(self.end.x as f32, self.end.y as f32);
        surface.set_line_width(self.width);
        // A zero-length segment may not produce a path; nothing to ink then.
        if let Some(path) = pb.finish() {
            surface.stroke_path(&path);
        }
        Ok(())
    }
}

impl Draw for Rectangle {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError> {
        ensure_finite(
            "rectangle",
            &[
                self.center.x,
                self.center.y,
                self.width,
                self.height,
                self.origin.x,
                self.origin.y,
                self.angle,
            ],
        )?;
        ensure_non_negative("rectangle", "width", self.width)?;
        ensure_non_negative("rectangle", "height", self.height)?;

        let path = closed_path(&self.corners()).ok_or(DrawError::EmptyPath {
            primitive: "rectangle",
        })?;
        fill_rotated(surface, &path, self.origin, self.angle);
        Ok(())
    }
}

impl Draw for Arc {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError> {
        ensure_finite(
            "arc",
            &[
                self.center.x,
                self.center.y,
                self.radius,
                self.start_angle,
                self.end_angle,
                self.width,
            ],
        )?;
        ensure_non_negative("arc", "radius", self.radius)?;
        ensure_non_negative("arc", "width", self.width)?;

        surface.set_line_width(self.width);
        if let Some(path) = arc_path(self) {
            surface.stroke_path(&path);
        }
        Ok(())
    }
}

impl Draw for Circle {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError> {
        ensure_finite("circle", &[self.center.x, self.center.y, self.radius, self.width])?;
        ensure_non_negative("circle", "radius", self.radius)?;
        ensure_non_negative("circle", "width", self.width)?;
        if self.radius == 0.0 {
            return Ok(());
        }

        let path = PathBuilder::from_circle(
            self.center.x as f32,
            self.center.y as f32,
            self.radius as f32,
        )
        .ok_or(DrawError::EmptyPath { primitive: "circle" })?;
        if self.filled {
            surface.fill_path(&path);
        } else {
            surface.set_line_width(self.width);
            surface.stroke_path(&path);
        }
        Ok(())
    }
}

impl Draw for Polygon {
    fn draw(&self, surface: &mut Surface) -> Result<(), DrawError> {
        if self.points.len() < 3 {
            return Err(DrawError::TooFewPoints(self.points.len()));
        }
        let all_finite = self.points.iter().all(Point::is_finite)
            && self.origin.is_finite()
            && self.angle.is_finite();
        if !all_finite {
            return Err(DrawError::NonFinite { primitive: "polygon" });
        }

        let path = closed_path(&self.points).ok_or(DrawError::EmptyPath {
            primitive: "polygon",
        })?;
        fill_rotated(surface, &path, self.origin, self.angle);
        Ok(())
    }
}

/// Fill `path` with the user space rotated by `angle` degrees around
/// `origin`. The surface transform is restored afterwards.
fn fill_rotated(surface: &mut Surface, path: &Path, origin: Point, angle: f64) {
    let mut s = surface.save();
    s.translate(origin.x, origin.y);
    s.rotate(angle);
    s.translate(-origin.x, -origin.y);
    s.fill_path(path);
}

fn closed_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.close();
    pb.finish()
}

/// Arc outline built from cubic Béziers spanning at most a quarter turn
/// each. Returns `None` for a zero sweep. Sweeps beyond a full turn are
/// drawn as a full turn.
fn arc_path(arc: &Arc) -> Option<Path> {
    let sweep = arc.sweep().clamp(-TAU, TAU);
    if sweep == 0.0 || arc.radius == 0.0 {
        return None;
    }
    let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / segments as f64;
    let k = 4.0 / 3.0 * (step / 4.0).tan() * arc.radius;

    let mut pb = PathBuilder::new();
    let start = arc.start_point();
    pb.move_to(start.x as f32, start.y as f32);
    for i in 0..segments {
        let a0 = arc.start_angle + step * i as f64;
        let a1 = a0 + step;
        let p0 = arc.point_at(a0);
        let p3 = arc.point_at(a1);
        let c1 = Point::new(p0.x - k * a0.sin(), p0.y + k * a0.cos());
        let c2 = Point::new(p3.x + k * a1.sin(), p3.y - k * a1.cos());
        pb.cubic_to(
            c1.x as f32,
            c1.y as f32,
            c2.x as f32,
            c2.y as f32,
            p3.x as f32,
            p3.y as f32,
        );
    }
    pb.finish()
}

fn ensure_finite(primitive: &'static str, values: &[f64]) -> Result<(), DrawError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DrawError::NonFinite { primitive })
    }
}

fn ensure_non_negative(
    primitive: &'static str,
    field: &'static str,
    value: f64,
) -> Result<(), DrawError> {
    if value < 0.0 {
        Err(DrawError::NegativeExtent {
            primitive,
            field,
            value,
        })
    } else {
        Ok(())
    }
}
