use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};

/// A 2D point in footprint coordinates (millimetres, y axis pointing down).
///
/// Serialized as a `[x, y]` pair, which is how footprint parsers hand
/// coordinates over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Rotate around `origin` by `degrees`, using the same orientation as a
    /// canvas rotation (positive = clockwise on screen).
    pub fn rotate_about(&self, origin: &Point, degrees: f64) -> Self {
        if degrees == 0.0 {
            return *self;
        }
        let (sin_r, cos_r) = degrees.to_radians().sin_cos();
        let dx = self.x - origin.x;
        let dy = self.y - origin.y;
        Self {
            x: origin.x + dx * cos_r - dy * sin_r,
            y: origin.y + dx * sin_r + dy * cos_r,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn union(&self, other: &BBox) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Grow the box by `amount` on every side.
    pub fn inflate(&self, amount: f64) -> Self {
        Self {
            min: self.min.translate(-amount, -amount),
            max: self.max.translate(amount, amount),
        }
    }
}

/// A stroked straight segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
    pub width: f64,
}

impl Line {
    pub fn new(start: Point, end: Point, width: f64) -> Self {
        Self { start, end, width }
    }

    pub fn bbox(&self) -> Option<BBox> {
        BBox::from_points(&[self.start, self.end]).map(|b| b.inflate(self.width / 2.0))
    }
}

/// A filled rectangle centred on `center`, rotated by `angle` degrees around
/// `origin`.
///
/// `origin` is the pad placement point. It only differs from `center` when
/// a primitive was built around an offset position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub origin: Point,
    pub angle: f64,
}

impl Rectangle {
    pub fn new(center: Point, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            origin: center,
            angle: 0.0,
        }
    }

    pub fn with_rotation(mut self, origin: Point, angle: f64) -> Self {
        self.origin = origin;
        self.angle = angle;
        self
    }

    /// Corners before rotation, clockwise from the top-left.
    pub fn corners(&self) -> [Point; 4] {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let c = self.center;
        [
            Point::new(c.x - hw, c.y - hh),
            Point::new(c.x + hw, c.y - hh),
            Point::new(c.x + hw, c.y + hh),
            Point::new(c.x - hw, c.y + hh),
        ]
    }

    pub fn bbox(&self) -> Option<BBox> {
        let rotated: Vec<Point> = self
            .corners()
            .iter()
            .map(|p| p.rotate_about(&self.origin, self.angle))
            .collect();
        BBox::from_points(&rotated)
    }
}

/// A stroked circular arc. Angles are radians; increasing angle runs
/// clockwise on screen because the y axis points down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub width: f64,
}

impl Arc {
    /// Build an arc from its centre, its starting point and a signed sweep
    /// in degrees.
    pub fn from_sweep(center: Point, start: Point, sweep_degrees: f64, width: f64) -> Self {
        let radius = center.distance_to(&start);
        let start_angle = (start.y - center.y).atan2(start.x - center.x);
        Self {
            center,
            radius,
            start_angle,
            end_angle: start_angle + sweep_degrees.to_radians(),
            width,
        }
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
    }

    /// Bounding box from the end points plus every axis extreme the sweep
    /// passes through.
    pub fn bbox(&self) -> Option<BBox> {
        let (lo, hi) = if self.start_angle <= self.end_angle {
            (self.start_angle, self.end_angle)
        } else {
            (self.end_angle, self.start_angle)
        };
        let mut points = vec![self.point_at(lo), self.point_at(hi)];
        if hi - lo >= TAU {
            points.extend((0..4).map(|q| self.point_at(q as f64 * FRAC_PI_2)));
        } else {
            let mut quadrant = (lo / FRAC_PI_2).ceil();
            while quadrant * FRAC_PI_2 <= hi {
                points.push(self.point_at(quadrant * FRAC_PI_2));
                quadrant += 1.0;
            }
        }
        BBox::from_points(&points).map(|b| b.inflate(self.width / 2.0))
    }
}

/// A full circle, either filled or stroked with `width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub filled: bool,
    pub width: f64,
}

impl Circle {
    pub fn filled(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            filled: true,
            width: 0.0,
        }
    }

    pub fn outline(center: Point, radius: f64, width: f64) -> Self {
        Self {
            center,
            radius,
            filled: false,
            width,
        }
    }

    pub fn bbox(&self) -> Option<BBox> {
        let extent = if self.filled {
            self.radius
        } else {
            self.radius + self.width / 2.0
        };
        Some(BBox::new(
            self.center.translate(-extent, -extent),
            self.center.translate(extent, extent),
        ))
    }
}

/// A filled closed polygon, rotated by `angle` degrees around `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub origin: Point,
    pub angle: f64,
}

impl Polygon {
    pub fn new(points: Vec<Point>, origin: Point, angle: f64) -> Self {
        Self {
            points,
            origin,
            angle,
        }
    }

    pub fn bbox(&self) -> Option<BBox> {
        let rotated: Vec<Point> = self
            .points
            .iter()
            .map(|p| p.rotate_about(&self.origin, self.angle))
            .collect();
        BBox::from_points(&rotated)
    }
}

/// A drawable footprint primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line(Line),
    Rectangle(Rectangle),
    Arc(Arc),
    Circle(Circle),
    Polygon(Polygon),
}

impl Primitive {
    pub fn bbox(&self) -> Option<BBox> {
        match self {
            Primitive::Line(l) => l.bbox(),
            Primitive::Rectangle(r) => r.bbox(),
            Primitive::Arc(a) => a.bbox(),
            Primitive::Circle(c) => c.bbox(),
            Primitive::Polygon(p) => p.bbox(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Primitive::Line(_) => "line",
            Primitive::Rectangle(_) => "rectangle",
            Primitive::Arc(_) => "arc",
            Primitive::Circle(_) => "circle",
            Primitive::Polygon(_) => "polygon",
        }
    }
}
