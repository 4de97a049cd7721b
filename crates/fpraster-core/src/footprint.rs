use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::{Arc, BBox, Circle, Line, Point, Rectangle};
use crate::layer::MarginKind;

/// Stroke width used when a record does not carry one (KiCad's silkscreen
/// default).
pub const DEFAULT_STROKE_WIDTH: f64 = 0.12;

fn default_stroke_width() -> f64 {
    DEFAULT_STROKE_WIDTH
}

/// A parsed footprint, as handed over by a footprint-file parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lines: Vec<LineRecord>,
    #[serde(default)]
    pub arcs: Vec<ArcRecord>,
    #[serde(default)]
    pub circles: Vec<CircleRecord>,
    #[serde(default)]
    pub pads: Vec<PadRecord>,
}

impl Footprint {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn add_line(&mut self, line: LineRecord) {
        self.lines.push(line);
    }

    pub fn add_arc(&mut self, arc: ArcRecord) {
        self.arcs.push(arc);
    }

    pub fn add_circle(&mut self, circle: CircleRecord) {
        self.circles.push(circle);
    }

    pub fn add_pad(&mut self, pad: PadRecord) {
        self.pads.push(pad);
    }

    pub fn record_count(&self) -> usize {
        self.lines.len() + self.arcs.len() + self.circles.len() + self.pads.len()
    }

    /// Bounding box of all graphics and pads, ignoring pad margins.
    pub fn bbox(&self) -> Option<BBox> {
        let boxes = self
            .lines
            .iter()
            .filter_map(|l| l.to_line().bbox())
            .chain(self.arcs.iter().filter_map(|a| a.to_arc().bbox()))
            .chain(self.circles.iter().filter_map(|c| c.to_circle().bbox()))
            .chain(self.pads.iter().filter_map(|p| p.outline().bbox()));

        boxes.reduce(|acc, bb| acc.union(&bb))
    }
}

/// A straight graphic line (`fp_line`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub start: Point,
    pub end: Point,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    pub layer: String,
}

impl LineRecord {
    pub fn new(start: Point, end: Point, width: f64, layer: &str) -> Self {
        Self {
            start,
            end,
            width,
            layer: layer.to_string(),
        }
    }

    pub fn to_line(&self) -> Line {
        Line::new(self.start, self.end, self.width)
    }
}

/// A graphic arc (`fp_arc`): `start` is the centre, `end` the point the arc
/// starts from, `angle` the signed sweep in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcRecord {
    pub start: Point,
    pub end: Point,
    pub angle: f64,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    pub layer: String,
}

impl ArcRecord {
    pub fn new(start: Point, end: Point, angle: f64, layer: &str) -> Self {
        Self {
            start,
            end,
            angle,
            width: DEFAULT_STROKE_WIDTH,
            layer: layer.to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc {
        Arc::from_sweep(self.start, self.end, self.angle, self.width)
    }
}

/// A graphic circle (`fp_circle`): `end` is any point on the circumference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleRecord {
    pub center: Point,
    pub end: Point,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    #[serde(default)]
    pub fill: bool,
    pub layer: String,
}

impl CircleRecord {
    pub fn new(center: Point, end: Point, layer: &str) -> Self {
        Self {
            center,
            end,
            width: DEFAULT_STROKE_WIDTH,
            fill: false,
            layer: layer.to_string(),
        }
    }

    pub fn to_circle(&self) -> Circle {
        let radius = self.center.distance_to(&self.end);
        if self.fill {
            Circle::filled(self.center, radius)
        } else {
            Circle::outline(self.center, radius, self.width)
        }
    }
}

/// Pad placement: position and optional rotation in degrees.
///
/// Serialized as `[x, y]` or `[x, y, angle]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub angle: Option<f64>,
}

impl Placement {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, angle: None }
    }

    pub fn rotated(x: f64, y: f64, angle: f64) -> Self {
        Self {
            x,
            y,
            angle: Some(angle),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn angle_or_zero(&self) -> f64 {
        self.angle.unwrap_or(0.0)
    }
}

impl TryFrom<Vec<f64>> for Placement {
    type Error = CoreError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values[..] {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, angle] => Ok(Self::rotated(x, y, angle)),
            _ => Err(CoreError::InvalidPlacement(values.len())),
        }
    }
}

impl From<Placement> for Vec<f64> {
    fn from(p: Placement) -> Self {
        match p.angle {
            Some(angle) => vec![p.x, p.y, angle],
            None => vec![p.x, p.y],
        }
    }
}

/// Pad shape kind.
///
/// Shapes the renderer does not know are kept as `Other` so the failure is
/// reported by the pad translator, naming the pad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PadShape {
    Rect,
    Trapezoid,
    Circle,
    Oval,
    Other(String),
}

impl PadShape {
    pub fn as_str(&self) -> &str {
        match self {
            PadShape::Rect => "rect",
            PadShape::Trapezoid => "trapezoid",
            PadShape::Circle => "circle",
            PadShape::Oval => "oval",
            PadShape::Other(s) => s,
        }
    }
}

impl From<String> for PadShape {
    fn from(s: String) -> Self {
        match s.as_str() {
            "rect" => PadShape::Rect,
            "trapezoid" => PadShape::Trapezoid,
            "circle" => PadShape::Circle,
            "oval" => PadShape::Oval,
            _ => PadShape::Other(s),
        }
    }
}

impl From<&str> for PadShape {
    fn from(s: &str) -> Self {
        PadShape::from(s.to_string())
    }
}

impl From<PadShape> for String {
    fn from(shape: PadShape) -> Self {
        shape.as_str().to_string()
    }
}

/// Optional pad attributes. An unset margin and a zero margin are the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PadAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solder_mask_margin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solder_paste_margin: Option<f64>,
}

impl PadAttributes {
    pub fn margin(&self, kind: MarginKind) -> f64 {
        let value = match kind {
            MarginKind::SolderMask => self.solder_mask_margin,
            MarginKind::SolderPaste => self.solder_paste_margin,
        };
        value.filter(|m| *m != 0.0).unwrap_or(0.0)
    }
}

/// A pad (`pad`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadRecord {
    #[serde(default)]
    pub number: Option<String>,
    pub at: Placement,
    pub size: [f64; 2],
    pub shape: PadShape,
    #[serde(default)]
    pub rect_delta: Option<[f64; 2]>,
    pub layers: Vec<String>,
    #[serde(default)]
    pub attributes: PadAttributes,
}

impl PadRecord {
    pub fn new(at: Placement, size: [f64; 2], shape: impl Into<PadShape>, layers: &[&str]) -> Self {
        Self {
            number: None,
            at,
            size,
            shape: shape.into(),
            rect_delta: None,
            layers: layers.iter().map(|l| l.to_string()).collect(),
            attributes: PadAttributes::default(),
        }
    }

    pub fn with_number(mut self, number: &str) -> Self {
        self.number = Some(number.to_string());
        self
    }

    pub fn with_rect_delta(mut self, dx: f64, dy: f64) -> Self {
        self.rect_delta = Some([dx, dy]);
        self
    }

    pub fn with_mask_margin(mut self, margin: f64) -> Self {
        self.attributes.solder_mask_margin = Some(margin);
        self
    }

    pub fn with_paste_margin(mut self, margin: f64) -> Self {
        self.attributes.solder_paste_margin = Some(margin);
        self
    }

    /// Human-readable identity for log and error messages.
    pub fn label(&self) -> String {
        match &self.number {
            Some(n) if !n.is_empty() => format!("'{n}'"),
            _ => format!("at ({}, {})", self.at.x, self.at.y),
        }
    }

    /// The pad's raw rotated outline, used for extents.
    pub fn outline(&self) -> Rectangle {
        let center = self.at.position();
        Rectangle::new(center, self.size[0], self.size[1])
            .with_rotation(center, self.at.angle_or_zero())
    }
}
