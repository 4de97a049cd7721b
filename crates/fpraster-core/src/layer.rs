use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The fixed set of footprint layers that can be rendered.
///
/// Variant order is the default compositing order: later layers sit on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LayerName {
    #[serde(rename = "F.Fab")]
    FrontFab,
    #[serde(rename = "F.CrtYd")]
    FrontCourtyard,
    #[serde(rename = "F.Cu")]
    FrontCopper,
    #[serde(rename = "F.Mask")]
    FrontMask,
    #[serde(rename = "F.Paste")]
    FrontPaste,
    #[serde(rename = "F.SilkS")]
    FrontSilkscreen,
}

impl LayerName {
    pub const ALL: [LayerName; 6] = [
        LayerName::FrontFab,
        LayerName::FrontCourtyard,
        LayerName::FrontCopper,
        LayerName::FrontMask,
        LayerName::FrontPaste,
        LayerName::FrontSilkscreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerName::FrontFab => "F.Fab",
            LayerName::FrontCourtyard => "F.CrtYd",
            LayerName::FrontCopper => "F.Cu",
            LayerName::FrontMask => "F.Mask",
            LayerName::FrontPaste => "F.Paste",
            LayerName::FrontSilkscreen => "F.SilkS",
        }
    }

    /// Which pad margin, if any, adjusts pad sizes on this layer.
    pub fn margin_kind(&self) -> Option<MarginKind> {
        match self {
            LayerName::FrontMask => Some(MarginKind::SolderMask),
            LayerName::FrontPaste => Some(MarginKind::SolderPaste),
            _ => None,
        }
    }

    /// Resolve a layer name as it appears in a pad's layer list.
    ///
    /// Pads may use KiCad wildcards (`*.Cu`, `F&B.Cu`, ...); these map onto
    /// the matching front layer.
    pub fn resolve_pad_layer(name: &str) -> Result<Self, CoreError> {
        let name = name.trim();
        let canonical = match name.split_once('.') {
            Some(("*" | "F&B", suffix)) => format!("F.{suffix}"),
            _ => name.to_string(),
        };
        canonical.parse().map_err(|_| CoreError::UnknownLayerReference {
            layer: name.to_string(),
            context: "pad".to_string(),
        })
    }
}

impl FromStr for LayerName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerName::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| CoreError::UnknownLayerReference {
                layer: s.to_string(),
                context: "layer name".to_string(),
            })
    }
}

impl fmt::Display for LayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pad size adjustments that only apply on one layer each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginKind {
    SolderMask,
    SolderPaste,
}

/// RGB color for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for LayerColor {
    fn default() -> Self {
        Self {
            r: 128,
            g: 128,
            b: 128,
        }
    }
}

impl LayerColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_f32_array(&self, opacity: f32) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            opacity,
        ]
    }
}

/// Draw settings for one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub name: LayerName,
    pub color: LayerColor,
    pub opacity: f32,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub description: String,
}

fn default_visible() -> bool {
    true
}

impl LayerSpec {
    pub fn new(name: LayerName) -> Self {
        Self {
            name,
            color: LayerColor::default(),
            opacity: 1.0,
            visible: true,
            description: String::new(),
        }
    }

    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = LayerColor { r, g, b };
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Opacity actually applied when compositing.
    pub fn effective_opacity(&self) -> f32 {
        if self.visible {
            self.opacity.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// The ordered layer table a footprint is rendered with.
///
/// Order is compositing order. Each layer appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LayerSpec>", into = "Vec<LayerSpec>")]
pub struct LayerStack {
    layers: Vec<LayerSpec>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// The front-side table: fabrication, courtyard, copper, mask, paste,
    /// silkscreen.
    pub fn front() -> Self {
        let layers = vec![
            LayerSpec::new(LayerName::FrontFab)
                .with_color(204, 51, 51)
                .with_description("Fabrication outline"),
            LayerSpec::new(LayerName::FrontCourtyard)
                .with_color(51, 204, 51)
                .with_opacity(0.2)
                .with_description("Courtyard keep-out"),
            LayerSpec::new(LayerName::FrontCopper)
                .with_color(51, 51, 204)
                .with_description("Copper"),
            LayerSpec::new(LayerName::FrontMask)
                .with_color(204, 51, 204)
                .with_opacity(0.0)
                .with_description("Solder mask openings"),
            LayerSpec::new(LayerName::FrontPaste)
                .with_color(204, 204, 51)
                .with_opacity(0.0)
                .with_description("Solder paste"),
            LayerSpec::new(LayerName::FrontSilkscreen)
                .with_color(51, 204, 204)
                .with_description("Silkscreen"),
        ];
        Self { layers }
    }

    pub fn from_specs(specs: Vec<LayerSpec>) -> Result<Self, CoreError> {
        let mut stack = Self::new();
        for spec in specs {
            stack.add_layer(spec)?;
        }
        Ok(stack)
    }

    pub fn add_layer(&mut self, layer: LayerSpec) -> Result<(), CoreError> {
        if self.get_layer(layer.name).is_some() {
            return Err(CoreError::DuplicateLayer(layer.name));
        }
        self.layers.push(layer);
        Ok(())
    }

    pub fn get_layer(&self, name: LayerName) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn get_layer_mut(&mut self, name: LayerName) -> Option<&mut LayerSpec> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    pub fn all_layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn set_opacity(&mut self, name: LayerName, opacity: f32) {
        if let Some(layer) = self.get_layer_mut(name) {
            layer.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    pub fn toggle_visibility(&mut self, name: LayerName) {
        if let Some(layer) = self.get_layer_mut(name) {
            layer.visible = !layer.visible;
        }
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::front()
    }
}

impl TryFrom<Vec<LayerSpec>> for LayerStack {
    type Error = CoreError;

    fn try_from(specs: Vec<LayerSpec>) -> Result<Self, Self::Error> {
        Self::from_specs(specs)
    }
}

impl From<LayerStack> for Vec<LayerSpec> {
    fn from(stack: LayerStack) -> Self {
        stack.layers
    }
}
