//! Procedurally generated layout templates.
//!
//! A template is an ordered list of slots, each a rectangle in unit-square
//! coordinates (fractions of the canvas) plus optional style overrides.
//! Slots are only scaled to canvas pixels when a template is applied.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::element::BorderRadius;

pub mod artistic;
pub mod catalog;
pub mod mosaic;
pub mod rng;

pub use catalog::{CATALOG_SEED, build_catalog, catalog};
pub use rng::SeededRng;

/// A normalised rectangle with optional style overrides.
///
/// `x`, `y`, `w`, `h` are fractions of the canvas width/height. Artistic
/// slots may extend past the unit square.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TemplateSlot {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<BorderRadius>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f32>,
}

impl TemplateSlot {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            ..Default::default()
        }
    }

    /// Square slot centred on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    pub fn with_style(mut self, style: &SlotStyle) -> Self {
        self.rotation = style.rotation;
        self.border_radius = Some(style.border_radius);
        self.border_width = Some(style.border_width);
        self.border_color = Some(style.border_color);
        self.shadow_blur = Some(style.shadow_blur);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }
}

/// Style preset applied uniformly across a template family
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    pub border_radius: BorderRadius,
    pub border_width: f32,
    pub border_color: Color32,
    pub shadow_blur: f32,
    pub rotation: Option<f32>,
}

/// Flat tiles: no border, no shadow, square corners, upright
pub const MOSAIC_STYLE: SlotStyle = SlotStyle {
    border_radius: BorderRadius::NONE,
    border_width: 0.0,
    border_color: Color32::TRANSPARENT,
    shadow_blur: 0.0,
    rotation: Some(0.0),
};

/// Round framed photos with a soft shadow
pub const ARTISTIC_STYLE: SlotStyle = SlotStyle {
    border_radius: BorderRadius::Ellipse,
    border_width: 6.0,
    border_color: Color32::WHITE,
    shadow_blur: 15.0,
    rotation: None,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateCategory {
    Mosaic,
    Artistic,
}

impl TemplateCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::Mosaic => "Mosaic",
            TemplateCategory::Artistic => "Artistic",
        }
    }
}

/// A named, ordered set of slots. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub slots: Vec<TemplateSlot>,
    pub category: TemplateCategory,
}

impl Template {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: TemplateCategory,
        slots: Vec<TemplateSlot>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slots,
            category,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }
}
