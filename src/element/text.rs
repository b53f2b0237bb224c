use egui::Color32;
use serde::{Deserialize, Serialize};

/// Payload of a text item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    pub color: Color32,
    pub font_size: f32,
    pub font_family: String,
}

impl TextContent {
    pub fn new(
        content: impl Into<String>,
        color: Color32,
        font_size: f32,
        font_family: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            color,
            font_size,
            font_family: font_family.into(),
        }
    }
}
