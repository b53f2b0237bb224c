use std::fmt;
use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod common;
pub(crate) mod image;
pub(crate) mod text;

pub use common::{BorderRadius, ItemStyle, MIN_ITEM_SIZE, parse_hex_color};
pub(crate) use common::validate_frame;
pub use image::{Bitmap, ImageContent};
pub use text::TextContent;

use crate::error::EditorError;
use crate::geometry;

/// Opaque, immutable identifier of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The variant payload of an item
#[derive(Debug, Clone)]
pub enum ItemKind {
    Image(ImageContent),
    Text(TextContent),
}

impl ItemKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Image(_) => "image",
            ItemKind::Text(_) => "text",
        }
    }
}

/// An image or text element placed on the canvas.
///
/// Position and size live in `frame` (canvas units, unclamped: items may hang
/// off any edge). `rotation` is in degrees about the frame's centre and is
/// never normalised. `z_index` only orders painting; the collection order is
/// insertion order.
#[derive(Debug, Clone)]
pub struct Item {
    id: ItemId,
    frame: Rect,
    rotation: f32,
    z_index: i32,
    style: ItemStyle,
    kind: ItemKind,
}

impl Item {
    fn new(id: ItemId, frame: Rect, kind: ItemKind) -> Self {
        Self {
            id,
            frame,
            rotation: 0.0,
            z_index: 0,
            style: ItemStyle::default(),
            kind,
        }
    }

    /// Create an image item showing `bitmap` stretched over `frame`
    pub fn image(id: ItemId, frame: Rect, bitmap: Arc<Bitmap>) -> Self {
        Self::new(id, frame, ItemKind::Image(ImageContent::new(bitmap)))
    }

    /// Create a text item
    pub fn text(id: ItemId, frame: Rect, content: TextContent) -> Self {
        Self::new(id, frame, ItemKind::Text(content))
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn position(&self) -> Pos2 {
        self.frame.min
    }

    pub fn size(&self) -> Vec2 {
        self.frame.size()
    }

    pub fn center(&self) -> Pos2 {
        geometry::center(self.frame)
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn style(&self) -> &ItemStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut ItemStyle {
        &mut self.style
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ItemKind {
        &mut self.kind
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, ItemKind::Image(_))
    }

    /// Move without resizing. Positions are never clamped.
    pub fn set_position(&mut self, position: Pos2) {
        self.frame = Rect::from_min_size(position, self.frame.size());
    }

    /// Replace position and size, rejecting degenerate frames
    pub fn set_frame(&mut self, frame: Rect) -> Result<(), EditorError> {
        common::validate_frame(&frame)?;
        self.frame = frame;
        Ok(())
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        if rotation.is_finite() {
            self.rotation = rotation;
        }
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    pub fn set_style(&mut self, style: ItemStyle) {
        self.style = style;
    }
}
