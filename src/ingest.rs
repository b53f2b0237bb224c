//! Turning decoded pictures and the "add text" action into new items.

use std::sync::Arc;

use egui::{Pos2, Rect, Vec2};
use log::debug;

use crate::config::{IngestPolicy, TextDefaults};
use crate::element::{Bitmap, BorderRadius, Item, ItemStyle, MIN_ITEM_SIZE, TextContent};
use crate::error::DecodeError;
use crate::id_generator::generate_id;
use crate::template::SeededRng;

/// Decode an encoded picture (PNG, JPEG, ...) into straight RGBA8
pub fn decode_bitmap(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::Empty {
            width: rgba.width(),
            height: rgba.height(),
        });
    }
    debug!("Decoded {}x{} image ({} bytes)", rgba.width(), rgba.height(), bytes.len());
    Ok(Bitmap::new(rgba))
}

/// Scale `intrinsic` down so its long edge is at most `max_dimension`,
/// keeping the aspect ratio. Pictures already within the cap are untouched.
pub fn fit_size(intrinsic: Vec2, max_dimension: f32) -> Vec2 {
    let (w, h) = (intrinsic.x, intrinsic.y);
    if w <= max_dimension && h <= max_dimension {
        return intrinsic.max(Vec2::splat(MIN_ITEM_SIZE));
    }
    let aspect = w / h;
    let fitted = if w > h {
        Vec2::new(max_dimension, max_dimension / aspect)
    } else {
        Vec2::new(max_dimension * aspect, max_dimension)
    };
    fitted.max(Vec2::splat(MIN_ITEM_SIZE))
}

fn polaroid_style(policy: &IngestPolicy) -> ItemStyle {
    ItemStyle {
        border_radius: BorderRadius::NONE,
        border_width: policy.border_width,
        border_color: policy.border_color,
        shadow_blur: policy.shadow_blur,
    }
}

fn jitter(policy: &IngestPolicy, rng: &mut SeededRng) -> f32 {
    rng.range(-policy.max_jitter_deg, policy.max_jitter_deg)
}

/// New image item for the `batch_index`-th picture of an upload batch.
///
/// The item is centred on the canvas, pushed diagonally by
/// `batch_index × stagger` so a batch fans out instead of stacking exactly.
pub fn image_item(
    bitmap: Arc<Bitmap>,
    policy: &IngestPolicy,
    canvas: Vec2,
    batch_index: usize,
    rng: &mut SeededRng,
    z_index: i32,
) -> Item {
    let size = fit_size(bitmap.intrinsic_size(), policy.max_dimension);
    let offset = Vec2::splat(batch_index as f32 * policy.stagger);
    let center = (canvas / 2.0).to_pos2() + offset;
    let frame = Rect::from_center_size(center, size);
    Item::image(generate_id(), frame, bitmap)
        .with_rotation(jitter(policy, rng))
        .with_z_index(z_index)
        .with_style(polaroid_style(policy))
}

/// New image item centred on `drop_point` (canvas coordinates)
pub fn image_item_at(
    bitmap: Arc<Bitmap>,
    policy: &IngestPolicy,
    drop_point: Pos2,
    rng: &mut SeededRng,
    z_index: i32,
) -> Item {
    let size = fit_size(bitmap.intrinsic_size(), policy.max_dimension);
    Item::image(generate_id(), Rect::from_center_size(drop_point, size), bitmap)
        .with_rotation(jitter(policy, rng))
        .with_z_index(z_index)
        .with_style(polaroid_style(policy))
}

/// New text item centred on the canvas
pub fn text_item(defaults: &TextDefaults, canvas: Vec2, z_index: i32) -> Item {
    let size = defaults.size.max(Vec2::splat(MIN_ITEM_SIZE));
    let frame = Rect::from_center_size((canvas / 2.0).to_pos2(), size);
    let content = TextContent::new(
        defaults.content.clone(),
        defaults.color,
        defaults.font_size,
        defaults.font_family.clone(),
    );
    Item::text(generate_id(), frame, content).with_z_index(z_index)
}
