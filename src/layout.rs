//! Applying a template to the items already on the canvas.

use egui::{Color32, Pos2, Rect, Vec2};
use log::{info, warn};

use crate::document::Document;
use crate::element::{BorderRadius, ItemStyle, validate_frame};
use crate::error::EditorError;
use crate::template::{Template, TemplateSlot};

/// Offset of the overflow pile from the canvas centre
const OVERFLOW_INSET: f32 = 50.0;
/// Diagonal step between piled-up overflow images
const OVERFLOW_STAGGER: f32 = 10.0;
/// Base z-index of the overflow pile, above any template slot
const OVERFLOW_Z_BASE: i32 = 100;

/// What an application did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplySummary {
    /// Images placed into a slot
    pub placed: usize,
    /// Images left over once every slot was filled
    pub overflow: usize,
}

#[derive(Debug, Clone, Copy)]
enum Placement {
    Slot {
        frame: Rect,
        rotation: f32,
        z_index: i32,
        style: ItemStyle,
    },
    Overflow {
        position: Pos2,
        z_index: i32,
    },
}

/// A slot scaled to canvas units, with neutral defaults for absent fields
fn slot_placement(
    slot: &TemplateSlot,
    image_index: usize,
    canvas: Vec2,
) -> Result<Placement, EditorError> {
    let frame = Rect::from_min_size(
        Pos2::new(slot.x * canvas.x, slot.y * canvas.y),
        Vec2::new(slot.w * canvas.x, slot.h * canvas.y),
    );
    validate_frame(&frame)?;
    let style = ItemStyle {
        border_radius: slot.border_radius.unwrap_or(BorderRadius::NONE),
        border_width: slot.border_width.unwrap_or(0.0),
        border_color: slot.border_color.unwrap_or(Color32::WHITE),
        shadow_blur: slot.shadow_blur.unwrap_or(0.0),
    };
    Ok(Placement::Slot {
        frame,
        rotation: slot.rotation.unwrap_or(0.0),
        // A zero z-index counts as unset
        z_index: slot
            .z_index
            .filter(|z| *z != 0)
            .unwrap_or(image_index as i32 + 1),
        style,
    })
}

/// Overflow images pile up just off the canvas centre, each one a step
/// further down and right than the previous image.
fn overflow_placement(image_index: usize, canvas: Vec2) -> Placement {
    let step = image_index as f32 * OVERFLOW_STAGGER;
    Placement::Overflow {
        position: Pos2::new(
            canvas.x / 2.0 - OVERFLOW_INSET + step,
            canvas.y / 2.0 - OVERFLOW_INSET + step,
        ),
        z_index: OVERFLOW_Z_BASE.saturating_add(image_index as i32),
    }
}

/// Lay the document's image items out according to `template`.
///
/// Images are matched to slots in collection order: the first image gets
/// the first slot whatever its current z-index. Text items are left alone.
/// Every placement is computed before anything is written, so a bad slot
/// leaves the document untouched.
pub fn apply_template(
    doc: &mut Document,
    template: &Template,
    canvas: Vec2,
) -> Result<ApplySummary, EditorError> {
    if !(canvas.x.is_finite() && canvas.y.is_finite() && canvas.x > 0.0 && canvas.y > 0.0) {
        return Err(EditorError::InvalidGeometry(format!(
            "Canvas size must be positive, got {}x{}",
            canvas.x, canvas.y
        )));
    }

    let image_indices: Vec<usize> = doc
        .items()
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_image())
        .map(|(index, _)| index)
        .collect();
    if image_indices.is_empty() {
        warn!("Template '{}' applied to a canvas without images", template.name);
        return Err(EditorError::EmptyApplyTarget);
    }

    let mut placements = Vec::with_capacity(image_indices.len());
    for (image_index, &item_index) in image_indices.iter().enumerate() {
        let placement = match template.slots.get(image_index) {
            Some(slot) => slot_placement(slot, image_index, canvas)?,
            None => overflow_placement(image_index, canvas),
        };
        placements.push((item_index, placement));
    }

    let mut summary = ApplySummary {
        placed: 0,
        overflow: 0,
    };
    let items = doc.items_mut();
    for (item_index, placement) in placements {
        let Some(item) = items.get_mut(item_index) else {
            continue;
        };
        match placement {
            Placement::Slot {
                frame,
                rotation,
                z_index,
                style,
            } => {
                // Frame was validated above
                let _ = item.set_frame(frame);
                item.set_rotation(rotation);
                item.set_z_index(z_index);
                item.set_style(style);
                summary.placed += 1;
            }
            Placement::Overflow { position, z_index } => {
                item.set_position(position);
                item.set_z_index(z_index);
                summary.overflow += 1;
            }
        }
    }

    info!(
        "🧩 Applied template '{}': {} placed, {} overflow",
        template.name, summary.placed, summary.overflow
    );
    Ok(summary)
}
