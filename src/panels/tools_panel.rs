use egui::{Color32, Rect, Sense, Stroke, Vec2};

use crate::CollageApp;
use crate::element::ItemKind;
use crate::template::{Template, TemplateCategory, catalog};

const THUMBNAIL_SIZE: f32 = 96.0;

/// Which half of the side panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SidebarTab {
    #[default]
    Content,
    Designs,
}

/// Slot layout of a template, painted as a small preview. Returns `true`
/// when clicked.
fn template_thumbnail(ui: &mut egui::Ui, template: &Template) -> bool {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(THUMBNAIL_SIZE), Sense::click());
    let painter = ui.painter_at(rect);
    let border = if response.hovered() {
        Color32::from_rgb(59, 130, 246)
    } else {
        Color32::from_gray(80)
    };
    painter.rect_filled(rect, 2.0, Color32::from_gray(55));

    let mut slots: Vec<_> = template.slots.iter().enumerate().collect();
    slots.sort_by_key(|(index, slot)| (slot.z_index.unwrap_or(1), *index));
    for (_, slot) in slots {
        let slot_rect = Rect::from_min_size(
            rect.min + Vec2::new(slot.x, slot.y) * THUMBNAIL_SIZE,
            Vec2::new(slot.w, slot.h) * THUMBNAIL_SIZE,
        );
        let rounding = match slot.border_radius {
            Some(radius) if radius.is_ellipse() => slot_rect.width().min(slot_rect.height()) / 2.0,
            _ => 0.0,
        };
        let outline = match slot.border_width {
            Some(width) if width > 0.0 => Stroke::new(width / 4.0, Color32::WHITE),
            _ => Stroke::new(1.0, Color32::from_gray(40)),
        };
        painter.rect(slot_rect, rounding, Color32::from_gray(130), outline);
    }
    painter.rect_stroke(rect, 2.0, Stroke::new(1.0, border));
    response.on_hover_text(template.name.as_str()).clicked()
}

fn content_tab(app: &mut CollageApp, ui: &mut egui::Ui) {
    ui.heading("Add Content");
    ui.horizontal(|ui| {
        if ui.button("➕ Text").clicked() {
            app.add_text();
        }
        ui.label("Drop photos onto the canvas");
    });
    ui.separator();

    ui.heading("Settings");
    ui.horizontal(|ui| {
        ui.label("Background");
        ui.color_edit_button_srgba(&mut app.config_mut().background);
    });
    ui.horizontal(|ui| {
        ui.label("Canvas");
        let config = app.config_mut();
        ui.add(egui::DragValue::new(&mut config.canvas_width).range(1..=8000));
        ui.label("×");
        ui.add(egui::DragValue::new(&mut config.canvas_height).range(1..=8000));
    });
    ui.separator();

    selected_item_controls(app, ui);

    ui.heading("Layers");
    let doc = app.document();
    if doc.is_empty() {
        ui.weak("No layers yet");
        return;
    }
    let selected = doc.selected();
    let rows: Vec<_> = doc
        .paint_order()
        .into_iter()
        .rev()
        .map(|item| {
            let label = match item.kind() {
                ItemKind::Image(content) => {
                    let bitmap = content.bitmap();
                    format!("🖼 Image {}×{}", bitmap.width(), bitmap.height())
                }
                ItemKind::Text(text) => format!("T {}", text.content),
            };
            (item.id(), item.z_index(), label)
        })
        .collect();
    let mut clicked = None;
    for (id, z, label) in rows {
        let text = format!("{:>3}  {}", z, label);
        if ui.selectable_label(selected == Some(id), text).clicked() {
            clicked = Some(id);
        }
    }
    if let Some(id) = clicked {
        app.document_mut().select(Some(id));
    }
}

fn selected_item_controls(app: &mut CollageApp, ui: &mut egui::Ui) {
    let Some(id) = app.document().selected() else {
        return;
    };
    ui.heading("Selected");
    ui.horizontal(|ui| {
        if ui.button("⬆ Bring to front").clicked() {
            app.bring_selected_to_front();
        }
        if ui.button("🗑 Delete").clicked() {
            app.delete_selected();
        }
    });

    let Some(mut item) = app.document().find_item(id).cloned() else {
        return;
    };
    let before = (*item.style(), text_of(&item));

    let style = item.style_mut();
    ui.add(egui::Slider::new(&mut style.border_width, 0.0..=40.0).text("Border"));
    ui.horizontal(|ui| {
        ui.label("Border colour");
        ui.color_edit_button_srgba(&mut style.border_color);
    });
    ui.add(egui::Slider::new(&mut style.shadow_blur, 0.0..=40.0).text("Shadow"));
    if let ItemKind::Text(text) = item.kind_mut() {
        ui.text_edit_singleline(&mut text.content);
        ui.add(egui::Slider::new(&mut text.font_size, 6.0..=200.0).text("Size"));
        ui.horizontal(|ui| {
            ui.label("Colour");
            ui.color_edit_button_srgba(&mut text.color);
        });
    }

    // Only write back real edits so the live view isn't re-rendered every frame
    if (*item.style(), text_of(&item)) != before {
        if let Some(target) = app.document_mut().find_item_mut(id) {
            *target = item;
        }
    }
    ui.separator();
}

fn text_of(item: &crate::element::Item) -> Option<crate::element::TextContent> {
    match item.kind() {
        ItemKind::Text(text) => Some(text.clone()),
        ItemKind::Image(_) => None,
    }
}

fn designs_tab(app: &mut CollageApp, ui: &mut egui::Ui) {
    ui.label("Click a design to apply it to your photos.");
    let mut chosen = None;
    for category in [TemplateCategory::Mosaic, TemplateCategory::Artistic] {
        egui::CollapsingHeader::new(category.label())
            .default_open(true)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for template in catalog::by_category(category) {
                        if template_thumbnail(ui, template) {
                            chosen = Some(template);
                        }
                    }
                });
            });
    }
    if let Some(template) = chosen {
        app.apply_template(template);
    }
}

pub fn tools_panel(app: &mut CollageApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(280.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let busy = app.is_exporting();
                let label = if busy { "Exporting..." } else { "💾 Export PNG" };
                let enabled = !busy && !app.document().is_empty();
                if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
                    app.start_export(ctx);
                }
            });
            if let Some(status) = app.status() {
                ui.label(status);
            }
            ui.separator();

            let mut tab = app.sidebar_tab();
            ui.horizontal(|ui| {
                ui.selectable_value(&mut tab, SidebarTab::Content, "Add Content");
                ui.selectable_value(&mut tab, SidebarTab::Designs, "Designs");
            });
            app.set_sidebar_tab(tab);
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match tab {
                SidebarTab::Content => content_tab(app, ui),
                SidebarTab::Designs => designs_tab(app, ui),
            });
        });
}
