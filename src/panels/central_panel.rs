use egui::{
    Align2, Color32, ColorImage, CursorIcon, FontId, Pos2, Rect, Sense, Shape, Stroke,
    TextureHandle, TextureOptions, Vec2,
};
use log::warn;

use crate::CollageApp;
use crate::document::Document;
use crate::geometry::hit_testing::{
    HandleKind, RESIZE_HANDLE_RADIUS, ROTATE_HANDLE_RADIUS, resize_handle_center,
    rotate_handle_center,
};
use crate::geometry::{rotate_point, rotated_corners};
use crate::render::{self, CanvasSpec};
use crate::transform::pick_target;

const SELECTION_COLOR: Color32 = Color32::from_rgb(59, 130, 246);

/// The composited canvas as a texture, re-rendered only when the document
/// or canvas settings change.
#[derive(Default)]
pub struct LiveView {
    texture: Option<TextureHandle>,
    rendered: Option<(u64, CanvasSpec)>,
    failure: Option<String>,
}

impl LiveView {
    pub fn refresh(&mut self, ctx: &egui::Context, doc: &Document, canvas: CanvasSpec) {
        let key = (doc.revision(), canvas);
        if self.rendered == Some(key) {
            return;
        }
        self.rendered = Some(key);

        match render::composite(doc.items(), &canvas) {
            Ok(raster) => {
                let size = [raster.width() as usize, raster.height() as usize];
                let image = ColorImage::from_rgba_unmultiplied(size, raster.as_raw());
                match &mut self.texture {
                    Some(texture) => texture.set(image, TextureOptions::LINEAR),
                    None => {
                        self.texture = Some(ctx.load_texture(
                            "collage-live-view",
                            image,
                            TextureOptions::LINEAR,
                        ));
                    }
                }
                self.failure = None;
            }
            Err(err) => {
                warn!("Live view render failed: {}", err);
                self.failure = Some(err.to_string());
            }
        }
    }

    pub fn texture(&self) -> Option<&TextureHandle> {
        self.texture.as_ref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

fn to_screen(origin: Pos2, p: Pos2) -> Pos2 {
    origin + p.to_vec2()
}

/// Outline and handles of the selected item
fn paint_selection(painter: &egui::Painter, origin: Pos2, doc: &Document) {
    let Some(item) = doc.selected_item() else {
        return;
    };
    let (frame, rotation) = (item.frame(), item.rotation());
    let outline: Vec<Pos2> = rotated_corners(frame, rotation)
        .into_iter()
        .map(|p| to_screen(origin, p))
        .collect();
    let stroke = Stroke::new(2.0, SELECTION_COLOR);
    painter.add(Shape::closed_line(outline, stroke));

    let top_mid = to_screen(
        origin,
        rotate_point(Pos2::new(frame.center().x, frame.min.y), frame.center(), rotation),
    );
    let rotate = to_screen(origin, rotate_handle_center(frame, rotation));
    painter.line_segment([top_mid, rotate], stroke);
    painter.circle(rotate, ROTATE_HANDLE_RADIUS / 2.0, Color32::WHITE, stroke);

    let resize = to_screen(origin, resize_handle_center(frame, rotation));
    painter.circle(
        resize,
        RESIZE_HANDLE_RADIUS / 2.0,
        SELECTION_COLOR,
        Stroke::new(2.0, Color32::WHITE),
    );
}

fn hover_cursor(doc: &Document, pointer: Pos2) -> Option<CursorIcon> {
    let target = pick_target(doc, pointer)?;
    Some(match target.handle {
        Some(HandleKind::Resize) => CursorIcon::ResizeNwSe,
        Some(HandleKind::Rotate) => CursorIcon::Alias,
        None => CursorIcon::Move,
    })
}

pub fn central_panel(app: &mut CollageApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::default().fill(Color32::from_gray(24)).inner_margin(32.0))
        .show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let canvas = app.canvas_spec();
                let size = Vec2::new(canvas.width as f32, canvas.height as f32);
                let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
                app.set_canvas_rect(rect);

                // Input first so this frame's picture reflects it
                app.handle_canvas_input(ctx, rect);

                let painter = ui.painter_at(rect.expand(ROTATE_HANDLE_RADIUS * 4.0));
                app.refresh_live_view(ctx);
                match app.live_view().texture() {
                    Some(texture) => {
                        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
                        painter.image(texture.id(), rect, uv, Color32::WHITE);
                    }
                    None => {
                        painter.rect_filled(rect, 0.0, canvas.background);
                    }
                }
                if let Some(failure) = app.live_view().failure() {
                    painter.text(
                        rect.left_top() + Vec2::splat(8.0),
                        Align2::LEFT_TOP,
                        failure,
                        FontId::proportional(14.0),
                        Color32::RED,
                    );
                }

                if app.document().is_empty() {
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "Start Creating\nDrop photos here and choose a design",
                        FontId::proportional(20.0),
                        Color32::from_gray(110),
                    );
                }

                paint_selection(&painter, rect.min, app.document());

                if let Some(hover) = response.hover_pos() {
                    let local = (hover - rect.min).to_pos2();
                    if let Some(cursor) = hover_cursor(app.document(), local) {
                        ctx.set_cursor_icon(cursor);
                    }
                }
            });
        });
}
