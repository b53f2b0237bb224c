use std::path::PathBuf;

use egui::{Key, Rect, Vec2};
use log::{info, warn};

use crate::config::EditorConfig;
use crate::document::Document;
use crate::error::EditorError;
use crate::export::ExportJob;
use crate::file_handler::{DecodedImage, FileHandler};
use crate::id_generator;
use crate::ingest;
use crate::input::InputHandler;
use crate::layout;
use crate::panels::{LiveView, SidebarTab, central_panel, tools_panel};
use crate::render::CanvasSpec;
use crate::state::TransformState;
use crate::template::{SeededRng, Template};
use crate::transform;
use crate::z_order;

/// The collage editor window.
///
/// Only the config is persisted between runs; the document starts empty.
pub struct CollageApp {
    config: EditorConfig,
    document: Document,
    transform: TransformState,
    input: InputHandler,
    files: FileHandler,
    export: ExportJob,
    live_view: LiveView,
    /// Source of the small random tilt given to new photos
    jitter: SeededRng,
    canvas_rect: Option<Rect>,
    sidebar_tab: SidebarTab,
    status: Option<String>,
}

impl Default for CollageApp {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl CollageApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, initial_files: Vec<PathBuf>) -> Self {
        let config = if std::env::var_os(crate::config::CONFIG_ENV_VAR).is_some() {
            EditorConfig::from_env()
        } else {
            cc.storage
                .and_then(|storage| eframe::get_value::<EditorConfig>(storage, eframe::APP_KEY))
                .filter(|config| config.validate().is_ok())
                .unwrap_or_default()
        };

        let mut app = Self::with_config(config);
        if !initial_files.is_empty() {
            app.files.begin_batch();
            for path in initial_files {
                app.files.queue_path(path, None);
            }
        }
        app
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            config,
            document: Document::new(),
            transform: TransformState::default(),
            input: InputHandler::new(),
            files: FileHandler::new(),
            export: ExportJob::new(),
            live_view: LiveView::default(),
            jitter: SeededRng::new(id_generator::random_seed()),
            canvas_rect: None,
            sidebar_tab: SidebarTab::default(),
            status: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.config.canvas_size()
    }

    pub fn canvas_spec(&self) -> CanvasSpec {
        CanvasSpec::new(
            self.config.canvas_width,
            self.config.canvas_height,
            self.config.background,
        )
    }

    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    pub fn live_view(&self) -> &LiveView {
        &self.live_view
    }

    pub fn refresh_live_view(&mut self, ctx: &egui::Context) {
        let canvas = self.canvas_spec();
        self.live_view.refresh(ctx, &self.document, canvas);
    }

    pub fn sidebar_tab(&self) -> SidebarTab {
        self.sidebar_tab
    }

    pub fn set_sidebar_tab(&mut self, tab: SidebarTab) {
        self.sidebar_tab = tab;
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_exporting(&self) -> bool {
        self.export.is_busy()
    }

    /// Feed this frame's pointer input through the transform engine
    pub fn handle_canvas_input(&mut self, ctx: &egui::Context, canvas_rect: Rect) {
        for event in self.input.process_input(ctx, canvas_rect) {
            let state = std::mem::take(&mut self.transform);
            self.transform = transform::handle_event(state, &mut self.document, &event);
        }
    }

    pub fn add_text(&mut self) {
        let z = z_order::next_z(self.document.items(), 0);
        let item = ingest::text_item(&self.config.text, self.canvas_size(), z);
        let id = item.id();
        if self.document.add_item(item) {
            self.document.select(Some(id));
        }
    }

    fn add_images(&mut self, images: Vec<DecodedImage>) {
        let policy = self.config.ingest;
        let canvas = self.canvas_size();
        for image in images {
            let z = z_order::next_z(self.document.items(), 0);
            let item = match image.drop_pos {
                Some(drop) => {
                    let stagger = Vec2::splat(image.batch_index as f32 * policy.stagger);
                    ingest::image_item_at(
                        image.bitmap,
                        &policy,
                        drop + stagger,
                        &mut self.jitter,
                        z,
                    )
                }
                None => ingest::image_item(
                    image.bitmap,
                    &policy,
                    canvas,
                    image.batch_index,
                    &mut self.jitter,
                    z,
                ),
            };
            let id = item.id();
            if self.document.add_item(item) && image.batch_index == 0 {
                self.document.select(Some(id));
            }
            info!("📷 Added {}", image.name);
        }
    }

    pub fn delete_selected(&mut self) {
        self.transform = TransformState::Idle;
        self.document.delete_selected();
    }

    pub fn bring_selected_to_front(&mut self) {
        self.document.bring_selected_to_front();
    }

    pub fn apply_template(&mut self, template: &Template) {
        self.transform = TransformState::Idle;
        let canvas = self.canvas_size();
        match layout::apply_template(&mut self.document, template, canvas) {
            Ok(summary) => {
                self.status = Some(if summary.overflow > 0 {
                    format!(
                        "Applied '{}' ({} photos did not fit)",
                        template.name, summary.overflow
                    )
                } else {
                    format!("Applied '{}'", template.name)
                });
            }
            Err(EditorError::EmptyApplyTarget) => {
                self.status = Some("Please add some photos first!".to_owned());
            }
            Err(err) => {
                warn!("Could not apply template '{}': {}", template.name, err);
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn start_export(&mut self, ctx: &egui::Context) {
        let repaint = ctx.clone();
        let result = self.export.start(
            self.document.snapshot(),
            self.canvas_spec(),
            self.config.export_dir.clone(),
            move || repaint.request_repaint(),
        );
        self.status = Some(match result {
            Ok(()) => "Exporting...".to_owned(),
            Err(err) => err.to_string(),
        });
    }

    fn poll_background_work(&mut self, ctx: &egui::Context) {
        let canvas_rect = self.canvas_rect.unwrap_or(Rect::NOTHING);
        if self.files.check_for_dropped_files(ctx, canvas_rect) > 0 {
            ctx.request_repaint();
        }
        let (decoded, failed) = self.files.poll();
        if !decoded.is_empty() {
            self.add_images(decoded);
        }
        if let Some(failure) = failed.last() {
            self.status = Some(format!("Could not open {}: {}", failure.name, failure.error));
        }
        if self.files.has_pending() {
            ctx.request_repaint();
        }

        if let Some(outcome) = self.export.take_result() {
            self.status = Some(match outcome {
                Ok(path) => format!("Saved {}", path.display()),
                Err(err) => format!("Failed to export image: {}", err),
            });
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() {
            return;
        }
        let delete = ctx.input(|i| i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace));
        if delete {
            self.delete_selected();
        }
    }
}

impl eframe::App for CollageApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.config);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background_work(ctx);
        self.handle_shortcuts(ctx);

        tools_panel(self, ctx);
        central_panel(self, ctx);

        self.files.preview_files_being_dropped(ctx);
    }
}
