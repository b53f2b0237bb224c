use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use eframe::egui;
use futures::channel::oneshot;
use log::{debug, error, info, warn};

use crate::element::Bitmap;
use crate::error::DecodeError;
use crate::ingest;

/// Where the encoded bytes of a queued picture come from
enum Source {
    Bytes(Arc<[u8]>),
    Path(PathBuf),
}

/// A picture that finished decoding
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub name: String,
    pub bitmap: Arc<Bitmap>,
    /// Position within the batch it was added in
    pub batch_index: usize,
    /// Canvas-local drop point, when dropped onto the canvas
    pub drop_pos: Option<egui::Pos2>,
}

/// A picture whose decode failed; only this picture is lost
#[derive(Debug)]
pub struct FailedDecode {
    pub name: String,
    pub error: DecodeError,
}

struct PendingDecode {
    name: String,
    batch_index: usize,
    drop_pos: Option<egui::Pos2>,
    receiver: oneshot::Receiver<Result<Bitmap, DecodeError>>,
}

/// Decodes dropped or opened pictures on worker threads.
///
/// Items are only created from fully decoded bitmaps, once [`poll`]
/// hands them over.
///
/// [`poll`]: FileHandler::poll
#[derive(Default)]
pub struct FileHandler {
    pending: Vec<PendingDecode>,
    next_batch: usize,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Start a new batch; pictures queued after this are staggered from 0
    pub fn begin_batch(&mut self) {
        self.next_batch = 0;
    }

    /// Queue encoded bytes for decoding
    pub fn queue_bytes(
        &mut self,
        name: impl Into<String>,
        bytes: Arc<[u8]>,
        drop_pos: Option<egui::Pos2>,
    ) {
        self.spawn(name.into(), Source::Bytes(bytes), drop_pos);
    }

    /// Queue a file on disk for reading and decoding
    pub fn queue_path(&mut self, path: PathBuf, drop_pos: Option<egui::Pos2>) {
        self.spawn(path.display().to_string(), Source::Path(path), drop_pos);
    }

    fn spawn(&mut self, name: String, source: Source, drop_pos: Option<egui::Pos2>) {
        let (sender, receiver) = oneshot::channel();
        let worker_name = name.clone();
        let spawned = thread::Builder::new()
            .name("image-decode".to_owned())
            .spawn(move || {
                let result = match source {
                    Source::Bytes(bytes) => ingest::decode_bitmap(&bytes),
                    Source::Path(path) => std::fs::read(&path)
                        .map_err(DecodeError::from)
                        .and_then(|bytes| ingest::decode_bitmap(&bytes)),
                };
                if sender.send(result).is_err() {
                    debug!("Decode of {} finished after its handler was dropped", worker_name);
                }
            });
        if let Err(err) = spawned {
            error!("Could not start decoder for {}: {}", name, err);
            return;
        }

        info!("Decoding {}", name);
        self.pending.push(PendingDecode {
            name,
            batch_index: self.next_batch,
            drop_pos,
            receiver,
        });
        self.next_batch += 1;
    }

    /// Collect every decode that has finished since the last call
    pub fn poll(&mut self) -> (Vec<DecodedImage>, Vec<FailedDecode>) {
        let mut decoded = Vec::new();
        let mut failed = Vec::new();
        self.pending.retain_mut(|pending| {
            let result = match pending.receiver.try_recv() {
                Ok(None) => return true,
                Ok(Some(result)) => result,
                Err(oneshot::Canceled) => Err(DecodeError::Cancelled),
            };
            match result {
                Ok(bitmap) => decoded.push(DecodedImage {
                    name: pending.name.clone(),
                    bitmap: Arc::new(bitmap),
                    batch_index: pending.batch_index,
                    drop_pos: pending.drop_pos,
                }),
                Err(error) => {
                    warn!("Skipping {}: {}", pending.name, error);
                    failed.push(FailedDecode {
                        name: pending.name.clone(),
                        error,
                    });
                }
            }
            false
        });
        (decoded, failed)
    }

    /// Queue whatever was dropped on the window this frame. Files released
    /// over `canvas_rect` carry a canvas-local drop point. Returns how many
    /// files were queued.
    pub fn check_for_dropped_files(
        &mut self,
        ctx: &egui::Context,
        canvas_rect: egui::Rect,
    ) -> usize {
        let (files, pointer) = ctx.input(|i| (i.raw.dropped_files.clone(), i.pointer.latest_pos()));
        if files.is_empty() {
            return 0;
        }
        let drop_pos = pointer
            .filter(|pos| canvas_rect.contains(*pos))
            .map(|pos| (pos - canvas_rect.min).to_pos2());

        self.begin_batch();
        let mut queued = 0;
        for file in files {
            if !is_image_file(&file) {
                warn!("Dropped file is not a supported image: {}", display_name(&file));
                continue;
            }
            if let Some(bytes) = file.bytes.clone() {
                self.queue_bytes(display_name(&file), bytes, drop_pos);
            } else if let Some(path) = file.path.clone() {
                self.queue_path(path, drop_pos);
            } else {
                warn!("Dropped file has no accessible data: {}", display_name(&file));
                continue;
            }
            queued += 1;
        }
        queued
    }

    /// Dim the window while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        let count = ctx.input(|i| i.raw.hovered_files.len());
        if count == 0 {
            return;
        }
        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(160));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            format!("Drop {} photo(s) onto the canvas", count),
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// MIME type when known, extension otherwise
pub fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    has_image_extension(&name)
}

pub fn has_image_extension(name: &str) -> bool {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    matches!(
        ext.to_ascii_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"
    )
}
