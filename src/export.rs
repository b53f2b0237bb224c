//! Writing the composited canvas to disk, off the UI thread.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{error, info};
use parking_lot::Mutex;

use crate::document::DocumentSnapshot;
use crate::element::Item;
use crate::error::ExportError;
use crate::render::{self, CanvasSpec};

pub type ExportOutcome = Result<PathBuf, ExportError>;

/// `collage-<unix millis>.png`
pub fn export_file_name(unix_millis: u128) -> String {
    format!("collage-{}.png", unix_millis)
}

fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// First `collage-*.png` name in `dir` that isn't taken yet. Exports within
/// the same millisecond get a `-1`, `-2`, ... suffix.
fn unused_export_path(dir: &Path, unix_millis: u128) -> PathBuf {
    let path = dir.join(export_file_name(unix_millis));
    if !path.exists() {
        return path;
    }
    (1u32..)
        .map(|n| dir.join(format!("collage-{}-{}.png", unix_millis, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

/// Render `items` and write the PNG into `dir`.
///
/// The bytes go to a temporary file first and are renamed into place, so a
/// failed export never leaves a truncated PNG behind.
pub fn export_to_dir(items: &[Item], canvas: &CanvasSpec, dir: &Path) -> ExportOutcome {
    let bytes = render::export_png(items, canvas)?;
    fs::create_dir_all(dir)?;
    let path = unused_export_path(dir, timestamp_millis());
    let partial = path.with_extension("png.partial");
    fs::write(&partial, &bytes)?;
    if let Err(err) = fs::rename(&partial, &path) {
        let _ = fs::remove_file(&partial);
        return Err(err.into());
    }
    info!("📤 Exported collage to {}", path.display());
    Ok(path)
}

/// A single-flight background export.
///
/// At most one export runs at a time; [`ExportJob::start`] refuses with
/// [`ExportError::Busy`] while one is in flight. The worker renders from a
/// snapshot, so the document can keep changing meanwhile.
#[derive(Debug, Clone, Default)]
pub struct ExportJob {
    busy: Arc<AtomicBool>,
    result: Arc<Mutex<Option<ExportOutcome>>>,
}

impl ExportJob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Spawn the export. `on_done` runs on the worker once the result is
    /// available (e.g. to wake the UI).
    pub fn start(
        &self,
        snapshot: DocumentSnapshot,
        canvas: CanvasSpec,
        dir: PathBuf,
        on_done: impl FnOnce() + Send + 'static,
    ) -> Result<(), ExportError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ExportError::Busy);
        }
        info!(
            "Starting export of revision {} ({} items)",
            snapshot.revision,
            snapshot.items.len()
        );

        let busy = Arc::clone(&self.busy);
        let slot = Arc::clone(&self.result);
        let spawned = thread::Builder::new()
            .name("collage-export".to_owned())
            .spawn(move || {
                let outcome = export_to_dir(&snapshot.items, &canvas, &dir);
                if let Err(err) = &outcome {
                    error!("Export failed: {}", err);
                }
                // Cleared under the result lock, so a collected result always
                // comes with an idle job
                let mut slot = slot.lock();
                *slot = Some(outcome);
                busy.store(false, Ordering::Release);
                drop(slot);
                on_done();
            });
        if let Err(err) = spawned {
            self.busy.store(false, Ordering::Release);
            return Err(ExportError::Io(err));
        }
        Ok(())
    }

    /// Result of the last finished export, if not yet collected
    pub fn take_result(&self) -> Option<ExportOutcome> {
        self.result.lock().take()
    }
}
