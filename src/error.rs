use thiserror::Error;

use crate::element::ItemId;

/// Errors surfaced by editor operations.
///
/// Geometry problems are normally prevented at the source (guards and
/// clamping in the transform engine); `InvalidGeometry` is only returned when
/// a caller hands in a frame directly.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Failed to decode image: {0}")]
    DecodeFailure(#[from] DecodeError),

    #[error("Export failed: {0}")]
    ExportFailure(#[from] ExportError),

    #[error("Nothing to apply: the canvas has no image items")]
    EmptyApplyTarget,
}

/// Errors that can occur while turning an image source into a bitmap
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unsupported or corrupt image data: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to read image source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },

    #[error("Decoder worker went away before finishing")]
    Cancelled,
}

/// Errors that abort a whole export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvas { width: u32, height: u32 },

    #[error("Item {0} could not be composited")]
    ItemUnavailable(ItemId),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),

    #[error("An export is already running")]
    Busy,
}

pub type EditorResult<T> = Result<T, EditorError>;
