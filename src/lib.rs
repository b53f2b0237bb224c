#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod ingest;
pub mod input;
pub mod layout;
pub mod panels;
pub mod render;
pub mod state;
pub mod template;
pub mod transform;
pub mod z_order;

pub use app::CollageApp;
pub use config::EditorConfig;
pub use document::{Document, DocumentSnapshot};
pub use element::{Item, ItemId, ItemKind};
pub use error::{EditorError, EditorResult};
pub use input::{InputEvent, InputHandler};
pub use state::TransformState;
