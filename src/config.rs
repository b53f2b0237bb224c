use std::fs;
use std::path::{Path, PathBuf};

use egui::{Color32, Vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable pointing at a JSON config file
pub const CONFIG_ENV_VAR: &str = "COLLAGE_CONFIG";

/// Errors that can occur while loading or saving the config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// How newly added photos are sized, placed and framed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestPolicy {
    /// Long edge cap; smaller images keep their intrinsic size
    pub max_dimension: f32,
    /// Diagonal offset between images added in the same batch
    pub stagger: f32,
    /// Initial rotation is drawn from `[-max_jitter_deg, max_jitter_deg]`
    pub max_jitter_deg: f32,
    pub border_width: f32,
    pub border_color: Color32,
    pub shadow_blur: f32,
}

impl Default for IngestPolicy {
    fn default() -> Self {
        Self {
            max_dimension: 300.0,
            stagger: 20.0,
            max_jitter_deg: 5.0,
            border_width: 8.0,
            border_color: Color32::WHITE,
            shadow_blur: 10.0,
        }
    }
}

/// What the "add text" action creates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub content: String,
    pub color: Color32,
    pub font_size: f32,
    pub font_family: String,
    pub size: Vec2,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            content: "Double Click to Edit".to_owned(),
            color: Color32::BLACK,
            font_size: 40.0,
            font_family: "Arial".to_owned(),
            size: Vec2::new(300.0, 50.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color32,
    pub ingest: IngestPolicy,
    pub text: TextDefaults,
    /// Where exported PNGs are written
    pub export_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Color32::from_rgb(0xe0, 0xe7, 0xff),
            ingest: IngestPolicy::default(),
            text: TextDefaults::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width as f32, self.canvas_height as f32)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if !(self.ingest.max_dimension.is_finite() && self.ingest.max_dimension >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "ingest.max_dimension must be >= 1, got {}",
                self.ingest.max_dimension
            )));
        }
        if !(self.text.font_size.is_finite() && self.text.font_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "text.font_size must be positive, got {}",
                self.text.font_size
            )));
        }
        Ok(())
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&json)?;
        config.validate()?;
        info!("⚙️ Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("💾 Saved config to {}", path.display());
        Ok(())
    }

    /// Config from `$COLLAGE_CONFIG` if set and readable, defaults otherwise
    pub fn from_env() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        let path = PathBuf::from(path);
        match Self::load(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("Ignoring config {}: {}", path.display(), err);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"canvas_width": 1024}"#).unwrap();
        assert_eq!(config.canvas_width, 1024);
        assert_eq!(config.canvas_height, 600);
        assert_eq!(config.ingest, IngestPolicy::default());
        assert_eq!(config.text.content, "Double Click to Edit");
    }

    #[test]
    fn test_zero_canvas_is_invalid() {
        let config = EditorConfig {
            canvas_width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("collage-config-{}", std::process::id()));
        let path = dir.join("config.json");
        let config = EditorConfig {
            canvas_width: 640,
            background: Color32::from_rgb(1, 2, 3),
            ..Default::default()
        };
        config.save(&path).unwrap();
        let loaded = EditorConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_dir_all(dir);
    }
}
