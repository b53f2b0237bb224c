use std::fmt;
use std::str::FromStr;

use egui::{Color32, Rect};
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

// Common constants for all item types
pub const MIN_ITEM_SIZE: f32 = 1.0;

/// Validates that a frame is finite and at least `MIN_ITEM_SIZE` on both sides
pub(crate) fn validate_frame(frame: &Rect) -> Result<(), EditorError> {
    let finite = frame.min.x.is_finite()
        && frame.min.y.is_finite()
        && frame.max.x.is_finite()
        && frame.max.y.is_finite();
    if !finite {
        return Err(EditorError::InvalidGeometry(format!(
            "Frame is not finite: {:?}",
            frame
        )));
    }
    if frame.width() < MIN_ITEM_SIZE || frame.height() < MIN_ITEM_SIZE {
        return Err(EditorError::InvalidGeometry(format!(
            "Item dimensions too small (min: {}). Width: {}, Height: {}",
            MIN_ITEM_SIZE,
            frame.width(),
            frame.height()
        )));
    }
    Ok(())
}

/// Clip shape of an item.
///
/// The token form mirrors CSS: `"50%"` is a full ellipse inscribed in the
/// box, a plain number (optionally suffixed with `px`) is a corner radius,
/// and `"0"` is a sharp rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BorderRadius {
    Ellipse,
    Corner(f32),
}

impl BorderRadius {
    pub const NONE: BorderRadius = BorderRadius::Corner(0.0);

    pub fn is_ellipse(&self) -> bool {
        matches!(self, BorderRadius::Ellipse)
    }
}

impl Default for BorderRadius {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for BorderRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BorderRadius::Ellipse => write!(f, "50%"),
            BorderRadius::Corner(r) => write!(f, "{}", r),
        }
    }
}

impl FromStr for BorderRadius {
    type Err = EditorError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Self::NONE);
        }
        if let Some(percent) = token.strip_suffix('%') {
            let value: f32 = percent.trim().parse().map_err(|_| {
                EditorError::InvalidGeometry(format!("Bad border radius: {}", token))
            })?;
            // Percentages only ever mean "ellipse" in layouts and templates
            return Ok(if value > 0.0 {
                BorderRadius::Ellipse
            } else {
                Self::NONE
            });
        }
        let number = token.strip_suffix("px").unwrap_or(token).trim();
        let value: f32 = number
            .parse()
            .map_err(|_| EditorError::InvalidGeometry(format!("Bad border radius: {}", token)))?;
        if !value.is_finite() {
            return Err(EditorError::InvalidGeometry(format!(
                "Bad border radius: {}",
                token
            )));
        }
        Ok(BorderRadius::Corner(value.max(0.0)))
    }
}

impl TryFrom<String> for BorderRadius {
    type Error = EditorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BorderRadius> for String {
    fn from(value: BorderRadius) -> Self {
        value.to_string()
    }
}

/// Visual style shared by every item type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemStyle {
    pub border_radius: BorderRadius,
    pub border_width: f32,
    pub border_color: Color32,
    /// 0 disables the drop shadow
    pub shadow_blur: f32,
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            border_radius: BorderRadius::NONE,
            border_width: 0.0,
            border_color: Color32::WHITE,
            shadow_blur: 0.0,
        }
    }
}

impl ItemStyle {
    pub fn has_border(&self) -> bool {
        self.border_width > 0.0
    }

    pub fn has_shadow(&self) -> bool {
        self.shadow_blur > 0.0
    }
}

/// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`
pub fn parse_hex_color(text: &str) -> Option<Color32> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("transparent") {
        return Some(Color32::TRANSPARENT);
    }
    let hex = text.strip_prefix('#')?;
    let nibble = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => {
            let r = nibble(bytes[0])?;
            let g = nibble(bytes[1])?;
            let b = nibble(bytes[2])?;
            Some(Color32::from_rgb(r * 17, g * 17, b * 17))
        }
        6 | 8 => {
            let byte = |i: usize| Some(nibble(bytes[i])? * 16 + nibble(bytes[i + 1])?);
            let (r, g, b) = (byte(0)?, byte(2)?, byte(4)?);
            if bytes.len() == 8 {
                Some(Color32::from_rgba_unmultiplied(r, g, b, byte(6)?))
            } else {
                Some(Color32::from_rgb(r, g, b))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_radius_tokens() {
        assert_eq!("50%".parse::<BorderRadius>().unwrap(), BorderRadius::Ellipse);
        assert_eq!("0".parse::<BorderRadius>().unwrap(), BorderRadius::NONE);
        assert_eq!("12px".parse::<BorderRadius>().unwrap(), BorderRadius::Corner(12.0));
        assert_eq!("".parse::<BorderRadius>().unwrap(), BorderRadius::NONE);
        assert!("round".parse::<BorderRadius>().is_err());
        assert_eq!(BorderRadius::Ellipse.to_string(), "50%");
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(parse_hex_color("#e0e7ff"), Some(Color32::from_rgb(0xe0, 0xe7, 0xff)));
        assert_eq!(parse_hex_color("transparent"), Some(Color32::TRANSPARENT));
        assert_eq!(parse_hex_color("fff"), None);
        assert_eq!(parse_hex_color("#ggg"), None);
    }

    #[test]
    fn test_validate_frame() {
        let ok = Rect::from_min_size(egui::pos2(-10.0, 5.0), egui::vec2(2.0, 2.0));
        assert!(validate_frame(&ok).is_ok());
        let flat = Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(0.0, 10.0));
        assert!(validate_frame(&flat).is_err());
        let nan = Rect::from_min_size(egui::pos2(f32::NAN, 0.0), egui::vec2(10.0, 10.0));
        assert!(validate_frame(&nan).is_err());
    }
}
