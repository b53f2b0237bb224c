//! Text rasterisation.
//!
//! Fonts are looked up by family name among the system fonts, falling back
//! to a sans-serif system face and finally to egui's bundled font. A line is
//! rasterised once into its own pixmap and then placed with the item's
//! transform, so rotated text is resampled like any other content.

use std::collections::HashMap;
use std::fs;
use std::sync::OnceLock;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use log::{debug, warn};
use parking_lot::Mutex;
use rusttype::{Font, Scale, point};
use tiny_skia::{ColorU8, Mask, Pixmap, PixmapPaint, Transform};

use crate::element::TextContent;

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Font database has {} faces", db.len());
        db
    })
}

/// egui's bundled proportional font
fn bundled_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let definitions = egui::FontDefinitions::default();
        let data = definitions
            .font_data
            .get("Ubuntu-Light")
            .or_else(|| definitions.font_data.values().next())?;
        Font::try_from_vec(data.font.to_vec())
    })
    .as_ref()
}

fn load_system_font(family: &str) -> Option<Font<'static>> {
    let families = match family.trim() {
        "" | "sans-serif" | "Sans" => vec![Family::SansSerif],
        "serif" | "Serif" => vec![Family::Serif],
        "monospace" | "Monospace" => vec![Family::Monospace],
        other => vec![Family::Name(other), Family::SansSerif],
    };
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;
    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}

/// Font for a CSS-ish family name. `None` only if not even the bundled font
/// could be parsed.
pub fn font_for(family: &str) -> Option<&'static Font<'static>> {
    static CACHE: OnceLock<Mutex<HashMap<String, &'static Font<'static>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(font) = cache.lock().get(family).copied() {
        return Some(font);
    }
    let font: &'static Font<'static> = match load_system_font(family) {
        // Loaded at most once per family name
        Some(font) => Box::leak(Box::new(font)),
        None => {
            warn!("No system font for '{}', using bundled font", family);
            bundled_font()?
        }
    };
    cache.lock().insert(family.to_owned(), font);
    Some(font)
}

/// A rasterised single line of text
pub struct TextLine {
    pub pixmap: Pixmap,
    /// Advance width of the line, which may be narrower than the pixmap
    pub advance: f32,
    /// Ascent + descent at the requested size
    pub height: f32,
    /// Where the pen starts inside the pixmap; non-zero when the first glyph
    /// reaches left of its origin
    pub pen_x: f32,
}

/// rusttype scales by ascent - descent; CSS `font-size` is the em size
pub fn em_scale(font: &Font<'_>, size: f32) -> Scale {
    let unscaled = font.v_metrics_unscaled();
    let height = unscaled.ascent - unscaled.descent;
    if height <= 0.0 || font.units_per_em() == 0 {
        return Scale::uniform(size);
    }
    Scale::uniform(size * height / f32::from(font.units_per_em()))
}

/// Pen shift that keeps ink left of the origin inside the pixmap
pub fn pen_offset(min_x: Option<i32>) -> i32 {
    min_x.map_or(0, |x| (-x).max(0))
}

/// Rasterise `text` at `size` pixels (em size) in `color`. `None` for blank
/// text.
pub fn rasterize_line(
    font: &Font<'_>,
    text: &str,
    size: f32,
    color: egui::Color32,
) -> Option<TextLine> {
    if text.trim().is_empty() || !(size.is_finite() && size > 0.0) {
        return None;
    }
    let scale = em_scale(font, size);
    let v_metrics = font.v_metrics(scale);
    let height = v_metrics.ascent - v_metrics.descent;
    let glyphs: Vec<_> = font.layout(text, scale, point(0.0, v_metrics.ascent)).collect();
    let advance = glyphs
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0);

    let boxes: Vec<_> = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).collect();
    let shift = pen_offset(boxes.iter().map(|bb| bb.min.x).min());
    let width = boxes
        .iter()
        .map(|bb| bb.max.x)
        .max()
        .unwrap_or(0)
        .max(advance.ceil() as i32)
        + shift;
    let mut pixmap = Pixmap::new(width.max(1) as u32, height.ceil().max(1.0) as u32)?;

    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let (pw, ph) = (pixmap.width() as i32, pixmap.height() as i32);
    let mut coverage = vec![0.0_f32; (pw * ph) as usize];
    for glyph in &glyphs {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|x, y, v| {
            let px = bb.min.x + shift + x as i32;
            let py = bb.min.y + y as i32;
            if px >= 0 && py >= 0 && px < pw && py < ph {
                let cell = &mut coverage[(py * pw + px) as usize];
                *cell = cell.max(v);
            }
        });
    }
    for (dst, v) in pixmap.pixels_mut().iter_mut().zip(coverage) {
        let alpha = (v.clamp(0.0, 1.0) * a as f32).round() as u8;
        *dst = ColorU8::from_rgba(r, g, b, alpha).premultiply();
    }

    Some(TextLine {
        pixmap,
        advance,
        height,
        pen_x: shift as f32,
    })
}

/// Horizontal squeeze applied to a line so it fits `max_width`
pub fn compression(advance: f32, max_width: f32) -> f32 {
    if advance > max_width && advance > 0.0 {
        (max_width / advance).max(0.0)
    } else {
        1.0
    }
}

/// Draw `content` centred in `frame` under `transform`, clipped by `mask`.
/// Lines wider than the frame are compressed horizontally.
pub fn draw_text(
    target: &mut Pixmap,
    content: &TextContent,
    frame: egui::Rect,
    transform: Transform,
    mask: Option<&Mask>,
) {
    let Some(font) = font_for(&content.font_family) else {
        warn!("No font available, skipping text");
        return;
    };
    let Some(line) = rasterize_line(font, &content.content, content.font_size, content.color)
    else {
        return;
    };

    let squeeze = compression(line.advance, frame.width());
    let center = frame.center();
    let x = center.x - (line.advance / 2.0 + line.pen_x) * squeeze;
    let y = center.y - line.height / 2.0;
    let placement = transform.pre_translate(x, y).pre_scale(squeeze, 1.0);
    target.draw_pixmap(0, 0, line.pixmap.as_ref(), &PixmapPaint::default(), placement, mask);
}
