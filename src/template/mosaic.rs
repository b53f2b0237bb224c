//! Grid and recursive-split mosaics: templates whose slots exactly tile the
//! canvas.

use super::rng::SeededRng;
use super::{MOSAIC_STYLE, Template, TemplateCategory, TemplateSlot};

/// Grid sizes emitted by [`grids`]
pub const GRID_SIZES: [usize; 4] = [2, 3, 4, 5];

/// Item counts covered by [`mosaic_family`]
pub const MOSAIC_COUNTS: std::ops::RangeInclusive<usize> = 2..=10;

/// Ratios a split snaps to most of the time
pub const SNAP_RATIOS: [f32; 3] = [1.0 / 3.0, 0.5, 2.0 / 3.0];

/// Probability of picking a snap ratio rather than a continuous one
const SNAP_PROBABILITY: f64 = 0.7;

/// Sides closer than this (relative) count as a square
const SQUARE_TOLERANCE: f32 = 1e-4;

/// Axis-aligned rectangle in unit-square coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl UnitRect {
    pub const UNIT: UnitRect = UnitRect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Split into two at `ratio` along the chosen axis. A vertical split
    /// cuts with a vertical line, dividing the width.
    pub fn split(&self, vertical: bool, ratio: f32) -> (UnitRect, UnitRect) {
        if vertical {
            let left = self.w * ratio;
            (
                UnitRect { w: left, ..*self },
                UnitRect {
                    x: self.x + left,
                    w: self.w - left,
                    ..*self
                },
            )
        } else {
            let top = self.h * ratio;
            (
                UnitRect { h: top, ..*self },
                UnitRect {
                    y: self.y + top,
                    h: self.h - top,
                    ..*self
                },
            )
        }
    }

    fn into_slot(self) -> TemplateSlot {
        TemplateSlot::new(self.x, self.y, self.w, self.h).with_style(&MOSAIC_STYLE)
    }
}

/// `n × n` equal cells, row by row
pub fn grid(n: usize) -> Template {
    let cell = 1.0 / n as f32;
    let slots = (0..n)
        .flat_map(|row| {
            (0..n).map(move |col| {
                TemplateSlot::new(col as f32 * cell, row as f32 * cell, cell, cell)
                    .with_style(&MOSAIC_STYLE)
            })
        })
        .collect();
    Template::new(
        format!("grid-{n}x{n}"),
        format!("{n}x{n} Grid"),
        TemplateCategory::Mosaic,
        slots,
    )
}

/// Every grid in [`GRID_SIZES`]
pub fn grids() -> Vec<Template> {
    GRID_SIZES.iter().map(|&n| grid(n)).collect()
}

/// Index of the largest rectangle; the first one wins a tie
fn largest(rects: &[UnitRect]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, rect) in rects.iter().enumerate() {
        match best {
            Some((_, area)) if rect.area() <= area => {}
            _ => best = Some((index, rect.area())),
        }
    }
    best.map(|(index, _)| index)
}

fn choose_axis(rect: &UnitRect, rng: &mut SeededRng) -> bool {
    let longest = rect.w.max(rect.h);
    if (rect.w - rect.h).abs() <= longest * SQUARE_TOLERANCE {
        rng.chance(0.5)
    } else {
        // Always cut across the longer side
        rect.w > rect.h
    }
}

fn choose_ratio(rng: &mut SeededRng) -> f32 {
    if rng.chance(SNAP_PROBABILITY) {
        SNAP_RATIOS[rng.below(SNAP_RATIOS.len())]
    } else {
        rng.range(0.3, 0.7)
    }
}

/// Tile the unit square with exactly `n` rectangles by repeatedly halving
/// (at a chosen ratio) the largest one. `n == 0` is treated as 1.
pub fn split_unit_square(n: usize, rng: &mut SeededRng) -> Vec<UnitRect> {
    let mut rects = vec![UnitRect::UNIT];
    for _ in 1..n.max(1) {
        let Some(index) = largest(&rects) else {
            break;
        };
        let target = rects.remove(index);
        let vertical = choose_axis(&target, rng);
        let ratio = choose_ratio(rng);
        let (first, second) = target.split(vertical, ratio);
        rects.push(first);
        rects.push(second);
    }
    rects
}

/// One mosaic template of `n` tiles
pub fn mosaic(n: usize, variant: usize, rng: &mut SeededRng) -> Template {
    let slots = split_unit_square(n, rng)
        .into_iter()
        .map(UnitRect::into_slot)
        .collect();
    Template::new(
        format!("gen-mos-{n}-{variant}"),
        format!("Mosaic {n}-{}", variant + 1),
        TemplateCategory::Mosaic,
        slots,
    )
}

/// `count_per_level` independent mosaics for every count in [`MOSAIC_COUNTS`]
pub fn mosaic_family(count_per_level: usize, rng: &mut SeededRng) -> Vec<Template> {
    let mut templates = Vec::with_capacity(MOSAIC_COUNTS.count() * count_per_level);
    for n in MOSAIC_COUNTS {
        for variant in 0..count_per_level {
            templates.push(mosaic(n, variant, rng));
        }
    }
    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_layout() {
        let t = grid(3);
        assert_eq!(t.id, "grid-3x3");
        assert_eq!(t.slots.len(), 9);
        let last = t.slots[8];
        assert!((last.x - 2.0 / 3.0).abs() < 1e-6);
        assert!((last.y - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(last.rotation, Some(0.0));
        assert_eq!(last.border_width, Some(0.0));
    }

    #[test]
    fn test_largest_prefers_first_on_tie() {
        let (a, b) = UnitRect::UNIT.split(true, 0.5);
        assert_eq!(largest(&[a, b]), Some(0));
    }

    #[test]
    fn test_wide_rect_splits_vertically() {
        let mut rng = SeededRng::new(1);
        let wide = UnitRect { x: 0.0, y: 0.0, w: 1.0, h: 0.5 };
        for _ in 0..20 {
            assert!(choose_axis(&wide, &mut rng));
        }
        let tall = UnitRect { x: 0.0, y: 0.0, w: 0.25, h: 1.0 };
        assert!(!choose_axis(&tall, &mut rng));
    }

    #[test]
    fn test_ratio_bounds() {
        let mut rng = SeededRng::new(99);
        for _ in 0..1000 {
            let r = choose_ratio(&mut rng);
            assert!((0.3..=0.7).contains(&r), "ratio {r}");
        }
    }

    #[test]
    fn test_single_tile() {
        let mut rng = SeededRng::new(3);
        assert_eq!(split_unit_square(1, &mut rng), vec![UnitRect::UNIT]);
        assert_eq!(split_unit_square(0, &mut rng), vec![UnitRect::UNIT]);
    }
}
