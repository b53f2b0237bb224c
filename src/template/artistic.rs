//! Radial and decorative template families.
//!
//! Slots are placed around a centre with `x = cx + cos(angle)·radius − size/2`
//! (and `sin` for y). They may overlap each other and hang past the canvas
//! edge; stacking is driven by each slot's z-index.

use std::f32::consts::{FRAC_PI_2, TAU};

use super::rng::SeededRng;
use super::{ARTISTIC_STYLE, Template, TemplateCategory, TemplateSlot};

const CENTER: f32 = 0.5;

fn artistic(id: String, name: String, slots: Vec<TemplateSlot>) -> Template {
    Template::new(id, name, TemplateCategory::Artistic, slots)
}

/// Square slot at `angle` on a circle of `radius` around the canvas centre
fn on_ring(angle: f32, radius: f32, size: f32) -> TemplateSlot {
    TemplateSlot::centered(
        CENTER + angle.cos() * radius,
        CENTER + angle.sin() * radius,
        size,
    )
    .with_style(&ARTISTIC_STYLE)
}

/// One centre slot ringed by `petals` equal slots
pub fn flower(petals: usize) -> Template {
    const RADIUS: f32 = 0.35;
    const SIZE: f32 = 0.25;

    let mut slots = vec![
        TemplateSlot::new(0.3, 0.3, 0.4, 0.4)
            .with_style(&ARTISTIC_STYLE)
            .with_z_index(20),
    ];
    for i in 0..petals {
        let angle = i as f32 / petals as f32 * TAU;
        slots.push(on_ring(angle, RADIUS, SIZE).with_z_index(10));
    }
    artistic(format!("art-flower-{petals}"), format!("Flower {petals}"), slots)
}

/// Single-ring flowers with 3 to 12 petals
pub fn flowers() -> Vec<Template> {
    (3..=12).map(flower).collect()
}

/// Centre, inner ring and outer ring; the outer ring is offset by half a
/// petal so the two rings interleave.
pub fn double_flower(petals: usize) -> Template {
    const INNER_RADIUS: f32 = 0.25;
    const INNER_SIZE: f32 = 0.2;
    const OUTER_RADIUS: f32 = 0.4;
    const OUTER_SIZE: f32 = 0.25;

    let mut slots = vec![
        TemplateSlot::new(0.35, 0.35, 0.3, 0.3)
            .with_style(&ARTISTIC_STYLE)
            .with_z_index(30),
    ];
    let n = petals as f32;
    for i in 0..petals {
        let angle = i as f32 / n * TAU;
        slots.push(on_ring(angle, INNER_RADIUS, INNER_SIZE).with_z_index(20));
    }
    for i in 0..petals {
        let angle = (i as f32 + 0.5) / n * TAU;
        slots.push(on_ring(angle, OUTER_RADIUS, OUTER_SIZE).with_z_index(10));
    }
    artistic(
        format!("art-dbl-flower-{petals}"),
        format!("Dbl Flower {petals}"),
        slots,
    )
}

/// Double flowers with 5 to 10 petals per ring
pub fn double_flowers() -> Vec<Template> {
    (5..=10).map(double_flower).collect()
}

/// Items wound outwards: the angle step is random per item, the radius and
/// size grow steadily.
pub fn spiral(index: usize, rng: &mut SeededRng) -> Template {
    let count = 5 + rng.below(8);
    let mut slots = Vec::with_capacity(count);
    let mut angle = 0.0_f32;
    let mut radius = 0.1_f32;
    for j in 0..count {
        let size = 0.2 + j as f32 * 0.01;
        slots.push(on_ring(angle, radius, size).with_z_index(j as i32));
        angle += 0.8 + rng.next_f32() * 0.5;
        radius += 0.06;
    }
    artistic(
        format!("art-spiral-{index}"),
        format!("Spiral {}", index + 1),
        slots,
    )
}

pub fn spirals(count: usize, rng: &mut SeededRng) -> Vec<Template> {
    (0..count).map(|i| spiral(i, rng)).collect()
}

/// A loose cluster of randomly sized circles around the centre. Border width
/// varies per slot to give the bubbles some texture.
pub fn bubble_cluster(index: usize, rng: &mut SeededRng) -> Template {
    const SPREAD: f32 = 0.7;

    let count = 6 + rng.below(10);
    let mut slots = Vec::with_capacity(count);
    for _ in 0..count {
        let size = 0.15 + rng.next_f32() * 0.2;
        let cx = CENTER + (rng.next_f32() - 0.5) * SPREAD;
        let cy = CENTER + (rng.next_f32() - 0.5) * SPREAD;
        let z = rng.below(10) as i32;
        let mut slot = TemplateSlot::centered(cx, cy, size)
            .with_style(&ARTISTIC_STYLE)
            .with_z_index(z);
        slot.border_width = Some(4.0 + rng.below(6) as f32);
        slots.push(slot);
    }
    artistic(
        format!("art-bubble-{index}"),
        format!("Bubbles {}", index + 1),
        slots,
    )
}

pub fn bubbles(count: usize, rng: &mut SeededRng) -> Vec<Template> {
    (0..count).map(|i| bubble_cluster(i, rng)).collect()
}

/// A left-to-right chain riding one period of a sine wave
pub fn wave(index: usize) -> Template {
    const SIZE: f32 = 0.25;
    const AMPLITUDE: f32 = 0.2;

    let count = 5 + index;
    let slots = (0..count)
        .map(|j| {
            let progress = j as f32 / (count - 1) as f32;
            let cx = 0.1 + progress * 0.8;
            let cy = CENTER + (progress * TAU).sin() * AMPLITUDE;
            TemplateSlot::centered(cx, cy, SIZE)
                .with_style(&ARTISTIC_STYLE)
                .with_z_index(j as i32)
        })
        .collect();
    artistic(format!("art-wave-{index}"), format!("Wave {}", index + 1), slots)
}

pub fn waves(count: usize) -> Vec<Template> {
    (0..count).map(wave).collect()
}

/// Evenly spaced slots on a circle with nothing in the middle
pub fn ring(index: usize) -> Template {
    const SIZE: f32 = 0.25;
    const RADIUS: f32 = 0.35;

    let count = 6 + index;
    let slots = (0..count)
        .map(|j| {
            let angle = j as f32 / count as f32 * TAU;
            on_ring(angle, RADIUS, SIZE).with_z_index(j as i32)
        })
        .collect();
    artistic(format!("art-ring-{index}"), format!("Ring {}", index + 1), slots)
}

pub fn rings(count: usize) -> Vec<Template> {
    (0..count).map(ring).collect()
}

/// A large anchor overlapping the top-left corner with smaller slots fanned
/// out across a quarter turn around it.
pub fn corner_fan(index: usize, rng: &mut SeededRng) -> Template {
    const SIZE: f32 = 0.25;

    let mut slots = vec![
        TemplateSlot::new(-0.1, -0.1, 0.6, 0.6)
            .with_style(&ARTISTIC_STYLE)
            .with_z_index(1),
    ];
    let fan = 4 + rng.below(4);
    for j in 0..fan {
        let angle = j as f32 / fan as f32 * FRAC_PI_2;
        let dist = 0.5 + rng.next_f32() * 0.2;
        slots.push(
            TemplateSlot::centered(angle.cos() * dist, angle.sin() * dist, SIZE)
                .with_style(&ARTISTIC_STYLE)
                .with_z_index(5 + j as i32),
        );
    }
    artistic(
        format!("art-corner-{index}"),
        format!("Corner Fan {}", index + 1),
        slots,
    )
}

pub fn corner_fans(count: usize, rng: &mut SeededRng) -> Vec<Template> {
    (0..count).map(|i| corner_fan(i, rng)).collect()
}
