use std::sync::OnceLock;

use log::info;

use super::rng::SeededRng;
use super::{Template, TemplateCategory, artistic, mosaic};

/// Seed for the built-in catalog. Changing it changes every generated
/// template id's layout, so it stays fixed across releases.
pub const CATALOG_SEED: u64 = 500;

const MOSAICS_PER_COUNT: usize = 20;
const SPIRALS: usize = 30;
const BUBBLES: usize = 40;
const WAVES: usize = 15;
const RINGS: usize = 15;
const CORNER_FANS: usize = 30;

/// Generate the full template list from `seed`.
///
/// Families are emitted in a fixed order and all draw from one stream, so
/// the same seed always yields the same list.
pub fn build_catalog(seed: u64) -> Vec<Template> {
    let mut rng = SeededRng::new(seed);
    let mut templates = mosaic::grids();
    templates.extend(mosaic::mosaic_family(MOSAICS_PER_COUNT, &mut rng));
    templates.extend(artistic::flowers());
    templates.extend(artistic::double_flowers());
    templates.extend(artistic::spirals(SPIRALS, &mut rng));
    templates.extend(artistic::bubbles(BUBBLES, &mut rng));
    templates.extend(artistic::waves(WAVES));
    templates.extend(artistic::rings(RINGS));
    templates.extend(artistic::corner_fans(CORNER_FANS, &mut rng));
    templates
}

/// The built-in catalog, generated once on first use
pub fn catalog() -> &'static [Template] {
    static CATALOG: OnceLock<Vec<Template>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let templates = build_catalog(CATALOG_SEED);
        info!("📐 Generated {} layout templates", templates.len());
        templates
    })
}

pub fn by_category(category: TemplateCategory) -> impl Iterator<Item = &'static Template> {
    catalog().iter().filter(move |t| t.category == category)
}

pub fn find(id: &str) -> Option<&'static Template> {
    catalog().iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_size_and_order() {
        let templates = build_catalog(CATALOG_SEED);
        // 4 grids, 9 × 20 mosaics, 10 flowers, 6 double flowers, then the
        // randomised families
        assert_eq!(templates.len(), 4 + 180 + 10 + 6 + 30 + 40 + 15 + 15 + 30);
        assert_eq!(templates[0].id, "grid-2x2");
        assert_eq!(templates[4].id, "gen-mos-2-0");
        assert_eq!(templates[184].id, "art-flower-3");
        assert_eq!(templates.last().map(|t| t.id.as_str()), Some("art-corner-29"));
    }

    #[test]
    fn test_ids_are_unique() {
        let templates = build_catalog(CATALOG_SEED);
        let ids: HashSet<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_find_and_filter() {
        assert!(find("grid-4x4").is_some());
        assert!(find("no-such-template").is_none());
        assert!(
            by_category(TemplateCategory::Mosaic).all(|t| t.category == TemplateCategory::Mosaic)
        );
        assert_eq!(by_category(TemplateCategory::Mosaic).count(), 184);
    }
}
