//! Built-in catalog used when no catalog file is configured.

use vidshelf_core::catalog::Catalog;
use vidshelf_core::error::Result;
use vidshelf_model::{MediaItem, MediaItemId, MediaSource, Price};

const CDN: &str = "https://media.vidshelf.example/demo";

/// (id, title, category, description, cents)
const ENTRIES: &[(&str, &str, &str, &str, u64)] = &[
    ("coast-01", "Basalt Coast", "nature", "Waves folding over black rock at dawn", 499),
    ("city-01", "Night Market", "city", "Lanterns and steam over a crowded street", 299),
    ("travel-01", "Rail North", "travel", "A slow train through snowbound valleys", 599),
    ("nature-02", "Forest Rain", "nature", "Moss, ferns and a steady downpour", 0),
    ("city-02", "Harbor Lights", "city", "Container cranes after sunset", 349),
    ("travel-02", "Desert Road", "travel", "Heat shimmer on an empty highway", 449),
    ("nature-03", "Alpine Lake", "nature", "Still water under granite peaks", 399),
    ("food-01", "Street Noodles", "food", "Hand-pulled noodles, start to bowl", 199),
    ("city-03", "Rooftops", "city", "Timelapse across a sea of rooftops", 249),
    ("food-02", "Bakery Morning", "food", "Sourdough from shaping to crust", 299),
    ("travel-03", "Island Ferry", "travel", "Crossing turquoise shallows", 0),
    ("nature-04", "Dune Wind", "nature", "Sand rivers sliding over a crest", 349),
];

pub fn catalog() -> Result<Catalog> {
    let mut items = Vec::with_capacity(ENTRIES.len());
    for &(id, title, category, description, cents) in ENTRIES {
        let source = MediaSource::parse(
            &format!("{CDN}/{id}.mp4"),
            &format!("{CDN}/{id}.jpg"),
        )?;
        items.push(
            MediaItem::new(MediaItemId::new(id)?, title, source, Price::from_cents(cents))
                .with_category(category)
                .with_description(description),
        );
    }
    Catalog::new(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_catalog_is_valid() {
        let catalog = catalog().expect("demo catalog");
        assert_eq!(catalog.len(), ENTRIES.len());
        assert_eq!(catalog.categories().len(), 4);
    }
}
