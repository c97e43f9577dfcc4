//! Shared fixtures for player integration tests.

use vidshelf_config::SimulationConfig;
use vidshelf_core::prelude::*;

/// Two columns of 200px rows in a 280px viewport: the first row is fully
/// visible, the second shows 40% and therefore does not play.
pub fn simulation() -> SimulationConfig {
    SimulationConfig {
        viewport_height: 280.0,
        row_height: 200.0,
        row_gap: 0.0,
        desktop_columns: 2,
        smartphone_columns: 1,
        play_latency_ms: 20,
        unavailable_items: Vec::new(),
    }
}

pub fn id(raw: &str) -> MediaItemId {
    MediaItemId::new(raw).expect("valid id")
}

pub fn ids(raw: &[&str]) -> Vec<MediaItemId> {
    raw.iter().map(|r| id(r)).collect()
}

/// Items `a`..`f`; the first three are `nature`, the rest `city`.
pub fn catalog() -> Catalog {
    let items = ["a", "b", "c", "d", "e", "f"].into_iter().enumerate().map(
        |(index, name)| {
            let source = MediaSource::parse(
                &format!("https://cdn.example.com/{name}.mp4"),
                &format!("https://cdn.example.com/{name}.jpg"),
            )
            .expect("valid urls");
            let category = if index < 3 { "nature" } else { "city" };
            MediaItem::new(id(name), name.to_uppercase(), source, Price::from_cents(100))
                .with_category(category)
        },
    );
    Catalog::new(items).expect("unique ids")
}
