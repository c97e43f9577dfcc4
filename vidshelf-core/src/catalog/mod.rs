//! The browsable catalog and the sidebar/search filtering applied to it.

pub mod query;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use vidshelf_model::{CategoryKey, MediaItem, MediaItemId};

use crate::error::{CoreError, Result};
use crate::playlist::Playlist;

pub use query::{CatalogQuery, Section};

/// Ordered, id-unique collection of media items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Arc<MediaItem>>,
    index: HashMap<MediaItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = MediaItem>,
    {
        let mut catalog = Catalog::default();
        for item in items {
            if catalog.index.contains_key(&item.id) {
                return Err(CoreError::DuplicateItem(item.id));
            }
            catalog.index.insert(item.id.clone(), catalog.items.len());
            catalog.items.push(Arc::new(item));
        }
        Ok(catalog)
    }

    /// Parse a JSON array of items.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let items: Vec<MediaItem> = serde_json::from_str(raw)?;
        Self::new(items)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        log::debug!(
            "Loaded {} catalog items from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &MediaItemId) -> Option<&Arc<MediaItem>> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<MediaItem>> {
        self.items.iter()
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<CategoryKey> {
        let mut keys: Vec<CategoryKey> = Vec::new();
        for key in self.items.iter().filter_map(|item| item.category.as_ref()) {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        keys
    }

    /// Items matching `query`, in catalog order.
    pub fn query(
        &self,
        query: &CatalogQuery,
        playlist: &Playlist,
    ) -> Vec<Arc<MediaItem>> {
        self.items
            .iter()
            .filter(|item| query.matches(item, playlist))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use vidshelf_model::{MediaSource, Price};

    use super::*;

    fn item(id: &str, title: &str, category: &str) -> MediaItem {
        let source = MediaSource::parse(
            &format!("https://cdn.example.com/{id}.mp4"),
            &format!("https://cdn.example.com/{id}.jpg"),
        )
        .expect("valid urls");
        MediaItem::new(
            MediaItemId::new(id).expect("valid id"),
            title,
            source,
            Price::from_cents(299),
        )
        .with_category(category)
    }

    fn sample() -> Catalog {
        Catalog::new([
            item("v1", "Coastal Cliffs", "nature")
                .with_description("Waves against basalt"),
            item("v2", "Night Market", "city"),
            item("v3", "Forest Rain", "nature"),
            item("v4", "Harbor Lights", "city")
                .with_description("Boats and coastal fog"),
        ])
        .expect("unique ids")
    }

    fn ids(items: &[Arc<MediaItem>]) -> Vec<&str> {
        items.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new([
            item("v1", "One", "nature"),
            item("v1", "Again", "city"),
        ])
        .unwrap_err();

        assert!(matches!(err, CoreError::DuplicateItem(id) if id.as_str() == "v1"));
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        let keys = sample().categories();
        assert_eq!(keys, vec![CategoryKey::from("nature"), CategoryKey::from("city")]);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let catalog = sample();
        let playlist = Playlist::new();

        let query = CatalogQuery::new().with_search("  COASTAL ");
        assert_eq!(ids(&catalog.query(&query, &playlist)), vec!["v1", "v4"]);

        let blank = CatalogQuery::new().with_search("   ");
        assert_eq!(catalog.query(&blank, &playlist).len(), 4);
    }

    #[test]
    fn sections_scope_results() {
        let catalog = sample();
        let mut playlist = Playlist::new();
        playlist.toggle(MediaItemId::new("v3").expect("id"));
        playlist.toggle(MediaItemId::new("v2").expect("id"));

        let nature = CatalogQuery::new().with_section(Section::category("nature"));
        assert_eq!(ids(&catalog.query(&nature, &playlist)), vec!["v1", "v3"]);

        // Catalog order, not playlist order.
        let saved = CatalogQuery::new().with_section(Section::Playlist);
        assert_eq!(ids(&catalog.query(&saved, &playlist)), vec!["v2", "v3"]);

        let combined = CatalogQuery::new()
            .with_section(Section::category("city"))
            .with_search("market");
        assert_eq!(ids(&catalog.query(&combined, &playlist)), vec!["v2"]);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = sample();
        let id = MediaItemId::new("v3").expect("id");
        assert_eq!(catalog.get(&id).map(|item| item.title.as_str()), Some("Forest Rain"));
        assert!(catalog.get(&MediaItemId::new("nope").expect("id")).is_none());
    }
}
