use url::Url;

use crate::error::ModelError;
use crate::ids::{CategoryKey, MediaItemId};
use crate::numbers::Price;

/// Where a preview surface pulls its stream and poster from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSource {
    pub stream: Url,
    pub poster: Url,
}

impl MediaSource {
    pub fn new(stream: Url, poster: Url) -> Self {
        Self { stream, poster }
    }

    pub fn parse(stream: &str, poster: &str) -> Result<Self, ModelError> {
        Ok(Self {
            stream: Url::parse(stream)?,
            poster: Url::parse(poster)?,
        })
    }
}

/// A purchasable video in the catalog.
///
/// Items are immutable once handed to the grid; anything that needs a
/// different stream or poster gets a new item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaItem {
    pub id: MediaItemId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Option<CategoryKey>,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub source: MediaSource,
    pub price: Price,
}

impl MediaItem {
    pub fn new(
        id: MediaItemId,
        title: impl Into<String>,
        source: MediaSource,
        price: Price,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: None,
            source,
            price,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<CategoryKey>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn in_category(&self, key: &CategoryKey) -> bool {
        self.category.as_ref() == Some(key)
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flattened_source_and_price() {
        let raw = r#"{
            "id": "v1",
            "title": "Coastline",
            "category": "nature",
            "stream": "https://cdn.example.com/v1.mp4",
            "poster": "https://cdn.example.com/v1.jpg",
            "price": 4.99
        }"#;

        let item: MediaItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id.as_str(), "v1");
        assert_eq!(item.price.cents(), 499);
        assert_eq!(item.description, "");
        assert!(item.in_category(&CategoryKey::new("nature")));
        assert_eq!(item.source.poster.path(), "/v1.jpg");
    }

    #[test]
    fn rejects_negative_price_and_blank_id() {
        let negative = r#"{"id":"v2","title":"t","stream":"https://a/b","poster":"https://a/c","price":-1.0}"#;
        assert!(serde_json::from_str::<MediaItem>(negative).is_err());

        let blank = r#"{"id":"","title":"t","stream":"https://a/b","poster":"https://a/c","price":1.0}"#;
        assert!(serde_json::from_str::<MediaItem>(blank).is_err());
    }
}
