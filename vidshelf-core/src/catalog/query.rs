use std::str::FromStr;

use vidshelf_model::{CategoryKey, MediaItem};

use crate::error::CoreError;
use crate::playlist::Playlist;

/// Sidebar destination that scopes the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Section {
    /// Every item in the catalog.
    #[default]
    Home,
    Category(CategoryKey),
    /// Items saved to the local playlist.
    Playlist,
}

impl Section {
    pub fn category(key: impl Into<CategoryKey>) -> Self {
        Section::Category(key.into())
    }

    fn admits(&self, item: &MediaItem, playlist: &Playlist) -> bool {
        match self {
            Section::Home => true,
            Section::Category(key) => item.in_category(key),
            Section::Playlist => playlist.contains(&item.id),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Home => f.write_str("home"),
            Section::Category(key) => write!(f, "category:{key}"),
            Section::Playlist => f.write_str("playlist"),
        }
    }
}

impl FromStr for Section {
    type Err = CoreError;

    /// Parses `home`, `playlist` or `category:<key>`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        match raw {
            "home" => Ok(Section::Home),
            "playlist" => Ok(Section::Playlist),
            _ => match raw.strip_prefix("category:").map(str::trim) {
                Some(key) if !key.is_empty() => Ok(Section::category(key)),
                _ => Err(CoreError::InvalidSection(raw.to_string())),
            },
        }
    }
}

impl TryFrom<String> for Section {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Section> for String {
    fn from(section: Section) -> Self {
        section.to_string()
    }
}

/// Section plus free-text search, as driven by the sidebar and search box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub section: Section,
    pub search: String,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = section;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Whether `item` belongs in the grid for this query.
    ///
    /// Search is trimmed and case-insensitive over title and description. A
    /// blank search matches everything.
    pub fn matches(&self, item: &MediaItem, playlist: &Playlist) -> bool {
        if !self.section.admits(item, playlist) {
            return false;
        }

        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || item.title.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle)
    }
}
