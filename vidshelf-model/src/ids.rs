use crate::error::ModelError;

/// Stable identifier of a catalog item.
///
/// Identity must survive re-renders: the grid keys its playback controllers by
/// this value, so two items that compare equal here share one controller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct MediaItemId(String);

impl MediaItemId {
    pub fn new(id: impl Into<String>) -> Result<Self, ModelError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ModelError::InvalidMedia(
                "media item id must not be empty".to_string(),
            ));
        }
        Ok(MediaItemId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MediaItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MediaItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MediaItemId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MediaItemId::new(value)
    }
}

impl From<MediaItemId> for String {
    fn from(id: MediaItemId) -> Self {
        id.0
    }
}

impl TryFrom<&str> for MediaItemId {
    type Error = ModelError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MediaItemId::new(value)
    }
}

/// Key of a browsing category (for example `nature` or `travel`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CategoryKey(String);

impl CategoryKey {
    pub fn new(key: impl Into<String>) -> Self {
        CategoryKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryKey {
    fn from(key: &str) -> Self {
        CategoryKey::new(key)
    }
}
