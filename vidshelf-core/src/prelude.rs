//! Curated surface for presentation crates.

pub use crate::catalog::{Catalog, CatalogQuery, Section};
pub use crate::error::{CoreError, Result};
pub use crate::grid::{GridPresenter, RenderSummary, SelectionHandler};
pub use crate::playback::{
    PlaybackController, PlaybackFailure, PlaybackPhase, PlaybackRuntime,
    VISIBILITY_THRESHOLD,
};
pub use crate::playlist::{Playlist, PlaylistChange};
pub use crate::settings::{DeviceView, ViewerSettings};

pub use vidshelf_model::{CategoryKey, MediaItem, MediaItemId, MediaSource, Price};
