//! # Vidshelf Core
//!
//! Behaviour behind the vidshelf video grid: previews that play while they
//! are on screen, the grid that owns them, and the catalog filtering that
//! decides which cards are shown.
//!
//! ## Overview
//!
//! - **Playback**: [`playback::PlaybackController`] keeps one muted, looping
//!   preview playing exactly while at least half of it is visible and
//!   autoplay is enabled.
//! - **Grid**: [`grid::GridPresenter`] mounts one controller per item, keyed
//!   by id, and forwards the shared autoplay flag and viewport.
//! - **Catalog**: [`catalog::Catalog`] with sidebar sections and search.
//! - **Playlist / Settings**: local viewer state.
//!
//! ## Feature Flags
//!
//! - `testing`: exposes deterministic fakes of the playback and visibility
//!   capabilities in [`testing`].
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vidshelf_contracts::{PlaybackBackend, ViewportHandle, VisibilitySource};
//! use vidshelf_core::prelude::*;
//!
//! fn show_home(
//!     catalog: &Catalog,
//!     backend: Arc<dyn PlaybackBackend>,
//!     visibility: Arc<dyn VisibilitySource>,
//! ) -> GridPresenter {
//!     let runtime = PlaybackRuntime::new(backend, visibility);
//!     let mut grid = GridPresenter::new(runtime, Some(ViewportHandle::new()), true);
//!     grid.render(catalog.query(&CatalogQuery::new(), &Playlist::new()));
//!     grid
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Catalog storage, sidebar sections and search
pub mod catalog;
pub mod error;
/// Grid presentation of preview cards
pub mod grid;
pub mod playback;
pub mod playlist;
pub mod prelude;
pub mod settings;

#[cfg(any(test, feature = "testing"))]
#[cfg_attr(docsrs, doc(cfg(feature = "testing")))]
pub mod testing;

pub use error::{CoreError, Result};
