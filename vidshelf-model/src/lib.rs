//! Core data model definitions shared across vidshelf crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod media;
pub mod numbers;

pub use error::{ModelError, Result as ModelResult};
pub use ids::{CategoryKey, MediaItemId};
pub use media::{MediaItem, MediaSource};
pub use numbers::Price;
