//! Grid of preview cards, one playback controller per media item.

pub mod presenter;

pub use presenter::{GridPresenter, RenderSummary, SelectionHandler};
