//! Headless vidshelf player.
//!
//! Replays a scripted browsing session against a simulated scrolling
//! viewport and simulated media surfaces, driving the real grid and playback
//! controllers from `vidshelf-core`.

pub mod app;
pub mod demo;
pub mod session;
pub mod sim;

pub use session::{BrowseSession, SessionReport};
