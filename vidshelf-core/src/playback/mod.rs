//! Visibility-driven preview playback.
//!
//! A [`PlaybackController`] owns one preview surface and one visibility
//! observation. It plays the surface while at least half of its container is
//! inside the viewport and autoplay is enabled, and stops (pause + rewind)
//! otherwise.

pub mod controller;
pub mod phase;
pub mod runtime;


pub use controller::{PlaybackController, PlaybackFailure, VISIBILITY_THRESHOLD};
pub use phase::PlaybackPhase;
pub use runtime::PlaybackRuntime;
