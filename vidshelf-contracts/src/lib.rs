//! Trait surfaces that describe the runtime capabilities a preview grid
//! depends on: media surfaces that can start and stop playback, and a
//! visibility primitive that reports how much of an element intersects a
//! scrolling viewport.

pub mod handles;
pub mod playback;
pub mod visibility;

pub use handles::{ContainerHandle, ViewportHandle};
pub use playback::{
    PlayError, PlayRequest, PlaybackBackend, PlaybackSurface, SurfaceSpec,
};
pub use visibility::{
    ObserveError, VisibilityCallback, VisibilityEntry, VisibilitySource,
    VisibilitySubscription,
};

#[cfg(feature = "mocks")]
pub use playback::{MockPlaybackBackend, MockPlaybackSurface};
#[cfg(feature = "mocks")]
pub use visibility::{MockVisibilitySource, MockVisibilitySubscription};

/// Frequently used trait combinators for presentation crates.
pub mod prelude {
    pub use super::handles::{ContainerHandle, ViewportHandle};
    pub use super::playback::{PlaybackBackend, PlaybackSurface};
    pub use super::visibility::{VisibilitySource, VisibilitySubscription};
}
