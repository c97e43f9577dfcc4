use std::time::Duration;

use futures::future::BoxFuture;
use vidshelf_model::{MediaItem, MediaSource};

use crate::handles::ContainerHandle;

/// Why a playback start request did not lead to playback.
///
/// Only an interruption by a racing stop or teardown is told apart. Permission
/// errors, decode errors and missing resources all map to `Unavailable`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("playback start was interrupted")]
    Interrupted,

    #[error("playback unavailable: {0}")]
    Unavailable(String),
}

/// Pending outcome of [`PlaybackSurface::play`].
pub type PlayRequest = BoxFuture<'static, Result<(), PlayError>>;

/// Creation parameters for a preview surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub source: MediaSource,
    pub looping: bool,
    pub muted: bool,
}

impl SurfaceSpec {
    /// Looping, muted surface showing the item's poster until playback starts.
    pub fn preview(item: &MediaItem) -> Self {
        Self {
            source: item.source.clone(),
            looping: true,
            muted: true,
        }
    }
}

/// A single rendered media element and its play state.
///
/// `play` is fire-and-forget from the caller's point of view: the returned
/// request settles once playback actually starts or fails. `pause` and `seek`
/// are synchronous and must be safe to call on an already paused surface.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait PlaybackSurface: Send + Sync {
    /// Element that wraps the surface, if it is currently laid out.
    fn container(&self) -> Option<ContainerHandle>;

    /// Swap the stream and poster. Any pending start request is interrupted.
    fn load(&self, source: &MediaSource);

    fn play(&self) -> PlayRequest;

    fn pause(&self);

    fn seek(&self, position: Duration);

    fn is_paused(&self) -> bool;

    fn position(&self) -> Duration;
}

/// Factory for media surfaces.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait PlaybackBackend: Send + Sync {
    fn create_surface(&self, spec: &SurfaceSpec) -> Box<dyn PlaybackSurface>;
}
