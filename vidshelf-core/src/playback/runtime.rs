use std::sync::Arc;

use vidshelf_contracts::{PlaybackBackend, VisibilitySource};

/// Capabilities a controller needs from its host environment.
#[derive(Clone)]
pub struct PlaybackRuntime {
    pub backend: Arc<dyn PlaybackBackend>,
    pub visibility: Arc<dyn VisibilitySource>,
}

impl PlaybackRuntime {
    pub fn new(
        backend: Arc<dyn PlaybackBackend>,
        visibility: Arc<dyn VisibilitySource>,
    ) -> Self {
        Self {
            backend,
            visibility,
        }
    }
}

impl std::fmt::Debug for PlaybackRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackRuntime")
            .field("backend", &"<dyn PlaybackBackend>")
            .field("visibility", &"<dyn VisibilitySource>")
            .finish()
    }
}
