use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use vidshelf_contracts::{
    ContainerHandle, PlayError, PlaybackSurface, SurfaceSpec, ViewportHandle,
    VisibilityCallback, VisibilityEntry, VisibilitySource,
    VisibilitySubscription,
};
use vidshelf_model::{MediaItem, MediaItemId};

use super::phase::PlaybackPhase;
use super::runtime::PlaybackRuntime;

/// Share of a container's area that must intersect the viewport before its
/// preview plays.
pub const VISIBILITY_THRESHOLD: f32 = 0.5;

/// A start request that failed for a reason other than interruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackFailure {
    pub item: MediaItemId,
    pub reason: String,
}

/// Keeps one preview surface playing exactly while it is visible and autoplay
/// is enabled.
///
/// The controller exclusively owns its surface and its visibility
/// subscription. Both are released when the controller is dropped; dropping is
/// the unmount.
///
/// Start requests are spawned on the ambient tokio runtime and settle
/// asynchronously. Every stop, rebind and teardown bumps a generation counter
/// so that completions of superseded requests cannot flip the decision back.
pub struct PlaybackController {
    inner: Arc<Mutex<ControllerInner>>,
    visibility: Arc<dyn VisibilitySource>,
}

struct ControllerInner {
    item: Arc<MediaItem>,
    viewport: Option<ViewportHandle>,
    surface: Box<dyn PlaybackSurface>,
    observation: Option<Box<dyn VisibilitySubscription>>,
    /// Entries tagged with an older generation come from a released
    /// observation and are dropped.
    observation_generation: u64,
    /// Completions tagged with an older generation were superseded.
    play_generation: u64,
    visible: bool,
    autoplay_enabled: bool,
    phase: PlaybackPhase,
    failure_count: usize,
    last_failure: Option<PlaybackFailure>,
    in_flight: Vec<JoinHandle<()>>,
    detached: bool,
}

impl PlaybackController {
    /// Create the preview surface for `item` and start observing it against
    /// `viewport`.
    ///
    /// Without a viewport, or when the surface has no container yet, the
    /// controller stays on its poster and never observes. That is not an
    /// error.
    pub fn mount(
        item: Arc<MediaItem>,
        viewport: Option<ViewportHandle>,
        autoplay_enabled: bool,
        runtime: &PlaybackRuntime,
    ) -> Self {
        let surface = runtime.backend.create_surface(&SurfaceSpec::preview(&item));
        log::debug!("Mounting preview controller for {}", item.id);

        let controller = Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                item,
                viewport,
                surface,
                observation: None,
                observation_generation: 0,
                play_generation: 0,
                visible: false,
                autoplay_enabled,
                phase: PlaybackPhase::Idle,
                failure_count: 0,
                last_failure: None,
                in_flight: Vec::new(),
                detached: false,
            })),
            visibility: Arc::clone(&runtime.visibility),
        };

        controller.observe();
        controller
    }

    pub fn item(&self) -> Arc<MediaItem> {
        Arc::clone(&self.inner.lock().item)
    }

    pub fn id(&self) -> MediaItemId {
        self.inner.lock().item.id.clone()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.inner.lock().phase
    }

    /// Whether the last delivered entry met [`VISIBILITY_THRESHOLD`].
    pub fn is_visible(&self) -> bool {
        self.inner.lock().visible
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.inner.lock().autoplay_enabled
    }

    pub fn is_observing(&self) -> bool {
        self.inner.lock().observation.is_some()
    }

    pub fn container(&self) -> Option<ContainerHandle> {
        self.inner.lock().surface.container()
    }

    pub fn viewport(&self) -> Option<ViewportHandle> {
        self.inner.lock().viewport.clone()
    }

    /// Number of start requests that failed for a reason other than
    /// interruption.
    pub fn failure_count(&self) -> usize {
        self.inner.lock().failure_count
    }

    pub fn last_failure(&self) -> Option<PlaybackFailure> {
        self.inner.lock().last_failure.clone()
    }

    /// Change the enablement flag and immediately re-evaluate against the
    /// last known visibility.
    pub fn set_autoplay_enabled(&self, enabled: bool) {
        let mut inner = self.inner.lock();
        if inner.detached || inner.autoplay_enabled == enabled {
            return;
        }

        inner.autoplay_enabled = enabled;
        reconcile(&self.inner, &mut inner);
    }

    /// Pause and rewind to the start. Safe to call repeatedly.
    pub fn stop(&self) {
        let mut inner = self.inner.lock();
        if inner.detached {
            return;
        }
        inner.stop();
    }

    /// Point the controller at a different viewport or item.
    ///
    /// When either identity changes, the current observation is disconnected
    /// before the replacement is created and any playback is stopped. Same
    /// viewport and same item id is a no-op.
    pub fn rebind(&self, viewport: Option<ViewportHandle>, item: Arc<MediaItem>) {
        {
            let mut inner = self.inner.lock();
            if inner.detached {
                return;
            }

            let same_viewport = inner.viewport == viewport;
            let same_item = inner.item.id == item.id;
            if same_viewport && same_item {
                return;
            }

            inner.release_observation();
            inner.visible = false;
            if inner.phase.is_active() {
                inner.stop();
            }

            if !same_item {
                log::debug!("Rebinding preview {} to {}", inner.item.id, item.id);
                inner.surface.load(&item.source);
                inner.phase = PlaybackPhase::Idle;
                inner.item = item;
            }
            inner.viewport = viewport;
        }

        self.observe();
    }

    /// Tear the controller down. Equivalent to dropping it.
    pub fn unmount(self) {}

    /// Wait until every start request issued so far has settled.
    pub async fn settled(&self) {
        loop {
            let pending = std::mem::take(&mut self.inner.lock().in_flight);
            if pending.is_empty() {
                break;
            }
            for handle in pending {
                let _ = handle.await;
            }
        }
    }

    fn observe(&self) {
        let (container, viewport, generation, id) = {
            let mut inner = self.inner.lock();
            if inner.detached {
                return;
            }
            debug_assert!(inner.observation.is_none());

            inner.observation_generation += 1;
            let id = inner.item.id.clone();

            let Some(viewport) = inner.viewport.clone() else {
                log::debug!("No viewport for {id}; preview stays on its poster");
                return;
            };
            let Some(container) = inner.surface.container() else {
                log::debug!(
                    "Container for {id} is not laid out; preview stays on its poster"
                );
                return;
            };

            (container, viewport, inner.observation_generation, id)
        };

        let weak = Arc::downgrade(&self.inner);
        let callback: VisibilityCallback =
            Arc::new(move |entry: VisibilityEntry| {
                if let Some(inner) = weak.upgrade() {
                    on_visibility(&inner, generation, entry);
                }
            });

        // The subscription may deliver synchronously, so the lock is not
        // held across this call.
        match self.visibility.subscribe(
            &container,
            &viewport,
            VISIBILITY_THRESHOLD,
            callback,
        ) {
            Ok(mut subscription) => {
                let mut inner = self.inner.lock();
                if inner.detached || inner.observation_generation != generation {
                    drop(inner);
                    subscription.disconnect();
                    return;
                }
                inner.observation = Some(subscription);
            }
            Err(err) => {
                log::debug!("Visibility observation for {id} unavailable: {err}");
            }
        }
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.inner.lock().teardown();
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PlaybackController")
            .field("item", &inner.item.id)
            .field("phase", &inner.phase)
            .field("visible", &inner.visible)
            .field("autoplay_enabled", &inner.autoplay_enabled)
            .field("observing", &inner.observation.is_some())
            .finish()
    }
}

fn on_visibility(
    this: &Arc<Mutex<ControllerInner>>,
    generation: u64,
    entry: VisibilityEntry,
) {
    let mut inner = this.lock();
    if inner.detached || inner.observation_generation != generation {
        log::trace!("Dropping stale visibility entry for {}", inner.item.id);
        return;
    }
    if inner.surface.container().as_ref() != Some(&entry.container) {
        log::trace!(
            "Dropping visibility entry for another container on {}",
            inner.item.id
        );
        return;
    }

    inner.visible = entry.meets(VISIBILITY_THRESHOLD);
    reconcile(this, &mut inner);
}

fn reconcile(this: &Arc<Mutex<ControllerInner>>, inner: &mut ControllerInner) {
    let wants_playback = inner.visible && inner.autoplay_enabled;

    match (wants_playback, inner.phase) {
        (
            true,
            PlaybackPhase::Idle
            | PlaybackPhase::Stopped
            | PlaybackPhase::Unavailable,
        ) => start(this, inner),
        (false, PlaybackPhase::Starting | PlaybackPhase::Playing) => {
            inner.stop()
        }
        _ => {}
    }
}

fn start(this: &Arc<Mutex<ControllerInner>>, inner: &mut ControllerInner) {
    let Ok(runtime) = tokio::runtime::Handle::try_current() else {
        inner.record_failure("no async runtime to drive playback".to_string());
        inner.phase = PlaybackPhase::Unavailable;
        return;
    };

    inner.play_generation += 1;
    let generation = inner.play_generation;
    inner.phase = PlaybackPhase::Starting;

    let request = inner.surface.play();
    let weak = Arc::downgrade(this);
    let id = inner.item.id.clone();

    let handle = runtime.spawn(async move {
        let outcome = request.await;
        match weak.upgrade() {
            Some(inner) => inner.lock().settle(generation, outcome),
            None => {
                log::trace!("Start request for {id} settled after teardown")
            }
        }
    });

    inner.in_flight.retain(|pending| !pending.is_finished());
    inner.in_flight.push(handle);
}

impl ControllerInner {
    fn settle(&mut self, generation: u64, outcome: Result<(), PlayError>) {
        if self.detached {
            log::trace!("Ignoring start completion for unmounted {}", self.item.id);
            return;
        }

        let current = generation == self.play_generation;
        match outcome {
            Ok(()) if current => {
                log::debug!("Preview {} playing", self.item.id);
                self.phase = PlaybackPhase::Playing;
            }
            Ok(()) => {
                // Superseded. If the newer decision was a stop, the surface
                // started anyway and has to be stopped again.
                if !self.phase.is_active() {
                    log::trace!(
                        "Re-applying stop to {} after late start",
                        self.item.id
                    );
                    self.halt();
                }
            }
            Err(PlayError::Interrupted) => {
                log::trace!("Start request for {} interrupted", self.item.id);
                if current {
                    self.phase = PlaybackPhase::Idle;
                }
            }
            Err(PlayError::Unavailable(reason)) => {
                self.record_failure(reason);
                if current {
                    self.phase = PlaybackPhase::Unavailable;
                }
            }
        }
    }

    fn stop(&mut self) {
        self.play_generation += 1;
        self.halt();
        self.phase = PlaybackPhase::Stopped;
    }

    fn halt(&self) {
        self.surface.pause();
        self.surface.seek(Duration::ZERO);
    }

    fn release_observation(&mut self) {
        self.observation_generation += 1;
        if let Some(mut subscription) = self.observation.take() {
            subscription.disconnect();
        }
    }

    fn record_failure(&mut self, reason: String) {
        log::warn!(
            "Autoplay was prevented for media item {}: {}",
            self.item.id,
            reason
        );
        self.failure_count += 1;
        self.last_failure = Some(PlaybackFailure {
            item: self.item.id.clone(),
            reason,
        });
    }

    fn teardown(&mut self) {
        if self.detached {
            return;
        }

        self.release_observation();
        self.play_generation += 1;
        if self.phase.is_active() {
            self.halt();
        }
        self.phase = PlaybackPhase::Idle;
        self.detached = true;

        for pending in self.in_flight.drain(..) {
            pending.abort();
        }

        log::debug!("Unmounted preview controller for {}", self.item.id);
    }
}
