use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use vidshelf_contracts::{
    ContainerHandle, PlayError, PlayRequest, PlaybackBackend, PlaybackSurface,
    SurfaceSpec,
};
use vidshelf_model::MediaSource;

/// Operation recorded by a [`FakeSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Load(MediaSource),
    Play,
    Pause,
    Seek(Duration),
}

#[derive(Debug)]
struct SurfaceState {
    spec: SurfaceSpec,
    container: Option<ContainerHandle>,
    paused: bool,
    position: Duration,
    calls: Vec<SurfaceCall>,
    pending: Vec<oneshot::Sender<Result<(), PlayError>>>,
    abort_pending_on_pause: bool,
    released: bool,
}

impl SurfaceState {
    fn interrupt_pending(&mut self) {
        for pending in self.pending.drain(..) {
            let _ = pending.send(Err(PlayError::Interrupted));
        }
    }
}

/// Surface whose start requests stay pending until resolved by a probe.
///
/// By default a pause interrupts every pending start request, which is how
/// browsers behave. [`FakeBackend::keep_pending_on_pause`] turns that off to
/// model runtimes where a start can complete after a stop.
#[derive(Debug)]
pub struct FakeSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl PlaybackSurface for FakeSurface {
    fn container(&self) -> Option<ContainerHandle> {
        self.state.lock().container.clone()
    }

    fn load(&self, source: &MediaSource) {
        let mut state = self.state.lock();
        state.calls.push(SurfaceCall::Load(source.clone()));
        state.spec.source = source.clone();
        state.paused = true;
        state.position = Duration::ZERO;
        state.interrupt_pending();
    }

    fn play(&self) -> PlayRequest {
        let (tx, rx) = oneshot::channel();
        {
            let mut state = self.state.lock();
            state.calls.push(SurfaceCall::Play);
            state.paused = false;
            state.pending.push(tx);
        }

        Box::pin(async move { rx.await.unwrap_or(Err(PlayError::Interrupted)) })
    }

    fn pause(&self) {
        let mut state = self.state.lock();
        state.calls.push(SurfaceCall::Pause);
        state.paused = true;
        if state.abort_pending_on_pause {
            state.interrupt_pending();
        }
    }

    fn seek(&self, position: Duration) {
        let mut state = self.state.lock();
        state.calls.push(SurfaceCall::Seek(position));
        state.position = position;
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    fn position(&self) -> Duration {
        self.state.lock().position
    }
}

impl Drop for FakeSurface {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.released = true;
        state.interrupt_pending();
    }
}

/// Test-side view of a [`FakeSurface`] that outlives the surface itself.
#[derive(Debug, Clone)]
pub struct SurfaceProbe {
    state: Arc<Mutex<SurfaceState>>,
}

impl SurfaceProbe {
    pub fn spec(&self) -> SurfaceSpec {
        self.state.lock().spec.clone()
    }

    pub fn container(&self) -> Option<ContainerHandle> {
        self.state.lock().container.clone()
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.lock().calls.clone()
    }

    pub fn play_count(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Play))
    }

    pub fn pause_count(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Pause))
    }

    /// Number of seeks back to the start.
    pub fn rewind_count(&self) -> usize {
        self.count(|call| matches!(call, SurfaceCall::Seek(p) if p.is_zero()))
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    pub fn position(&self) -> Duration {
        self.state.lock().position
    }

    /// Pretend playback advanced to `position`.
    pub fn set_position(&self, position: Duration) {
        self.state.lock().position = position;
    }

    pub fn pending_requests(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Whether the owning controller dropped the surface.
    pub fn is_released(&self) -> bool {
        self.state.lock().released
    }

    /// Settle the oldest pending start request. Returns false when nothing
    /// was pending.
    pub fn resolve_next(&self, outcome: Result<(), PlayError>) -> bool {
        let mut state = self.state.lock();
        if state.pending.is_empty() {
            return false;
        }
        let pending = state.pending.remove(0);
        state.paused = outcome.is_err();
        let _ = pending.send(outcome);
        true
    }

    /// Settle every pending start request with the same outcome.
    pub fn resolve_all(&self, outcome: Result<(), PlayError>) -> usize {
        let mut resolved = 0;
        while self.resolve_next(outcome.clone()) {
            resolved += 1;
        }
        resolved
    }

    fn count(&self, predicate: impl Fn(&SurfaceCall) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|call| predicate(call)).count()
    }
}

#[derive(Debug)]
struct BackendState {
    probes: Vec<SurfaceProbe>,
    with_container: bool,
    abort_pending_on_pause: bool,
}

/// Backend that hands out [`FakeSurface`]s and remembers a probe for each.
#[derive(Debug)]
pub struct FakeBackend {
    state: Mutex<BackendState>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BackendState {
                probes: Vec::new(),
                with_container: true,
                abort_pending_on_pause: true,
            }),
        }
    }

    /// Surfaces created from now on report no container.
    pub fn without_containers(self) -> Self {
        self.state.lock().with_container = false;
        self
    }

    /// Pauses on surfaces created from now on leave start requests pending.
    pub fn keep_pending_on_pause(self) -> Self {
        self.state.lock().abort_pending_on_pause = false;
        self
    }

    pub fn probes(&self) -> Vec<SurfaceProbe> {
        self.state.lock().probes.clone()
    }

    pub fn last_probe(&self) -> Option<SurfaceProbe> {
        self.state.lock().probes.last().cloned()
    }

    /// Most recently created surface whose current stream matches `source`.
    pub fn probe_for(&self, source: &MediaSource) -> Option<SurfaceProbe> {
        self.state
            .lock()
            .probes
            .iter()
            .rev()
            .find(|probe| probe.spec().source.stream == source.stream)
            .cloned()
    }
}

impl PlaybackBackend for FakeBackend {
    fn create_surface(&self, spec: &SurfaceSpec) -> Box<dyn PlaybackSurface> {
        let mut backend = self.state.lock();
        let state = Arc::new(Mutex::new(SurfaceState {
            spec: spec.clone(),
            container: backend.with_container.then(ContainerHandle::new),
            paused: true,
            position: Duration::ZERO,
            calls: Vec::new(),
            pending: Vec::new(),
            abort_pending_on_pause: backend.abort_pending_on_pause,
            released: false,
        }));

        backend.probes.push(SurfaceProbe {
            state: Arc::clone(&state),
        });
        Box::new(FakeSurface { state })
    }
}
