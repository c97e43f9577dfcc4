use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use url::Url;
use vidshelf_contracts::{
    ContainerHandle, PlayError, PlayRequest, PlaybackBackend, PlaybackSurface,
    SurfaceSpec,
};
use vidshelf_model::MediaSource;

#[derive(Debug)]
struct SurfaceState {
    source: MediaSource,
    paused: bool,
    /// Position at the last pause, seek or start.
    position: Duration,
    playing_since: Option<Instant>,
    /// Bumped by every pause and load; a start request that sees a different
    /// value when its latency elapses was interrupted.
    epoch: u64,
}

/// Media element stand-in whose start requests complete after a latency.
#[derive(Debug)]
pub struct SimulatedSurface {
    container: ContainerHandle,
    looping: bool,
    muted: bool,
    latency: Duration,
    blocked: Arc<HashSet<Url>>,
    blocked_requests: Arc<AtomicUsize>,
    state: Arc<Mutex<SurfaceState>>,
}

impl SimulatedSurface {
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl PlaybackSurface for SimulatedSurface {
    fn container(&self) -> Option<ContainerHandle> {
        Some(self.container.clone())
    }

    fn load(&self, source: &MediaSource) {
        let mut state = self.state.lock();
        state.epoch += 1;
        state.source = source.clone();
        state.paused = true;
        state.position = Duration::ZERO;
        state.playing_since = None;
    }

    fn play(&self) -> PlayRequest {
        let (epoch, stream) = {
            let state = self.state.lock();
            (state.epoch, state.source.stream.clone())
        };

        if self.blocked.contains(&stream) {
            self.blocked_requests.fetch_add(1, Ordering::Relaxed);
            return Box::pin(async move {
                Err(PlayError::Unavailable(format!(
                    "NotAllowedError: playback of {stream} was blocked"
                )))
            });
        }

        let latency = self.latency;
        let state = Arc::clone(&self.state);
        Box::pin(async move {
            tokio::time::sleep(latency).await;

            let mut state = state.lock();
            if state.epoch != epoch {
                return Err(PlayError::Interrupted);
            }
            if state.paused {
                state.paused = false;
                state.playing_since = Some(Instant::now());
            }
            Ok(())
        })
    }

    fn pause(&self) {
        let mut state = self.state.lock();
        state.epoch += 1;
        if let Some(since) = state.playing_since.take() {
            state.position += since.elapsed();
        }
        state.paused = true;
    }

    fn seek(&self, position: Duration) {
        let mut state = self.state.lock();
        state.position = position;
        if state.playing_since.is_some() {
            state.playing_since = Some(Instant::now());
        }
    }

    fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    fn position(&self) -> Duration {
        let state = self.state.lock();
        match state.playing_since {
            Some(since) => state.position + since.elapsed(),
            None => state.position,
        }
    }
}

/// Creates [`SimulatedSurface`]s that share one latency and block list.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    latency: Duration,
    blocked: Arc<HashSet<Url>>,
    blocked_requests: Arc<AtomicUsize>,
}

impl SimulatedBackend {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            blocked: Arc::new(HashSet::new()),
            blocked_requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Streams whose start requests fail as if the browser refused them.
    pub fn with_blocked_streams<I>(mut self, streams: I) -> Self
    where
        I: IntoIterator<Item = Url>,
    {
        self.blocked = Arc::new(streams.into_iter().collect());
        self
    }

    /// Create a surface for `spec` that shares this backend's latency and
    /// block list.
    pub fn surface(&self, spec: &SurfaceSpec) -> SimulatedSurface {
        SimulatedSurface {
            container: ContainerHandle::new(),
            looping: spec.looping,
            muted: spec.muted,
            latency: self.latency,
            blocked: Arc::clone(&self.blocked),
            blocked_requests: Arc::clone(&self.blocked_requests),
            state: Arc::new(Mutex::new(SurfaceState {
                source: spec.source.clone(),
                paused: true,
                position: Duration::ZERO,
                playing_since: None,
                epoch: 0,
            })),
        }
    }

    /// Start requests refused so far, across every surface.
    pub fn blocked_requests(&self) -> usize {
        self.blocked_requests.load(Ordering::Relaxed)
    }
}

impl PlaybackBackend for SimulatedBackend {
    fn create_surface(&self, spec: &SurfaceSpec) -> Box<dyn PlaybackSurface> {
        Box::new(self.surface(spec))
    }
}
