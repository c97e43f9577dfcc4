//! Deterministic stand-ins for the playback and visibility capabilities.
//!
//! Nothing here touches a clock: start requests settle only when a test
//! resolves them through a [`SurfaceProbe`], and visibility entries are
//! delivered only when a test calls [`FakeVisibility::emit`].

pub mod surface;
pub mod visibility;

pub use surface::{FakeBackend, FakeSurface, SurfaceCall, SurfaceProbe};
pub use visibility::{FakeVisibility, VisibilityEvent};
