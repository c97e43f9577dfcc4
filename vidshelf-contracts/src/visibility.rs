use std::sync::Arc;

use crate::handles::{ContainerHandle, ViewportHandle};

/// One intersection report for an observed container.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    pub container: ContainerHandle,
    /// Fraction of the container's area inside the viewport, `0.0..=1.0`.
    pub intersection_ratio: f32,
}

impl VisibilityEntry {
    pub fn new(container: ContainerHandle, intersection_ratio: f32) -> Self {
        Self {
            container,
            intersection_ratio: intersection_ratio.clamp(0.0, 1.0),
        }
    }

    pub fn meets(&self, threshold: f32) -> bool {
        self.intersection_ratio >= threshold
    }
}

/// Push callback invoked by the visibility primitive on its own schedule.
pub type VisibilityCallback = Arc<dyn Fn(VisibilityEntry) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ObserveError {
    #[error("viewport is not available")]
    ViewportUnavailable,

    #[error("observation rejected: {0}")]
    Rejected(String),
}

/// Live observation handle. Dropping it without calling `disconnect` is
/// allowed but leaves cleanup to the implementation's `Drop`.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait VisibilitySubscription: Send {
    /// Stop delivering entries. Calling it more than once is a no-op.
    fn disconnect(&mut self);
}

/// Capability that relates a container to a scrolling viewport and reports
/// threshold crossings.
#[cfg_attr(feature = "mocks", mockall::automock)]
pub trait VisibilitySource: Send + Sync {
    fn subscribe(
        &self,
        container: &ContainerHandle,
        viewport: &ViewportHandle,
        threshold: f32,
        callback: VisibilityCallback,
    ) -> Result<Box<dyn VisibilitySubscription>, ObserveError>;
}
