use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use vidshelf_contracts::{
    ContainerHandle, ObserveError, ViewportHandle, VisibilityCallback,
    VisibilityEntry, VisibilitySource, VisibilitySubscription,
};

use super::geometry::GridGeometry;

struct Observer {
    id: u64,
    container: ContainerHandle,
    threshold: f32,
    callback: VisibilityCallback,
    /// Side of the threshold last reported; `None` until the first delivery.
    last_side: Option<bool>,
}

struct ViewportState {
    geometry: GridGeometry,
    scroll: f32,
    layout: HashMap<ContainerHandle, usize>,
    observers: Vec<Observer>,
    next_id: u64,
}

impl ViewportState {
    fn ratio_of(&self, container: &ContainerHandle) -> f32 {
        self.layout
            .get(container)
            .map(|&index| self.geometry.intersection_ratio(index, self.scroll))
            .unwrap_or(0.0)
    }

    fn clamp_scroll(&mut self) {
        let max = self.geometry.max_scroll(self.layout.len());
        self.scroll = self.scroll.clamp(0.0, max);
    }
}

/// Scrolling grid viewport that behaves like an intersection observer root.
///
/// Entries are only delivered from [`SimulatedViewport::flush`] (which every
/// scroll and layout change ends with), and only when an observer's side of
/// its threshold changed since the last delivery. Each new observer gets one
/// initial entry on the next flush. Containers that are not laid out report a
/// ratio of zero.
#[derive(Clone)]
pub struct SimulatedViewport {
    handle: ViewportHandle,
    state: Arc<Mutex<ViewportState>>,
}

impl std::fmt::Debug for SimulatedViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SimulatedViewport")
            .field("handle", &self.handle)
            .field("scroll", &state.scroll)
            .field("laid_out", &state.layout.len())
            .field("observers", &state.observers.len())
            .finish()
    }
}

impl SimulatedViewport {
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            handle: ViewportHandle::new(),
            state: Arc::new(Mutex::new(ViewportState {
                geometry,
                scroll: 0.0,
                layout: HashMap::new(),
                observers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn handle(&self) -> ViewportHandle {
        self.handle.clone()
    }

    pub fn geometry(&self) -> GridGeometry {
        self.state.lock().geometry
    }

    pub fn scroll_offset(&self) -> f32 {
        self.state.lock().scroll
    }

    pub fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    /// Current intersection ratio of `container`.
    pub fn ratio_of(&self, container: &ContainerHandle) -> f32 {
        self.state.lock().ratio_of(container)
    }

    /// Replace the layout: `containers[i]` sits in grid slot `i`.
    pub fn lay_out<I>(&self, containers: I) -> usize
    where
        I: IntoIterator<Item = ContainerHandle>,
    {
        self.replace_layout(containers, None)
    }

    /// Replace the layout and jump back to the top in one step, so cards of
    /// the old scroll position never see the new layout.
    pub fn lay_out_from_top<I>(&self, containers: I) -> usize
    where
        I: IntoIterator<Item = ContainerHandle>,
    {
        self.replace_layout(containers, Some(0.0))
    }

    fn replace_layout<I>(&self, containers: I, scroll: Option<f32>) -> usize
    where
        I: IntoIterator<Item = ContainerHandle>,
    {
        {
            let mut state = self.state.lock();
            if let Some(scroll) = scroll {
                state.scroll = scroll;
            }
            state.layout = containers
                .into_iter()
                .enumerate()
                .map(|(index, container)| (container, index))
                .collect();
            state.clamp_scroll();
        }
        self.flush()
    }

    /// Change columns or heights, for example after a device view switch.
    pub fn set_geometry(&self, geometry: GridGeometry) -> usize {
        {
            let mut state = self.state.lock();
            state.geometry = geometry;
            state.clamp_scroll();
        }
        self.flush()
    }

    /// Scroll to `offset`, clamped to the content. Returns the applied offset.
    pub fn scroll_to(&self, offset: f32) -> f32 {
        let applied = {
            let mut state = self.state.lock();
            state.scroll = offset;
            state.clamp_scroll();
            state.scroll
        };
        self.flush();
        applied
    }

    pub fn scroll_by(&self, delta: f32) -> f32 {
        let current = self.scroll_offset();
        self.scroll_to(current + delta)
    }

    /// Deliver pending threshold crossings. Returns how many entries were
    /// delivered.
    pub fn flush(&self) -> usize {
        let deliveries: Vec<(VisibilityCallback, VisibilityEntry)> = {
            let mut state = self.state.lock();
            let ratios: Vec<f32> = state
                .observers
                .iter()
                .map(|observer| state.ratio_of(&observer.container))
                .collect();

            state
                .observers
                .iter_mut()
                .zip(ratios)
                .filter_map(|(observer, ratio)| {
                    let side = ratio >= observer.threshold;
                    if observer.last_side == Some(side) {
                        return None;
                    }
                    observer.last_side = Some(side);
                    Some((
                        Arc::clone(&observer.callback),
                        VisibilityEntry::new(observer.container.clone(), ratio),
                    ))
                })
                .collect()
        };

        // Observers may re-enter (rebind, unmount) from their callbacks.
        let delivered = deliveries.len();
        for (callback, entry) in deliveries {
            callback(entry);
        }
        delivered
    }
}

impl VisibilitySource for SimulatedViewport {
    fn subscribe(
        &self,
        container: &ContainerHandle,
        viewport: &ViewportHandle,
        threshold: f32,
        callback: VisibilityCallback,
    ) -> Result<Box<dyn VisibilitySubscription>, ObserveError> {
        if viewport != &self.handle {
            return Err(ObserveError::ViewportUnavailable);
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ObserveError::Rejected(format!(
                "threshold {threshold} outside 0..=1"
            )));
        }

        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.observers.push(Observer {
            id,
            container: container.clone(),
            threshold,
            callback,
            last_side: None,
        });

        Ok(Box::new(ViewportSubscription {
            id,
            state: Arc::downgrade(&self.state),
        }))
    }
}

struct ViewportSubscription {
    id: u64,
    state: std::sync::Weak<Mutex<ViewportState>>,
}

impl VisibilitySubscription for ViewportSubscription {
    fn disconnect(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.lock().observers.retain(|observer| observer.id != self.id);
        }
    }
}

impl Drop for ViewportSubscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}
