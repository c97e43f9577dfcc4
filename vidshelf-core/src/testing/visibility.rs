use std::sync::Arc;

use parking_lot::Mutex;
use vidshelf_contracts::{
    ContainerHandle, ObserveError, ViewportHandle, VisibilityCallback,
    VisibilityEntry, VisibilitySource, VisibilitySubscription,
};

/// Lifecycle event recorded by [`FakeVisibility`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibilityEvent {
    Subscribed(u64),
    Disconnected(u64),
}

struct Record {
    id: u64,
    container: ContainerHandle,
    viewport: ViewportHandle,
    threshold: f32,
    callback: VisibilityCallback,
    active: bool,
}

#[derive(Default)]
struct State {
    next_id: u64,
    records: Vec<Record>,
    events: Vec<VisibilityEvent>,
    fail_next: Option<ObserveError>,
}

/// Visibility source driven entirely by the test.
#[derive(Clone, Default)]
pub struct FakeVisibility {
    state: Arc<Mutex<State>>,
}

impl std::fmt::Debug for FakeVisibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FakeVisibility")
            .field("subscriptions", &state.records.len())
            .field("events", &state.events)
            .finish()
    }
}

impl FakeVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `subscribe` call fail with `error`.
    pub fn fail_next_subscribe(&self, error: ObserveError) {
        self.state.lock().fail_next = Some(error);
    }

    /// Deliver an entry to every active subscription on `container`.
    /// Returns how many callbacks ran.
    pub fn emit(&self, container: &ContainerHandle, ratio: f32) -> usize {
        self.deliver(container, ratio, |record| record.active)
    }

    /// Deliver an entry to every subscription ever made on `container`,
    /// including disconnected ones, as a runtime with a queued entry might.
    pub fn emit_including_disconnected(
        &self,
        container: &ContainerHandle,
        ratio: f32,
    ) -> usize {
        self.deliver(container, ratio, |_| true)
    }

    /// Deliver an entry describing `reported` to the active subscriptions on
    /// `observed`, as a misbehaving runtime might.
    pub fn emit_for_other(
        &self,
        observed: &ContainerHandle,
        reported: &ContainerHandle,
        ratio: f32,
    ) -> usize {
        self.deliver_entry(observed, reported, ratio, |record| record.active)
    }

    pub fn events(&self) -> Vec<VisibilityEvent> {
        self.state.lock().events.clone()
    }

    pub fn subscription_count(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn active_count(&self) -> usize {
        self.state.lock().records.iter().filter(|r| r.active).count()
    }

    pub fn disconnect_count(&self) -> usize {
        self.state
            .lock()
            .events
            .iter()
            .filter(|event| matches!(event, VisibilityEvent::Disconnected(_)))
            .count()
    }

    pub fn active_for(&self, container: &ContainerHandle) -> usize {
        self.state
            .lock()
            .records
            .iter()
            .filter(|r| r.active && &r.container == container)
            .count()
    }

    pub fn last_threshold(&self) -> Option<f32> {
        self.state.lock().records.last().map(|r| r.threshold)
    }

    pub fn last_viewport(&self) -> Option<ViewportHandle> {
        self.state.lock().records.last().map(|r| r.viewport.clone())
    }

    pub fn last_container(&self) -> Option<ContainerHandle> {
        self.state.lock().records.last().map(|r| r.container.clone())
    }

    fn deliver(
        &self,
        container: &ContainerHandle,
        ratio: f32,
        filter: impl Fn(&Record) -> bool,
    ) -> usize {
        self.deliver_entry(container, container, ratio, filter)
    }

    fn deliver_entry(
        &self,
        observed: &ContainerHandle,
        reported: &ContainerHandle,
        ratio: f32,
        filter: impl Fn(&Record) -> bool,
    ) -> usize {
        // Callbacks run without the lock so they may call back into us.
        let callbacks: Vec<VisibilityCallback> = self
            .state
            .lock()
            .records
            .iter()
            .filter(|r| &r.container == observed && filter(r))
            .map(|r| Arc::clone(&r.callback))
            .collect();

        for callback in &callbacks {
            callback(VisibilityEntry::new(reported.clone(), ratio));
        }
        callbacks.len()
    }
}

impl VisibilitySource for FakeVisibility {
    fn subscribe(
        &self,
        container: &ContainerHandle,
        viewport: &ViewportHandle,
        threshold: f32,
        callback: VisibilityCallback,
    ) -> Result<Box<dyn VisibilitySubscription>, ObserveError> {
        let mut state = self.state.lock();
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }

        let id = state.next_id;
        state.next_id += 1;
        state.records.push(Record {
            id,
            container: container.clone(),
            viewport: viewport.clone(),
            threshold,
            callback,
            active: true,
        });
        state.events.push(VisibilityEvent::Subscribed(id));

        Ok(Box::new(FakeSubscription {
            id,
            state: Arc::clone(&self.state),
        }))
    }
}

struct FakeSubscription {
    id: u64,
    state: Arc<Mutex<State>>,
}

impl VisibilitySubscription for FakeSubscription {
    fn disconnect(&mut self) {
        let mut state = self.state.lock();
        let Some(record) = state.records.iter_mut().find(|r| r.id == self.id)
        else {
            return;
        };
        if !record.active {
            return;
        }
        record.active = false;
        state.events.push(VisibilityEvent::Disconnected(self.id));
    }
}

impl Drop for FakeSubscription {
    fn drop(&mut self) {
        self.disconnect();
    }
}
