use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use vidshelf_contracts::ViewportHandle;
use vidshelf_model::{MediaItem, MediaItemId};

use crate::playback::{PlaybackController, PlaybackPhase, PlaybackRuntime};

/// Invoked when a card is activated.
pub type SelectionHandler = Box<dyn Fn(&MediaItem) + Send + Sync>;

/// Outcome of reconciling the grid against a new item list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub mounted: usize,
    pub retained: usize,
    pub unmounted: usize,
    /// Items skipped because their id already appeared earlier in the list.
    pub duplicates: usize,
}

/// Renders a collection of media items as preview cards.
///
/// Controllers are keyed by [`MediaItemId`]: re-rendering with the same ids
/// keeps every controller (and its observation) alive even when the order
/// changes. The autoplay flag and the viewport are shared by every card.
pub struct GridPresenter {
    runtime: PlaybackRuntime,
    viewport: Option<ViewportHandle>,
    autoplay_enabled: bool,
    order: Vec<MediaItemId>,
    controllers: HashMap<MediaItemId, PlaybackController>,
    on_select: Option<SelectionHandler>,
}

impl GridPresenter {
    pub fn new(
        runtime: PlaybackRuntime,
        viewport: Option<ViewportHandle>,
        autoplay_enabled: bool,
    ) -> Self {
        Self {
            runtime,
            viewport,
            autoplay_enabled,
            order: Vec::new(),
            controllers: HashMap::new(),
            on_select: None,
        }
    }

    /// Register the handler called by [`GridPresenter::select`].
    pub fn on_select(&mut self, handler: SelectionHandler) {
        self.on_select = Some(handler);
    }

    /// Reconcile mounted cards against `items`.
    ///
    /// Cards whose id is gone are unmounted before new ones are mounted.
    pub fn render<I>(&mut self, items: I) -> RenderSummary
    where
        I: IntoIterator<Item = Arc<MediaItem>>,
    {
        let mut summary = RenderSummary::default();
        let mut seen = HashSet::new();
        let mut incoming = Vec::new();

        for item in items {
            if !seen.insert(item.id.clone()) {
                log::warn!(
                    "Duplicate media item {} in grid render; keeping the first",
                    item.id
                );
                summary.duplicates += 1;
                continue;
            }
            incoming.push(item);
        }

        let stale: Vec<MediaItemId> = self
            .controllers
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        for id in stale {
            if let Some(controller) = self.controllers.remove(&id) {
                controller.unmount();
                summary.unmounted += 1;
            }
        }

        self.order.clear();
        for item in incoming {
            let id = item.id.clone();
            if self.controllers.contains_key(&id) {
                summary.retained += 1;
            } else {
                let controller = PlaybackController::mount(
                    item,
                    self.viewport.clone(),
                    self.autoplay_enabled,
                    &self.runtime,
                );
                self.controllers.insert(id.clone(), controller);
                summary.mounted += 1;
            }
            self.order.push(id);
        }

        log::debug!(
            "Grid render: {} mounted, {} retained, {} unmounted",
            summary.mounted,
            summary.retained,
            summary.unmounted
        );
        summary
    }

    /// Apply one autoplay flag to every card.
    pub fn set_autoplay_enabled(&mut self, enabled: bool) {
        if self.autoplay_enabled == enabled {
            return;
        }
        self.autoplay_enabled = enabled;
        for controller in self.controllers.values() {
            controller.set_autoplay_enabled(enabled);
        }
    }

    /// Move every card to a different viewport.
    pub fn set_viewport(&mut self, viewport: Option<ViewportHandle>) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        for id in &self.order {
            if let Some(controller) = self.controllers.get(id) {
                controller.rebind(self.viewport.clone(), controller.item());
            }
        }
    }

    /// Activate the card for `id`. Returns the item when it is in the grid.
    pub fn select(&self, id: &MediaItemId) -> Option<Arc<MediaItem>> {
        let item = self.controllers.get(id)?.item();
        if let Some(handler) = &self.on_select {
            handler(&item);
        }
        Some(item)
    }

    /// Unmount every card.
    pub fn clear(&mut self) {
        self.order.clear();
        for (_, controller) in self.controllers.drain() {
            controller.unmount();
        }
    }

    pub fn ids(&self) -> &[MediaItemId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn controller(&self, id: &MediaItemId) -> Option<&PlaybackController> {
        self.controllers.get(id)
    }

    /// Ids whose preview is currently playing, in grid order.
    pub fn playing(&self) -> Vec<MediaItemId> {
        self.order
            .iter()
            .filter(|id| {
                self.controllers
                    .get(*id)
                    .is_some_and(|c| c.phase() == PlaybackPhase::Playing)
            })
            .cloned()
            .collect()
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay_enabled
    }

    pub fn viewport(&self) -> Option<&ViewportHandle> {
        self.viewport.as_ref()
    }

    /// Wait for every card's in-flight start requests.
    pub async fn settled(&self) {
        join_all(self.controllers.values().map(|controller| controller.settled()))
            .await;
    }
}

impl std::fmt::Debug for GridPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridPresenter")
            .field("viewport", &self.viewport)
            .field("autoplay_enabled", &self.autoplay_enabled)
            .field("items", &self.order)
            .field("has_selection_handler", &self.on_select.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use vidshelf_model::{MediaSource, Price};

    use super::*;
    use crate::testing::{FakeBackend, FakeVisibility, VisibilityEvent};

    fn item(id: &str) -> Arc<MediaItem> {
        let source = MediaSource::parse(
            &format!("https://cdn.example.com/{id}.mp4"),
            &format!("https://cdn.example.com/{id}.jpg"),
        )
        .expect("valid urls");
        Arc::new(MediaItem::new(
            MediaItemId::new(id).expect("valid id"),
            id.to_uppercase(),
            source,
            Price::from_cents(199),
        ))
    }

    fn items(ids: &[&str]) -> Vec<Arc<MediaItem>> {
        ids.iter().map(|id| item(id)).collect()
    }

    fn id(raw: &str) -> MediaItemId {
        MediaItemId::new(raw).expect("valid id")
    }

    fn presenter(
        autoplay: bool,
    ) -> (GridPresenter, Arc<FakeBackend>, FakeVisibility) {
        let backend = Arc::new(FakeBackend::new());
        let visibility = FakeVisibility::new();
        let runtime =
            PlaybackRuntime::new(backend.clone(), Arc::new(visibility.clone()));
        let grid =
            GridPresenter::new(runtime, Some(ViewportHandle::new()), autoplay);
        (grid, backend, visibility)
    }

    #[tokio::test]
    async fn render_keys_controllers_by_id() {
        let (mut grid, backend, visibility) = presenter(true);

        let first = grid.render(items(&["a", "b", "c"]));
        assert_eq!(first.mounted, 3);
        assert_eq!(visibility.subscription_count(), 3);

        let second = grid.render(items(&["c", "a", "d"]));
        assert_eq!(
            second,
            RenderSummary {
                mounted: 1,
                retained: 2,
                unmounted: 1,
                duplicates: 0,
            }
        );
        assert_eq!(grid.ids(), &[id("c"), id("a"), id("d")]);
        assert_eq!(backend.probes().len(), 4);
        assert_eq!(visibility.subscription_count(), 4);
        assert_eq!(visibility.active_count(), 3);
        assert_eq!(visibility.disconnect_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_ids_keep_first_occurrence() {
        let (mut grid, _backend, _visibility) = presenter(true);

        let summary = grid.render(vec![item("a"), item("a"), item("b")]);

        assert_eq!(summary.mounted, 2);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(grid.len(), 2);
    }

    #[tokio::test]
    async fn autoplay_flag_reaches_every_card() {
        let (mut grid, backend, visibility) = presenter(true);
        grid.render(items(&["a", "b"]));

        for probe in backend.probes() {
            visibility.emit(&probe.container().expect("container"), 0.9);
            probe.resolve_next(Ok(()));
        }
        grid.settled().await;
        assert_eq!(grid.playing(), vec![id("a"), id("b")]);

        grid.set_autoplay_enabled(false);
        assert!(grid.playing().is_empty());
        assert!(backend.probes().iter().all(|p| p.is_paused()));

        // Cards mounted later pick up the current flag.
        grid.render(items(&["a", "b", "c"]));
        let controller = grid.controller(&id("c")).expect("mounted");
        assert!(!controller.autoplay_enabled());
    }

    #[tokio::test]
    async fn changing_viewport_rebinds_every_card() {
        let (mut grid, _backend, visibility) = presenter(true);
        grid.render(items(&["a", "b"]));

        let next = ViewportHandle::new();
        grid.set_viewport(Some(next.clone()));

        assert_eq!(visibility.subscription_count(), 4);
        assert_eq!(visibility.active_count(), 2);
        assert_eq!(visibility.last_viewport(), Some(next));
        assert!(matches!(
            visibility.events()[2],
            VisibilityEvent::Disconnected(0)
        ));
    }

    #[tokio::test]
    async fn select_invokes_handler_without_touching_playback() {
        let (mut grid, backend, _visibility) = presenter(true);
        grid.render(items(&["a", "b"]));

        let picked = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&picked);
        grid.on_select(Box::new(move |item: &MediaItem| {
            if let Ok(mut picked) = sink.lock() {
                picked.push(item.id.clone());
            }
        }));

        let selected = grid.select(&id("b")).expect("present");
        assert_eq!(selected.title, "B");
        assert!(grid.select(&id("zzz")).is_none());

        assert_eq!(*picked.lock().expect("lock"), vec![id("b")]);
        assert!(backend.probes().iter().all(|p| p.play_count() == 0));
    }

    #[tokio::test]
    async fn clear_unmounts_everything() {
        let (mut grid, backend, visibility) = presenter(true);
        grid.render(items(&["a", "b", "c"]));

        grid.clear();

        assert!(grid.is_empty());
        assert_eq!(visibility.active_count(), 0);
        assert_eq!(visibility.disconnect_count(), 3);
        assert!(backend.probes().iter().all(|p| p.is_released()));
    }
}
