use std::sync::Arc;
use std::time::Duration;

use vidshelf_config::{ScriptStep, SimulationConfig};
use vidshelf_contracts::ContainerHandle;
use vidshelf_core::prelude::*;

use crate::sim::{GridGeometry, SimulatedBackend, SimulatedViewport};

/// Totals gathered while a script runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub steps: usize,
    /// Most previews seen playing at the same time after any step.
    pub peak_playing: usize,
    /// Start requests the simulated browser refused.
    pub blocked_starts: usize,
    pub selections: Vec<MediaItemId>,
    pub final_playing: Vec<MediaItemId>,
}

/// One viewer browsing the catalog in a simulated window.
///
/// Owns the viewer state (section, search, playlist, settings) and a grid of
/// preview cards laid out in a [`SimulatedViewport`]. Every state change
/// re-renders the grid and re-lays out the viewport, which in turn delivers
/// visibility entries to the cards.
pub struct BrowseSession {
    catalog: Catalog,
    playlist: Playlist,
    settings: ViewerSettings,
    query: CatalogQuery,
    simulation: SimulationConfig,
    backend: SimulatedBackend,
    viewport: SimulatedViewport,
    grid: GridPresenter,
    selections: Vec<MediaItemId>,
}

impl std::fmt::Debug for BrowseSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowseSession")
            .field("query", &self.query)
            .field("settings", &self.settings)
            .field("viewport", &self.viewport)
            .field("grid", &self.grid)
            .finish_non_exhaustive()
    }
}

impl BrowseSession {
    pub fn new(
        catalog: Catalog,
        settings: ViewerSettings,
        simulation: SimulationConfig,
    ) -> Self {
        let blocked = simulation.unavailable_items.iter().filter_map(|id| {
            let item = catalog.get(id);
            if item.is_none() {
                log::warn!("Unavailable item {id} is not in the catalog");
            }
            item.map(|item| item.source.stream.clone())
        });
        let backend =
            SimulatedBackend::new(Duration::from_millis(simulation.play_latency_ms))
                .with_blocked_streams(blocked.collect::<Vec<_>>());

        let viewport = SimulatedViewport::new(GridGeometry::for_view(
            &simulation,
            settings.device_view,
        ));
        let runtime = PlaybackRuntime::new(
            Arc::new(backend.clone()),
            Arc::new(viewport.clone()),
        );
        let mut grid = GridPresenter::new(
            runtime,
            Some(viewport.handle()),
            settings.autoplay_enabled,
        );
        grid.on_select(Box::new(|item: &MediaItem| {
            log::info!("Opening detail view for {} ({})", item.title, item.price);
        }));

        let mut session = Self {
            catalog,
            playlist: Playlist::new(),
            settings,
            query: CatalogQuery::new(),
            simulation,
            backend,
            viewport,
            grid,
            selections: Vec::new(),
        };
        session.refresh();
        session
    }

    pub fn show_section(&mut self, section: Section) {
        if self.query.section == section {
            return;
        }
        log::info!("Showing section {section}");
        self.query.section = section;
        self.refresh_from_top();
    }

    pub fn search(&mut self, search: impl Into<String>) {
        self.query.search = search.into();
        self.refresh_from_top();
    }

    pub fn toggle_autoplay(&mut self) -> bool {
        let enabled = self.settings.toggle_autoplay();
        log::info!("Autoplay {}", if enabled { "enabled" } else { "disabled" });
        self.grid.set_autoplay_enabled(enabled);
        enabled
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.settings.autoplay_enabled = enabled;
        self.grid.set_autoplay_enabled(enabled);
    }

    pub fn set_device_view(&mut self, view: DeviceView) {
        if self.settings.device_view == view {
            return;
        }
        log::info!("Switching to {view} layout");
        self.settings.set_device_view(view);
        self.viewport
            .set_geometry(GridGeometry::for_view(&self.simulation, view));
    }

    /// Add or remove an item from the playlist. Unknown ids are ignored.
    pub fn toggle_playlist(&mut self, id: &MediaItemId) -> Option<PlaylistChange> {
        if self.catalog.get(id).is_none() {
            log::warn!("Cannot toggle unknown item {id} in the playlist");
            return None;
        }

        let change = self.playlist.toggle(id.clone());
        log::info!("Playlist {change:?}: {id}");
        if self.query.section == Section::Playlist {
            self.refresh();
        }
        Some(change)
    }

    pub fn scroll_to(&mut self, offset: f32) -> f32 {
        self.viewport.scroll_to(offset)
    }

    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        self.viewport.scroll_by(delta)
    }

    pub fn select(&mut self, id: &MediaItemId) -> Option<Arc<MediaItem>> {
        let item = self.grid.select(id);
        match &item {
            Some(_) => self.selections.push(id.clone()),
            None => log::warn!("Item {id} is not on screen and cannot be selected"),
        }
        item
    }

    /// Let time pass, then wait for every outstanding start request.
    pub async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
        self.grid.settled().await;
    }

    pub async fn apply(&mut self, step: &ScriptStep) {
        match step {
            ScriptStep::Section { section } => self.show_section(section.clone()),
            ScriptStep::Search { query } => self.search(query.clone()),
            ScriptStep::ToggleAutoplay => {
                self.toggle_autoplay();
            }
            ScriptStep::SetAutoplay { enabled } => self.set_autoplay(*enabled),
            ScriptStep::DeviceView { view } => self.set_device_view(*view),
            ScriptStep::TogglePlaylist { id } => {
                self.toggle_playlist(id);
            }
            ScriptStep::ScrollTo { offset } => {
                self.scroll_to(*offset);
            }
            ScriptStep::ScrollBy { delta } => {
                self.scroll_by(*delta);
            }
            ScriptStep::Select { id } => {
                self.select(id);
            }
            ScriptStep::Wait { ms } => self.wait(Duration::from_millis(*ms)).await,
        }
    }

    pub async fn run_script(&mut self, steps: &[ScriptStep]) -> SessionReport {
        let mut report = SessionReport::default();

        for (index, step) in steps.iter().enumerate() {
            self.apply(step).await;

            let playing = self.playing();
            report.peak_playing = report.peak_playing.max(playing.len());
            log::info!(
                "Step {}/{} {:?}: scroll {:.0}, showing {}, playing [{}]",
                index + 1,
                steps.len(),
                step,
                self.viewport.scroll_offset(),
                self.grid.len(),
                join_ids(&playing)
            );
            report.steps += 1;
        }

        self.grid.settled().await;
        report.blocked_starts = self.backend.blocked_requests();
        report.selections = self.selections.clone();
        report.final_playing = self.playing();
        report
    }

    pub fn playing(&self) -> Vec<MediaItemId> {
        self.grid.playing()
    }

    /// Ids of cards that intersect the viewport at all.
    pub fn on_screen(&self) -> Vec<MediaItemId> {
        let range = self
            .viewport
            .geometry()
            .visible_range(self.viewport.scroll_offset(), self.grid.len());
        self.grid.ids()[range].to_vec()
    }

    pub fn grid(&self) -> &GridPresenter {
        &self.grid
    }

    pub fn viewport(&self) -> &SimulatedViewport {
        &self.viewport
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn query(&self) -> &CatalogQuery {
        &self.query
    }

    fn refresh(&mut self) {
        let containers = self.render();
        self.viewport.lay_out(containers);
    }

    /// New result sets start scrolled to the top.
    fn refresh_from_top(&mut self) {
        let containers = self.render();
        self.viewport.lay_out_from_top(containers);
    }

    fn render(&mut self) -> Vec<ContainerHandle> {
        let items = self.catalog.query(&self.query, &self.playlist);
        let summary = self.grid.render(items);
        log::debug!(
            "Rendered {} cards for {} (+{} -{})",
            self.grid.len(),
            self.query.section,
            summary.mounted,
            summary.unmounted
        );

        self.grid
            .ids()
            .iter()
            .filter_map(|id| self.grid.controller(id)?.container())
            .collect()
    }
}

fn join_ids(ids: &[MediaItemId]) -> String {
    ids.iter()
        .map(MediaItemId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
