use std::ops::Range;

use vidshelf_config::SimulationConfig;
use vidshelf_core::settings::DeviceView;

/// Row-major card layout of the grid inside its scrolling viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub columns: usize,
    pub row_height: f32,
    /// Space between consecutive rows.
    pub row_gap: f32,
    pub viewport_height: f32,
}

impl GridGeometry {
    pub fn new(
        columns: usize,
        row_height: f32,
        row_gap: f32,
        viewport_height: f32,
    ) -> Self {
        Self {
            columns,
            row_height,
            row_gap,
            viewport_height,
        }
    }

    pub fn for_view(config: &SimulationConfig, view: DeviceView) -> Self {
        Self::new(
            config.columns_for(view),
            config.row_height,
            config.row_gap,
            config.viewport_height,
        )
    }

    fn row_stride(&self) -> f32 {
        self.row_height + self.row_gap
    }

    pub fn total_rows(&self, total_items: usize) -> usize {
        if self.columns == 0 {
            return 0;
        }
        total_items.div_ceil(self.columns)
    }

    pub fn content_height(&self, total_items: usize) -> f32 {
        let rows = self.total_rows(total_items);
        if rows == 0 {
            return 0.0;
        }
        rows as f32 * self.row_height + (rows - 1) as f32 * self.row_gap
    }

    pub fn max_scroll(&self, total_items: usize) -> f32 {
        (self.content_height(total_items) - self.viewport_height).max(0.0)
    }

    /// Share of the card at `index` inside the viewport at `scroll`.
    pub fn intersection_ratio(&self, index: usize, scroll: f32) -> f32 {
        if self.columns == 0 || self.row_height <= 0.0 {
            return 0.0;
        }

        let row = index / self.columns;
        let top = row as f32 * self.row_stride();
        let bottom = top + self.row_height;

        let visible_top = top.max(scroll);
        let visible_bottom = bottom.min(scroll + self.viewport_height);
        let visible = (visible_bottom - visible_top).max(0.0);

        (visible / self.row_height).clamp(0.0, 1.0)
    }

    /// Indices of cards that intersect the viewport at all.
    pub fn visible_range(&self, scroll: f32, total_items: usize) -> Range<usize> {
        if total_items == 0 || self.columns == 0 || self.viewport_height <= 0.0 {
            return 0..0;
        }

        let total_rows = self.total_rows(total_items);
        let stride = self.row_stride();
        // First row whose bottom edge is below the top of the viewport.
        let first_row = (((scroll - self.row_height) / stride).floor() + 1.0)
            .max(0.0) as usize;
        let first_row = first_row.min(total_rows.saturating_sub(1));
        let last_row = (((scroll + self.viewport_height) / stride).ceil() as usize)
            .clamp(first_row + 1, total_rows);

        let start = first_row * self.columns;
        let end = (last_row * self.columns).min(total_items);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> GridGeometry {
        // Rows at 0..200, 220..420, 440..640, ...
        GridGeometry::new(3, 200.0, 20.0, 500.0)
    }

    #[test]
    fn ratio_tracks_partial_rows() {
        let grid = geometry();

        assert_eq!(grid.intersection_ratio(0, 0.0), 1.0);
        assert_eq!(grid.intersection_ratio(5, 0.0), 1.0);
        // Third row spans 440..640; viewport ends at 500.
        assert!((grid.intersection_ratio(6, 0.0) - 0.3).abs() < 1e-6);
        assert_eq!(grid.intersection_ratio(9, 0.0), 0.0);

        // Scrolled so the first row is half out.
        assert!((grid.intersection_ratio(2, 100.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn content_and_scroll_limits() {
        let grid = geometry();

        assert_eq!(grid.total_rows(7), 3);
        assert_eq!(grid.content_height(7), 640.0);
        assert_eq!(grid.max_scroll(7), 140.0);
        assert_eq!(grid.max_scroll(2), 0.0);
        assert_eq!(grid.content_height(0), 0.0);
    }

    #[test]
    fn visible_range_covers_intersecting_rows() {
        let grid = geometry();

        assert_eq!(grid.visible_range(0.0, 12), 0..9);
        assert_eq!(grid.visible_range(230.0, 12), 3..12);
        // Scrolled into the gap below the first row: that row shows nothing.
        assert_eq!(grid.visible_range(210.0, 12), 3..12);
        assert_eq!(grid.intersection_ratio(0, 210.0), 0.0);
        // Bottom edge exactly at the viewport top.
        assert_eq!(grid.visible_range(200.0, 12), 3..12);

        let short = GridGeometry::new(3, 200.0, 20.0, 300.0);
        assert_eq!(short.visible_range(210.0, 12), 3..9);
        assert_eq!(grid.visible_range(0.0, 0), 0..0);
    }
}
