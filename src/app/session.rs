use crate::model::{IconRecord, Scope, VisualState};
use crate::selection::SelectionState;

#[derive(Debug, Clone)]
pub struct GridCell {
    pub icon: IconRecord,
    pub state: VisualState,
}

/// Remembered offset of the main (all icons) grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollPositionCache(f32);

impl ScrollPositionCache {
    pub const fn offset(self) -> f32 {
        self.0
    }

    pub const fn remember(&mut self, offset: f32) {
        self.0 = offset;
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub scope: Scope,
    pub search: String,
    pub selection: SelectionState,
    pub scroll: ScrollPositionCache,
    pub cells: Vec<GridCell>,
}

impl Session {
    #[cfg(test)]
    pub fn cell_names(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|cell| cell.icon.name().as_str())
            .collect()
    }
}
