use crate::favourites::{FavouritesStore, PreferenceStore};
use crate::model::{IconRecord, VisualState};

/// The single selected icon. Filtering never clears it; a selected icon that
/// is filtered out simply stops being drawn as selected until it comes back.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Option<IconRecord>,
}

impl SelectionState {
    /// Returns the previous selection.
    pub fn select(&mut self, icon: IconRecord) -> Option<IconRecord> {
        self.current.replace(icon)
    }

    pub const fn current(&self) -> Option<&IconRecord> {
        self.current.as_ref()
    }

    pub fn is_selected(&self, icon: &IconRecord) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.is_same_entity(icon))
    }

    pub fn visual_state<P: PreferenceStore>(
        &self,
        icon: &IconRecord,
        favourites: &FavouritesStore<P>,
    ) -> VisualState {
        VisualState {
            selected: self.is_selected(icon),
            favourite: favourites.is_favourite(icon),
        }
    }
}
