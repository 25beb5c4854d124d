use std::mem;

use crate::catalog::IconCatalog;
use crate::favourites::{FavouriteSet, FavouritesStore, PreferenceStore};
use crate::model::{IconRecord, Scope};

use super::reducer::{Intent, Render, reduce};
use super::session::{GridCell, Session};

/// Owns the catalog, the favourites store and the one browsing session, and
/// routes every user intent through [`reduce`].
#[derive(Debug)]
pub struct ViewController<P> {
    catalog: IconCatalog,
    favourites: FavouritesStore<P>,
    session: Session,
}

impl<P: PreferenceStore> ViewController<P> {
    pub fn new(catalog: IconCatalog, prefs: P) -> Self {
        let mut controller = Self {
            catalog,
            favourites: FavouritesStore::new(prefs),
            session: Session::default(),
        };
        controller.favourites.ensure_loaded(&controller.catalog);
        controller.dispatch(Intent::Recompute);
        controller
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Render> {
        let session = mem::take(&mut self.session);
        let (session, renders) = reduce(session, intent, &self.catalog, &mut self.favourites);
        self.session = session;
        renders
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.session.cells
    }

    pub fn selection(&self) -> Option<&IconRecord> {
        self.session.selection.current()
    }

    pub const fn scope(&self) -> Scope {
        self.session.scope
    }

    pub fn search(&self) -> &str {
        &self.session.search
    }

    pub const fn total_icons(&self) -> usize {
        self.catalog.len()
    }

    pub fn favourite_count(&self) -> usize {
        self.favourites.loaded_set().map_or(0, FavouriteSet::len)
    }

    pub const fn favourites(&self) -> &FavouritesStore<P> {
        &self.favourites
    }
}
