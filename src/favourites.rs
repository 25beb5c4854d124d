use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::IconCatalog;
use crate::model::{IconName, IconRecord};

pub const FAVOURITES_KEY: &str = "Favourites";

const DELIMITER: char = ',';
const ESCAPE: char = '\\';

pub trait PreferenceStore {
    /// Missing keys read as an empty string.
    fn get_string(&self, key: &str) -> String;
    fn set_string(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for MemoryPreferences {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> String {
        self.values.get(key).cloned().unwrap_or_default()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Favourite icon names in the order they were added, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavouriteSet {
    names: Vec<IconName>,
}

impl FavouriteSet {
    /// Never fails: unknown escapes are kept, empty fragments are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::default();
        let mut current = String::new();
        let mut chars = raw.chars();
        while let Some(ch) = chars.next() {
            match ch {
                ESCAPE => match chars.next() {
                    Some(next) => current.push(next),
                    None => current.push(ESCAPE),
                },
                DELIMITER => set.push_fragment(&mut current),
                other => current.push(other),
            }
        }
        set.push_fragment(&mut current);
        set
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (index, name) in self.names.iter().enumerate() {
            if index > 0 {
                out.push(DELIMITER);
            }
            for ch in name.as_str().chars() {
                if ch == DELIMITER || ch == ESCAPE {
                    out.push(ESCAPE);
                }
                out.push(ch);
            }
        }
        out
    }

    pub fn contains(&self, name: &IconName) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: IconName) -> bool {
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn remove(&mut self, name: &IconName) -> bool {
        let before = self.names.len();
        self.names.retain(|candidate| candidate != name);
        self.names.len() != before
    }

    pub fn names(&self) -> &[IconName] {
        &self.names
    }

    pub const fn len(&self) -> usize {
        self.names.len()
    }

    fn push_fragment(&mut self, fragment: &mut String) {
        if let Some(name) = IconName::new(std::mem::take(fragment)) {
            self.insert(name);
        }
    }
}

#[derive(Debug)]
pub struct FavouritesStore<P> {
    prefs: P,
    loaded: Option<FavouriteSet>,
}

impl<P: PreferenceStore> FavouritesStore<P> {
    pub const fn new(prefs: P) -> Self {
        Self {
            prefs,
            loaded: None,
        }
    }

    /// Reads the persisted set on first use and drops names that no icon in
    /// `catalog` carries any more.
    pub fn ensure_loaded<'a>(&'a mut self, catalog: &'a IconCatalog) -> LoadedFavourites<'a, P> {
        let prefs = &mut self.prefs;
        let set = self.loaded.get_or_insert_with(|| {
            let raw = prefs.get_string(FAVOURITES_KEY);
            let mut set = FavouriteSet::parse(&raw);
            let before = set.len();
            set.names
                .retain(|name| catalog.find_by_name(name).is_some());
            debug!(
                loaded = set.len(),
                expired = before - set.len(),
                "favourites loaded"
            );
            set
        });
        LoadedFavourites {
            set,
            prefs,
            catalog,
        }
    }

    /// `false` until the set has been loaded.
    pub fn is_favourite(&self, icon: &IconRecord) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|set| set.contains(icon.name()))
    }

    pub fn loaded_set(&self) -> Option<&FavouriteSet> {
        self.loaded.as_ref()
    }

    #[cfg(test)]
    pub const fn preferences(&self) -> &P {
        &self.prefs
    }
}

pub struct LoadedFavourites<'a, P> {
    set: &'a mut FavouriteSet,
    prefs: &'a mut P,
    catalog: &'a IconCatalog,
}

impl<P: PreferenceStore> LoadedFavourites<'_, P> {
    pub fn contains(&self, icon: &IconRecord) -> bool {
        self.set.contains(icon.name())
    }

    /// No-op when the name is already present.
    pub fn add(&mut self, icon: &IconRecord) {
        if self.set.insert(icon.name().clone()) {
            self.save();
        }
    }

    /// No-op when the name is absent.
    pub fn remove(&mut self, icon: &IconRecord) {
        if self.set.remove(icon.name()) {
            self.save();
        }
    }

    /// Returns the new membership.
    pub fn toggle(&mut self, icon: &IconRecord) -> bool {
        if self.contains(icon) {
            self.remove(icon);
            false
        } else {
            self.add(icon);
            true
        }
    }

    pub fn materialized_list(&self) -> Vec<IconRecord> {
        self.set
            .names()
            .iter()
            .filter_map(|name| self.catalog.find_by_name(name))
            .cloned()
            .collect()
    }

    /// Writes the whole set back under [`FAVOURITES_KEY`].
    pub fn save(&mut self) {
        self.prefs.set_string(FAVOURITES_KEY, &self.set.serialize());
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::IconCatalog;
    use crate::model::{IconName, IconRecord, test_icon};
    use crate::source::testing::FixedSource;

    use super::{
        FAVOURITES_KEY, FavouriteSet, FavouritesStore, MemoryPreferences, PreferenceStore,
    };

    fn catalog_of(icons: &[IconRecord]) -> IconCatalog {
        let source = icons.iter().fold(FixedSource::default(), |source, icon| {
            source.with(icon.name().as_str(), icon)
        });
        IconCatalog::build_from(&source, std::iter::empty())
    }

    fn name(raw: &str) -> IconName {
        IconName::new(raw).expect("name")
    }

    fn prefs_with(raw: &str) -> MemoryPreferences {
        let mut prefs = MemoryPreferences::default();
        prefs.set_string(FAVOURITES_KEY, raw);
        prefs
    }

    #[test]
    fn parse_drops_empty_fragments_and_duplicates() {
        let set = FavouriteSet::parse(",A,,B,A,");
        assert_eq!(set.names(), &[name("A"), name("B")]);
        assert_eq!(FavouriteSet::parse(""), FavouriteSet::default());
        assert_eq!(FavouriteSet::parse(",,,"), FavouriteSet::default());
    }

    #[test]
    fn round_trip_keeps_the_same_names() {
        let mut set = FavouriteSet::default();
        for raw in ["A", "B", "C"] {
            set.insert(name(raw));
        }
        let serialized = set.serialize();
        assert_eq!(serialized, "A,B,C");
        assert_eq!(FavouriteSet::parse(&serialized), set);
    }

    #[test]
    fn names_with_delimiter_or_escape_survive_round_trip() {
        let mut set = FavouriteSet::default();
        set.insert(name("icon,with,commas"));
        set.insert(name(r"back\slash"));
        set.insert(name("plain"));

        let serialized = set.serialize();
        assert_eq!(serialized, r"icon\,with\,commas,back\\slash,plain");
        assert_eq!(FavouriteSet::parse(&serialized), set);
    }

    #[test]
    fn trailing_escape_is_kept_literally() {
        let set = FavouriteSet::parse(r"odd\");
        assert_eq!(set.names(), &[name(r"odd\")]);
    }

    #[test]
    fn legacy_backslash_names_lose_the_backslash() {
        // Unescaped strings only parse unchanged when names carry no `\`.
        assert_eq!(
            FavouriteSet::parse(r"back\slash,plain").names(),
            &[name("backslash"), name("plain")]
        );
        assert_eq!(FavouriteSet::parse("icon-a,icon-b").serialize(), "icon-a,icon-b");
    }

    #[test]
    fn nothing_is_read_before_an_explicit_load() {
        let alpha = test_icon("Alpha", 16, 16);
        let catalog = catalog_of(std::slice::from_ref(&alpha));
        let mut store = FavouritesStore::new(prefs_with("Alpha"));

        assert!(store.loaded_set().is_none());
        assert!(!store.is_favourite(&alpha));

        assert!(store.ensure_loaded(&catalog).contains(&alpha));
        assert!(store.loaded_set().is_some());
        assert!(store.is_favourite(&alpha));
    }

    #[test]
    fn unresolvable_names_expire_on_load() {
        let beta = test_icon("Beta", 16, 16);
        let catalog = catalog_of(std::slice::from_ref(&beta));
        let mut store = FavouritesStore::new(prefs_with("Gone,Beta"));

        let favourites = store.ensure_loaded(&catalog);
        let listed = favourites.materialized_list();

        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_same_entity(&beta));
        assert_eq!(store.loaded_set().map(FavouriteSet::len), Some(1));
        assert_eq!(store.preferences().get_string(FAVOURITES_KEY), "Gone,Beta");

        store.ensure_loaded(&catalog).save();
        assert_eq!(store.preferences().get_string(FAVOURITES_KEY), "Beta");
    }

    #[test]
    fn membership_reflects_the_last_operation() {
        let alpha = test_icon("Alpha", 16, 16);
        let beta = test_icon("Beta", 16, 16);
        let catalog = catalog_of(&[alpha.clone(), beta.clone()]);
        let mut store = FavouritesStore::new(MemoryPreferences::default());

        let mut favourites = store.ensure_loaded(&catalog);
        favourites.remove(&alpha);
        assert!(!favourites.contains(&alpha));
        favourites.add(&alpha);
        favourites.add(&alpha);
        favourites.add(&beta);
        favourites.remove(&beta);
        assert!(favourites.contains(&alpha));
        assert!(!favourites.contains(&beta));
        assert!(!favourites.toggle(&alpha));
        assert!(favourites.toggle(&beta));

        assert!(!store.is_favourite(&alpha));
        assert!(store.is_favourite(&beta));
        assert_eq!(store.preferences().get_string(FAVOURITES_KEY), "Beta");
    }

    #[test]
    fn every_mutation_is_persisted_immediately() {
        let alpha = test_icon("Alpha", 16, 16);
        let beta = test_icon("Beta", 16, 16);
        let catalog = catalog_of(&[alpha.clone(), beta.clone()]);
        let mut store = FavouritesStore::new(MemoryPreferences::default());

        store.ensure_loaded(&catalog).add(&beta);
        assert_eq!(store.preferences().get_string(FAVOURITES_KEY), "Beta");
        store.ensure_loaded(&catalog).add(&alpha);
        assert_eq!(store.preferences().get_string(FAVOURITES_KEY), "Beta,Alpha");
        store.ensure_loaded(&catalog).remove(&beta);
        assert_eq!(store.preferences().get_string(FAVOURITES_KEY), "Alpha");
    }

    #[test]
    fn favourite_follows_the_name_not_the_object() {
        let original = test_icon("Beta", 16, 16);
        let twin = test_icon("Beta", 32, 32);
        let catalog = catalog_of(std::slice::from_ref(&original));
        let mut store = FavouritesStore::new(MemoryPreferences::default());

        store.ensure_loaded(&catalog).add(&original);

        assert!(store.is_favourite(&twin));
        let listed = store.ensure_loaded(&catalog).materialized_list();
        assert!(listed[0].is_same_entity(&original));
    }

    #[test]
    fn shared_name_materializes_the_first_catalog_image() {
        let small = test_icon("folder", 16, 16);
        let large = test_icon("folder", 48, 48);
        let source = FixedSource::default()
            .with("folder", &small)
            .with("folder-large", &large);
        let catalog = IconCatalog::build_from(&source, std::iter::empty());
        assert_eq!(catalog.len(), 2);
        let mut store = FavouritesStore::new(MemoryPreferences::default());

        store.ensure_loaded(&catalog).add(&large);

        let listed = store.ensure_loaded(&catalog).materialized_list();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_same_entity(&small));
        assert!(store.is_favourite(&small) && store.is_favourite(&large));
    }
}
