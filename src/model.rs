use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

/// Name of an icon as shown to the user and persisted in favourites.
///
/// Equality is exact and case-sensitive; searching goes through
/// [`IconName::matches`] which folds case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct IconName(String);

impl IconName {
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.0.to_lowercase().contains(needle)
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of an underlying image object. Two records with the same key
/// share one `IconImage` allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageKey(usize);

#[derive(Debug)]
pub struct IconImage {
    name: IconName,
    path: PathBuf,
    width: u32,
    height: u32,
}

impl IconImage {
    pub const fn new(name: IconName, path: PathBuf, width: u32, height: u32) -> Self {
        Self {
            name,
            path,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IconRecord {
    image: Arc<IconImage>,
}

impl IconRecord {
    pub const fn new(image: Arc<IconImage>) -> Self {
        Self { image }
    }

    pub fn name(&self) -> &IconName {
        &self.image.name
    }

    pub fn path(&self) -> &Path {
        &self.image.path
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    pub fn size_label(&self) -> String {
        format!("{}x{}", self.image.width, self.image.height)
    }

    pub fn key(&self) -> ImageKey {
        ImageKey(Arc::as_ptr(&self.image).addr())
    }

    pub fn is_same_entity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }

    /// Size to draw the icon at so it fits a `bound` square.
    /// Icons already inside the bound keep their native size.
    #[allow(clippy::cast_precision_loss)]
    pub fn fitted_size(&self, bound: f32) -> (f32, f32) {
        let width = self.image.width as f32;
        let height = self.image.height as f32;
        if (width <= bound && height <= bound) || width <= 0.0 || height <= 0.0 {
            return (width, height);
        }
        let scale = (bound / width).min(bound / height);
        (width * scale, height * scale)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    All,
    Favourites,
}

impl Scope {
    pub const fn toggled(self) -> Self {
        match self {
            Self::All => Self::Favourites,
            Self::Favourites => Self::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellBorder {
    Selected,
    Favourite,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisualState {
    pub selected: bool,
    pub favourite: bool,
}

impl VisualState {
    pub const fn border(self) -> CellBorder {
        if self.selected {
            CellBorder::Selected
        } else if self.favourite {
            CellBorder::Favourite
        } else {
            CellBorder::Plain
        }
    }

    pub const fn shows_star(self) -> bool {
        self.favourite
    }
}

#[cfg(test)]
pub(crate) fn test_icon(name: &str, width: u32, height: u32) -> IconRecord {
    let name = IconName::new(name).expect("test icon name");
    let path = PathBuf::from(format!("/icons/{name}.png"));
    IconRecord::new(Arc::new(IconImage::new(name, path, width, height)))
}

#[cfg(test)]
mod tests {
    use super::{CellBorder, IconName, Scope, VisualState, test_icon};

    #[test]
    fn empty_names_are_rejected() {
        assert!(IconName::new("").is_none());
        assert_eq!(IconName::new("Beta").map(|n| n.to_string()), Some("Beta".to_string()));
    }

    #[test]
    fn search_match_folds_case_but_equality_does_not() {
        let name = IconName::new("Folder-Open").expect("name");
        assert!(name.matches("folder-o"));
        assert!(!name.matches("closed"));
        assert_ne!(IconName::new("folder-open"), Some(name));
    }

    #[test]
    fn identity_follows_the_shared_image() {
        let a = test_icon("alpha", 16, 16);
        let a_clone = a.clone();
        let a_twin = test_icon("alpha", 16, 16);

        assert!(a.is_same_entity(&a_clone));
        assert_eq!(a.key(), a_clone.key());
        assert!(!a.is_same_entity(&a_twin));
        assert_ne!(a.key(), a_twin.key());
        assert_eq!(a.name(), a_twin.name());
    }

    #[test]
    fn fitted_size_only_scales_down() {
        assert_eq!(test_icon("small", 16, 32).fitted_size(55.0), (16.0, 32.0));
        assert_eq!(test_icon("wide", 110, 55).fitted_size(55.0), (55.0, 27.5));
        assert_eq!(test_icon("tall", 64, 128).fitted_size(32.0), (16.0, 32.0));
    }

    #[test]
    fn selection_border_wins_over_favourite_border() {
        let both = VisualState {
            selected: true,
            favourite: true,
        };
        assert_eq!(both.border(), CellBorder::Selected);
        assert!(both.shows_star());

        let favourite = VisualState {
            selected: false,
            favourite: true,
        };
        assert_eq!(favourite.border(), CellBorder::Favourite);
        assert_eq!(VisualState::default().border(), CellBorder::Plain);
        assert!(!VisualState::default().shows_star());
    }

    #[test]
    fn scope_toggles_back_and_forth() {
        assert_eq!(Scope::All.toggled(), Scope::Favourites);
        assert_eq!(Scope::All.toggled().toggled(), Scope::All);
    }
}
