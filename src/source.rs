use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::model::{IconImage, IconName, IconRecord};

pub const ICON_SCAN_MAX_DEPTH: usize = 6;

const ICON_EXTENSIONS: [&str; 1] = ["png"];

pub trait IconSource {
    fn resolve(&self, name: &str) -> Option<IconRecord>;
    fn dynamic_names(&self) -> Vec<String>;
}

#[derive(Debug, Clone)]
struct Rendition {
    canonical: PathBuf,
    area: u64,
}

/// Icons found under one or more theme directories.
///
/// A requested name is the file stem of whatever was found on disk, links
/// included. Every canonical file maps to exactly one shared [`IconImage`],
/// so aliases that link to the same file resolve to the same object.
#[derive(Debug, Default)]
pub struct ThemeDirSource {
    discovered: Vec<String>,
    by_name: HashMap<String, Arc<IconImage>>,
}

impl ThemeDirSource {
    pub fn scan(roots: &[PathBuf], max_depth: usize) -> Self {
        let mut discovered = Vec::new();
        let mut best: HashMap<String, Rendition> = HashMap::new();
        let mut dimensions: HashMap<PathBuf, (u32, u32)> = HashMap::new();

        for root in roots {
            for entry in WalkDir::new(root)
                .follow_links(true)
                .max_depth(max_depth)
                .sort_by_file_name()
            {
                let Ok(entry) = entry else {
                    continue;
                };
                if !entry.file_type().is_file() || !is_icon_file(entry.path()) {
                    continue;
                }
                let Some(requested) = entry.path().file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let Ok(canonical) = fs::canonicalize(entry.path()) else {
                    continue;
                };
                let (width, height) = match dimensions.entry(canonical.clone()) {
                    Entry::Occupied(known) => *known.get(),
                    Entry::Vacant(slot) => match image::image_dimensions(&canonical) {
                        Ok(size) => *slot.insert(size),
                        Err(err) => {
                            debug!(path = %canonical.display(), %err, "skipping unreadable icon");
                            continue;
                        }
                    },
                };

                let area = u64::from(width) * u64::from(height);
                match best.entry(requested.to_string()) {
                    Entry::Vacant(slot) => {
                        discovered.push(requested.to_string());
                        slot.insert(Rendition { canonical, area });
                    }
                    Entry::Occupied(mut current) => {
                        if area > current.get().area {
                            current.insert(Rendition { canonical, area });
                        }
                    }
                }
            }
        }

        let mut images: HashMap<PathBuf, Arc<IconImage>> = HashMap::new();
        let mut by_name = HashMap::with_capacity(best.len());
        for (requested, rendition) in best {
            let image = match images.entry(rendition.canonical.clone()) {
                Entry::Occupied(shared) => Arc::clone(shared.get()),
                Entry::Vacant(slot) => {
                    let Some(name) = object_name(&rendition.canonical) else {
                        continue;
                    };
                    let (width, height) = dimensions
                        .get(&rendition.canonical)
                        .copied()
                        .unwrap_or_default();
                    let image = Arc::new(IconImage::new(
                        name,
                        rendition.canonical.clone(),
                        width,
                        height,
                    ));
                    Arc::clone(slot.insert(image))
                }
            };
            by_name.insert(requested, image);
        }

        info!(
            roots = roots.len(),
            names = discovered.len(),
            images = images.len(),
            "scanned icon directories"
        );

        Self {
            discovered,
            by_name,
        }
    }
}

impl IconSource for ThemeDirSource {
    fn resolve(&self, name: &str) -> Option<IconRecord> {
        self.by_name
            .get(name)
            .map(|image| IconRecord::new(Arc::clone(image)))
    }

    fn dynamic_names(&self) -> Vec<String> {
        self.discovered.clone()
    }
}

pub fn default_icon_roots() -> Vec<PathBuf> {
    let mut roots = Vec::new();
    if let Some(data) = dirs::data_dir() {
        roots.push(data.join("icons"));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".icons"));
    }
    roots.push(PathBuf::from("/usr/share/icons"));
    roots.push(PathBuf::from("/usr/share/pixmaps"));
    roots.retain(|root| root.is_dir());
    roots
}

fn is_icon_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            ICON_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn object_name(canonical: &Path) -> Option<IconName> {
    canonical
        .file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(IconName::new)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use crate::model::IconRecord;

    use super::IconSource;

    /// In-memory source: `names` is the dynamic enumeration, `icons` the
    /// resolution table.
    #[derive(Default)]
    pub struct FixedSource {
        pub names: Vec<String>,
        pub icons: HashMap<String, IconRecord>,
    }

    impl FixedSource {
        pub fn with(mut self, name: &str, icon: &IconRecord) -> Self {
            self.icons.insert(name.to_string(), icon.clone());
            self.names.push(name.to_string());
            self
        }
    }

    impl IconSource for FixedSource {
        fn resolve(&self, name: &str) -> Option<IconRecord> {
            self.icons.get(name).cloned()
        }

        fn dynamic_names(&self) -> Vec<String> {
            self.names.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use image::RgbaImage;
    use tempfile::tempdir;

    use super::{ICON_SCAN_MAX_DEPTH, IconSource, ThemeDirSource};

    fn write_png(path: &Path, width: u32, height: u32) {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).expect("create icon dir");
        }
        RgbaImage::new(width, height).save(path).expect("write png");
    }

    #[test]
    fn scan_discovers_names_in_sorted_order() {
        let dir = tempdir().expect("temp dir");
        write_png(&dir.path().join("gamma.png"), 8, 8);
        write_png(&dir.path().join("alpha.png"), 8, 8);
        write_png(&dir.path().join("beta.png"), 8, 8);
        std::fs::write(dir.path().join("notes.txt"), "not an icon").expect("write txt");

        let source = ThemeDirSource::scan(&[dir.path().to_path_buf()], ICON_SCAN_MAX_DEPTH);

        assert_eq!(source.dynamic_names(), vec!["alpha", "beta", "gamma"]);
        assert!(source.resolve("notes").is_none());
        let beta = source.resolve("beta").expect("beta resolves");
        assert_eq!(beta.name().as_str(), "beta");
        assert_eq!(beta.size_label(), "8x8");
    }

    #[test]
    fn repeated_name_resolves_to_largest_rendition() {
        let dir = tempdir().expect("temp dir");
        write_png(&dir.path().join("16x16").join("folder.png"), 16, 16);
        write_png(&dir.path().join("48x48").join("folder.png"), 48, 48);
        write_png(&dir.path().join("24x24").join("folder.png"), 24, 24);

        let source = ThemeDirSource::scan(&[dir.path().to_path_buf()], ICON_SCAN_MAX_DEPTH);

        assert_eq!(source.dynamic_names(), vec!["folder"]);
        let folder = source.resolve("folder").expect("folder resolves");
        assert_eq!((folder.width(), folder.height()), (48, 48));
    }

    #[test]
    fn unreadable_files_are_skipped() {
        let dir = tempdir().expect("temp dir");
        std::fs::write(dir.path().join("broken.png"), b"definitely not png").expect("write");
        write_png(&dir.path().join("fine.png"), 4, 4);

        let source = ThemeDirSource::scan(&[dir.path().to_path_buf()], ICON_SCAN_MAX_DEPTH);

        assert_eq!(source.dynamic_names(), vec!["fine"]);
        assert!(source.resolve("broken").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn linked_aliases_share_one_image_object() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("edit-copy.png");
        write_png(&target, 16, 16);
        std::os::unix::fs::symlink(&target, dir.path().join("copy.png")).expect("symlink");

        let source = ThemeDirSource::scan(&[dir.path().to_path_buf()], ICON_SCAN_MAX_DEPTH);

        let alias = source.resolve("copy").expect("alias resolves");
        let original = source.resolve("edit-copy").expect("original resolves");
        assert!(alias.is_same_entity(&original));
        assert_eq!(alias.name().as_str(), "edit-copy");
    }
}
