use std::io::{self, Write};

use anyhow::{Context, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::IconCatalog;
use crate::export::{default_export_path, export_png};
use crate::favourites::{FavouritesStore, MemoryPreferences, PreferenceStore};
use crate::filter::filter;
use crate::launch::{HeadlessCommand, LaunchOptions, ListOptions};
use crate::model::{IconName, IconRecord, Scope};
use crate::source::{ICON_SCAN_MAX_DEPTH, ThemeDirSource};
use crate::state::{AppState, TomlPreferences, state_file_path};

#[derive(Debug, Serialize)]
struct IconListing<'a> {
    name: &'a IconName,
    width: u32,
    height: u32,
    favourite: bool,
    path: String,
}

pub fn run(options: &LaunchOptions, command: &HeadlessCommand) -> anyhow::Result<()> {
    let state = AppState::load();
    let roots = options.resolved_icon_roots(&state);
    let catalog = IconCatalog::build(&ThemeDirSource::scan(&roots, ICON_SCAN_MAX_DEPTH));
    if catalog.is_empty() {
        warn!(roots = ?roots, "no icons found under the icon roots");
    }
    let mut stdout = io::stdout().lock();

    match command {
        HeadlessCommand::List(list) => {
            let mut favourites = FavouritesStore::new(TomlPreferences::new(state, state_file_path()));
            list_icons(&mut stdout, &catalog, &mut favourites, list)
        }
        HeadlessCommand::Export { name, out } => {
            let icon = find_icon(&catalog, name)?;
            let target = out.clone().unwrap_or_else(|| default_export_path(icon));
            let written = export_png(icon, &target)?;
            writeln!(stdout, "{}", written.display()).context("Failed to write to stdout")
        }
        HeadlessCommand::ToggleFavourite { name, dry_run } => {
            let icon = find_icon(&catalog, name)?;
            if *dry_run {
                let mut favourites =
                    FavouritesStore::new(MemoryPreferences::from(state.preferences.clone()));
                toggle_favourite(&mut stdout, &catalog, &mut favourites, icon)
            } else {
                let mut favourites =
                    FavouritesStore::new(TomlPreferences::new(state, state_file_path()));
                toggle_favourite(&mut stdout, &catalog, &mut favourites, icon)
            }
        }
    }
}

fn find_icon<'a>(catalog: &'a IconCatalog, raw: &str) -> anyhow::Result<&'a IconRecord> {
    let Some(name) = IconName::new(raw) else {
        bail!("icon name cannot be empty");
    };
    catalog
        .find_by_name(&name)
        .with_context(|| format!("no icon named '{name}' in {} icons", catalog.len()))
}

fn list_icons<P: PreferenceStore>(
    out: &mut impl Write,
    catalog: &IconCatalog,
    favourites: &mut FavouritesStore<P>,
    list: &ListOptions,
) -> anyhow::Result<()> {
    let base = match list.scope {
        Scope::All => catalog.all_icons().to_vec(),
        Scope::Favourites => favourites.ensure_loaded(catalog).materialized_list(),
    };
    let favourites = favourites.ensure_loaded(catalog);
    let listed = filter(&base, &list.search);

    if list.json {
        let rows: Vec<IconListing<'_>> = listed
            .iter()
            .map(|icon| IconListing {
                name: icon.name(),
                width: icon.width(),
                height: icon.height(),
                favourite: favourites.contains(icon),
                path: icon.path().display().to_string(),
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &rows).context("Failed to encode listing")?;
        writeln!(out).context("Failed to write to stdout")?;
    } else {
        for icon in &listed {
            let marker = if favourites.contains(icon) { "\t*" } else { "" };
            writeln!(out, "{}\t{}{marker}", icon.name(), icon.size_label())
                .context("Failed to write to stdout")?;
        }
    }
    info!(listed = listed.len(), total = catalog.len(), "listing printed");
    Ok(())
}

fn toggle_favourite<P: PreferenceStore>(
    out: &mut impl Write,
    catalog: &IconCatalog,
    favourites: &mut FavouritesStore<P>,
    icon: &IconRecord,
) -> anyhow::Result<()> {
    let mut loaded = favourites.ensure_loaded(catalog);
    let now_favourite = loaded.toggle(icon);
    let verb = if now_favourite { "added" } else { "removed" };
    writeln!(out, "{verb} {}", icon.name()).context("Failed to write to stdout")?;
    for favourite in loaded.materialized_list() {
        writeln!(out, "* {}", favourite.name()).context("Failed to write to stdout")?;
    }
    Ok(())
}
