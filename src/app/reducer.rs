use crate::catalog::IconCatalog;
use crate::favourites::{FavouritesStore, PreferenceStore};
use crate::filter::filter;
use crate::model::{IconRecord, ImageKey, Scope};

use super::session::{GridCell, Session};

#[derive(Debug, Clone)]
pub enum Intent {
    SearchChanged(String),
    ScopeToggled,
    LeftClicked(IconRecord),
    RightClicked(IconRecord),
    Scrolled(f32),
    Recompute,
}

#[derive(Debug, Clone)]
pub enum Render {
    Repopulate,
    RefreshCell(ImageKey),
    ShowDetails(IconRecord),
    RestoreScroll(f32),
}

pub fn reduce<P: PreferenceStore>(
    mut session: Session,
    intent: Intent,
    catalog: &IconCatalog,
    favourites: &mut FavouritesStore<P>,
) -> (Session, Vec<Render>) {
    match intent {
        Intent::SearchChanged(term) => {
            session.search = term;
            let renders = repopulate(&mut session, catalog, favourites);
            (session, renders)
        }
        Intent::ScopeToggled => {
            session.scope = session.scope.toggled();
            let renders = repopulate(&mut session, catalog, favourites);
            (session, renders)
        }
        Intent::Recompute => {
            let renders = repopulate(&mut session, catalog, favourites);
            (session, renders)
        }
        Intent::LeftClicked(icon) => {
            let mut renders = Vec::with_capacity(3);
            if let Some(previous) = session.selection.select(icon.clone())
                && !previous.is_same_entity(&icon)
            {
                renders.push(Render::RefreshCell(previous.key()));
            }
            renders.push(Render::RefreshCell(icon.key()));
            refresh_cells(&mut session, favourites);
            renders.push(Render::ShowDetails(icon));
            (session, renders)
        }
        Intent::RightClicked(icon) => {
            favourites.ensure_loaded(catalog).toggle(&icon);
            refresh_cells(&mut session, favourites);
            (session, vec![Render::RefreshCell(icon.key())])
        }
        Intent::Scrolled(offset) => {
            if session.scope == Scope::All {
                session.scroll.remember(offset);
            }
            (session, Vec::new())
        }
    }
}

fn repopulate<P: PreferenceStore>(
    session: &mut Session,
    catalog: &IconCatalog,
    favourites: &mut FavouritesStore<P>,
) -> Vec<Render> {
    let base = match session.scope {
        Scope::All => catalog.all_icons().to_vec(),
        Scope::Favourites => favourites.ensure_loaded(catalog).materialized_list(),
    };
    let favourites: &FavouritesStore<P> = favourites;
    session.cells = filter(&base, &session.search)
        .into_iter()
        .map(|icon| GridCell {
            state: session.selection.visual_state(&icon, favourites),
            icon,
        })
        .collect();
    vec![
        Render::Repopulate,
        Render::RestoreScroll(session.scroll.offset()),
    ]
}

fn refresh_cells<P: PreferenceStore>(session: &mut Session, favourites: &FavouritesStore<P>) {
    for cell in &mut session.cells {
        cell.state = session.selection.visual_state(&cell.icon, favourites);
    }
}
