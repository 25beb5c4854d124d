use std::path::PathBuf;

use iced::widget;
use iced::{Subscription, Task, Theme, application};
use tracing::info;

use crate::catalog::IconCatalog;
use crate::launch::LaunchOptions;
use crate::source::{ICON_SCAN_MAX_DEPTH, ThemeDirSource};
use crate::state::{AppState, TomlPreferences, state_file_path};
use crate::theme::ThemeChoice;

use super::controller::ViewController;
use super::{Message, hotkeys, view};

pub struct IconScope {
    /// `None` until the first scan finishes.
    pub(super) controller: Option<ViewController<TomlPreferences>>,
    /// Handed to the controller once the catalog arrives.
    pub(super) pending_prefs: Option<TomlPreferences>,
    pub(super) export_path: String,
    pub(super) status_line: String,
    pub(super) grid_id: widget::Id,
    pub(super) search_id: widget::Id,
    pub(super) theme: ThemeChoice,
}

impl IconScope {
    pub(super) fn init(options: &LaunchOptions) -> (Self, Task<Message>) {
        let state = AppState::load();
        let roots = options.resolved_icon_roots(&state);
        let theme = state.theme;

        let app = Self {
            controller: None,
            pending_prefs: Some(TomlPreferences::new(state, state_file_path())),
            export_path: String::new(),
            status_line: "Scanning icons...".to_string(),
            grid_id: widget::Id::new("icon-grid"),
            search_id: widget::Id::new("icon-search"),
            theme,
        };

        let task = Task::perform(scan_catalog(roots), Message::CatalogLoaded);
        (app, task)
    }

    pub(super) fn subscription(_state: &Self) -> Subscription<Message> {
        hotkeys::subscription()
    }

    pub(super) const fn theme(state: &Self) -> Theme {
        state.theme.iced_theme()
    }

    pub(super) fn attach_catalog(&mut self, catalog: IconCatalog) {
        let prefs = self
            .pending_prefs
            .take()
            .unwrap_or_else(|| TomlPreferences::new(AppState::load(), state_file_path()));
        let controller = ViewController::new(catalog, prefs);
        info!(
            icons = controller.total_icons(),
            favourites = controller.favourite_count(),
            "catalog attached"
        );
        self.status_line = format!("Loaded {} icons", controller.total_icons());
        self.controller = Some(controller);
    }
}

async fn scan_catalog(roots: Vec<PathBuf>) -> IconCatalog {
    IconCatalog::build(&ThemeDirSource::scan(&roots, ICON_SCAN_MAX_DEPTH))
}

pub fn run(options: LaunchOptions) -> iced::Result {
    application(
        move || IconScope::init(&options),
        IconScope::update,
        view::view,
    )
    .title("IconScope  icon browser")
    .subscription(IconScope::subscription)
    .theme(IconScope::theme)
    .run()
}
