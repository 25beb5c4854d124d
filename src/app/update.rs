use std::path::PathBuf;

use iced::widget::{operation, scrollable};
use iced::{Task, clipboard};
use tracing::{debug, warn};

use crate::export::{default_export_path, export_png};
use crate::model::IconRecord;

use super::Message;
use super::lifecycle::IconScope;
use super::reducer::{Intent, Render};

impl IconScope {
    pub(super) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(catalog) => {
                self.attach_catalog(catalog);
                Task::none()
            }
            Message::SearchChanged(term) => self.apply(Intent::SearchChanged(term)),
            Message::ClearSearch => {
                let has_term = self
                    .controller
                    .as_ref()
                    .is_some_and(|controller| !controller.search().is_empty());
                if has_term {
                    self.apply(Intent::SearchChanged(String::new()))
                } else {
                    Task::none()
                }
            }
            Message::FocusSearch => operation::focus(self.search_id.clone()),
            Message::ToggleFavourites => self.apply(Intent::ScopeToggled),
            Message::IconPressed(icon) => self.apply(Intent::LeftClicked(icon)),
            Message::IconRightPressed(icon) => {
                let task = self.apply(Intent::RightClicked(icon.clone()));
                if let Some(controller) = &self.controller {
                    let favourite = controller.favourites().is_favourite(&icon);
                    self.status_line = favourite_status(&icon, favourite);
                }
                task
            }
            Message::GridScrolled(offset) => self.apply(Intent::Scrolled(offset)),
            Message::CopyName => {
                let Some(icon) = self.selected_icon() else {
                    return Task::none();
                };
                self.status_line = format!("Copied '{}'", icon.name());
                clipboard::write(icon.name().to_string()).map(|()| Message::CopyComplete)
            }
            Message::CopyComplete => Task::none(),
            Message::ExportPathChanged(path) => {
                self.export_path = path;
                Task::none()
            }
            Message::Export => {
                let Some(icon) = self.selected_icon() else {
                    return Task::none();
                };
                let target = PathBuf::from(self.export_path.trim());
                self.status_line = format!("Exporting '{}'...", icon.name());
                Task::perform(
                    async move { export_png(&icon, &target).map_err(|e| e.to_string()) },
                    Message::Exported,
                )
            }
            Message::Exported(result) => {
                match result {
                    Ok(path) => {
                        self.status_line = format!("Exported to {}", path.display());
                    }
                    Err(err) => {
                        warn!(error = %err, "export failed");
                        self.status_line = format!("Export failed: {err}");
                    }
                }
                Task::none()
            }
        }
    }

    fn selected_icon(&self) -> Option<IconRecord> {
        self.controller
            .as_ref()
            .and_then(|controller| controller.selection().cloned())
    }

    /// Routes an intent through the controller and turns its renders into
    /// widget operations.
    fn apply(&mut self, intent: Intent) -> Task<Message> {
        let Some(controller) = self.controller.as_mut() else {
            debug!(?intent, "intent before catalog loaded");
            return Task::none();
        };
        let renders = controller.dispatch(intent);
        let mut tasks = Vec::new();
        for render in renders {
            match render {
                Render::Repopulate => {}
                Render::RefreshCell(key) => {
                    let cells = controller.cells();
                    if let Some(cell) = cells.iter().find(|cell| cell.icon.key() == key) {
                        debug!(
                            icon = %cell.icon.name(),
                            selected = cell.state.selected,
                            favourite = cell.state.favourite,
                            "cell refreshed"
                        );
                    }
                }
                Render::ShowDetails(icon) => {
                    self.export_path = default_export_path(&icon).display().to_string();
                    self.status_line = format!("{} ({})", icon.name(), icon.size_label());
                }
                Render::RestoreScroll(y) => tasks.push(operation::scroll_to(
                    self.grid_id.clone(),
                    scrollable::AbsoluteOffset { x: 0.0, y },
                )),
            }
        }
        Task::batch(tasks)
    }
}

fn favourite_status(icon: &IconRecord, favourite: bool) -> String {
    if favourite {
        format!("Added '{}' to favourites", icon.name())
    } else {
        format!("Removed '{}' from favourites", icon.name())
    }
}

#[cfg(test)]
mod tests {
    use iced::widget;

    use crate::catalog::IconCatalog;
    use crate::model::{Scope, test_icon};
    use crate::source::testing::FixedSource;
    use crate::state::{AppState, TomlPreferences};
    use crate::theme::ThemeChoice;

    use super::super::Message;
    use super::super::lifecycle::IconScope;
    use super::favourite_status;

    fn app() -> IconScope {
        let mut app = IconScope {
            controller: None,
            pending_prefs: Some(TomlPreferences::new(AppState::default(), None)),
            export_path: String::new(),
            status_line: String::new(),
            grid_id: widget::Id::new("grid"),
            search_id: widget::Id::new("search"),
            theme: ThemeChoice::default(),
        };
        let source = ["Alpha", "Beta"].iter().fold(FixedSource::default(), |source, name| {
            source.with(name, &test_icon(name, 24, 16))
        });
        let _ = app.update(Message::CatalogLoaded(IconCatalog::build_from(
            &source,
            std::iter::empty(),
        )));
        app
    }

    fn cell_count(app: &IconScope) -> usize {
        app.controller.as_ref().map_or(0, |c| c.cells().len())
    }

    #[test]
    fn catalog_arrival_builds_the_grid() {
        let app = app();
        assert_eq!(cell_count(&app), 2);
        assert!(app.pending_prefs.is_none());
        assert_eq!(app.status_line, "Loaded 2 icons");
    }

    #[test]
    fn selecting_fills_details_and_export_path() {
        let mut app = app();
        let beta = app.controller.as_ref().map(|c| c.cells()[1].icon.clone()).expect("beta");

        let _ = app.update(Message::IconPressed(beta));

        assert_eq!(app.export_path, "Beta.png");
        assert_eq!(app.status_line, "Beta (24x16)");
    }

    #[test]
    fn escape_clears_a_search() {
        let mut app = app();
        let _ = app.update(Message::SearchChanged("alp".to_string()));
        assert_eq!(cell_count(&app), 1);

        let _ = app.update(Message::ClearSearch);
        assert_eq!(cell_count(&app), 2);
    }

    #[test]
    fn right_click_reports_the_toggle() {
        let mut app = app();
        let alpha = app.controller.as_ref().map(|c| c.cells()[0].icon.clone()).expect("alpha");

        let _ = app.update(Message::IconRightPressed(alpha.clone()));
        assert_eq!(app.status_line, favourite_status(&alpha, true));
        let _ = app.update(Message::ToggleFavourites);
        assert_eq!(app.controller.as_ref().map(|c| c.scope()), Some(Scope::Favourites));
        assert_eq!(cell_count(&app), 1);
    }

    #[test]
    fn export_without_selection_does_nothing() {
        let mut app = app();
        let _ = app.update(Message::Export);
        assert_eq!(app.status_line, "Loaded 2 icons");
    }

    #[test]
    fn messages_before_the_scan_are_ignored() {
        let mut app = IconScope {
            controller: None,
            pending_prefs: None,
            export_path: String::new(),
            status_line: "Scanning icons...".to_string(),
            grid_id: widget::Id::new("grid"),
            search_id: widget::Id::new("search"),
            theme: ThemeChoice::default(),
        };
        let _ = app.update(Message::SearchChanged("x".to_string()));
        assert!(app.controller.is_none());
        assert_eq!(app.status_line, "Scanning icons...");
    }
}
