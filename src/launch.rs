use std::path::PathBuf;

use crate::model::Scope;
use crate::source::default_icon_roots;
use crate::state::AppState;

#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub state_file: Option<PathBuf>,
    pub icon_roots: Vec<PathBuf>,
    pub command: Option<HeadlessCommand>,
}

impl LaunchOptions {
    /// Launch roots win over stored roots; with neither, the usual system
    /// icon directories are used.
    pub fn resolved_icon_roots(&self, state: &AppState) -> Vec<PathBuf> {
        if !self.icon_roots.is_empty() {
            self.icon_roots.clone()
        } else if !state.icon_roots.is_empty() {
            state.icon_roots.clone()
        } else {
            default_icon_roots()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeadlessCommand {
    List(ListOptions),
    Export { name: String, out: Option<PathBuf> },
    ToggleFavourite { name: String, dry_run: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub search: String,
    pub scope: Scope,
    pub json: bool,
}
