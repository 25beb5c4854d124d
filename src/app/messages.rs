use std::path::PathBuf;

use crate::catalog::IconCatalog;
use crate::model::IconRecord;

#[derive(Debug, Clone)]
pub enum Message {
    CatalogLoaded(IconCatalog),
    SearchChanged(String),
    ClearSearch,
    FocusSearch,
    ToggleFavourites,
    IconPressed(IconRecord),
    IconRightPressed(IconRecord),
    GridScrolled(f32),
    CopyName,
    CopyComplete,
    ExportPathChanged(String),
    Export,
    Exported(Result<PathBuf, String>),
}
