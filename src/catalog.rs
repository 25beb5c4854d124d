use std::collections::HashSet;

use tracing::info;

use crate::model::{IconName, IconRecord, ImageKey};
use crate::source::IconSource;

/// Freedesktop icon-naming-spec names looked up ahead of the directory scan.
pub const PREDEFINED_ICON_NAMES: &[&str] = &[
    "address-book-new",
    "application-exit",
    "appointment-new",
    "call-start",
    "call-stop",
    "contact-new",
    "document-new",
    "document-open",
    "document-open-recent",
    "document-page-setup",
    "document-print",
    "document-print-preview",
    "document-properties",
    "document-revert",
    "document-save",
    "document-save-as",
    "document-send",
    "edit-clear",
    "edit-copy",
    "edit-cut",
    "edit-delete",
    "edit-find",
    "edit-find-replace",
    "edit-paste",
    "edit-redo",
    "edit-select-all",
    "edit-undo",
    "folder-new",
    "format-indent-less",
    "format-indent-more",
    "format-justify-center",
    "format-justify-fill",
    "format-justify-left",
    "format-justify-right",
    "format-text-bold",
    "format-text-italic",
    "format-text-strikethrough",
    "format-text-underline",
    "go-bottom",
    "go-down",
    "go-first",
    "go-home",
    "go-jump",
    "go-last",
    "go-next",
    "go-previous",
    "go-top",
    "go-up",
    "help-about",
    "help-contents",
    "help-faq",
    "insert-image",
    "insert-link",
    "insert-object",
    "insert-text",
    "list-add",
    "list-remove",
    "mail-forward",
    "mail-mark-important",
    "mail-mark-read",
    "mail-message-new",
    "mail-reply-all",
    "mail-reply-sender",
    "mail-send",
    "media-eject",
    "media-playback-pause",
    "media-playback-start",
    "media-playback-stop",
    "media-record",
    "media-seek-backward",
    "media-seek-forward",
    "media-skip-backward",
    "media-skip-forward",
    "object-flip-horizontal",
    "object-flip-vertical",
    "object-rotate-left",
    "object-rotate-right",
    "process-stop",
    "system-lock-screen",
    "system-log-out",
    "system-run",
    "system-search",
    "system-shutdown",
    "tools-check-spelling",
    "view-fullscreen",
    "view-refresh",
    "view-restore",
    "view-sort-ascending",
    "view-sort-descending",
    "window-close",
    "window-new",
    "zoom-fit-best",
    "zoom-in",
    "zoom-original",
    "zoom-out",
    "accessories-calculator",
    "accessories-text-editor",
    "help-browser",
    "multimedia-volume-control",
    "preferences-desktop",
    "preferences-system",
    "system-file-manager",
    "utilities-terminal",
    "applications-graphics",
    "applications-internet",
    "applications-multimedia",
    "applications-office",
    "applications-system",
    "applications-utilities",
    "audio-card",
    "audio-input-microphone",
    "battery",
    "camera-photo",
    "computer",
    "drive-harddisk",
    "drive-optical",
    "drive-removable-media",
    "input-keyboard",
    "input-mouse",
    "media-optical",
    "network-wired",
    "network-wireless",
    "printer",
    "video-display",
    "emblem-default",
    "emblem-favorite",
    "emblem-important",
    "emblem-readonly",
    "emblem-symbolic-link",
    "face-smile",
    "application-x-executable",
    "audio-x-generic",
    "font-x-generic",
    "image-x-generic",
    "package-x-generic",
    "text-html",
    "text-x-generic",
    "video-x-generic",
    "folder",
    "folder-remote",
    "network-server",
    "network-workgroup",
    "user-desktop",
    "user-home",
    "user-trash",
    "dialog-error",
    "dialog-information",
    "dialog-password",
    "dialog-question",
    "dialog-warning",
    "folder-open",
    "image-missing",
    "network-offline",
    "network-transmit-receive",
    "software-update-available",
    "starred",
    "user-available",
    "user-trash-full",
    "weather-clear",
];

/// Every icon found for this session, first occurrence of each image first.
#[derive(Debug, Clone, Default)]
pub struct IconCatalog {
    icons: Vec<IconRecord>,
}

impl IconCatalog {
    pub fn build(source: &impl IconSource) -> Self {
        Self::build_from(source, PREDEFINED_ICON_NAMES.iter().copied())
    }

    pub fn build_from<'a>(
        source: &impl IconSource,
        predefined: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut seen: HashSet<ImageKey> = HashSet::new();
        let mut icons = Vec::new();
        let mut predefined_hits = 0_usize;

        for name in predefined {
            if push_unique(source, name, &mut seen, &mut icons) {
                predefined_hits += 1;
            }
        }
        for name in source.dynamic_names() {
            push_unique(source, &name, &mut seen, &mut icons);
        }

        info!(
            icons = icons.len(),
            predefined = predefined_hits,
            "icon catalog built"
        );
        Self { icons }
    }

    pub fn all_icons(&self) -> &[IconRecord] {
        &self.icons
    }

    pub const fn len(&self) -> usize {
        self.icons.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    pub fn find_by_name(&self, name: &IconName) -> Option<&IconRecord> {
        self.icons.iter().find(|icon| icon.name() == name)
    }
}

fn push_unique(
    source: &impl IconSource,
    name: &str,
    seen: &mut HashSet<ImageKey>,
    icons: &mut Vec<IconRecord>,
) -> bool {
    if name.is_empty() {
        return false;
    }
    let Some(icon) = source.resolve(name) else {
        return false;
    };
    if !seen.insert(icon.key()) {
        return false;
    }
    icons.push(icon);
    true
}
