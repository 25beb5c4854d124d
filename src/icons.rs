//! Centralized glyph helpers using Bootstrap Icons via `iced_fonts`.
//!
//! These are the UI's own chrome glyphs, not catalog icons. All chrome glyph
//! usage goes through this module so that swapping glyph sets later is a
//! single-file change.

use iced::widget::Text;

/// Star-fill: favourite badge and active favourites toggle.
pub fn star_fill<'a>() -> Text<'a> {
    iced_fonts::bootstrap::star_fill()
}

/// Star: inactive favourites toggle.
pub fn star<'a>() -> Text<'a> {
    iced_fonts::bootstrap::star()
}

/// Search: search field prefix.
pub fn search<'a>() -> Text<'a> {
    iced_fonts::bootstrap::search()
}

/// Clipboard: copy icon name.
pub fn clipboard<'a>() -> Text<'a> {
    iced_fonts::bootstrap::clipboard()
}

/// Download: export icon.
pub fn download<'a>() -> Text<'a> {
    iced_fonts::bootstrap::download()
}
