use iced::widget::container;
use iced::{Color, Theme, border};
use serde::{Deserialize, Serialize};

use crate::model::CellBorder;

pub const FAVOURITE_COLOR: Color = Color::from_rgb(1.0, 1.0, 0.0);
const SELECTED_COLOR: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.75);
const CELL_BACKGROUND: Color = Color::from_rgb(0.21, 0.21, 0.21);
const GRID_BACKGROUND: Color = Color::from_rgb(0.16, 0.16, 0.16);
const PREVIEW_BACKGROUND: Color = Color::from_rgb(0.1, 0.1, 0.1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeChoice {
    #[default]
    CatppuccinMocha,
    TokyoNightStorm,
    Nord,
}

impl ThemeChoice {
    pub const fn iced_theme(self) -> Theme {
        match self {
            Self::CatppuccinMocha => Theme::CatppuccinMocha,
            Self::TokyoNightStorm => Theme::TokyoNightStorm,
            Self::Nord => Theme::Nord,
        }
    }
}

/// Grid cell: selection border over favourite border over none.
pub fn cell_style(_theme: &Theme, cell: CellBorder) -> container::Style {
    let border = match cell {
        CellBorder::Selected => border::rounded(0.0).width(2.0).color(SELECTED_COLOR),
        CellBorder::Favourite => border::rounded(0.0).width(1.0).color(FAVOURITE_COLOR),
        CellBorder::Plain => border::rounded(0.0).width(0.0).color(Color::TRANSPARENT),
    };
    container::Style {
        background: Some(CELL_BACKGROUND.into()),
        border,
        ..container::Style::default()
    }
}

pub fn grid_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(GRID_BACKGROUND.into()),
        ..container::Style::default()
    }
}

pub fn preview_style(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(PREVIEW_BACKGROUND.into()),
        border: border::rounded(0.0).width(1.0).color(Color::BLACK),
        ..container::Style::default()
    }
}

/// Status bar container style with a subtle top-tinted background.
pub fn status_bar_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    let bg = palette.background.strong.color;
    container::Style {
        background: Some(Color::from_rgba(bg.r, bg.g, bg.b, 0.5).into()),
        text_color: Some(palette.background.weak.text),
        border: border::rounded(0.0),
        ..container::Style::default()
    }
}
