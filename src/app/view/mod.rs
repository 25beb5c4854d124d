mod details;
mod grid;

use iced::widget::{button, column, container, row, rule, space, text, text_input};
use iced::{Alignment, Element, Length};

use crate::icons;
use crate::model::Scope;
use crate::theme;

use super::Message;
use super::lifecycle::IconScope;
use details::details;
use grid::grid;

pub fn view(app: &IconScope) -> Element<'_, Message> {
    column![
        header(app),
        rule::horizontal(1),
        container(grid(app)).height(Length::Fill),
        rule::horizontal(1),
        details(app),
        rule::horizontal(1),
        status_bar(app)
    ]
    .into()
}

fn header(app: &IconScope) -> Element<'_, Message> {
    let (total, scope, search) = app.controller.as_ref().map_or((0, Scope::All, ""), |c| {
        (c.total_icons(), c.scope(), c.search())
    });

    let glyph = match scope {
        Scope::All => icons::star(),
        Scope::Favourites => icons::star_fill(),
    };
    let toggle = button(row![glyph, text("Favourites")].spacing(6).align_y(Alignment::Center))
        .style(match scope {
            Scope::All => button::secondary,
            Scope::Favourites => button::primary,
        })
        .on_press_maybe(app.controller.as_ref().map(|_| Message::ToggleFavourites));

    let search_input = text_input("Search icons (Ctrl+F)", search)
        .id(app.search_id.clone())
        .on_input_maybe(app.controller.as_ref().map(|_| Message::SearchChanged))
        .padding(6)
        .width(Length::Fixed(260.0));

    row![
        text(format!("Total icons: {total}")).size(14),
        space().width(Length::Fill),
        toggle,
        text("right click to add/remove").size(12),
        icons::search(),
        search_input,
    ]
    .spacing(10)
    .padding([8, 12])
    .align_y(Alignment::Center)
    .into()
}

fn status_bar(app: &IconScope) -> Element<'_, Message> {
    let content = row![
        text("Left click selects, right click toggles a favourite").size(12),
        space().width(Length::Fill),
        text(format!("Status: {}", app.status_line)).size(12),
    ]
    .spacing(8);

    container(content)
        .padding([6, 12])
        .width(Length::Fill)
        .style(theme::status_bar_style)
        .into()
}
