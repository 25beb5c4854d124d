use iced::alignment::Horizontal;
use iced::widget::image::{Handle, Image};
use iced::widget::{Row, container, mouse_area, scrollable, stack, text};
use iced::{Element, Length};

use crate::icons;
use crate::model::Scope;
use crate::theme::{FAVOURITE_COLOR, cell_style, grid_style};

use super::super::Message;
use super::super::lifecycle::IconScope;
use super::super::session::GridCell;

const CELL_SIZE: f32 = 64.0;
const ICON_FIT: f32 = 55.0;

pub fn grid(app: &IconScope) -> Element<'_, Message> {
    let Some(controller) = app.controller.as_ref() else {
        return placeholder("Scanning icons...");
    };
    if controller.cells().is_empty() {
        return placeholder(empty_grid_message(controller.scope(), controller.search()));
    }

    let cells = Row::with_children(controller.cells().iter().map(cell))
        .spacing(4)
        .wrap();

    let scroll = scrollable(container(cells).padding(8).width(Length::Fill))
        .id(app.grid_id.clone())
        .on_scroll(|viewport| Message::GridScrolled(viewport.absolute_offset().y))
        .height(Length::Fill);

    container(scroll)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(grid_style)
        .into()
}

fn cell(cell: &GridCell) -> Element<'_, Message> {
    let (width, height) = cell.icon.fitted_size(ICON_FIT);
    let border = cell.state.border();
    let picture = Image::new(Handle::from_path(cell.icon.path()))
        .width(Length::Fixed(width))
        .height(Length::Fixed(height));
    let tile = container(picture)
        .center(Length::Fixed(CELL_SIZE))
        .style(move |theme| cell_style(theme, border));

    let content: Element<'_, Message> = if cell.state.shows_star() {
        let badge = container(icons::star_fill().size(12).color(FAVOURITE_COLOR))
            .width(Length::Fixed(CELL_SIZE))
            .align_x(Horizontal::Right)
            .padding(3);
        stack![tile, badge].into()
    } else {
        tile.into()
    };

    mouse_area(content)
        .on_press(Message::IconPressed(cell.icon.clone()))
        .on_right_press(Message::IconRightPressed(cell.icon.clone()))
        .into()
}

fn placeholder<'a>(message: &'a str) -> Element<'a, Message> {
    container(text(message).size(14))
        .center(Length::Fill)
        .style(grid_style)
        .into()
}

const fn empty_grid_message(scope: Scope, search: &str) -> &'static str {
    match scope {
        Scope::Favourites if search.is_empty() => {
            "No favourites yet. Right click an icon to add it."
        }
        Scope::Favourites => "No favourites match the search.",
        Scope::All if search.is_empty() => "No icons found in the icon roots.",
        Scope::All => "No icons match the search.",
    }
}
