use iced::widget::image::{Handle, Image};
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::icons;
use crate::model::IconRecord;
use crate::theme::preview_style;

use super::super::Message;
use super::super::lifecycle::IconScope;

const PREVIEW_SIZE: f32 = 100.0;
const PREVIEW_FIT: f32 = 95.0;

pub fn details(app: &IconScope) -> Element<'_, Message> {
    let selected = app.controller.as_ref().and_then(|c| c.selection());

    let preview: Element<'_, Message> = match selected {
        Some(icon) => {
            let (width, height) = icon.fitted_size(PREVIEW_FIT);
            Image::new(Handle::from_path(icon.path()))
                .width(Length::Fixed(width))
                .height(Length::Fixed(height))
                .into()
        }
        None => text("No selection").size(11).into(),
    };
    let preview = container(preview)
        .center(Length::Fixed(PREVIEW_SIZE))
        .style(preview_style);

    let name = selected.map(|icon| icon.name().as_str()).unwrap_or_default();
    let name_row = row![
        text("Name").size(13).width(Length::Fixed(48.0)),
        text_input("", name).padding(4).width(Length::Fill),
        button(row![icons::clipboard(), text("Copy to clipboard")].spacing(6))
            .on_press_maybe(selected.map(|_| Message::CopyName)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let export_row = row![
        text("Export").size(13).width(Length::Fixed(48.0)),
        text_input("path/to/icon.png", &app.export_path)
            .on_input_maybe(selected.map(|_| Message::ExportPathChanged))
            .on_submit_maybe(selected.map(|_| Message::Export))
            .padding(4)
            .width(Length::Fill),
        button(row![icons::download(), text("Export")].spacing(6))
            .on_press_maybe(selected.map(|_| Message::Export)),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let info = column![name_row, text(size_line(selected)).size(13), export_row].spacing(8);

    row![preview, info]
        .spacing(12)
        .padding([8, 12])
        .align_y(Alignment::Center)
        .into()
}

fn size_line(selected: Option<&IconRecord>) -> String {
    selected.map_or_else(|| "Size: -".to_string(), |icon| format!("Size: {}", icon.size_label()))
}
