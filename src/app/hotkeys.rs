use iced::{Subscription, keyboard};

use super::messages::Message;

pub fn subscription() -> Subscription<Message> {
    keyboard::listen().filter_map(|event| match event {
        keyboard::Event::KeyPressed { key, modifiers, .. } => match key {
            keyboard::Key::Character(c) if c.eq_ignore_ascii_case("f") && modifiers.command() => {
                Some(Message::FocusSearch)
            }
            keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::ClearSearch),
            _ => None,
        },
        _ => None,
    })
}
