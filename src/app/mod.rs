mod controller;
mod hotkeys;
mod lifecycle;
mod messages;
mod reducer;
mod session;
mod update;
mod view;

pub use lifecycle::run;
pub use messages::Message;
