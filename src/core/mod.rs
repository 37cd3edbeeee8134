pub use self::{
    config::{BotConfig, BotMode},
    context::Context,
    events::{event_loop, handle_interaction},
};

mod config;
mod context;
mod events;

pub mod logging;
