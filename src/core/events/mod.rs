use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    sync::Arc,
};

use eyre::Report;
use twilight_gateway::{Event, Shard};
use twilight_model::{
    application::interaction::Interaction,
    id::{
        marker::{ChannelMarker, GuildMarker},
        Id,
    },
};

use crate::util::interaction::GatewayResponder;

pub use self::interaction::handle_interaction;

use super::Context;

mod interaction;

#[derive(Debug)]
enum ProcessResult {
    Success,
    UnknownCommand,
}

enum EventKind {
    Autocomplete,
    SlashCommand,
}

impl EventKind {
    fn log(self, interaction: &Interaction, name: &str) {
        let username = interaction
            .member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(interaction.user.as_ref())
            .map_or("<unknown user>", |user| user.name.as_str());

        let location = EventLocation::new(interaction);

        info!("[{location}] {username} {self} `{name}`");
    }
}

impl Display for EventKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Autocomplete => f.write_str("autocompleted"),
            Self::SlashCommand => f.write_str("used slash command"),
        }
    }
}

/// Nothing is cached so only ids are known.
enum EventLocation {
    Private,
    Guild {
        guild: Id<GuildMarker>,
        channel: Option<Id<ChannelMarker>>,
    },
}

impl EventLocation {
    #[allow(deprecated)]
    fn new(interaction: &Interaction) -> Self {
        match interaction.guild_id {
            Some(guild) => Self::Guild {
                guild,
                channel: interaction.channel_id,
            },
            None => Self::Private,
        }
    }
}

impl Display for EventLocation {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EventLocation::Private => f.write_str("Private"),
            EventLocation::Guild {
                guild,
                channel: Some(channel),
            } => write!(f, "{guild}:{channel}"),
            EventLocation::Guild {
                guild,
                channel: None,
            } => write!(f, "{guild}:<unknown channel>"),
        }
    }
}

pub async fn event_loop(ctx: Arc<Context>, shard: &mut Shard) {
    loop {
        let err = match shard.next_event().await {
            Ok(event) => {
                let ctx = Arc::clone(&ctx);

                tokio::spawn(handle_event(ctx, event));

                continue;
            }
            Err(err) => err,
        };

        let is_fatal = err.is_fatal();
        error!("{:?}", Report::new(err).wrap_err("event error"));

        if is_fatal {
            return;
        }
    }
}

async fn handle_event(ctx: Arc<Context>, event: Event) {
    match event {
        Event::GatewayClose(Some(frame)) => {
            warn!(
                "Received closing frame: reason={} (code {})",
                frame.reason, frame.code,
            )
        }
        Event::GatewayClose(None) => warn!("Received closing frame"),
        Event::GatewayInvalidateSession(true) => {
            warn!("Gateway has invalidated session, but its reconnectable")
        }
        Event::GatewayInvalidateSession(false) => warn!("Gateway has invalidated session"),
        Event::GatewayReconnect => info!("Gateway requested to reconnect"),
        Event::InteractionCreate(e) => {
            let interaction = e.0;

            let responder =
                GatewayResponder::new(Arc::clone(&ctx), interaction.id, interaction.token.clone());

            handle_interaction(&ctx, interaction, &responder).await
        }
        Event::Ready(ready) => info!("Connected to the gateway as {}", ready.user.name),
        Event::Resumed => info!("Resumed gateway connection"),
        _ => {}
    }
}
