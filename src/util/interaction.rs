use std::sync::Arc;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use twilight_model::{
    application::command::CommandOptionChoice,
    channel::message::AllowedMentions,
    http::interaction::{InteractionResponse, InteractionResponseData, InteractionResponseType},
    id::{
        marker::{InteractionMarker, UserMarker},
        Id,
    },
};

use crate::{core::Context, util::capitalize};

/// Text to reply with and the user that may be pinged by it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReplyIntent {
    pub content: String,
    pub notify: Option<Id<UserMarker>>,
}

impl ReplyIntent {
    /// Prefixes the content with a mention of `notify` if available,
    /// otherwise capitalizes the content.
    pub fn new(content: impl AsRef<str>, notify: Option<Id<UserMarker>>) -> Self {
        let content = content.as_ref();

        let content = match notify {
            Some(user) => format!("<@{user}>, {content}"),
            None => capitalize(content),
        };

        Self { content, notify }
    }

    /// Only the notified user may be pinged.
    pub fn allowed_mentions(&self) -> AllowedMentions {
        AllowedMentions {
            users: self.notify.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// The capability to answer an interaction.
///
/// Every interaction gets exactly one call to [`InteractionResponder::respond`].
/// Deferred or placeholder responses are finalized through
/// [`InteractionResponder::update`].
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Acknowledge the interaction with an initial response.
    async fn respond(&self, response: InteractionResponse) -> Result<()>;

    /// Replace the initial response with the reply.
    async fn update(&self, reply: &ReplyIntent) -> Result<()>;
}

/// Acknowledge the command but don't respond yet.
pub fn deferred_response() -> InteractionResponse {
    InteractionResponse {
        kind: InteractionResponseType::DeferredChannelMessageWithSource,
        data: None,
    }
}

/// Respond with a message immediately.
pub fn message_response(reply: &ReplyIntent) -> InteractionResponse {
    let data = InteractionResponseData {
        allowed_mentions: Some(reply.allowed_mentions()),
        content: Some(reply.content.clone()),
        ..Default::default()
    };

    InteractionResponse {
        kind: InteractionResponseType::ChannelMessageWithSource,
        data: Some(data),
    }
}

pub fn autocomplete_response(choices: Vec<CommandOptionChoice>) -> InteractionResponse {
    let data = InteractionResponseData {
        choices: Some(choices),
        ..Default::default()
    };

    InteractionResponse {
        kind: InteractionResponseType::ApplicationCommandAutocompleteResult,
        data: Some(data),
    }
}

/// Edit the original response of an interaction through the REST API.
pub async fn update_response(ctx: &Context, token: &str, reply: &ReplyIntent) -> Result<()> {
    let allowed_mentions = reply.allowed_mentions();

    ctx.interaction()
        .update_response(token)
        .content(Some(reply.content.as_str()))
        .wrap_err("invalid content")?
        .allowed_mentions(Some(&allowed_mentions))
        .await
        .wrap_err("failed to update interaction response")?;

    Ok(())
}

/// Responds to interactions received through the gateway via the REST API.
pub struct GatewayResponder {
    ctx: Arc<Context>,
    id: Id<InteractionMarker>,
    token: String,
}

impl GatewayResponder {
    pub fn new(ctx: Arc<Context>, id: Id<InteractionMarker>, token: String) -> Self {
        Self { ctx, id, token }
    }
}

#[async_trait]
impl InteractionResponder for GatewayResponder {
    async fn respond(&self, response: InteractionResponse) -> Result<()> {
        self.ctx
            .interaction()
            .create_response(self.id, &self.token, &response)
            .await
            .wrap_err("failed to create interaction response")?;

        Ok(())
    }

    async fn update(&self, reply: &ReplyIntent) -> Result<()> {
        update_response(&self.ctx, &self.token, reply).await
    }
}
