use std::sync::Arc;

use eyre::{Result, WrapErr};
use twilight_gateway::{Intents, Shard, ShardId};
use twilight_http::{client::InteractionClient, Client};
use twilight_model::{
    channel::message::AllowedMentions,
    id::{marker::ApplicationMarker, Id},
};

use crate::{core::BotConfig, custom_client::CustomClient};

mod set_commands;
mod shutdown;

pub struct Context {
    pub http: Arc<Client>,
    application_id: Id<ApplicationMarker>,
    client: CustomClient,
}

impl Context {
    pub fn interaction(&self) -> InteractionClient<'_> {
        self.http.interaction(self.application_id)
    }

    /// Returns the speedrun.com client
    pub fn client(&self) -> &CustomClient {
        &self.client
    }

    pub async fn init() -> Result<Self> {
        let config = BotConfig::get();

        // Nobody may be pinged unless a reply explicitly allows it
        let http = Client::builder()
            .token(config.tokens.discord.to_string())
            .remember_invalid_token(false)
            .default_allowed_mentions(AllowedMentions::default())
            .build();

        let http = Arc::new(http);

        let current_user = http
            .current_user()
            .await
            .wrap_err("failed to get current user")?
            .model()
            .await
            .wrap_err("failed to deserialize current user")?;

        let application_id = current_user.id.cast();

        info!("Logged into Discord as {}", current_user.name);

        Ok(Self {
            http,
            application_id,
            client: CustomClient::new(),
        })
    }

    /// Interactions are the only events of interest so no intents are required.
    pub fn shard(&self) -> Shard {
        let token = BotConfig::get().tokens.discord.to_string();

        Shard::new(ShardId::ONE, token, Intents::empty())
    }
}
