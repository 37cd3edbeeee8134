use std::sync::Arc;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use parking_lot::Mutex;
use tokio::sync::oneshot::Sender;
use twilight_model::http::interaction::InteractionResponse;

use crate::{
    core::Context,
    util::{interaction::update_response, InteractionResponder, ReplyIntent},
};

/// Responds to interactions received through the webhook.
///
/// The initial response is handed back to the pending HTTP request, everything
/// after that goes through the REST API.
pub struct WebhookResponder {
    ctx: Arc<Context>,
    token: String,
    tx: Mutex<Option<Sender<InteractionResponse>>>,
}

impl WebhookResponder {
    pub fn new(ctx: Arc<Context>, token: String, tx: Sender<InteractionResponse>) -> Self {
        Self {
            ctx,
            token,
            tx: Mutex::new(Some(tx)),
        }
    }
}

#[async_trait]
impl InteractionResponder for WebhookResponder {
    async fn respond(&self, response: InteractionResponse) -> Result<()> {
        let tx = self
            .tx
            .lock()
            .take()
            .ok_or_else(|| eyre!("interaction was already responded to"))?;

        tx.send(response)
            .map_err(|_| eyre!("webhook request is no longer pending"))
            .wrap_err("failed to send initial response")
    }

    async fn update(&self, reply: &ReplyIntent) -> Result<()> {
        update_response(&self.ctx, &self.token, reply).await
    }
}
