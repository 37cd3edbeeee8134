use eyre::{Result, WrapErr};
use twilight_interactions::command::CreateCommand;

use crate::util::{
    constants::SOURCE_CODE_URL, interaction::message_response, InteractionResponder, ReplyIntent,
};

#[derive(CreateCommand)]
#[command(name = "source-code", desc = "Get a link to the bot's source code")]
pub struct SourceCode;

pub async fn source_code(responder: &dyn InteractionResponder) -> Result<()> {
    let content = format!("here's the link to the repository: {SOURCE_CODE_URL}");
    let reply = ReplyIntent::new(content, None);

    responder
        .respond(message_response(&reply))
        .await
        .wrap_err("failed to send source code link")
}
