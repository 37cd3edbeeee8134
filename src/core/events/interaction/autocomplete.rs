use twilight_model::application::command::CommandOptionChoice;

use crate::{
    commands::{into_choice, resolve},
    custom_client::{EntityKind, SpeedrunApi},
    util::{interaction::autocomplete_response, InteractionResponder},
};

pub async fn handle_autocomplete<A>(
    api: &A,
    responder: &dyn InteractionResponder,
    command: String,
    field: String,
    value: String,
    kind: Option<EntityKind>,
) where
    A: SpeedrunApi + ?Sized,
{
    let choices: Vec<CommandOptionChoice> = match kind {
        Some(kind) => resolve(api, kind, &value)
            .await
            .into_iter()
            .map(into_choice)
            .collect(),
        None => {
            warn!("Unknown autocomplete field `{field}` for `{command}`");

            Vec::new()
        }
    };

    if let Err(err) = responder.respond(autocomplete_response(choices)).await {
        let wrap = format!("failed to process autocomplete `{command}`");
        error!("{:?}", err.wrap_err(wrap));
    }
}
