use std::borrow::Cow;

use twilight_interactions::command::CommandInputData;
use twilight_model::application::interaction::{
    application_command::{CommandData, CommandDataOption, CommandOptionValue},
    Interaction, InteractionData, InteractionType,
};

use crate::{
    core::Context,
    custom_client::{EntityKind, SpeedrunApi},
    util::InteractionResponder,
};

use self::{autocomplete::handle_autocomplete, command::handle_command};

use super::EventKind;

mod autocomplete;
mod command;

/// An interaction reduced to what is needed to handle it.
pub enum InboundEvent {
    Command {
        name: String,
        input: CommandInputData<'static>,
    },
    Autocomplete {
        command: String,
        field: String,
        value: String,
        kind: Option<EntityKind>,
    },
    Other(InteractionType),
}

impl InboundEvent {
    pub fn new(kind: InteractionType, data: Option<InteractionData>) -> Self {
        let data = match (kind, data) {
            (
                InteractionType::ApplicationCommand | InteractionType::ApplicationCommandAutocomplete,
                Some(InteractionData::ApplicationCommand(data)),
            ) => data,
            (kind, _) => return Self::Other(kind),
        };

        let CommandData {
            name,
            options,
            resolved,
            ..
        } = *data;

        if kind == InteractionType::ApplicationCommandAutocomplete {
            let (field, value) = focused(options).unwrap_or_default();
            let kind = EntityKind::from_option(&field);

            Self::Autocomplete {
                command: name,
                field,
                value,
                kind,
            }
        } else {
            let input = CommandInputData {
                options,
                resolved: resolved.map(Cow::Owned),
            };

            Self::Command { name, input }
        }
    }
}

/// Name and current value of the option that is being typed.
fn focused(options: Vec<CommandDataOption>) -> Option<(String, String)> {
    options
        .into_iter()
        .find_map(|option| match option.value {
            CommandOptionValue::Focused(value, _) => Some((option.name, value)),
            _ => None,
        })
}

pub async fn handle_interaction(
    ctx: &Context,
    mut interaction: Interaction,
    responder: &dyn InteractionResponder,
) {
    let event = InboundEvent::new(interaction.kind, interaction.data.take());

    match event {
        InboundEvent::Command { ref name, .. } => EventKind::SlashCommand.log(&interaction, name),
        InboundEvent::Autocomplete { ref command, .. } => {
            EventKind::Autocomplete.log(&interaction, command)
        }
        InboundEvent::Other(_) => {}
    }

    route(ctx.client(), responder, event).await
}

/// Dispatch an event to its handler. Errors are logged and never propagated.
pub async fn route<A>(api: &A, responder: &dyn InteractionResponder, event: InboundEvent)
where
    A: SpeedrunApi + ?Sized,
{
    match event {
        InboundEvent::Command { name, input } => handle_command(api, responder, name, input).await,
        InboundEvent::Autocomplete {
            command,
            field,
            value,
            kind,
        } => handle_autocomplete(api, responder, command, field, value, kind).await,
        InboundEvent::Other(kind) => debug!("Ignoring interaction of type {kind:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use twilight_model::{
        application::command::{CommandOptionChoice, CommandOptionType},
        http::interaction::{InteractionResponse, InteractionResponseType},
    };

    use super::*;
    use crate::{
        commands::{
            tests::{candidates, MockApi, Recorded, RecordingResponder},
            GAME_COMMUNITY, SERIES_COMMUNITY, SOURCE_CODE,
        },
        custom_client::{Entity, EntityNames},
    };

    fn command(name: &str, options: Vec<CommandDataOption>) -> InboundEvent {
        InboundEvent::Command {
            name: name.to_owned(),
            input: CommandInputData {
                options,
                resolved: None,
            },
        }
    }

    fn string_option(name: &str, value: &str) -> CommandDataOption {
        CommandDataOption {
            name: name.to_owned(),
            value: CommandOptionValue::String(value.to_owned()),
        }
    }

    fn autocomplete(command: &str, field: &str, value: &str) -> InboundEvent {
        InboundEvent::Autocomplete {
            command: command.to_owned(),
            field: field.to_owned(),
            value: value.to_owned(),
            kind: EntityKind::from_option(field),
        }
    }

    fn choices(response: &InteractionResponse) -> &[CommandOptionChoice] {
        assert_eq!(
            response.kind,
            InteractionResponseType::ApplicationCommandAutocompleteResult
        );

        response
            .data
            .as_ref()
            .and_then(|data| data.choices.as_deref())
            .unwrap_or_default()
    }

    #[test]
    fn focused_option() {
        let options = vec![
            string_option("mention", "ignored"),
            CommandDataOption {
                name: "game".to_owned(),
                value: CommandOptionValue::Focused("super mar".to_owned(), CommandOptionType::String),
            },
        ];

        let (field, value) = focused(options).unwrap();

        assert_eq!(field, "game");
        assert_eq!(value, "super mar");
    }

    #[test]
    fn non_command_is_other() {
        let event = InboundEvent::new(InteractionType::Ping, None);

        assert!(matches!(event, InboundEvent::Other(InteractionType::Ping)));
    }

    #[tokio::test]
    async fn empty_autocomplete_skips_requests() {
        let api = MockApi {
            v2: Some(candidates("Mario", 5)),
            ..Default::default()
        };

        let responder = RecordingResponder::default();

        route(&api, &responder, autocomplete(GAME_COMMUNITY, "game", "")).await;

        assert_eq!(api.calls(), 0);

        match responder.recorded().as_slice() {
            [Recorded::Respond(response)] => assert!(choices(response).is_empty()),
            other => panic!("expected one autocomplete response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn autocomplete_falls_back_to_legacy() {
        let api = MockApi {
            v1: Some(candidates("Legacy", 2)),
            ..Default::default()
        };

        let responder = RecordingResponder::default();

        route(&api, &responder, autocomplete(SERIES_COMMUNITY, "series", "leg")).await;

        assert_eq!(api.v1_calls.load(Ordering::SeqCst), 1);

        match responder.recorded().as_slice() {
            [Recorded::Respond(response)] => {
                let names: Vec<_> = choices(response)
                    .iter()
                    .map(|choice| choice.name.as_str())
                    .collect();

                assert_eq!(names, ["Legacy 0 Series", "Legacy 1 Series"]);
            }
            other => panic!("expected one autocomplete response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_autocomplete_field() {
        let api = MockApi {
            v2: Some(candidates("Mario", 5)),
            ..Default::default()
        };

        let responder = RecordingResponder::default();

        route(&api, &responder, autocomplete(GAME_COMMUNITY, "category", "any")).await;

        assert_eq!(api.calls(), 0);

        match responder.recorded().as_slice() {
            [Recorded::Respond(response)] => assert!(choices(response).is_empty()),
            other => panic!("expected one autocomplete response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn game_community_is_answered() {
        let entity = Entity {
            id: "o1y9wo6q".to_owned(),
            names: EntityNames {
                international: "Super Mario Sunshine".to_owned(),
            },
            abbreviation: "sms".to_owned(),
            weblink: "https://www.speedrun.com/sms".to_owned(),
            discord: Some("https://discord.gg/abc".to_owned()),
        };

        let api = MockApi {
            entity: Some(Ok(entity)),
            ..Default::default()
        };

        let responder = RecordingResponder::default();
        let event = command(GAME_COMMUNITY, vec![string_option("game", "sms")]);

        route(&api, &responder, event).await;

        match responder.recorded().as_slice() {
            [Recorded::Respond(_), Recorded::Update(reply)] => assert_eq!(
                reply.content,
                "Here's the invite to `Super Mario Sunshine`: https://discord.gg/abc"
            ),
            other => panic!("expected deferral and update, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_argument_is_dropped() {
        let api = MockApi::default();
        let responder = RecordingResponder::default();

        route(&api, &responder, command(SERIES_COMMUNITY, Vec::new())).await;

        assert_eq!(api.calls(), 0);
        assert!(responder.recorded().is_empty());
    }

    #[tokio::test]
    async fn source_code_is_answered() {
        let responder = RecordingResponder::default();

        route(&MockApi::default(), &responder, command(SOURCE_CODE, Vec::new())).await;

        match responder.recorded().as_slice() {
            [Recorded::Respond(response)] => {
                let content = response.data.as_ref().and_then(|data| data.content.as_deref());

                assert_eq!(
                    content,
                    Some(
                        "Here's the link to the repository: \
                        https://github.com/AnInternetTroll/speedruncom-discord-bot"
                    )
                );
            }
            other => panic!("expected one response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_command_is_dropped() {
        let api = MockApi::default();
        let responder = RecordingResponder::default();

        route(&api, &responder, command("leaderboard", Vec::new())).await;
        route(&api, &responder, InboundEvent::Other(InteractionType::MessageComponent)).await;

        assert_eq!(api.calls(), 0);
        assert!(responder.recorded().is_empty());
    }
}
