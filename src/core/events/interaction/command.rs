use eyre::{Result, WrapErr};
use twilight_interactions::command::{CommandInputData, CommandModel};

use crate::{
    commands::{
        community, source_code, GameCommunity, SeriesCommunity, GAME_COMMUNITY, SERIES_COMMUNITY,
        SOURCE_CODE,
    },
    core::events::ProcessResult,
    custom_client::{EntityKind, SpeedrunApi},
    util::InteractionResponder,
};

pub async fn handle_command<A>(
    api: &A,
    responder: &dyn InteractionResponder,
    name: String,
    input: CommandInputData<'static>,
) where
    A: SpeedrunApi + ?Sized,
{
    match process_command(api, responder, &name, input).await {
        Ok(ProcessResult::Success) => info!("Processed slash command `{name}`"),
        Ok(res) => warn!("Command `/{name}` was not processed: {res:?}"),
        Err(err) => {
            let wrap = format!("failed to process slash command `{name}`");
            error!("{:?}", err.wrap_err(wrap));
        }
    }
}

async fn process_command<A>(
    api: &A,
    responder: &dyn InteractionResponder,
    name: &str,
    input: CommandInputData<'static>,
) -> Result<ProcessResult>
where
    A: SpeedrunApi + ?Sized,
{
    match name {
        GAME_COMMUNITY => {
            let args = GameCommunity::from_interaction(input)
                .wrap_err("failed to parse game-community arguments")?;

            community(api, responder, EntityKind::Game, &args.game, args.mention).await?;
        }
        SERIES_COMMUNITY => {
            let args = SeriesCommunity::from_interaction(input)
                .wrap_err("failed to parse series-community arguments")?;

            community(api, responder, EntityKind::Series, &args.series, args.mention).await?;
        }
        SOURCE_CODE => source_code(responder).await?,
        _ => return Ok(ProcessResult::UnknownCommand),
    }

    Ok(ProcessResult::Success)
}
