use eyre::{Report, Result, WrapErr};
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::id::{marker::UserMarker, Id};

use crate::{
    custom_client::{ClientError, Entity, EntityKind, SpeedrunApi},
    util::{
        constants::{GENERAL_ISSUE, SRCOM_BASE},
        interaction::{deferred_response, message_response},
        InteractionResponder, ReplyIntent,
    },
};

#[derive(CommandModel, CreateCommand)]
#[command(name = "game-community", desc = "Get a link to a game's community")]
pub struct GameCommunity {
    #[command(autocomplete = true, desc = "A game's URL")]
    pub game: String,
    #[command(desc = "Notify a user with the community's link")]
    pub mention: Option<Id<UserMarker>>,
}

#[derive(CommandModel, CreateCommand)]
#[command(name = "series-community", desc = "Get a link to a series' community")]
pub struct SeriesCommunity {
    #[command(autocomplete = true, desc = "A series' URL")]
    pub series: String,
    #[command(desc = "Notify a user with the community's link")]
    pub mention: Option<Id<UserMarker>>,
}

/// Reply with the discord invite of a game or series, or a link to its forums
/// if there is no invite.
///
/// The initial response is a deferral, or a placeholder mentioning `notify`,
/// and is always replaced by the final reply.
pub async fn community<A>(
    api: &A,
    responder: &dyn InteractionResponder,
    kind: EntityKind,
    identifier: &str,
    notify: Option<Id<UserMarker>>,
) -> Result<()>
where
    A: SpeedrunApi + ?Sized,
{
    let initial = match notify {
        Some(_) => message_response(&ReplyIntent::new(format!("fetching the {kind}..."), notify)),
        None => deferred_response(),
    };

    responder
        .respond(initial)
        .await
        .wrap_err("failed to defer community command")?;

    let reply = match community_reply(api, kind, identifier, notify).await {
        Ok(reply) => reply,
        Err(err) => {
            let issue = ReplyIntent::new(GENERAL_ISSUE, notify);

            if let Err(update_err) = responder.update(&issue).await {
                warn!("{:?}", update_err.wrap_err("failed to send general issue reply"));

                return Err(err.wrap_err("failed to send general issue reply"));
            }

            return Err(err);
        }
    };

    responder
        .update(&reply)
        .await
        .wrap_err("failed to send community reply")
}

pub async fn community_reply<A>(
    api: &A,
    kind: EntityKind,
    identifier: &str,
    notify: Option<Id<UserMarker>>,
) -> Result<ReplyIntent>
where
    A: SpeedrunApi + ?Sized,
{
    let content = match api.entity(kind, identifier).await {
        Ok(entity) => found_content(kind, &entity),
        Err(ClientError::NotFound) => format!("the `{identifier}` {kind} wasn't found"),
        Err(ClientError::Status { status, url, body }) => {
            error!("Failed with status code {status} when requesting {url}: {body}");

            format!("speedrun.com responded with `{status}`: {body}")
        }
        Err(err) => {
            let wrap = format!("failed to fetch {kind} `{identifier}`");

            return Err(Report::new(err).wrap_err(wrap));
        }
    };

    Ok(ReplyIntent::new(content, notify))
}

fn found_content(kind: EntityKind, entity: &Entity) -> String {
    let name = entity.name();
    let suffix = kind.suffix();

    match entity.discord {
        Some(ref invite) => format!("here's the invite to `{name}{suffix}`: {invite}"),
        None => format!(
            "couldn't find any Discord invite for `{name}{suffix}`. \
            Here's a link to their forums: {forum}",
            forum = forum_url(kind, entity),
        ),
    }
}

/// The weblink of a series lacks the `/series/` segment so it can't be used.
fn forum_url(kind: EntityKind, entity: &Entity) -> String {
    match kind {
        EntityKind::Game => format!("{}/forums", entity.weblink.trim_end_matches('/')),
        EntityKind::Series => format!("{SRCOM_BASE}/series/{}/forums", entity.abbreviation),
    }
}
