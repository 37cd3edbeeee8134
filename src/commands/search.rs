use eyre::Report;
use twilight_model::application::command::{CommandOptionChoice, CommandOptionChoiceValue};

use crate::{
    custom_client::{ClientError, EntityKind, SearchCandidate, SpeedrunApi},
    util::{
        constants::{CHOICE_NAME_SIZE, SEARCH_LIMIT},
        truncate_chars,
    },
};

/// The v2 search is newer and less reliable so v1 serves as fallback.
const PIPELINE: [SearchStep; 2] = [SearchStep::Primary, SearchStep::Legacy];

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum SearchStep {
    Primary,
    Legacy,
}

impl SearchStep {
    async fn run<A>(
        self,
        api: &A,
        kind: EntityKind,
        query: &str,
    ) -> Result<Vec<SearchCandidate>, ClientError>
    where
        A: SpeedrunApi + ?Sized,
    {
        match self {
            Self::Primary => api.search_v2(kind, query).await,
            Self::Legacy => api.search_v1(kind, query).await,
        }
    }
}

/// Autocomplete candidates for a partially typed game or series.
///
/// Failed searches are logged and never surface as an error.
pub async fn resolve<A>(api: &A, kind: EntityKind, value: &str) -> Vec<SearchCandidate>
where
    A: SpeedrunApi + ?Sized,
{
    if value.is_empty() {
        return Vec::new();
    }

    search(api, kind, value)
        .await
        .into_iter()
        .take(SEARCH_LIMIT)
        .map(|candidate| label(kind, candidate))
        .collect()
}

async fn search<A>(api: &A, kind: EntityKind, query: &str) -> Vec<SearchCandidate>
where
    A: SpeedrunApi + ?Sized,
{
    for step in PIPELINE {
        match step.run(api, kind, query).await {
            Ok(candidates) => return candidates,
            Err(err) => {
                let report = Report::new(err).wrap_err(format!(
                    "{step:?} {kind} search failed for `{query}`"
                ));

                match step {
                    SearchStep::Primary => warn!("{report:?}"),
                    SearchStep::Legacy => error!("{report:?}"),
                }
            }
        }
    }

    Vec::new()
}

fn label(kind: EntityKind, candidate: SearchCandidate) -> SearchCandidate {
    let SearchCandidate { name, value } = candidate;
    let name = format!("{name}{suffix}", suffix = kind.suffix());

    SearchCandidate {
        name: truncate_chars(&name, CHOICE_NAME_SIZE).to_owned(),
        value,
    }
}

pub fn into_choice(candidate: SearchCandidate) -> CommandOptionChoice {
    CommandOptionChoice {
        name: candidate.name,
        name_localizations: None,
        value: CommandOptionChoiceValue::String(candidate.value),
    }
}
