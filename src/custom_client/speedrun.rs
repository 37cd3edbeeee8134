use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{deserialize::*, ClientError, ClientResult, CustomClient, ErrorKind};
use crate::util::constants::{SEARCH_LIMIT, SRCOM_API_V1, SRCOM_API_V2};

/// Whether a request is about a game or a series.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntityKind {
    Game,
    Series,
}

impl EntityKind {
    /// Map the name of an autocompleted command option to its kind.
    pub fn from_option(name: &str) -> Option<Self> {
        match name {
            "game" => Some(Self::Game),
            "series" => Some(Self::Series),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::Series => "series",
        }
    }

    /// Appended to entity names in replies and autocomplete choices.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Game => "",
            Self::Series => " Series",
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            Self::Game => "games",
            Self::Series => "series",
        }
    }

    fn error_kind(self) -> ErrorKind {
        match self {
            Self::Game => ErrorKind::Game,
            Self::Series => ErrorKind::Series,
        }
    }

    fn search_error_kind(self) -> ErrorKind {
        match self {
            Self::Game => ErrorKind::GameSearch,
            Self::Series => ErrorKind::SeriesSearch,
        }
    }
}

impl Display for EntityKind {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.label())
    }
}

/// A game or series as returned by the v1 API.
#[derive(Clone, Debug, Deserialize)]
pub struct Entity {
    pub id: String,
    pub names: EntityNames,
    pub abbreviation: String,
    pub weblink: String,
    #[serde(default, deserialize_with = "maybe_invite")]
    pub discord: Option<String>,
}

impl Entity {
    pub fn name(&self) -> &str {
        &self.names.international
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntityNames {
    pub international: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchCandidate {
    pub name: String,
    pub value: String,
}

#[derive(Deserialize)]
struct EntityResponse {
    #[serde(default)]
    data: Option<Entity>,
}

#[derive(Deserialize)]
struct EntityListResponse {
    #[serde(default, deserialize_with = "maybe_list")]
    data: Vec<Entity>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'q> {
    query: &'q str,
    limit: usize,
    favor_exact_matches: bool,
    include_games: bool,
    include_series: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default, deserialize_with = "maybe_list")]
    game_list: Vec<SearchEntry>,
    #[serde(default, deserialize_with = "maybe_list")]
    series_list: Vec<SearchEntry>,
}

#[derive(Deserialize)]
struct SearchEntry {
    name: String,
    url: String,
}

impl From<SearchEntry> for SearchCandidate {
    #[inline]
    fn from(entry: SearchEntry) -> Self {
        Self {
            name: entry.name,
            value: entry.url,
        }
    }
}

impl From<Entity> for SearchCandidate {
    #[inline]
    fn from(entity: Entity) -> Self {
        Self {
            name: entity.names.international,
            value: entity.abbreviation,
        }
    }
}

fn entity_url(kind: EntityKind, id: &str) -> String {
    format!(
        "{SRCOM_API_V1}/{endpoint}/{id}",
        endpoint = kind.endpoint(),
        id = urlencoding::encode(id),
    )
}

fn search_v1_url(kind: EntityKind, query: &str) -> String {
    format!(
        "{SRCOM_API_V1}/{endpoint}?name={query}",
        endpoint = kind.endpoint(),
        query = urlencoding::encode(query),
    )
}

/// Requests the command handlers and the autocomplete resolver need from speedrun.com.
#[async_trait]
pub trait SpeedrunApi: Send + Sync {
    /// `GET /api/v1/{games|series}/{id}`
    async fn entity(&self, kind: EntityKind, id: &str) -> ClientResult<Entity>;

    /// `POST /api/v2/GetSearch`, only including results of the given kind
    async fn search_v2(&self, kind: EntityKind, query: &str) -> ClientResult<Vec<SearchCandidate>>;

    /// `GET /api/v1/{games|series}?name={query}`
    async fn search_v1(&self, kind: EntityKind, query: &str) -> ClientResult<Vec<SearchCandidate>>;
}

#[async_trait]
impl SpeedrunApi for CustomClient {
    async fn entity(&self, kind: EntityKind, id: &str) -> ClientResult<Entity> {
        let bytes = self.make_get_request(entity_url(kind, id)).await?;

        let response: EntityResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::parsing(e, &bytes, kind.error_kind()))?;

        let entity = response.data.ok_or(ClientError::NotFound)?;
        trace!("Received {kind} `{}` with id {}", entity.name(), entity.id);

        Ok(entity)
    }

    async fn search_v2(&self, kind: EntityKind, query: &str) -> ClientResult<Vec<SearchCandidate>> {
        let request = SearchRequest {
            query,
            limit: SEARCH_LIMIT,
            favor_exact_matches: false,
            include_games: kind == EntityKind::Game,
            include_series: kind == EntityKind::Series,
        };

        let json = serde_json::to_vec(&request).map_err(|source| ClientError::Serialize {
            kind: ErrorKind::SearchRequest,
            source,
        })?;

        let url = format!("{SRCOM_API_V2}/GetSearch");
        let bytes = self.make_json_post_request(url, json).await?;

        let response: SearchResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::parsing(e, &bytes, kind.search_error_kind()))?;

        let list = match kind {
            EntityKind::Game => response.game_list,
            EntityKind::Series => response.series_list,
        };

        Ok(list.into_iter().map(SearchCandidate::from).collect())
    }

    async fn search_v1(&self, kind: EntityKind, query: &str) -> ClientResult<Vec<SearchCandidate>> {
        let bytes = self.make_get_request(search_v1_url(kind, query)).await?;

        let response: EntityListResponse = serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::parsing(e, &bytes, kind.search_error_kind()))?;

        Ok(response.data.into_iter().map(SearchCandidate::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_game_with_invite() {
        let json = r#"{
            "data": {
                "id": "v1pxjz68",
                "names": { "international": "Super Mario Sunshine", "japanese": null, "twitch": "Super Mario Sunshine" },
                "abbreviation": "sms",
                "weblink": "https://www.speedrun.com/sms",
                "discord": "https://discord.gg/abc",
                "links": []
            }
        }"#;

        let response: EntityResponse = serde_json::from_str(json).unwrap();
        let game = response.data.unwrap();

        assert_eq!(game.name(), "Super Mario Sunshine");
        assert_eq!(game.abbreviation, "sms");
        assert_eq!(game.discord.as_deref(), Some("https://discord.gg/abc"));
    }

    #[test]
    fn empty_invite_is_absent() {
        let json = r#"{
            "id": "rv7emz49",
            "names": { "international": "Mario" },
            "abbreviation": "mario",
            "weblink": "https://www.speedrun.com/mario",
            "discord": ""
        }"#;

        let series: Entity = serde_json::from_str(json).unwrap();
        assert!(series.discord.is_none());

        let json = r#"{
            "id": "rv7emz49",
            "names": { "international": "Mario" },
            "abbreviation": "mario",
            "weblink": "https://www.speedrun.com/mario"
        }"#;

        let series: Entity = serde_json::from_str(json).unwrap();
        assert!(series.discord.is_none());
    }

    #[test]
    fn missing_data_is_none() {
        let response: EntityResponse = serde_json::from_str("{}").unwrap();
        assert!(response.data.is_none());
    }

    #[test]
    fn search_request_only_includes_kind() {
        let request = SearchRequest {
            query: "mario",
            limit: SEARCH_LIMIT,
            favor_exact_matches: false,
            include_games: false,
            include_series: true,
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "query": "mario",
                "limit": 20,
                "favorExactMatches": false,
                "includeGames": false,
                "includeSeries": true,
            })
        );
    }

    #[test]
    fn search_response_picks_lists() {
        let json = r#"{
            "challengeList": [],
            "gameList": [{ "id": "1", "name": "Super Mario 64", "url": "sm64" }],
            "newsList": [],
            "pageList": [],
            "seriesList": null,
            "userList": []
        }"#;

        let response: SearchResponse = serde_json::from_str(json).unwrap();

        assert!(response.series_list.is_empty());

        let candidates: Vec<_> = response
            .game_list
            .into_iter()
            .map(SearchCandidate::from)
            .collect();

        assert_eq!(
            candidates,
            [SearchCandidate {
                name: "Super Mario 64".to_owned(),
                value: "sm64".to_owned(),
            }]
        );
    }

    #[test]
    fn urls_are_encoded() {
        assert_eq!(
            entity_url(EntityKind::Game, "a/b c"),
            "https://www.speedrun.com/api/v1/games/a%2Fb%20c"
        );

        assert_eq!(
            entity_url(EntityKind::Series, "mc"),
            "https://www.speedrun.com/api/v1/series/mc"
        );

        assert_eq!(
            search_v1_url(EntityKind::Series, "a/b c&d"),
            "https://www.speedrun.com/api/v1/series?name=a%2Fb%20c%26d"
        );
    }

    #[test]
    fn kind_from_option() {
        assert_eq!(EntityKind::from_option("game"), Some(EntityKind::Game));
        assert_eq!(EntityKind::from_option("series"), Some(EntityKind::Series));
        assert_eq!(EntityKind::from_option("mention"), None);
    }
}
