use std::fmt;

use eyre::Report;
use http::StatusCode;
use serde_json::Error;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("status code 404 - not found")]
    NotFound,
    #[error("could not deserialize {kind}: {body}")]
    Parsing {
        body: String,
        kind: ErrorKind,
        #[source]
        source: Error,
    },
    #[error("failed to serialize {kind}")]
    Serialize {
        kind: ErrorKind,
        #[source]
        source: Error,
    },
    #[error("failed with status code {status} when requesting {url}")]
    Status {
        status: StatusCode,
        url: String,
        /// Response body, already cut down to fit into a message
        body: String,
    },
    #[error(transparent)]
    Report(#[from] Report),
}

impl ClientError {
    pub fn parsing(source: Error, bytes: &[u8], kind: ErrorKind) -> Self {
        Self::Parsing {
            body: String::from_utf8_lossy(bytes).into_owned(),
            source,
            kind,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub enum ErrorKind {
    Game,
    GameSearch,
    SearchRequest,
    Series,
    SeriesSearch,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Game => "game",
            Self::GameSearch => "game search",
            Self::SearchRequest => "search request",
            Self::Series => "series",
            Self::SeriesSearch => "series search",
        };

        f.write_str(kind)
    }
}
