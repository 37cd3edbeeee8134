mod community;
mod search;
mod source_code;

use twilight_interactions::command::CreateCommand;
use twilight_model::application::command::Command;

pub use self::{
    community::{community, GameCommunity, SeriesCommunity},
    search::{into_choice, resolve},
    source_code::{source_code, SourceCode},
};

pub const GAME_COMMUNITY: &str = "game-community";
pub const SERIES_COMMUNITY: &str = "series-community";
pub const SOURCE_CODE: &str = "source-code";

/// All slash commands to register.
pub fn slash_commands() -> Vec<Command> {
    vec![
        GameCommunity::create_command().into(),
        SeriesCommunity::create_command().into(),
        SourceCode::create_command().into(),
    ]
}
