use eyre::{Result, WrapErr};
use twilight_model::{
    application::command::Command,
    id::{marker::GuildMarker, Id},
};

use super::Context;
use crate::{commands::slash_commands, core::BotConfig};

impl Context {
    /// Bulk-overwrite the declared slash commands, either in the dev guild
    /// if one is configured or globally.
    #[cold]
    pub async fn set_commands(&self) -> Result<Vec<Command>> {
        let cmds = slash_commands();
        info!("Setting {} slash commands...", cmds.len());

        match BotConfig::get().dev_guild {
            Some(guild) => self.set_guild_commands(guild, &cmds).await,
            None => self.set_global_commands(&cmds).await,
        }
    }

    async fn set_global_commands(&self, cmds: &[Command]) -> Result<Vec<Command>> {
        self.interaction()
            .set_global_commands(cmds)
            .await
            .wrap_err("failed to set global commands")?
            .models()
            .await
            .wrap_err("failed to deserialize commands")
    }

    async fn set_guild_commands(
        &self,
        guild: Id<GuildMarker>,
        cmds: &[Command],
    ) -> Result<Vec<Command>> {
        self.interaction()
            .set_guild_commands(guild, cmds)
            .await
            .wrap_err("failed to set guild commands")?
            .models()
            .await
            .wrap_err("failed to deserialize commands")
    }
}
