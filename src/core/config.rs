use std::env;

use ed25519_dalek::VerifyingKey;
use eyre::Result;
use once_cell::sync::OnceCell;
use twilight_model::id::{marker::GuildMarker, Id};

static CONFIG: OnceCell<BotConfig> = OnceCell::new();

#[derive(Debug)]
pub struct BotConfig {
    pub tokens: Tokens,
    pub mode: BotMode,
    pub server: Server,
    /// Commands are registered only for this guild if specified, globally otherwise
    pub dev_guild: Option<Id<GuildMarker>>,
}

#[derive(Debug)]
pub struct Tokens {
    pub discord: Box<str>,
    /// Required to verify interactions received by the server
    pub public_key: Option<VerifyingKey>,
}

#[derive(Debug)]
pub struct Server {
    pub port: u16,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BotMode {
    /// Persistent gateway connection
    Gateway,
    /// HTTP endpoint receiving interactions through a webhook
    Server,
}

impl BotConfig {
    pub fn get() -> &'static Self {
        CONFIG
            .get()
            .expect("`BotConfig::init` must be called first")
    }

    pub fn init() -> Result<()> {
        let config = BotConfig {
            tokens: Tokens {
                discord: env_var("DISCORD_TOKEN")?,
                public_key: env_var_opt("DISCORD_PUBLIC_KEY")?,
            },
            mode: env_var_opt("BOT_MODE")?.unwrap_or(BotMode::Gateway),
            server: Server {
                port: env_var_opt("SERVER_PORT")?.unwrap_or(8080),
            },
            dev_guild: env_var_opt("DEV_GUILD_ID")?,
        };

        if config.mode == BotMode::Server && config.tokens.public_key.is_none() {
            bail!("missing env variable `DISCORD_PUBLIC_KEY` which is required in server mode");
        }

        if CONFIG.set(config).is_err() {
            warn!("CONFIG was already set");
        }

        Ok(())
    }
}

trait EnvKind: Sized {
    const EXPECTED: &'static str;

    fn from_str(s: String) -> Result<Self, String>;
}

macro_rules! env_kind {
    ($($ty:ty: |$arg:ident| $impl:block,)*) => {
        $(
            impl EnvKind for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_str($arg: String) -> Result<Self, String> {
                    $impl
                }
            }
        )*
    };
}

env_kind! {
    Box<str>: |s| { Ok(s.into_boxed_str()) },
    u16: |s| { s.parse().map_err(|_| s) },
    Id<GuildMarker>: |s| { s.parse().ok().and_then(Id::new_checked).ok_or(s) },
}

impl EnvKind for BotMode {
    const EXPECTED: &'static str = "`gateway` or `server`";

    fn from_str(s: String) -> Result<Self, String> {
        match s.as_str() {
            "gateway" => Ok(Self::Gateway),
            "server" => Ok(Self::Server),
            _ => Err(s),
        }
    }
}

impl EnvKind for VerifyingKey {
    const EXPECTED: &'static str = "a hex encoded ed25519 public key";

    fn from_str(s: String) -> Result<Self, String> {
        fn inner(s: &str) -> Option<VerifyingKey> {
            let bytes: [u8; 32] = hex::decode(s).ok()?.try_into().ok()?;

            VerifyingKey::from_bytes(&bytes).ok()
        }

        inner(s.as_str()).ok_or(s)
    }
}

fn env_var<T: EnvKind>(name: &str) -> Result<T> {
    env_var_opt(name)?.ok_or_else(|| eyre!("missing env variable `{name}`"))
}

fn env_var_opt<T: EnvKind>(name: &str) -> Result<Option<T>> {
    let Ok(value) = env::var(name) else {
        return Ok(None);
    };

    T::from_str(value).map(Some).map_err(|value| {
        eyre!(
            "failed to parse env variable `{name}={value}`; expected {expected}",
            expected = T::EXPECTED
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bot_mode() {
        assert_eq!(BotMode::from_str("server".to_owned()), Ok(BotMode::Server));
        assert_eq!(BotMode::from_str("gateway".to_owned()), Ok(BotMode::Gateway));
        assert_eq!(
            BotMode::from_str("deploy".to_owned()),
            Err("deploy".to_owned())
        );
    }

    #[test]
    fn parse_public_key() {
        let signing_key = ed25519_dalek::SigningKey::from_bytes(&[3; 32]);
        let hex_key = hex::encode(signing_key.verifying_key().as_bytes());

        let key = <VerifyingKey as EnvKind>::from_str(hex_key).unwrap();
        assert_eq!(key, signing_key.verifying_key());

        assert!(<VerifyingKey as EnvKind>::from_str("abcd".to_owned()).is_err());
        assert!(<VerifyingKey as EnvKind>::from_str("not hex".to_owned()).is_err());
    }

    #[test]
    fn parse_guild_id() {
        let id = <Id<GuildMarker> as EnvKind>::from_str("297072529426612224".to_owned()).unwrap();
        assert_eq!(id.get(), 297072529426612224);

        assert!(<Id<GuildMarker> as EnvKind>::from_str("0".to_owned()).is_err());
    }
}
