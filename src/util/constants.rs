// speedrun.com
pub const SRCOM_BASE: &str = "https://www.speedrun.com";
pub const SRCOM_API_V1: &str = "https://www.speedrun.com/api/v1";
pub const SRCOM_API_V2: &str = "https://www.speedrun.com/api/v2";

// Repository
pub const SOURCE_CODE_URL: &str = "https://github.com/AnInternetTroll/speedruncom-discord-bot";

// Message field sizes
pub const BODY_EXCERPT_SIZE: usize = 1800;
pub const CHOICE_NAME_SIZE: usize = 100;

// Autocomplete
pub const SEARCH_LIMIT: usize = 20;

// Error messages
pub const GENERAL_ISSUE: &str = "something went wrong while fetching the community link";

// Datetime format used for logging
pub const NAIVE_DATETIME_FORMAT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
