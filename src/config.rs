//! Configuration for the Telegram API and the channels to export
//!
//! All values are read once from the process environment at startup.

use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Base name of the persisted client session, reused across runs.
pub const SESSION_NAME: &str = "current-session";
pub const LOCK_FILE: &str = "current-session.lock";

/// Participants requested per page.
pub const PAGE_LIMIT: i32 = 200;

/// Fixed pause between consecutive page requests.
pub const PAGE_DELAY: Duration = Duration::from_secs(2);

/// Process-wide configuration, built once and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_id: i32,
    pub api_hash: String,
    pub bot_token: String,
    pub chat_names: Vec<String>,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Every variable is required; a missing one fails the run before any
    /// network activity.
    pub fn from_env() -> Result<Self> {
        let api_id = required_var("TELEGRAM_APP_ID")?;
        let api_id = api_id.parse::<i32>().map_err(|_| {
            Error::InvalidArgument(format!("TELEGRAM_APP_ID is not numeric: {}", api_id))
        })?;

        Ok(Self {
            api_id,
            api_hash: required_var("TELEGRAM_APP_HASH")?,
            bot_token: required_var("TELEGRAM_BOT_TOKEN")?,
            chat_names: parse_chat_names(&required_var("CHAT_NAMES")?)?,
        })
    }
}

fn required_var(key: &str) -> Result<String> {
    env::var(key).map_err(|_| Error::MissingEnv(key.to_string()))
}

/// Split the comma-separated channel list. At least one usable name is
/// required.
fn parse_chat_names(raw: &str) -> Result<Vec<String>> {
    let names: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(Error::InvalidArgument(
            "CHAT_NAMES does not contain any channel name".to_string(),
        ));
    }

    Ok(names)
}
