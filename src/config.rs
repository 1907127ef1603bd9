use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_CHATGPT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Without a key the bot answers from the canned topic table only.
    pub chatgpt_api_key: Option<String>,
    pub chatgpt_timeout: Duration,
}

impl Config {
    /// Reads the configuration from the process environment. Call
    /// `dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let chatgpt_api_key = lookup("CHATGPT_API_KEY").filter(|key| !key.trim().is_empty());

        let chatgpt_timeout = match lookup("CHATGPT_TIMEOUT_SECS") {
            Some(value) => {
                let secs = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout {
                        name: "CHATGPT_TIMEOUT_SECS",
                        value,
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_CHATGPT_TIMEOUT_SECS),
        };

        Ok(Self {
            data_dir,
            chatgpt_api_key,
            chatgpt_timeout,
        })
    }
}
