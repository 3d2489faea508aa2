use std::env;
use std::time::Duration;

use log::{info, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4";

/// Runtime configuration, built once at startup and passed by reference
/// into whatever needs it. There is no process-global credential state.
#[derive(Debug, Clone)]
pub struct CoachConfig {
    /// Missing key is not an eager error: the first feedback call will
    /// come back degraded instead, and the session keeps running.
    pub openai_api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl CoachConfig {
    /// Loads configuration from the process environment, with a local
    /// untracked `.env` file merged in first if one exists.
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_ok() {
            info!("Loaded environment overrides from .env");
        }

        let openai_api_key = env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        if openai_api_key.is_none() {
            warn!("OPENAI_API_KEY not found in environment - feedback will be degraded");
        }

        Self {
            openai_api_key,
            base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(15),
            connect_timeout: Duration::from_secs(5),
        }
    }
}
