//! Configuration for the guild access service.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Discord API constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Discord REST API (v10).
    pub const BASE_URL: &str = "https://discord.com/api/v10";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Maximum idle connections per host.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// User agent sent to Discord. Discord requires a bot-style agent string.
    pub const USER_AGENT: &str =
        concat!("DiscordBot (guild-access, ", env!("CARGO_PKG_VERSION"), ")");
}

/// Discord REST endpoints, relative to the API base URL.
pub mod endpoints {
    /// Current authorization information (user, scopes, expiry).
    pub const CURRENT_AUTHORIZATION: &str = "/oauth2/@me";

    /// Guilds the current user is a member of.
    pub const CURRENT_USER_GUILDS: &str = "/users/@me/guilds";
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the Discord API (overridable for mock servers).
    pub discord_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Optional JSON file used to seed the membership store.
    pub membership_seed: Option<PathBuf>,
}

impl Config {
    /// Create a configuration against the public Discord API.
    #[must_use]
    pub fn new(membership_seed: Option<PathBuf>) -> Self {
        Self {
            discord_api_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            membership_seed,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            discord_api_url: format!("{}/api/v10", base_url.trim_end_matches('/')),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            membership_seed: None,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if `DISCORD_API_URL` is set but is not a valid URL.
    pub fn from_env() -> anyhow::Result<Self> {
        let membership_seed = std::env::var_os("MEMBERSHIP_SEED_PATH").map(PathBuf::from);
        let mut config = Self::new(membership_seed);

        if let Ok(url) = std::env::var("DISCORD_API_URL") {
            config = config.with_discord_api_url(&url)?;
        }

        Ok(config)
    }

    /// Replace the Discord API base URL after validating it.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not parse or is not http(s).
    pub fn with_discord_api_url(mut self, raw: &str) -> anyhow::Result<Self> {
        let parsed = url::Url::parse(raw).with_context(|| format!("invalid Discord API URL: {raw}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            anyhow::bail!("Discord API URL must be http or https, got {}", parsed.scheme());
        }
        self.discord_api_url = raw.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Full URL for an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.discord_api_url, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None)
    }
}
