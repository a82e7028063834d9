//! Discord user and authorization models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Discord user as returned inside the current authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DiscordUser {
    /// Snowflake id, a decimal string.
    pub id: String,

    /// Unique username.
    pub username: String,

    /// Display name, if the user set one.
    #[serde(default)]
    pub global_name: Option<String>,

    /// Avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,

    /// Legacy discriminator ("0" for migrated accounts).
    #[serde(default)]
    pub discriminator: Option<String>,
}

impl DiscordUser {
    /// Name to show in the UI: the global name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// Response of `GET /oauth2/@me`: the bearer token's authorization info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DiscordAuthorization {
    /// The authorized user. Present when the token carries the `identify` scope.
    pub user: DiscordUser,

    /// Scopes granted to the token.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// When the token expires.
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}
