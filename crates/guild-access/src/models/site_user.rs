//! The merged view returned to the site.

use serde::Serialize;

use super::{DiscordAuthorization, DiscordGuild};

/// A Discord user together with their guilds, overlaid with local data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteUser {
    /// Authorization info for the caller's token.
    pub user: DiscordAuthorization,

    /// Guilds in the order Discord returned them.
    pub guilds: Vec<DiscordGuild>,
}

/// HTTP response body: `{ "user": { "user": ..., "guilds": [...] } }`.
#[derive(Debug, Clone, Serialize)]
pub struct SiteUserResponse {
    pub user: SiteUser,
}

impl From<SiteUser> for SiteUserResponse {
    fn from(user: SiteUser) -> Self {
        Self { user }
    }
}
