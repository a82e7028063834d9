//! Discord guild membership model.

use serde::{Deserialize, Serialize};

use super::{Claim, parse_snowflake};

/// A guild the current user belongs to (`GET /users/@me/guilds` entry).
///
/// `is_added` and `claims` are never read from Discord; they are filled in
/// from local storage during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct DiscordGuild {
    /// Snowflake id, a decimal string.
    pub id: String,

    /// Guild name.
    pub name: String,

    /// Icon hash.
    #[serde(default)]
    pub icon: Option<String>,

    /// Whether the current user owns the guild.
    #[serde(default)]
    pub owner: bool,

    /// Discord permission bitset of the user in this guild (decimal string).
    #[serde(default)]
    pub permissions: Option<String>,

    /// Enabled guild features.
    #[serde(default)]
    pub features: Vec<String>,

    /// Whether the guild is registered locally with the user as a member.
    #[serde(default, skip_deserializing)]
    pub is_added: bool,

    /// Claims the user holds in this guild.
    #[serde(default, skip_deserializing)]
    pub claims: Vec<Claim>,
}

impl DiscordGuild {
    /// Numeric guild id, or `None` when Discord sent something non-numeric.
    #[must_use]
    pub fn guild_id(&self) -> Option<u64> {
        parse_snowflake(&self.id)
    }
}
