//! JSON seed format for the in-memory store.
//!
//! ```json
//! {
//!   "guilds": [
//!     {
//!       "id": 111,
//!       "ownerId": 1,
//!       "users": [1, 2, 3],
//!       "roles": [
//!         { "id": 10, "admin": false,
//!           "claims": ["moderation_warn", "tag_delete"], "members": [2] }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::Claim;

/// Top-level seed document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipSeed {
    #[serde(default)]
    pub guilds: Vec<GuildSeed>,
}

/// A registered guild.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildSeed {
    pub id: u64,

    #[serde(default)]
    pub owner_id: Option<u64>,

    /// Member user ids.
    #[serde(default)]
    pub users: Vec<u64>,

    #[serde(default)]
    pub roles: Vec<RoleSeed>,
}

/// A guild role and the claims it grants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSeed {
    pub id: u64,

    /// Admin roles grant every claim.
    #[serde(default)]
    pub admin: bool,

    #[serde(default)]
    pub claims: Vec<Claim>,

    /// User ids holding this role. Implicitly guild members.
    #[serde(default)]
    pub members: Vec<u64>,
}
