//! Local membership data: which guilds are registered and which claims
//! users hold in them.

mod memory;
mod seed;

pub use memory::InMemoryMembershipStore;
pub use seed::{GuildSeed, MembershipSeed, RoleSeed};

use std::collections::{BTreeSet, HashMap, HashSet};

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::Claim;

/// Claims per guild id, only for guilds where the user holds at least one.
pub type ClaimMap = HashMap<u64, BTreeSet<Claim>>;

/// Read-only view of locally registered guilds and claims.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Ids of registered guilds that have `user_id` as a member.
    async fn registered_guilds(&self, user_id: u64) -> StoreResult<HashSet<u64>>;

    /// Claims `user_id` holds, keyed by guild id.
    async fn claims_by_guild(&self, user_id: u64) -> StoreResult<ClaimMap>;
}
