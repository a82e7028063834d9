//! In-memory membership store following the `RwLock<HashMap>` store pattern.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::seed::MembershipSeed;
use super::{ClaimMap, MembershipStore};
use crate::error::{StoreError, StoreResult};
use crate::models::Claim;

struct GuildRecord {
    owner_id: Option<u64>,
    users: HashSet<u64>,
    roles: HashMap<u64, RoleRecord>,
}

struct RoleRecord {
    admin: bool,
    claims: BTreeSet<Claim>,
    members: HashSet<u64>,
}

impl GuildRecord {
    fn new(owner_id: Option<u64>) -> Self {
        Self { owner_id, users: owner_id.into_iter().collect(), roles: HashMap::new() }
    }

    /// Claims `user_id` holds here. Owners and admin-role holders hold all of them.
    fn claims_for(&self, user_id: u64) -> BTreeSet<Claim> {
        if self.owner_id == Some(user_id) {
            return Claim::ALL.iter().copied().collect();
        }

        let mut claims = BTreeSet::new();
        for role in self.roles.values().filter(|r| r.members.contains(&user_id)) {
            if role.admin {
                return Claim::ALL.iter().copied().collect();
            }
            claims.extend(role.claims.iter().copied());
        }
        claims
    }
}

/// In-memory membership store.
#[derive(Clone)]
pub struct InMemoryMembershipStore {
    guilds: Arc<RwLock<HashMap<u64, GuildRecord>>>,
}

impl InMemoryMembershipStore {
    #[must_use]
    pub fn new() -> Self {
        Self { guilds: Arc::new(RwLock::new(HashMap::new())) }
    }

    /// Build a store from seed data.
    #[must_use]
    pub fn from_seed(seed: MembershipSeed) -> Self {
        let mut guilds = HashMap::with_capacity(seed.guilds.len());

        for guild in seed.guilds {
            let mut record = GuildRecord::new(guild.owner_id);
            record.users.extend(guild.users);

            for role in guild.roles {
                record.users.extend(role.members.iter().copied());
                record.roles.insert(
                    role.id,
                    RoleRecord {
                        admin: role.admin,
                        claims: role.claims.into_iter().collect(),
                        members: role.members.into_iter().collect(),
                    },
                );
            }

            guilds.insert(guild.id, record);
        }

        Self { guilds: Arc::new(RwLock::new(guilds)) }
    }

    /// Load a store from a JSON seed file.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let seed: MembershipSeed = serde_json::from_slice(&bytes)?;

        tracing::info!(path = %path.display(), guilds = seed.guilds.len(), "Loaded membership seed");
        Ok(Self::from_seed(seed))
    }

    /// Register a guild. Re-registering keeps existing members and roles.
    pub async fn register_guild(&self, guild_id: u64, owner_id: Option<u64>) {
        let mut guilds = self.guilds.write().await;

        match guilds.get_mut(&guild_id) {
            Some(existing) => {
                existing.owner_id = owner_id;
                existing.users.extend(owner_id);
            }
            None => {
                guilds.insert(guild_id, GuildRecord::new(owner_id));
            }
        }
    }

    /// Add a user to a registered guild.
    pub async fn add_guild_user(&self, guild_id: u64, user_id: u64) -> StoreResult<()> {
        let mut guilds = self.guilds.write().await;
        let guild = guilds
            .get_mut(&guild_id)
            .ok_or_else(|| StoreError::not_found(format!("guild {guild_id}")))?;
        guild.users.insert(user_id);
        Ok(())
    }

    /// Remove a user from a guild, along with their role assignments.
    pub async fn remove_guild_user(&self, guild_id: u64, user_id: u64) -> StoreResult<()> {
        let mut guilds = self.guilds.write().await;
        let guild = guilds
            .get_mut(&guild_id)
            .ok_or_else(|| StoreError::not_found(format!("guild {guild_id}")))?;
        guild.users.remove(&user_id);
        for role in guild.roles.values_mut() {
            role.members.remove(&user_id);
        }
        Ok(())
    }

    /// Create a role in a registered guild.
    pub async fn add_role(&self, guild_id: u64, role_id: u64, admin: bool) -> StoreResult<()> {
        let mut guilds = self.guilds.write().await;
        let guild = guilds
            .get_mut(&guild_id)
            .ok_or_else(|| StoreError::not_found(format!("guild {guild_id}")))?;
        guild.roles.insert(
            role_id,
            RoleRecord { admin, claims: BTreeSet::new(), members: HashSet::new() },
        );
        Ok(())
    }

    /// Grant a claim to everyone holding a role.
    pub async fn grant_role_claim(&self, guild_id: u64, role_id: u64, claim: Claim) -> StoreResult<()> {
        let mut guilds = self.guilds.write().await;
        let role = guilds
            .get_mut(&guild_id)
            .and_then(|g| g.roles.get_mut(&role_id))
            .ok_or_else(|| StoreError::not_found(format!("role {role_id} in guild {guild_id}")))?;
        role.claims.insert(claim);
        Ok(())
    }

    /// Give a user a role. The user becomes a guild member if not already.
    pub async fn assign_role(&self, guild_id: u64, role_id: u64, user_id: u64) -> StoreResult<()> {
        let mut guilds = self.guilds.write().await;
        let guild = guilds
            .get_mut(&guild_id)
            .ok_or_else(|| StoreError::not_found(format!("guild {guild_id}")))?;
        let role = guild
            .roles
            .get_mut(&role_id)
            .ok_or_else(|| StoreError::not_found(format!("role {role_id} in guild {guild_id}")))?;
        role.members.insert(user_id);
        guild.users.insert(user_id);
        Ok(())
    }

    /// Number of registered guilds.
    pub async fn guild_count(&self) -> usize {
        self.guilds.read().await.len()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn registered_guilds(&self, user_id: u64) -> StoreResult<HashSet<u64>> {
        let guilds = self.guilds.read().await;
        Ok(guilds
            .iter()
            .filter(|(_, guild)| guild.users.contains(&user_id))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn claims_by_guild(&self, user_id: u64) -> StoreResult<ClaimMap> {
        let guilds = self.guilds.read().await;
        Ok(guilds
            .iter()
            .filter(|(_, guild)| guild.users.contains(&user_id))
            .filter_map(|(id, guild)| {
                let claims = guild.claims_for(user_id);
                (!claims.is_empty()).then_some((*id, claims))
            })
            .collect())
    }
}

impl Default for InMemoryMembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryMembershipStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryMembershipStore").finish()
    }
}
