//! Site user resolution.
//!
//! Verifies the caller's Discord credential, reads their guilds, and overlays
//! local registration and claims. The outcome is either a [`SiteUser`] or
//! Forbidden; callers never learn which check denied them, but the reason is
//! logged.
//!
//! Provider failures of any kind (including transport errors) are reported as
//! Forbidden. Only a malformed user id or a store failure is an error.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{ProviderError, ResolveError};
use crate::models::{DiscordGuild, SiteUser, parse_snowflake};
use crate::principal::Principal;
use crate::provider::IdentityProvider;
use crate::store::{ClaimMap, MembershipStore};

/// Why a request was denied. Only ever logged, never returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// No bearer credential on the request.
    MissingCredential,
    /// Discord rejected the credential when fetching the user.
    InvalidCredential,
    /// Discord rejected the credential when fetching the guild list.
    GuildsRejected,
}

impl ForbiddenReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingCredential => "no bearer token found",
            Self::InvalidCredential => "invalid discord token",
            Self::GuildsRejected => "invalid discord token for guilds",
        }
    }
}

impl fmt::Display for ForbiddenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an authorization query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizeResult<T> {
    Forbidden(ForbiddenReason),
    Success(T),
}

impl<T> AuthorizeResult<T> {
    #[must_use]
    pub const fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    #[must_use]
    pub const fn forbidden_reason(&self) -> Option<ForbiddenReason> {
        match self {
            Self::Forbidden(reason) => Some(*reason),
            Self::Success(_) => None,
        }
    }

    /// The success value, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Forbidden(_) => None,
        }
    }
}

/// One inbound site user query.
#[derive(Debug, Clone, Default)]
pub struct SiteUserRequest {
    /// Claims established by the transport.
    pub principal: Principal,
    /// Declared `Origin` of the request, for logging.
    pub origin: Option<String>,
}

impl SiteUserRequest {
    #[must_use]
    pub fn new(principal: Principal, origin: Option<String>) -> Self {
        Self { principal, origin }
    }
}

/// Resolver with its collaborators injected.
#[derive(Clone)]
pub struct Resolver {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn MembershipStore>,
}

impl Resolver {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn MembershipStore>) -> Self {
        Self { provider, store }
    }

    /// Resolve one request. See [`resolve_site_user`].
    pub async fn resolve(
        &self,
        request: &SiteUserRequest,
    ) -> Result<AuthorizeResult<SiteUser>, ResolveError> {
        resolve_site_user(request, self.provider.as_ref(), self.store.as_ref()).await
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver").finish()
    }
}

/// Resolve the caller of `request` into a [`SiteUser`].
///
/// The two Discord calls are issued concurrently, as are the two store
/// queries; the store is only consulted once both Discord calls succeeded.
/// Dropping the returned future abandons any call still in flight.
pub async fn resolve_site_user(
    request: &SiteUserRequest,
    provider: &dyn IdentityProvider,
    store: &dyn MembershipStore,
) -> Result<AuthorizeResult<SiteUser>, ResolveError> {
    tracing::info!(
        origin = request.origin.as_deref().unwrap_or("<none>"),
        "Site user request initialized"
    );

    let Some(credential) = request.principal.discord_bearer() else {
        return Ok(deny(ForbiddenReason::MissingCredential, None));
    };

    let (authorization, guilds) =
        tokio::join!(provider.fetch_authorization(&credential), provider.fetch_guilds(&credential));

    let authorization = match authorization {
        Ok(authorization) => authorization,
        Err(e) => return Ok(deny(ForbiddenReason::InvalidCredential, Some(&e))),
    };
    let guilds = match guilds {
        Ok(guilds) => guilds,
        Err(e) => return Ok(deny(ForbiddenReason::GuildsRejected, Some(&e))),
    };

    let user_id = parse_snowflake(&authorization.user.id)
        .ok_or_else(|| ResolveError::malformed_user_id(&authorization.user.id))?;

    let (registered, claims) =
        tokio::try_join!(store.registered_guilds(user_id), store.claims_by_guild(user_id))?;

    let guilds = overlay_guilds(guilds, &registered, &claims);

    tracing::info!(
        user_id,
        user = authorization.user.display_name(),
        guilds = guilds.len(),
        registered = guilds.iter().filter(|g| g.is_added).count(),
        "Site user request accepted"
    );

    Ok(AuthorizeResult::Success(SiteUser { user: authorization, guilds }))
}

fn deny<T>(reason: ForbiddenReason, error: Option<&ProviderError>) -> AuthorizeResult<T> {
    match error {
        Some(e) => tracing::warn!(
            reason = %reason,
            error = %e,
            credential_rejected = e.is_credential_rejection(),
            "Site user request denied"
        ),
        None => tracing::warn!(reason = %reason, "Site user request denied"),
    }
    AuthorizeResult::Forbidden(reason)
}

/// Fill in `is_added` and `claims` on every guild, keeping order and count.
///
/// Guilds whose id is not a valid snowflake are left unregistered with no claims.
#[must_use]
pub fn overlay_guilds(
    mut guilds: Vec<DiscordGuild>,
    registered: &HashSet<u64>,
    claims: &ClaimMap,
) -> Vec<DiscordGuild> {
    for guild in &mut guilds {
        let id = guild.guild_id();
        guild.is_added = id.is_some_and(|id| registered.contains(&id));
        guild.claims = id
            .and_then(|id| claims.get(&id))
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
    }
    guilds
}
