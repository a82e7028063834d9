//! Identity provider seam.
//!
//! The resolver only sees [`IdentityProvider`]; [`DiscordClient`] is the
//! production implementation over the Discord REST API.

mod discord;

pub use discord::DiscordClient;

use async_trait::async_trait;

use crate::error::ProviderResult;
use crate::models::{DiscordAuthorization, DiscordGuild};
use crate::principal::Credential;

/// Verifies a bearer credential and reads the caller's identity and guilds.
///
/// Every call is a single request: implementations must not retry.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verify the credential and fetch the caller's authorization and profile.
    async fn fetch_authorization(&self, credential: &Credential)
    -> ProviderResult<DiscordAuthorization>;

    /// Fetch the guilds the caller belongs to, in provider order.
    async fn fetch_guilds(&self, credential: &Credential) -> ProviderResult<Vec<DiscordGuild>>;
}
