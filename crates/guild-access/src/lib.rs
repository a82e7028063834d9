//! Guild Access
//!
//! Authorization service for a Discord bot's web dashboard. Given a caller's
//! Discord OAuth bearer token, it identifies the user, lists their guilds, and
//! marks which guilds are registered with the bot and which claims the user
//! holds in each.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use guild_access::{AppServer, Config, DiscordClient, InMemoryMembershipStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let provider = DiscordClient::new(&config)?;
//!     let store = InMemoryMembershipStore::new();
//!
//!     AppServer::new(Arc::new(provider), Arc::new(store)).run_http(8000).await
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod principal;
pub mod provider;
pub mod resolver;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::{ProviderError, ResolveError, StoreError};
pub use principal::{Credential, Principal};
pub use provider::{DiscordClient, IdentityProvider};
pub use resolver::{AuthorizeResult, ForbiddenReason, Resolver, SiteUserRequest, resolve_site_user};
pub use server::AppServer;
pub use store::{InMemoryMembershipStore, MembershipStore};
