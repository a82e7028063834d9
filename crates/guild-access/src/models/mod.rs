//! Data models for Discord entities and the merged site user view.
//!
//! Discord payloads are snake_case on the wire; outbound JSON is camelCase
//! (`rename_all(serialize = "camelCase")`), matching the site frontend.

mod claim;
mod guild;
mod site_user;
mod user;

pub use claim::{Claim, UnknownClaim};
pub use guild::DiscordGuild;
pub use site_user::{SiteUser, SiteUserResponse};
pub use user::{DiscordAuthorization, DiscordUser};

/// Parse a Discord snowflake id.
///
/// Snowflakes are unsigned 64-bit integers transported as decimal strings.
#[must_use]
pub fn parse_snowflake(id: &str) -> Option<u64> {
    id.parse().ok()
}
