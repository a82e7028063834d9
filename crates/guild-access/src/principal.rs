//! The authenticated principal attached to an inbound request.
//!
//! The transport builds a [`Principal`] from request headers; the resolver
//! only ever reads claims from it.

use std::collections::HashMap;
use std::fmt;

/// Claim type under which the Discord bearer token is stored.
pub const DISCORD_BEARER_CLAIM: &str = "discord_bearer";

/// An opaque Discord bearer token.
///
/// `Debug` never prints the token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the `Authorization` header of provider calls.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Claims asserted about the caller by the transport layer.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Principal {
    claims: HashMap<String, String>,
}

impl Principal {
    /// A principal with no claims.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A principal carrying a Discord bearer token.
    #[must_use]
    pub fn with_discord_bearer(token: impl Into<String>) -> Self {
        let mut principal = Self::default();
        principal.insert_claim(DISCORD_BEARER_CLAIM, token);
        principal
    }

    pub fn insert_claim(&mut self, claim_type: impl Into<String>, value: impl Into<String>) {
        self.claims.insert(claim_type.into(), value.into());
    }

    /// First value recorded under `claim_type`.
    #[must_use]
    pub fn find_claim(&self, claim_type: &str) -> Option<&str> {
        self.claims.get(claim_type).map(String::as_str)
    }

    /// The Discord bearer credential, if the claim is present.
    ///
    /// The value is not inspected; Discord decides whether it is valid.
    #[must_use]
    pub fn discord_bearer(&self) -> Option<Credential> {
        self.find_claim(DISCORD_BEARER_CLAIM).map(Credential::new)
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.claims.keys().collect();
        types.sort();
        f.debug_struct("Principal").field("claim_types", &types).finish()
    }
}
