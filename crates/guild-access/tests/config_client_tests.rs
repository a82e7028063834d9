//! Configuration, client and store construction tests.
//!
//! Tests actual behavior, not constants.

use guild_access::config::{Config, endpoints};
use guild_access::models::Claim;
use guild_access::store::{InMemoryMembershipStore, MembershipSeed, MembershipStore};
use guild_access::DiscordClient;

// =============================================================================
// Config Behavior Tests
// =============================================================================

#[test]
fn test_config_default_targets_discord() {
    let config = Config::default();
    assert_eq!(
        config.endpoint(endpoints::CURRENT_AUTHORIZATION),
        "https://discord.com/api/v10/oauth2/@me"
    );
}

#[test]
fn test_config_rejects_bad_api_url() {
    let err = Config::default().with_discord_api_url("discord.com/api").unwrap_err();
    assert!(err.to_string().contains("invalid Discord API URL"));
}

#[test]
fn test_client_uses_configured_base_url() {
    let config = Config::default().with_discord_api_url("http://proxy.internal:8080/api/v10").unwrap();
    let client = DiscordClient::new(&config).unwrap();
    assert_eq!(client.base_url(), "http://proxy.internal:8080/api/v10");
}

// =============================================================================
// Seeded Store Tests
// =============================================================================

#[tokio::test]
async fn test_seed_document_drives_claims() {
    let seed: MembershipSeed = serde_json::from_value(serde_json::json!({
        "guilds": [
            {
                "id": 111,
                "name": "Clemson CS",
                "ownerId": 1,
                "users": [2, 3],
                "roles": [
                    { "id": 10, "name": "Moderators", "claims": ["moderation_warn", "tag_delete"], "members": [2] },
                    { "id": 11, "name": "Admins", "admin": true, "members": [4] }
                ]
            },
            { "id": 222, "name": "Empty" }
        ]
    }))
    .unwrap();

    let store = InMemoryMembershipStore::from_seed(seed);
    assert_eq!(store.guild_count().await, 2);

    let owner = store.claims_by_guild(1).await.unwrap();
    assert_eq!(owner[&111].len(), Claim::ALL.len());

    let moderator = store.claims_by_guild(2).await.unwrap();
    let names: Vec<_> = moderator[&111].iter().map(|c| c.as_str()).collect();
    assert_eq!(names, vec!["tag_delete", "moderation_warn"]);

    let member = store.claims_by_guild(3).await.unwrap();
    assert!(member.is_empty());
    assert!(store.registered_guilds(3).await.unwrap().contains(&111));

    let admin = store.claims_by_guild(4).await.unwrap();
    assert_eq!(admin[&111].len(), Claim::ALL.len());

    assert!(store.registered_guilds(99).await.unwrap().is_empty());
}

#[test]
fn test_seed_rejects_unknown_claims() {
    let result = serde_json::from_value::<MembershipSeed>(serde_json::json!({
        "guilds": [{ "id": 1, "name": "g", "roles": [{ "id": 2, "name": "r", "claims": ["root"] }] }]
    }));
    assert!(result.is_err());
}
