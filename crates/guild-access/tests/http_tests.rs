//! End-to-end tests of the site user endpoint via axum's Router.
//!
//! Discord is mocked with wiremock; the membership store is the real
//! in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use guild_access::config::Config;
use guild_access::models::Claim;
use guild_access::server::AppServer;
use guild_access::server::transport::SITE_USER_ROUTE;
use guild_access::{DiscordClient, InMemoryMembershipStore};

const USER_ID: u64 = 268_473_310_986_240_001;
const TOKEN: &str = "valid-discord-token";

async fn mount_discord(mock_server: &MockServer, guilds: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v10/oauth2/@me"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scopes": ["identify", "guilds"],
            "expires": "2030-01-01T00:00:00+00:00",
            "user": {"id": USER_ID.to_string(), "username": "clem", "avatar": null, "global_name": null}
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v10/users/@me/guilds"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(guilds))
        .mount(mock_server)
        .await;
}

fn build_router(mock_server: &MockServer, store: InMemoryMembershipStore) -> axum::Router {
    let config = Config::for_testing(&mock_server.uri());
    let provider = DiscordClient::new(&config).unwrap();
    AppServer::new(Arc::new(provider), Arc::new(store)).router()
}

fn site_user_request(token: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(SITE_USER_ROUTE).header("Origin", "https://dashboard.example.com");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_missing_token_is_forbidden_without_discord_calls() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let app = build_router(&mock_server, InMemoryMembershipStore::new());
    let response = app.oneshot(site_user_request(None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_bearer_authorization_is_forbidden() {
    let mock_server = MockServer::start().await;
    let app = build_router(&mock_server, InMemoryMembershipStore::new());

    let request = Request::get(SITE_USER_ROUTE)
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rejected_token_is_forbidden() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "401: Unauthorized"})))
        .mount(&mock_server)
        .await;

    let app = build_router(&mock_server, InMemoryMembershipStore::new());
    let response = app.oneshot(site_user_request(Some("revoked"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(body.is_empty(), "forbidden responses carry no reason");
}

#[tokio::test]
async fn test_discord_outage_is_forbidden() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let app = build_router(&mock_server, InMemoryMembershipStore::new());
    let response = app.oneshot(site_user_request(Some(TOKEN))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_huge_retry_after_is_forbidden() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1e20"))
        .mount(&mock_server)
        .await;

    let app = build_router(&mock_server, InMemoryMembershipStore::new());
    let response = app.oneshot(site_user_request(Some("tok"))).await.unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_site_user_merges_registered_guilds_and_claims() {
    let mock_server = MockServer::start().await;
    mount_discord(
        &mock_server,
        json!([
            {"id": "111", "name": "A", "icon": null, "owner": false, "permissions": "8", "features": []},
            {"id": "222", "name": "B", "icon": null, "owner": false, "permissions": "0", "features": []}
        ]),
    )
    .await;

    let store = InMemoryMembershipStore::new();
    store.register_guild(111, None).await;
    store.add_role(111, 10, false).await.unwrap();
    store.grant_role_claim(111, 10, Claim::DashboardView).await.unwrap();
    store.assign_role(111, 10, USER_ID).await.unwrap();

    let app = build_router(&mock_server, store);
    let response = app.oneshot(site_user_request(Some(TOKEN))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["user"]["user"]["user"]["id"], USER_ID.to_string());
    let guilds = body["user"]["guilds"].as_array().unwrap();
    assert_eq!(guilds.len(), 2);

    assert_eq!(guilds[0]["id"], "111");
    assert_eq!(guilds[0]["isAdded"], true);
    assert_eq!(guilds[0]["claims"], json!(["dashboard_view"]));

    assert_eq!(guilds[1]["id"], "222");
    assert_eq!(guilds[1]["isAdded"], false);
    assert_eq!(guilds[1]["claims"], json!([]));
}

#[tokio::test]
async fn test_unparseable_guild_id_still_succeeds() {
    let mock_server = MockServer::start().await;
    mount_discord(&mock_server, json!([{"id": "abc", "name": "Weird"}, {"id": "111", "name": "A"}])).await;

    let store = InMemoryMembershipStore::new();
    store.register_guild(111, Some(USER_ID)).await;

    let app = build_router(&mock_server, store);
    let response = app.oneshot(site_user_request(Some(TOKEN))).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let guilds = body["user"]["guilds"].as_array().unwrap();

    assert_eq!(guilds[0]["isAdded"], false);
    assert_eq!(guilds[0]["claims"], json!([]));
    assert_eq!(guilds[1]["isAdded"], true);
    assert_eq!(guilds[1]["claims"].as_array().unwrap().len(), Claim::ALL.len());
}

#[tokio::test]
async fn test_non_numeric_user_id_is_internal_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v10/oauth2/@me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "not-a-snowflake", "username": "ghost"}
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v10/users/@me/guilds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let app = build_router(&mock_server, InMemoryMembershipStore::new());
    let response = app.oneshot(site_user_request(Some(TOKEN))).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "internal_error");
    assert!(!body.to_string().contains("not-a-snowflake"));
}

#[tokio::test]
async fn test_repeated_requests_are_identical() {
    let mock_server = MockServer::start().await;
    mount_discord(&mock_server, json!([{"id": "111", "name": "A"}, {"id": "222", "name": "B"}])).await;

    let store = InMemoryMembershipStore::new();
    store.register_guild(222, None).await;
    store.add_guild_user(222, USER_ID).await.unwrap();

    let app = build_router(&mock_server, store);
    let first = body_json(app.clone().oneshot(site_user_request(Some(TOKEN))).await.unwrap()).await;
    let second = body_json(app.oneshot(site_user_request(Some(TOKEN))).await.unwrap()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_health_endpoints() {
    let mock_server = MockServer::start().await;
    let app = build_router(&mock_server, InMemoryMembershipStore::new());

    for route in ["/", "/health", "/ready"] {
        let response = app
            .clone()
            .oneshot(Request::get(route).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "route {route}");
        let body = body_json(response).await;
        assert_eq!(body["service"], "guild-access");
    }
}
