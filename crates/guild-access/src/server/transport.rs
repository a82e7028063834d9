//! HTTP transport.
//!
//! Builds the request [`Principal`] from the `Authorization: Bearer` header,
//! runs the resolver, and maps the outcome:
//! - Forbidden → `403` with an empty body
//! - Success → `200` with `{ "user": SiteUser }`
//! - Internal failure → `5xx` with a generic JSON error

use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::models::SiteUserResponse;
use crate::principal::Principal;
use crate::resolver::{AuthorizeResult, Resolver, SiteUserRequest};

/// Route of the site user query.
pub const SITE_USER_ROUTE: &str = "/api/authorization/site-user";

/// Shared state for HTTP handlers.
#[derive(Debug, Clone)]
pub struct HttpState {
    pub resolver: Resolver,
}

/// Create the HTTP router.
pub fn create_router(resolver: Resolver) -> Router {
    let state = Arc::new(HttpState { resolver });

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route(SITE_USER_ROUTE, get(handle_site_user))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(middleware::from_fn(attach_principal)),
        )
        .with_state(state)
}

/// Attach a [`Principal`] to every request, carrying the bearer token if one
/// was sent. Malformed `Authorization` headers yield an anonymous principal.
async fn attach_principal(mut req: Request, next: Next) -> Response {
    let principal = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|Authorization(bearer)| Principal::with_discord_bearer(bearer.token()))
        .unwrap_or_else(Principal::anonymous);

    req.extensions_mut().insert(principal);
    next.run(req).await
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "guild-access",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": "guild-access",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `GET /api/authorization/site-user`
async fn handle_site_user(
    State(state): State<Arc<HttpState>>,
    Extension(principal): Extension<Principal>,
    headers: HeaderMap,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let request = SiteUserRequest::new(principal, origin);

    match state.resolver.resolve(&request).await {
        Ok(AuthorizeResult::Success(user)) => Json(SiteUserResponse::from(user)).into_response(),
        Ok(AuthorizeResult::Forbidden(_)) => StatusCode::FORBIDDEN.into_response(),
        Err(e) => e.into_response(),
    }
}
