//! Auth Middleware
//!
//! Middleware for requiring a valid bearer token on protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use kernel::principal::CurrentUser;
use platform::http::extract_bearer_token;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::error::AuthError;

/// Middleware state
///
/// Only the token secret is needed here; no repository access on the hot
/// path. Catalog routes can carry the same state.
#[derive(Clone)]
pub struct AuthTokenState {
    token_service: TokenService,
}

impl AuthTokenState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            token_service: TokenService::new(config),
        }
    }
}

/// Middleware that requires a valid `Authorization: Bearer` token
///
/// On success, injects [`CurrentUser`] into request extensions for
/// downstream extractors. All failure modes produce the same generic 401;
/// the precise cause only reaches the logs.
pub async fn require_auth(
    State(state): State<AuthTokenState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = match extract_bearer_token(req.headers()) {
        Some(token) => token,
        None => return Err(AuthError::TokenMissing.into_response()),
    };

    let user_id = match state.token_service.verify(token) {
        Ok(user_id) => user_id,
        Err(e) => return Err(e.into_response()),
    };

    req.extensions_mut().insert(CurrentUser::new(user_id));

    Ok(next.run(req).await)
}
