//! Authenticated Request Principal
//!
//! The identity attached to a request by the auth middleware after token
//! verification. Lives in the kernel so every HTTP-facing crate can consume
//! it without depending on the auth crate.

use crate::id::UserId;

/// Identity of the authenticated caller
///
/// Inserted into request extensions by the auth middleware. Handlers on
/// protected routes extract it instead of re-verifying the token.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub user_id: UserId,
}

impl CurrentUser {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = crate::error::app_error::AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or_else(|| {
                crate::error::app_error::AppError::unauthorized("Authentication required")
            })
    }
}
