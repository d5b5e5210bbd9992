//! Authentication extractors
//!
//! Resolve the acting user from the `Authorization: Bearer` header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use std::sync::Arc;

use crate::auth::{Identity, JwtError, TokenVerifier};
use crate::error::ApiError;

/// Authenticated user extracted from a bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Identity);

/// Extractor for authenticated users
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(AuthenticatedUser(user): AuthenticatedUser) -> String {
///     format!("Hello, user {}", user.user_id)
/// }
/// ```
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    ApiError::Unauthorized(
                        "Authorization header with Bearer token required".to_string(),
                    )
                })?;

        let verifier = Arc::<TokenVerifier>::from_ref(state);

        let identity = verifier.verify(bearer.token()).map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            match e {
                JwtError::TokenExpired => ApiError::Unauthorized("Token has expired".to_string()),
                _ => ApiError::Unauthorized("Invalid token".to_string()),
            }
        })?;

        Ok(AuthenticatedUser(identity))
    }
}

/// Optional authenticated user extractor
///
/// Attempts to authenticate but does not fail when no valid token is present.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<Identity>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalUser
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AuthenticatedUser::from_request_parts(parts, state).await {
            Ok(AuthenticatedUser(identity)) => Ok(OptionalUser(Some(identity))),
            Err(_) => Ok(OptionalUser(None)),
        }
    }
}

/// Requires the reviewer or admin role
#[derive(Debug, Clone)]
pub struct ReviewerUser(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for ReviewerUser
where
    Arc<TokenVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(identity) =
            AuthenticatedUser::from_request_parts(parts, state).await?;

        if !identity.role.can_review() {
            return Err(ApiError::Forbidden("Reviewer access required".to_string()));
        }

        Ok(ReviewerUser(identity))
    }
}
