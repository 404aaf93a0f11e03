//! JWT authentication middleware and authorization policies.
//!
//! The middleware rejects every request without a valid bearer token before
//! any policy runs, so unauthenticated callers fail uniformly. The policies
//! themselves are pure functions over the extracted claims and the request
//! path; handlers evaluate them before touching any service.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated caller extracted from a validated token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub login: String,
    pub is_admin: bool,
    pub token_id: String,
}

/// JWT authentication middleware.
///
/// Extracts and validates the token from the Authorization header, then
/// injects the CurrentUser into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.auth_service.verify_token(token)?;

    let current_user = CurrentUser {
        login: claims.login,
        is_admin: claims.is_admin,
        token_id: claims.jti,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// AdminOnly policy: the caller must carry the admin claim.
pub fn require_admin(user: &CurrentUser) -> Result<(), AppError> {
    if user.is_admin {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// AdminOrSelf policy: admins pass, everyone else only for their own login.
pub fn require_admin_or_self(user: &CurrentUser, login: &str) -> Result<(), AppError> {
    if user.is_admin || user.login == login {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}
