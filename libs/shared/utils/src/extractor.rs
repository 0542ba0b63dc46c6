use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
};
use headers::{authorization::Bearer, Authorization, HeaderMapExt};
use serde::Deserialize;
use tracing::{debug, warn};

use shared_database::{AppState, Query};
use shared_models::auth::{AuthenticatedUser, Role};
use shared_models::error::AppError;

use crate::jwt::validate_token;

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: Option<String>,
}

/// Verifies the bearer token, then resolves the caller's role from the users
/// table once and stores an `AuthenticatedUser` in request extensions.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if !request.headers().contains_key(AUTHORIZATION) {
        return Err(AppError::Auth("unauthorized access".to_string()));
    }

    let bearer = request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or_else(|| {
            debug!("Authorization header is not a bearer token");
            AppError::Forbidden("forbidden access".to_string())
        })?;

    let claims = validate_token(bearer.token(), &state.config.jwt_secret).map_err(|e| {
        debug!("Rejected token: {}", e);
        AppError::Forbidden("forbidden access".to_string())
    })?;

    let row: Option<RoleRow> = state
        .store
        .select_one("users", &Query::new().eq("email", &claims.email).select("role"))
        .await?;

    let role = Role::from_record(row.as_ref().and_then(|r| r.role.as_deref()));
    debug!("Authenticated {} as {:?}", claims.email, role);

    request.extensions_mut().insert(AuthenticatedUser {
        email: claims.email,
        role,
    });

    Ok(next.run(request).await)
}

/// Must be layered inside `auth_middleware`.
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or_else(|| AppError::Auth("User not found in request extensions".to_string()))?;

    if !user.role.is_admin() {
        warn!("Non-admin {} attempted an admin operation", user.email);
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }

    Ok(next.run(request).await)
}
