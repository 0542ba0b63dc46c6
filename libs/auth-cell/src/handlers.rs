use std::sync::Arc;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use shared_database::{AppState, Query as StoreQuery};
use shared_models::auth::TokenResponse;
use shared_models::error::AppError;
use shared_utils::jwt::issue_token;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub email: Option<String>,
}

/// Issue an access token for a registered email. Unknown emails get a 403
/// with an empty token.
#[axum::debug_handler]
pub async fn issue_access_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let denied = || {
        (
            StatusCode::FORBIDDEN,
            Json(TokenResponse { access_token: String::new() }),
        )
    };

    let Some(email) = query.email.filter(|e| !e.trim().is_empty()) else {
        return Ok(denied());
    };

    let user: Option<Value> = state
        .store
        .select_one("users", &StoreQuery::new().eq("email", &email).select("id"))
        .await?;

    if user.is_none() {
        warn!("Token requested for unregistered email {}", email);
        return Ok(denied());
    }

    let access_token = issue_token(&email, &state.config.jwt_secret, state.config.jwt_ttl_secs)
        .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))?;

    debug!("Issued access token for {}", email);
    Ok((StatusCode::OK, Json(TokenResponse { access_token })))
}
