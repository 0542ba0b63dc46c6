use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared_database::{AppState, InsertAck, UpdateAck};
use shared_models::error::AppError;

use crate::models::{AdminStatus, CreateUserRequest, UserRecord};
use crate::services::UserService;

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserRecord>>, AppError> {
    let service = UserService::new(&state.store);
    Ok(Json(service.list_users().await?))
}

#[axum::debug_handler]
pub async fn get_admin_status(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatus>, AppError> {
    let service = UserService::new(&state.store);
    let is_admin = service.is_admin(&email).await?;
    Ok(Json(AdminStatus { is_admin }))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<InsertAck>, AppError> {
    let service = UserService::new(&state.store);
    Ok(Json(service.create_user(request).await?))
}

#[axum::debug_handler]
pub async fn make_admin(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UpdateAck>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::BadRequest(format!("Invalid user id: {}", id)))?;

    let service = UserService::new(&state.store);
    Ok(Json(service.make_admin(id).await?))
}
