use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use shared_database::{AppState, DeleteAck, InsertAck};
use shared_models::error::AppError;

use crate::models::{CreateDoctorRequest, Doctor};
use crate::services::DoctorService;

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let service = DoctorService::new(&state.store);
    Ok(Json(service.list_doctors().await?))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDoctorRequest>,
) -> Result<Json<InsertAck>, AppError> {
    let service = DoctorService::new(&state.store);
    Ok(Json(service.create_doctor(request).await?))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<AppState>>,
    Path(doctor_id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let id = Uuid::parse_str(&doctor_id)
        .map_err(|_| AppError::BadRequest(format!("Invalid doctor id: {}", doctor_id)))?;

    let service = DoctorService::new(&state.store);
    Ok(Json(service.delete_doctor(id).await?))
}
