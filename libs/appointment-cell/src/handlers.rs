use std::sync::Arc;

use axum::{
    extract::{Extension, Json, Query, State},
};
use serde::Deserialize;
use tracing::{debug, warn};

use shared_database::AppState;
use shared_models::auth::AuthenticatedUser;
use shared_models::error::AppError;

use crate::models::{AvailabilityView, Booking, BookingResponse, Speciality};
use crate::services::booking::BookingService;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    pub email: Option<String>,
}

#[axum::debug_handler]
pub async fn get_appointment_options(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<AvailabilityView>>, AppError> {
    debug!("Availability requested for {:?}", query.date);

    let service = BookingService::new(&state.store);
    let options = service.available_options(query.date.as_deref()).await?;

    Ok(Json(options))
}

#[axum::debug_handler]
pub async fn get_appointment_specialities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Speciality>>, AppError> {
    let service = BookingService::new(&state.store);
    Ok(Json(service.specialities().await?))
}

/// Bookings of the authenticated user. `email` must name the caller.
#[axum::debug_handler]
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    if query.email.as_deref() != Some(user.email.as_str()) {
        warn!("{} requested bookings of {:?}", user.email, query.email);
        return Err(AppError::Forbidden("forbidden access".to_string()));
    }

    let service = BookingService::new(&state.store);
    Ok(Json(service.bookings_for(&user.email).await?))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(booking): Json<Booking>,
) -> Result<Json<BookingResponse>, AppError> {
    let service = BookingService::new(&state.store);
    Ok(Json(service.create_booking(booking).await?))
}
