use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn appointment_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/appointmentOptions", get(handlers::get_appointment_options))
        .route("/appointmentSpeciality", get(handlers::get_appointment_specialities))
        .route("/bookings", post(handlers::create_booking));

    let protected_routes = Router::new()
        .route("/bookings", get(handlers::get_bookings))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
