use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::router::appointment_routes;
use auth_cell::router::auth_routes;
use doctor_cell::router::doctor_routes;
use shared_database::AppState;
use user_cell::router::user_routes;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "doctors portal server is running" }))
        .merge(appointment_routes(state.clone()))
        .merge(auth_routes(state.clone()))
        .nest("/users", user_routes(state.clone()))
        .nest("/doctors", doctor_routes(state))
}
