use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::{auth_middleware, require_admin};

use crate::handlers;

/// Every doctor route is admin-only.
pub fn doctor_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::list_doctors).post(handlers::create_doctor))
        .route("/{doctor_id}", delete(handlers::delete_doctor))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .with_state(state)
}
