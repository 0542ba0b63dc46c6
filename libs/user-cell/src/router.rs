use std::sync::Arc;

use axum::{
    Router,
    routing::{get, put},
    middleware,
};

use shared_database::AppState;
use shared_utils::extractor::{auth_middleware, require_admin};

use crate::handlers;

pub fn user_routes(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::list_users).post(handlers::create_user))
        .route("/admin/{user}", get(handlers::get_admin_status));

    // Path segment is the email for GET and the record id for PUT.
    let admin_routes = Router::new()
        .route("/admin/{user}", put(handlers::make_admin))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(admin_routes)
        .with_state(state)
}
