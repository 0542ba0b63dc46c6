use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use shared_database::AppState;

use crate::handlers;

pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/jwt", get(handlers::issue_access_token))
        .with_state(state)
}
