pub mod create;

use crate::AppState;
use axum::routing::post;
use axum::Router;

/// Returns the router for /journal endpoints (mounted at /journal)
pub fn router() -> Router<AppState> {
    Router::new().route("/new", post(create::create_entry))
}
