pub mod auth;

use crate::AppState;
use axum::routing::get;
use axum::Router;

/// Routes reachable without a session.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login::form).post(auth::login::submit))
        .route(
            "/register",
            get(auth::register::form).post(auth::register::submit),
        )
}
