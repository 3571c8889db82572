pub mod dashboard;
pub mod journal;
pub mod logout;
pub mod profile;
pub mod public;

use crate::AppState;
use axum::routing::get;
use axum::Router;

/// Routes that require an authenticated principal. Every handler here
/// takes `AuthUser`, whose rejection redirects to the login form.
pub fn protected_router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/profile", get(profile::show))
        .route("/logout", get(logout::logout))
        .nest("/journal", journal::router())
}
