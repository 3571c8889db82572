use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::auth::AuthUser;
use crate::dashboard::progress_summary;
use crate::views;
use crate::AppState;

pub async fn show(AuthUser(principal): AuthUser, State(state): State<AppState>) -> Response {
    let mut conn = match state.pool.get() {
        Ok(c) => c,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::error_page("Something went wrong; please try again")),
            )
                .into_response()
        }
    };

    match progress_summary(&mut conn, principal.id) {
        Ok(summary) => Html(views::profile_page(&principal, &summary)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "profile query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::error_page("Something went wrong; please try again")),
            )
                .into_response()
        }
    }
}
