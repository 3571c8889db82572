use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::AuthUser;
use crate::dashboard::{list_catalog, list_entries, progress_summary};
use crate::flash;
use crate::views;
use crate::AppState;

pub async fn show(
    AuthUser(principal): AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
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

    let (jar, pending) = flash::take(jar);

    let catalog = list_catalog(&mut conn);
    let entries = list_entries(&mut conn, principal.id);
    let summary = progress_summary(&mut conn, principal.id);

    match (catalog, entries, summary) {
        (Ok(catalog), Ok(entries), Ok(summary)) => (
            jar,
            Html(views::dashboard_page(
                &principal,
                pending.as_ref(),
                &catalog,
                &entries,
                &summary,
            )),
        )
            .into_response(),
        (catalog, entries, summary) => {
            for err in [catalog.err(), entries.err(), summary.err()]
                .into_iter()
                .flatten()
            {
                tracing::error!(error = %err, "dashboard query failed");
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::error_page("Something went wrong; please try again")),
            )
                .into_response()
        }
    }
}
