use axum::response::{IntoResponse, Redirect, Response};
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::auth::{delete_session, AuthUser, SESSION_COOKIE};
use crate::AppState;

pub async fn logout(
    AuthUser(_principal): AuthUser,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token = cookie.value().to_string();
        match state.pool.get() {
            Ok(mut conn) => {
                if let Err(e) = delete_session(&mut conn, &state.config.secret_key, &token) {
                    // The cookie is cleared regardless; the row expires on its own.
                    tracing::warn!(error = %e, "failed to delete session row");
                }
            }
            Err(e) => tracing::warn!(error = %e, "no connection to delete session row"),
        }
    }

    let jar = jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    (jar, Redirect::to("/login")).into_response()
}
