use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{authenticate, create_session, INVALID_CREDENTIALS_MESSAGE};
use crate::views;
use crate::AppState;

use super::session_cookie;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: Option<String>,
}

pub async fn form() -> impl IntoResponse {
    Html(views::login_page(None, ""))
}

pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut conn = match state.pool.get() {
        Ok(c) => c,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::login_page(
                    Some("Something went wrong; please try again"),
                    &form.email,
                )),
            )
                .into_response()
        }
    };

    // Unknown email and wrong password fall through to the same message.
    let user = match authenticate(&mut conn, &form.email, &form.password) {
        Some(u) => u,
        None => {
            return (
                StatusCode::UNAUTHORIZED,
                Html(views::login_page(
                    Some(INVALID_CREDENTIALS_MESSAGE),
                    &form.email,
                )),
            )
                .into_response()
        }
    };

    let remember = form.remember.is_some();
    let token = match create_session(&mut conn, user.id, &state.config.secret_key, remember) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "failed to create session");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::login_page(
                    Some("Something went wrong; please try again"),
                    &form.email,
                )),
            )
                .into_response();
        }
    };

    let jar = jar.add(session_cookie(token, remember, state.config.production));
    (jar, Redirect::to("/")).into_response()
}
