use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::auth::{create_session, register};
use crate::error::RegistrationError;
use crate::views;
use crate::AppState;

use super::session_cookie;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub user_name: String,
    pub password: String,
    pub confirm: String,
}

pub async fn form() -> impl IntoResponse {
    Html(views::register_page(None, "", ""))
}

pub async fn submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let rerender = |status: StatusCode, message: &str| {
        (
            status,
            Html(views::register_page(
                Some(message),
                &form.email,
                &form.user_name,
            )),
        )
            .into_response()
    };

    let mut conn = match state.pool.get() {
        Ok(c) => c,
        Err(_) => {
            return rerender(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong; please try again",
            )
        }
    };

    let user = match register(
        &mut conn,
        &form.email,
        &form.user_name,
        &form.password,
        &form.confirm,
    ) {
        Ok(user) => user,
        Err(err @ RegistrationError::Validation(_)) => {
            return rerender(StatusCode::BAD_REQUEST, &err.to_string())
        }
        Err(err @ RegistrationError::DuplicateEmail) => {
            return rerender(StatusCode::CONFLICT, &err.to_string())
        }
        Err(RegistrationError::Internal) => {
            return rerender(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create account")
        }
        Err(RegistrationError::Persistence(e)) => {
            tracing::error!(error = %e, "failed to create user");
            return rerender(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create account");
        }
    };

    // Auto-authenticate the fresh account.
    let token = match create_session(&mut conn, user.id, &state.config.secret_key, false) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "failed to create session after registration");
            return rerender(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Account created; please log in",
            );
        }
    };

    let jar = jar.add(session_cookie(token, false, state.config.production));
    (jar, Redirect::to("/")).into_response()
}
