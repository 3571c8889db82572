use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::AppState;

use super::db::get_user_from_token;

/// Name of the session cookie holding the raw token.
pub const SESSION_COOKIE: &str = "session";

/// The authenticated identity attached to the current request. Handlers
/// see this value type, never the raw user row or the cookie.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

/// Extractor that resolves the session cookie and provides the
/// authenticated principal.
///
/// Use this in any handler that requires authentication:
/// ```ignore
/// async fn my_handler(AuthUser(principal): AuthUser) -> impl IntoResponse {
///     // principal is the authenticated Principal
/// }
/// ```
pub struct AuthUser(pub Principal);

/// Unauthenticated page requests fail closed into the login flow rather
/// than surfacing an error.
pub struct AuthRedirect;

impl IntoResponse for AuthRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRedirect;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(AuthRedirect)?;

        let user = get_user_from_token(&state.pool, &state.config.secret_key, &token)
            .ok_or(AuthRedirect)?;

        Ok(AuthUser(Principal {
            id: user.id,
            email: user.email,
            display_name: user.user_name,
        }))
    }
}
