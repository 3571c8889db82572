pub mod login;
pub mod register;

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::auth::SESSION_COOKIE;

const REMEMBER_COOKIE_DAYS: i64 = 30;

/// Build the session cookie for a fresh login or registration.
/// Without `remember` the cookie lives only for the browser session.
pub(crate) fn session_cookie(token: String, remember: bool, secure: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);
    if remember {
        builder = builder.max_age(time::Duration::days(REMEMBER_COOKIE_DAYS));
    }
    builder.build()
}
