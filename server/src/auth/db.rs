use crate::db::DbPool;
use crate::models::{NewSession, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;

use super::crypto::{generate_token, hash_token};

const REMEMBER_SESSION_DAYS: i64 = 30;
const DEFAULT_SESSION_DAYS: i64 = 1;

/// Create a session row and return the raw token destined for the cookie.
/// Only the keyed digest of the token is stored.
pub fn create_session(
    conn: &mut PgConnection,
    user_id: uuid::Uuid,
    secret: &str,
    remember: bool,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token, secret);
    let days = if remember {
        REMEMBER_SESSION_DAYS
    } else {
        DEFAULT_SESSION_DAYS
    };
    let expires_at = Utc::now() + Duration::days(days);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Resolve a session token to its user. Expired tokens, unknown tokens,
/// and tokens whose user no longer resolves all come back `None`.
pub fn get_user_from_token(pool: &DbPool, secret: &str, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token, secret);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}

pub fn delete_session(
    conn: &mut PgConnection,
    secret: &str,
    token: &str,
) -> Result<(), diesel::result::Error> {
    let token_hash = hash_token(token, secret);
    diesel::delete(sessions::table.filter(sessions::token_hash.eq(&token_hash)))
        .execute(conn)?;
    Ok(())
}
