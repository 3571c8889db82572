//! One-shot notice passed across a redirect in a cookie: set on the
//! redirect response, read and cleared on the next dashboard render.
//!
//! The message is hex-encoded so the cookie value stays within the
//! characters allowed in a Set-Cookie header regardless of message text.

use axum_extra::extract::cookie::{Cookie, CookieJar};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

impl Level {
    pub fn css_class(self) -> &'static str {
        match self {
            Level::Success => "notice-success",
            Level::Error => "notice-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

fn encode(level: Level, message: &str) -> String {
    let tag = match level {
        Level::Success => "success",
        Level::Error => "error",
    };
    format!("{tag}:{}", hex::encode(message.as_bytes()))
}

fn decode(value: &str) -> Option<Flash> {
    let (tag, hexed) = value.split_once(':')?;
    let level = match tag {
        "success" => Level::Success,
        "error" => Level::Error,
        _ => return None,
    };
    let bytes = hex::decode(hexed).ok()?;
    let message = String::from_utf8(bytes).ok()?;
    Some(Flash { level, message })
}

/// Queue a notice for the next page render.
pub fn set(jar: CookieJar, level: Level, message: &str) -> CookieJar {
    let cookie = Cookie::build((FLASH_COOKIE, encode(level, message)))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Read and clear the pending notice, if any.
pub fn take(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar.get(FLASH_COOKIE).and_then(|c| decode(c.value()));
    let jar = jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
    (jar, flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_levels_and_text() {
        for (level, message) in [
            (Level::Success, "Journal entry saved"),
            (Level::Error, "Unsupported file type; allowed: jpg, jpeg, png, webp"),
        ] {
            let decoded = decode(&encode(level, message)).unwrap();
            assert_eq!(decoded.level, level);
            assert_eq!(decoded.message, message);
        }
    }

    #[test]
    fn encoded_value_is_cookie_safe() {
        let value = encode(Level::Error, "spaces; semicolons, commas");
        assert!(value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ':'));
    }

    #[test]
    fn garbage_values_decode_to_none() {
        for raw in ["", "nocolon", "warn:abcd", "success:zz-not-hex"] {
            assert!(decode(raw).is_none(), "{raw}");
        }
    }
}
