mod credentials;
mod crypto;
mod db;
mod extractor;

pub use credentials::{authenticate, normalize_email, register};
pub use crypto::{hash_password, verify_password};
pub use db::{create_session, delete_session, get_user_from_token};
pub use extractor::{AuthUser, Principal, SESSION_COOKIE};

/// One message for every login failure, so callers cannot distinguish an
/// unknown email from a wrong password.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
