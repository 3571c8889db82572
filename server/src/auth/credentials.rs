//! Credential store: account creation and password checks against the
//! `users` table.

use diesel::prelude::*;

use crate::error::RegistrationError;
use crate::models::{NewUser, User};
use crate::schema::users;

use super::crypto::{hash_password, verify_password};

/// Canonical form for stored and looked-up emails: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_registration(
    email: &str,
    user_name: &str,
    password: &str,
    confirm: &str,
) -> Result<(), RegistrationError> {
    if email.is_empty() || user_name.trim().is_empty() || password.is_empty() {
        return Err(RegistrationError::Validation(
            "All fields are required".to_string(),
        ));
    }
    if password != confirm {
        return Err(RegistrationError::Validation(
            "Passwords do not match".to_string(),
        ));
    }
    Ok(())
}

/// Create an account. Duplicate emails are caught on the insert's unique
/// constraint rather than a prior existence check.
pub fn register(
    conn: &mut PgConnection,
    email: &str,
    user_name: &str,
    password: &str,
    confirm: &str,
) -> Result<User, RegistrationError> {
    let email = normalize_email(email);
    validate_registration(&email, user_name, password, confirm)?;

    let password_hash = hash_password(password).map_err(|e| {
        tracing::error!("password hashing failed: {}", e);
        RegistrationError::Internal
    })?;

    let new_user = NewUser {
        email: &email,
        user_name: user_name.trim(),
        password_hash: &password_hash,
    };

    match diesel::insert_into(users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result(conn)
    {
        Ok(user) => Ok(user),
        Err(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => Err(RegistrationError::DuplicateEmail),
        Err(e) => Err(RegistrationError::Persistence(e)),
    }
}

/// Verify a login. `None` for unknown email and for wrong password alike;
/// the caller renders one generic message either way.
pub fn authenticate(conn: &mut PgConnection, email: &str, password: &str) -> Option<User> {
    let email = normalize_email(email);

    let user: User = users::table
        .filter(users::email.eq(&email))
        .select(User::as_select())
        .first(conn)
        .ok()?;

    if verify_password(password, &user.password_hash) {
        Some(user)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
        assert_eq!(normalize_email("plain@host"), "plain@host");
    }

    #[test]
    fn registration_requires_all_fields() {
        for (email, name, pw, confirm) in [
            ("", "Name", "pw", "pw"),
            ("a@b.c", "", "pw", "pw"),
            ("a@b.c", "   ", "pw", "pw"),
            ("a@b.c", "Name", "", ""),
        ] {
            let err = validate_registration(email, name, pw, confirm).unwrap_err();
            assert!(matches!(err, RegistrationError::Validation(_)));
        }
    }

    #[test]
    fn registration_requires_matching_passwords() {
        let err = validate_registration("a@b.c", "Name", "one", "two").unwrap_err();
        match err {
            RegistrationError::Validation(msg) => assert_eq!(msg, "Passwords do not match"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn registration_accepts_valid_input() {
        assert!(validate_registration("a@b.c", "Name", "pw", "pw").is_ok());
    }
}
