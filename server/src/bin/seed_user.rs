//! Development seed: insert a known test account so a fresh database is
//! immediately usable. Safe to re-run; an existing account is left alone.

use std::env;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use diesel::prelude::*;

diesel::table! {
    users (id) {
        id -> Uuid,
        email -> Varchar,
        user_name -> Varchar,
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

const SEED_EMAIL: &str = "user@example.com";
const SEED_NAME: &str = "Test User";
const SEED_PASSWORD: &str = "TestPass123!";

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn main() {
    let host = var_or("DB_HOST", "localhost");
    let port = var_or("DB_PORT", "5432");
    let name = var_or("DB_NAME", "messier");
    let user = var_or("DB_USER", "messier");
    let pass = var_or("DB_PASSWORD", "messier");
    let url = format!("postgres://{user}:{pass}@{host}:{port}/{name}");

    let mut conn = PgConnection::establish(&url).expect("Failed to connect to database");

    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(SEED_PASSWORD.as_bytes(), &salt)
        .expect("Failed to hash seed password")
        .to_string();

    let inserted = diesel::insert_into(users::table)
        .values((
            users::email.eq(SEED_EMAIL),
            users::user_name.eq(SEED_NAME),
            users::password_hash.eq(&hashed),
        ))
        .on_conflict(users::email)
        .do_nothing()
        .execute(&mut conn)
        .expect("Failed to seed user");

    if inserted == 1 {
        println!("Seeded {SEED_EMAIL} / {SEED_PASSWORD} successfully");
    } else {
        println!("{SEED_EMAIL} already present, nothing to do");
    }
}
