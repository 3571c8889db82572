use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

/// Fallback session secret; acceptable only outside production.
const DEV_SECRET_KEY: &str = "dev-secret-change-me";

/// Runtime configuration, loaded once at startup and passed to the
/// components that need it. Nothing else in the crate reads the
/// environment after `Config::load` returns.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub pool_size: u32,
    pub production: bool,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// In production (`APP_ENV=production`) every database setting and the
    /// session secret are required and startup panics without them. In
    /// development they fall back to the local defaults.
    pub fn load() -> Self {
        let production = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let db_host = load_var("DB_HOST", "localhost", production);
        let db_port: u16 = parse_var("DB_PORT", "5432", production);
        let db_name = load_var("DB_NAME", "messier", production);
        let db_user = load_var("DB_USER", "messier", production);
        let db_pass = load_var("DB_PASSWORD", "messier", production);

        let secret_key = load_var("SECRET_KEY", DEV_SECRET_KEY, production);

        Self {
            database_url: format!(
                "postgres://{db_user}:{db_pass}@{db_host}:{db_port}/{db_name}"
            ),
            secret_key,
            upload_dir: PathBuf::from(
                env::var("UPLOAD_DIR").unwrap_or_else(|_| "static/uploads".to_string()),
            ),
            port: parse_var("PORT", "3000", false),
            pool_size: parse_var("DB_POOL_SIZE", "8", false),
            production,
        }
    }
}

fn load_var(key: &str, default: &str, required: bool) -> String {
    match env::var(key) {
        Ok(v) if !v.is_empty() => v,
        _ if required => panic!("{key} must be set in production"),
        _ => {
            warn!("{key} not set, using development default");
            default.to_string()
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: &str, required: bool) -> T
where
    T::Err: Display,
{
    let raw = load_var(key, default, required);
    match raw.parse() {
        Ok(v) => v,
        Err(e) => panic!("Invalid {key} value {raw:?}: {e}"),
    }
}
