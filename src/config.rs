//! Application configuration, loaded once at startup and injected into
//! every component via [`crate::models::AppState`] rather than read from
//! the environment at call sites.

use anyhow::{Context, Result};
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// Connection string for the note store. A file-based SQLite database
    /// by default; the file is created if it does not exist.
    pub database_url: String,
    /// Secret used to sign session cookies.
    pub session_secret: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:notes.db".to_string());
        let session_secret = env::var("SESSION_SECRET")
            .context("session secret to be defined in the environment")?;
        let port = match env::var("PORT") {
            Ok(p) => p.parse().context("PORT must be a port number")?,
            Err(_) => 5000,
        };

        Ok(Self {
            database_url,
            session_secret,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env() {
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("SESSION_SECRET", "foo");
        env::set_var("PORT", "8123");

        let config = Config::from_env().expect("config loads");
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.session_secret, "foo");
        assert_eq!(config.port, 8123);
    }
}
