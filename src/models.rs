use super::config::Config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Anything with a stable numeric identity. The session layer stores an
/// [`Identifiable`] id in the cookie and re-resolves it against the
/// database on every request.
pub trait Identifiable {
    fn identity(&self) -> i64;
}

/// A registered account. The password credential never leaves the `pw` /
/// `db_ops` layers, so it is not part of this struct and cannot leak into
/// a session cookie.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl Identifiable for User {
    fn identity(&self) -> i64 {
        self.id
    }
}

/// A note belongs to exactly one user and is never shared. `tags` is a
/// free-form string, only ever used for substring filtering.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: i64,
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}
