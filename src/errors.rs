use anyhow::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

/// Expected domain outcomes. Handlers convert each variant into a
/// redirect plus a one-time flash message; only `Internal` escalates into
/// a [`ServerError`] response.
#[derive(Debug)]
pub enum AppError {
    Validation(&'static str),
    Duplicate(&'static str),
    BadCredentials,
    Forbidden,
    NotFound,
    Internal(Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation failed: {msg}"),
            Self::Duplicate(msg) => write!(f, "duplicate record: {msg}"),
            Self::BadCredentials => write!(f, "bad credentials"),
            Self::Forbidden => write!(f, "permission denied"),
            Self::NotFound => write!(f, "record not found"),
            Self::Internal(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(db)
                if db.message().contains("UNIQUE constraint failed") =>
            {
                Self::Duplicate("that username or email is already taken")
            }
            _ => Self::Internal(e.into()),
        }
    }
}

#[derive(Debug)]
pub struct ServerError(Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        println!("{:?}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, anyhow::Error>`
// to turn them into `Result<_, ServerError>`. That way you don't need to do
// that manually.
impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
