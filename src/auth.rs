use super::{db_ops, errors::AppError, models, pw, session};
use sqlx::SqlitePool;

/// Verify an email/password pair against the store. Both "no such user"
/// and "wrong password" collapse into [`AppError::BadCredentials`] so the
/// login form cannot be used to probe which emails are registered.
pub async fn authenticate(
    db: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<session::Session, AppError> {
    let user = db_ops::get_user_by_email(db, email)
        .await?
        .ok_or(AppError::BadCredentials)?;
    let truth = db_ops::get_credential(db, user.id).await?;

    if pw::check(password, &truth).is_ok() {
        Ok(session::Session::new(user))
    } else {
        Err(AppError::BadCredentials)
    }
}

/// Create an account. Username and email must be non-empty (they are
/// unique keys); the password is hashed, never stored.
pub async fn register(
    db: &SqlitePool,
    username: &str,
    email: &str,
    password: &str,
) -> Result<models::User, AppError> {
    if username.is_empty() || email.is_empty() {
        return Err(AppError::Validation(
            "username and email are required",
        ));
    }
    let credential = pw::hash_new(password);
    db_ops::create_user(db, username, email, &credential).await
}
