//! Thin CRUD layer over the `users` and `note` tables. Every function is a
//! single statement; uniqueness and foreign-key integrity live in the
//! schema, ownership policy lives in [`crate::notes`].

use super::{errors::AppError, models, pw};
use chrono::{DateTime, Utc};
use sqlx::{query, query_as, sqlite::SqlitePool};

pub async fn create_schema(db: &SqlitePool) -> Result<(), AppError> {
    query(
        "create table if not exists users (
            id integer primary key autoincrement,
            username text not null unique,
            email text not null unique,
            salt text not null,
            digest text not null
        )",
    )
    .execute(db)
    .await?;
    query(
        "create table if not exists note (
            id integer primary key autoincrement,
            title text not null,
            content text not null,
            tags text not null default '',
            created_at text not null,
            updated_at text not null,
            user_id integer not null references users(id)
        )",
    )
    .execute(db)
    .await?;

    Ok(())
}

/// Insert a new user. A username or email collision surfaces as
/// [`AppError::Duplicate`] via the schema's uniqueness constraints; under
/// concurrent registration exactly one insert wins.
pub async fn create_user(
    db: &SqlitePool,
    username: &str,
    email: &str,
    credential: &pw::HashedPw,
) -> Result<models::User, AppError> {
    let res = query(
        "insert into users (username, email, salt, digest)
        values (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(&credential.salt)
    .bind(&credential.digest)
    .execute(db)
    .await?;

    Ok(models::User {
        id: res.last_insert_rowid(),
        username: username.to_string(),
        email: email.to_string(),
    })
}

pub async fn get_user_by_id(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<models::User>, AppError> {
    let user = query_as::<_, models::User>(
        "select id, username, email from users where id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(
    db: &SqlitePool,
    email: &str,
) -> Result<Option<models::User>, AppError> {
    let user = query_as::<_, models::User>(
        "select id, username, email from users where email = ?",
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(user)
}

pub async fn get_credential(
    db: &SqlitePool,
    user_id: i64,
) -> Result<pw::HashedPw, AppError> {
    let truth = query_as::<_, pw::HashedPw>(
        "select salt, digest from users where id = ?",
    )
    .bind(user_id)
    .fetch_one(db)
    .await?;

    Ok(truth)
}

pub async fn insert_note(
    db: &SqlitePool,
    user_id: i64,
    title: &str,
    content: &str,
    tags: &str,
    now: DateTime<Utc>,
) -> Result<models::Note, AppError> {
    let res = query(
        "insert into note (title, content, tags, created_at, updated_at, user_id)
        values (?, ?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(content)
    .bind(tags)
    .bind(now)
    .bind(now)
    .bind(user_id)
    .execute(db)
    .await?;

    Ok(models::Note {
        id: res.last_insert_rowid(),
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.to_string(),
        created_at: now,
        updated_at: now,
        user_id,
    })
}

pub async fn get_note(
    db: &SqlitePool,
    id: i64,
) -> Result<Option<models::Note>, AppError> {
    let note = query_as::<_, models::Note>(
        "select id, title, content, tags, created_at, updated_at, user_id
        from note where id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(note)
}

pub struct ListNoteQuery {
    pub user_id: i64,
    /// Case-sensitive substring to match against title, content or tags.
    /// Empty means no filter.
    pub search: String,
    pub order_by_title: bool,
}

pub async fn list_notes(
    db: &SqlitePool,
    params: &ListNoteQuery,
) -> Result<Vec<models::Note>, AppError> {
    // `instr` is a byte-wise (case-sensitive) substring match, which is
    // exactly the filtering contract we want.
    let order = if params.order_by_title {
        "title asc"
    } else {
        "created_at desc"
    };
    let sql = format!(
        "select id, title, content, tags, created_at, updated_at, user_id
        from note
        where user_id = ?
        and (
            ? = ''
            or instr(title, ?) > 0
            or instr(content, ?) > 0
            or instr(tags, ?) > 0
        )
        order by {order}"
    );
    let notes = query_as::<_, models::Note>(&sql)
        .bind(params.user_id)
        .bind(&params.search)
        .bind(&params.search)
        .bind(&params.search)
        .bind(&params.search)
        .fetch_all(db)
        .await?;

    Ok(notes)
}

pub async fn update_note(
    db: &SqlitePool,
    id: i64,
    title: &str,
    content: &str,
    tags: &str,
    updated_at: DateTime<Utc>,
) -> Result<(), AppError> {
    query(
        "update note
        set title = ?, content = ?, tags = ?, updated_at = ?
        where id = ?",
    )
    .bind(title)
    .bind(content)
    .bind(tags)
    .bind(updated_at)
    .bind(id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn delete_note(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    query("delete from note where id = ?")
        .bind(id)
        .execute(db)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_db() -> SqlitePool {
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory db connects");
        create_schema(&db).await.expect("schema creates");

        db
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = test_db().await;
        let credential = pw::hash_new("pw1");
        let alice = create_user(&db, "alice", "a@x.com", &credential)
            .await
            .expect("first registration succeeds");

        let res = create_user(&db, "alice2", "a@x.com", &credential).await;
        assert!(matches!(res, Err(AppError::Duplicate(_))));

        // first record is unaffected
        let still_there = get_user_by_id(&db, alice.id)
            .await
            .expect("query runs")
            .expect("alice is still registered");
        assert_eq!(still_there.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = test_db().await;
        let credential = pw::hash_new("pw1");
        create_user(&db, "alice", "a@x.com", &credential)
            .await
            .expect("first registration succeeds");

        let res = create_user(&db, "alice", "b@x.com", &credential).await;
        assert!(matches!(res, Err(AppError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_credential_round_trips_through_storage() {
        let db = test_db().await;
        let credential = pw::hash_new("s3cret");
        let user = create_user(&db, "bob", "b@x.com", &credential)
            .await
            .expect("registration succeeds");

        let truth = get_credential(&db, user.id).await.expect("credential");
        assert!(pw::check("s3cret", &truth).is_ok());
        assert!(pw::check("not it", &truth).is_err());
    }

    #[tokio::test]
    async fn test_missing_user_resolves_to_none() {
        let db = test_db().await;
        let user = get_user_by_id(&db, 42).await.expect("query runs");
        assert!(user.is_none());
    }
}
