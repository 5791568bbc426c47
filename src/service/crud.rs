//! The four statements against the `users` table. Each runs on a caller-supplied connection.
//! Errors go through `From<sqlx::Error>`, so a dropped connection mid-statement is a connection failure.

use crate::error::AppError;
use crate::model::User;
use sqlx::PgConnection;

const SELECT_ALL: &str =
    "SELECT id, username, email, firstname, lastname, sex, date_created FROM users";

const INSERT: &str =
    "INSERT INTO users (username, email, firstname, lastname, sex) VALUES ($1, $2, $3, $4, $5)";

const UPDATE: &str = r#"
    UPDATE users SET
        username = $1,
        email = $2,
        firstname = $3,
        lastname = $4,
        sex = $5
    WHERE id = $6
"#;

const DELETE: &str = "DELETE FROM users WHERE id = $1";

/// Full-table scan in backend order. The rows are collected into a vector owned by this call.
pub async fn list_users(conn: &mut PgConnection) -> Result<Vec<User>, AppError> {
    tracing::debug!(sql = %SELECT_ALL, "query");
    let users = sqlx::query_as::<_, User>(SELECT_ALL)
        .fetch_all(&mut *conn)
        .await?;
    Ok(users)
}

/// Insert the caller-supplied columns; `id` and `date_created` come from the table defaults.
pub async fn insert_user(conn: &mut PgConnection, user: &User) -> Result<u64, AppError> {
    let f = user.new_fields();
    tracing::debug!(sql = %INSERT, username = %f.username, "query");
    let result = sqlx::query(INSERT)
        .bind(f.username)
        .bind(f.email)
        .bind(f.firstname)
        .bind(f.lastname)
        .bind(f.sex)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Overwrite every mutable column of row `user.id`. Zero rows affected is not an error.
pub async fn update_user(conn: &mut PgConnection, user: &User) -> Result<u64, AppError> {
    let f = user.new_fields();
    tracing::debug!(sql = %UPDATE, id = user.id, "query");
    let result = sqlx::query(UPDATE)
        .bind(f.username)
        .bind(f.email)
        .bind(f.firstname)
        .bind(f.lastname)
        .bind(f.sex)
        .bind(user.id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Remove row `id`. Zero rows affected is not an error.
pub async fn delete_user(conn: &mut PgConnection, id: i32) -> Result<u64, AppError> {
    tracing::debug!(sql = %DELETE, id, "query");
    let result = sqlx::query(DELETE)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
