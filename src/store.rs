//! `users` table DDL, database creation, and demo data. Startup only; request handling never calls into here.

use crate::config::DbSettings;
use crate::error::AppError;
use crate::gateway::StoreGateway;
use crate::model::User;
use crate::service::crud;
use sqlx::ConnectOptions;

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username VARCHAR NOT NULL,
        email VARCHAR NOT NULL,
        firstname VARCHAR,
        lastname VARCHAR,
        sex VARCHAR,
        date_created TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// (username, email, firstname, lastname, sex)
const SEED_USERS: &[(&str, &str, &str, &str, &str)] = &[
    ("bash", "anakobembash@gmail.com", "Bashir", "Anakobe", "male"),
    ("teemah", "teemah247@gmail.com", "Fatimah", "Muhammed", "female"),
    ("wasman", "wasman01@gmail.com", "Abdulwasiu", "Anakobe", "male"),
    ("medo", "ahmed123@gmail.com", "Ahmed", "Ibrahim", "male"),
    ("zain", "zainyray@gmail.com", "Zainab", "Idris", "female"),
    ("stacia", "cheerfulann@gmail.com", "Anastasia", "Ugwu", "female"),
];

/// Connect to the `postgres` maintenance database and create the target database if it does not exist.
pub async fn ensure_database_exists(settings: &DbSettings) -> Result<(), AppError> {
    if settings.database.is_empty() || settings.database == "postgres" {
        return Ok(());
    }
    let mut conn = settings
        .admin_connect_options()
        .connect()
        .await
        .map_err(AppError::Connection)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&settings.database)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&settings.database)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %settings.database, "database created");
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub async fn ensure_users_table(gateway: &StoreGateway) -> Result<(), AppError> {
    let mut handle = gateway.acquire().await?;
    sqlx::query(USERS_DDL).execute(&mut *handle).await?;
    tracing::info!("users table ready");
    Ok(())
}

/// Drop the table (and every row in it), then recreate it empty.
pub async fn reset_users_table(gateway: &StoreGateway) -> Result<(), AppError> {
    {
        let mut handle = gateway.acquire().await?;
        sqlx::query("DROP TABLE IF EXISTS users").execute(&mut *handle).await?;
    }
    tracing::warn!("users table dropped");
    ensure_users_table(gateway).await
}

/// Insert the demo users. Not idempotent: each call adds six more rows.
pub async fn seed_users(gateway: &StoreGateway) -> Result<u64, AppError> {
    let mut handle = gateway.acquire().await?;
    let mut inserted = 0;
    for (username, email, firstname, lastname, sex) in SEED_USERS {
        let user = User {
            id: 0,
            username: username.to_string(),
            email: email.to_string(),
            firstname: Some(firstname.to_string()),
            lastname: Some(lastname.to_string()),
            sex: Some(sex.to_string()),
            date_created: None,
        };
        inserted += crud::insert_user(&mut handle, &user).await?;
    }
    tracing::info!(inserted, "seed users added");
    Ok(inserted)
}

/// Log every stored user at info level.
pub async fn log_users(gateway: &StoreGateway) -> Result<usize, AppError> {
    let mut handle = gateway.acquire().await?;
    let users = crud::list_users(&mut handle).await?;
    for u in &users {
        tracing::info!(
            id = u.id,
            username = %u.username,
            email = %u.email,
            firstname = u.firstname.as_deref().unwrap_or(""),
            lastname = u.lastname.as_deref().unwrap_or(""),
            sex = u.sex.as_deref().unwrap_or(""),
            date_created = ?u.date_created,
            "stored user"
        );
    }
    Ok(users.len())
}
