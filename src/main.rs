//! user-crud server: reads settings from env, prepares the `users` table, serves the CRUD routes.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use user_crud::{
    app, ensure_database_exists, ensure_users_table, log_users, reset_users_table, seed_users, AppState, Bootstrap,
    PgUserStore, Settings, StaticKey, StoreGateway,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("user_crud=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(db = ?settings.db, bootstrap = ?settings.bootstrap, "settings loaded");

    if settings.bootstrap != Bootstrap::None {
        ensure_database_exists(&settings.db).await?;
    }
    let gateway = StoreGateway::connect(&settings.db).await?;
    tracing::info!("successfully pinged the db");

    match settings.bootstrap {
        Bootstrap::None => {}
        Bootstrap::Create => ensure_users_table(&gateway).await?,
        Bootstrap::Reset => reset_users_table(&gateway).await?,
    }
    if settings.seed_users {
        seed_users(&gateway).await?;
    }
    let count = log_users(&gateway).await?;
    tracing::info!(count, "users in store");

    let state = AppState::new(
        Arc::new(PgUserStore::new(gateway.clone())),
        Arc::new(StaticKey::new(settings.api_key.clone())),
    );

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.close().await;
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
