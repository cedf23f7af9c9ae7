use crate::{config::Config, repository::RepoError};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;
use tracing::info;

/// Open the pool described by `config` and bring the schema up to date.
pub async fn connect(config: &Config) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);

    // Every connection to an in-memory database gets its own private copy,
    // so those pools are pinned to a single long-lived connection.
    let pool = if is_in_memory(&config.database_url) {
        single_connection().connect_with(options).await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(config.idle_timeout)
            .connect_with(options)
            .await?
    };

    migrate(&pool).await?;
    info!(
        max_connections = config.max_connections,
        idle_timeout_secs = config.idle_timeout.as_secs(),
        "Database pool ready"
    );
    Ok(pool)
}

/// Fresh private database, mostly for tests.
pub async fn connect_in_memory() -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = single_connection().connect_with(options).await?;
    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), RepoError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn single_connection() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
