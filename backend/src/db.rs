use crate::config::AppConfig;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const IN_MEMORY: &str = ":memory:";

// Open the database and bring the schema up to date
pub async fn setup_database(config: &AppConfig) -> anyhow::Result<SqlitePool> {
    let pool = if config.database_storage == IN_MEMORY {
        // Every connection to :memory: is its own database, so keep exactly one alive.
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?
    } else {
        let options = SqliteConnectOptions::new()
            .filename(&config.database_storage)
            .create_if_missing(true);
        SqlitePoolOptions::new().connect_with(options).await?
    };
    tracing::info!(storage = %config.database_storage, "Connected to database");

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations executed");
    }

    Ok(pool)
}
