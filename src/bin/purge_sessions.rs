use std::str::FromStr;

use anyhow::Context;
use chrono::Utc;
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::EnvFilter;

use hustler_hunter::config::AppConfig;
use hustler_hunter::database::schema;
use hustler_hunter::services::session_maintenance_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("hustler_hunter=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env();
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {}", config.database_url))?;
    let pool = SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("could not open the session database")?;
    schema::ensure_schema(&pool).await?;

    let report = session_maintenance_service::purge_idle_sessions(
        &pool,
        config.session_idle_minutes,
        Utc::now(),
    )
    .await
    .context("session purge failed")?;

    println!(
        "session purge: before={}, after={}, entries_removed={}",
        report.sessions_before, report.sessions_after, report.entries_removed
    );
    Ok(())
}
