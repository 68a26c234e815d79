use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::Context;
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hustler_hunter::config::AppConfig;
use hustler_hunter::database::schema;
use hustler_hunter::web::{self, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("hustler_hunter=info".parse()?),
        )
        .init();

    let config = AppConfig::from_env();
    info!(
        build = env!("HUSTLER_HUNTER_BUILD_ID"),
        database = %config.database_url,
        "starting hustler-hunter"
    );

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid DATABASE_URL {}", config.database_url))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .context("could not open the session database")?;
    schema::ensure_schema(&pool)
        .await
        .context("could not create the session schema")?;

    let host = config.host.clone();
    let port = config.port;
    let app = web::router(AppState::new(pool, config));

    // Bind, falling back to the next port when the configured one is taken.
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("cannot parse listen address {}:{}", host, port))?;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback: SocketAddr = format!("{}:{}", host, port.saturating_add(1))
                .parse()
                .with_context(|| format!("cannot parse fallback address for {}", host))?;
            warn!("Could not bind {}: {}. Trying fallback {}", addr, e, fallback);
            tokio::net::TcpListener::bind(fallback)
                .await
                .with_context(|| format!("could not bind fallback {}", fallback))?
        }
    };

    let bound_addr = listener.local_addr()?;
    info!("Server listening on http://{}", bound_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
