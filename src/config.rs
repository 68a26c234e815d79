use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://hustler-hunter.db";

/// Longest accepted `SESSION_IDLE_MINUTES`: one year.
pub const MAX_SESSION_IDLE_MINUTES: i64 = 366 * 24 * 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub assets_dir: String,
    pub report_redirect_delay_secs: u64,
    pub session_idle_minutes: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            assets_dir: "assets".to_string(),
            report_redirect_delay_secs: 2,
            session_idle_minutes: 720,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick
    /// up a local `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source. Missing or unparseable
    /// values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            database_url: non_empty("DATABASE_URL").unwrap_or(defaults.database_url),
            host: non_empty("HOST").unwrap_or(defaults.host),
            port: non_empty("PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.port),
            assets_dir: non_empty("ASSETS_DIR").unwrap_or(defaults.assets_dir),
            report_redirect_delay_secs: non_empty("REPORT_REDIRECT_DELAY_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.report_redirect_delay_secs),
            session_idle_minutes: non_empty("SESSION_IDLE_MINUTES")
                .and_then(|v| v.trim().parse().ok())
                .filter(|m: &i64| (1..=MAX_SESSION_IDLE_MINUTES).contains(m))
                .unwrap_or(defaults.session_idle_minutes),
        }
    }
}
