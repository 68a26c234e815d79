use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::session_store_repo;
use crate::error::PurgeError;

#[derive(Debug, Default)]
pub struct SessionPurgeReport {
    pub sessions_before: i64,
    pub sessions_after: i64,
    pub entries_removed: u64,
}

/// Deletes every session neither written nor read within `idle_minutes`.
/// Browsers drop the session cookie on close, so these rows are unreachable.
pub async fn purge_idle_sessions(
    pool: &SqlitePool,
    idle_minutes: i64,
    now: DateTime<Utc>,
) -> Result<SessionPurgeReport, PurgeError> {
    let cutoff = Duration::try_minutes(idle_minutes)
        .filter(|_| idle_minutes > 0)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or(PurgeError::IdleWindowOutOfRange(idle_minutes))?;
    let cutoff = session_store_repo::format_timestamp(cutoff);

    let sessions_before = session_store_repo::count_sessions(pool).await?;
    let entries_removed = session_store_repo::purge_idle_sessions(pool, &cutoff).await?;
    let sessions_after = session_store_repo::count_sessions(pool).await?;

    info!(
        %cutoff,
        sessions_before, sessions_after, entries_removed, "idle sessions purged"
    );

    Ok(SessionPurgeReport {
        sessions_before,
        sessions_after,
        entries_removed,
    })
}
