use sqlx::SqlitePool;

const SQL_CREATE_SESSION_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS session_entries (
  session_id TEXT NOT NULL,
  entry_key TEXT NOT NULL,
  entry_value TEXT NOT NULL,
  updated_at TEXT NOT NULL,
  PRIMARY KEY (session_id, entry_key)
)
"#;

const SQL_CREATE_SESSION_ENTRIES_UPDATED_AT_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_session_entries_updated_at
ON session_entries (updated_at)
"#;

// One row per session, bumped on every storage access, reads included.
const SQL_CREATE_SESSION_ACTIVITY: &str = r#"
CREATE TABLE IF NOT EXISTS session_activity (
  session_id TEXT PRIMARY KEY,
  last_seen_at TEXT NOT NULL
)
"#;

pub async fn ensure_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_SESSION_ENTRIES)
        .execute(pool)
        .await?;
    sqlx::query(SQL_CREATE_SESSION_ENTRIES_UPDATED_AT_INDEX)
        .execute(pool)
        .await?;
    sqlx::query(SQL_CREATE_SESSION_ACTIVITY)
        .execute(pool)
        .await?;
    Ok(())
}
