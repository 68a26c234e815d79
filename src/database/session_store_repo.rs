use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::SessionEntryRow;

const SQL_LOAD_ENTRY: &str = r#"
SELECT
  entry_key,
  entry_value,
  updated_at
FROM session_entries
WHERE session_id = ?1
  AND entry_key = ?2
LIMIT 1
"#;

pub async fn load_entry(
    conn: &mut SqliteConnection,
    session_id: &str,
    key: &str,
) -> sqlx::Result<Option<SessionEntryRow>> {
    sqlx::query_as::<_, SessionEntryRow>(SQL_LOAD_ENTRY)
        .bind(session_id)
        .bind(key)
        .fetch_optional(conn)
        .await
}

/// `updated_at` values are compared as text, so every writer must use this
/// exact layout.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct SessionEntryWrite<'a> {
    pub session_id: &'a str,
    pub key: &'a str,
    pub value: &'a str,
    pub updated_at: &'a str, // see format_timestamp
}

const SQL_UPSERT_ENTRY: &str = r#"
INSERT INTO session_entries (
  session_id,
  entry_key,
  entry_value,
  updated_at
) VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (session_id, entry_key) DO UPDATE SET
  entry_value = excluded.entry_value,
  updated_at = excluded.updated_at
"#;

pub async fn upsert_entry(
    conn: &mut SqliteConnection,
    entry: SessionEntryWrite<'_>,
) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_ENTRY)
        .bind(entry.session_id)
        .bind(entry.key)
        .bind(entry.value)
        .bind(entry.updated_at)
        .execute(conn)
        .await?;
    Ok(())
}

const SQL_DELETE_ENTRY: &str = r#"
DELETE FROM session_entries
WHERE session_id = ?1
  AND entry_key = ?2
"#;

pub async fn delete_entries(
    conn: &mut SqliteConnection,
    session_id: &str,
    keys: &[&str],
) -> sqlx::Result<u64> {
    let mut removed = 0;
    for key in keys {
        let res = sqlx::query(SQL_DELETE_ENTRY)
            .bind(session_id)
            .bind(*key)
            .execute(&mut *conn)
            .await?;
        removed += res.rows_affected();
    }
    Ok(removed)
}

const SQL_TOUCH_SESSION: &str = r#"
INSERT INTO session_activity (session_id, last_seen_at)
VALUES (?1, ?2)
ON CONFLICT (session_id) DO UPDATE SET
  last_seen_at = MAX(last_seen_at, excluded.last_seen_at)
"#;

pub async fn touch_session(
    conn: &mut SqliteConnection,
    session_id: &str,
    last_seen_at: &str, // see format_timestamp
) -> sqlx::Result<()> {
    sqlx::query(SQL_TOUCH_SESSION)
        .bind(session_id)
        .bind(last_seen_at)
        .execute(conn)
        .await?;
    Ok(())
}

// A session is idle when it was neither written nor seen after the cutoff.
const SQL_PURGE_IDLE_SESSIONS: &str = r#"
DELETE FROM session_entries
WHERE session_id IN (
  SELECT e.session_id
  FROM session_entries e
  LEFT JOIN session_activity a ON a.session_id = e.session_id
  GROUP BY e.session_id
  HAVING MAX(MAX(e.updated_at), COALESCE(MAX(a.last_seen_at), '')) < ?1
)
"#;

const SQL_PURGE_IDLE_ACTIVITY: &str = r#"
DELETE FROM session_activity
WHERE last_seen_at < ?1
  AND session_id NOT IN (SELECT session_id FROM session_entries)
"#;

/// Returns the number of entries removed.
pub async fn purge_idle_sessions(pool: &SqlitePool, cutoff: &str) -> sqlx::Result<u64> {
    let mut tx = pool.begin().await?;
    let res = sqlx::query(SQL_PURGE_IDLE_SESSIONS)
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;
    sqlx::query(SQL_PURGE_IDLE_ACTIVITY)
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(res.rows_affected())
}

const SQL_COUNT_SESSIONS: &str = r#"
SELECT COUNT(DISTINCT session_id)
FROM session_entries
"#;

pub async fn count_sessions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>(SQL_COUNT_SESSIONS)
        .fetch_one(pool)
        .await
}
