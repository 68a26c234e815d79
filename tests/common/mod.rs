#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use hustler_hunter::database::schema;
use hustler_hunter::models::{GuruRecord, Report, ReportCategory};
use hustler_hunter::services::storage_service::StorageService;

/// One connection, so every checkout sees the same in-memory database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");
    schema::ensure_schema(&pool).await.expect("create schema");
    pool
}

pub fn storage(pool: &SqlitePool, session_id: &str) -> StorageService {
    StorageService::new(pool.clone(), session_id)
}

pub fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

pub fn guru(id: &str, name: &str, niche: &str, bio: &str) -> GuruRecord {
    GuruRecord {
        id: id.to_string(),
        name: name.to_string(),
        niche: niche.to_string(),
        rating: 2.0,
        bio: bio.to_string(),
        image_url: None,
        evidence: vec![],
        created_at: day(2024, 1, 1),
        updated_at: day(2024, 1, 2),
    }
}

pub fn report(id: &str, guru_id: &str) -> Report {
    Report {
        id: id.to_string(),
        guru_id: guru_id.to_string(),
        title: format!("Report {}", id),
        description: "Sold a course that was a reading list".to_string(),
        category: ReportCategory::Scam,
        evidence: None,
        reporter_name: None,
        created_at: day(2024, 6, 1),
    }
}
