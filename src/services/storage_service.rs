use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::database::session_store_repo::{self, SessionEntryWrite};
use crate::error::StorageError;
use crate::models::{AppSettings, Guru, GuruRecord, Report};
use crate::services::{guru_search, mock_data};

pub const GURUS_KEY: &str = "hustler-hunter-gurus";
pub const REPORTS_KEY: &str = "hustler-hunter-reports";
pub const SETTINGS_KEY: &str = "hustler-hunter-settings";
// Reports filed against the seed dataset while mock mode is on.
pub const MOCK_REPORTS_KEY: &str = "hustler-hunter-mock-reports";

const ALL_KEYS: [&str; 4] = [GURUS_KEY, REPORTS_KEY, SETTINGS_KEY, MOCK_REPORTS_KEY];

const MAX_RATING: f64 = 5.0;

/// Handle on one browser session's documents.
///
/// Cheap to clone; build one per request from the shared pool and the
/// session id carried by the request. Every operation checks out its own
/// connection, so no method holds one while calling another, and marks the
/// session as seen.
#[derive(Clone)]
pub struct StorageService {
    pool: SqlitePool,
    session_id: String,
}

impl StorageService {
    pub fn new(pool: SqlitePool, session_id: impl Into<String>) -> Self {
        Self {
            pool,
            session_id: session_id.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns the stored settings, persisting the defaults on first read.
    pub async fn get_settings(&self) -> Result<AppSettings, StorageError> {
        let mut conn = self.connection().await?;
        self.settings_in(&mut conn).await
    }

    pub async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        self.write_document(&mut conn, SETTINGS_KEY, settings).await?;
        debug!(
            session_id = %self.session_id,
            use_mock_data = settings.use_mock_data,
            "settings saved"
        );
        Ok(())
    }

    /// Gurus of the active data source, each with its reports attached.
    pub async fn get_gurus(&self) -> Result<Vec<Guru>, StorageError> {
        let mut conn = self.connection().await?;
        let settings = self.settings_in(&mut conn).await?;
        let records = self.guru_records_in(&mut conn, settings).await?;
        let reports = self.reports_in(&mut conn, settings).await?;
        Ok(records
            .into_iter()
            .map(|record| Guru::assemble(record, &reports))
            .collect())
    }

    /// Replaces the persisted guru document. The seed dataset is never
    /// written, so this applies to the persisted source regardless of mode.
    pub async fn save_gurus(&self, gurus: &[GuruRecord]) -> Result<(), StorageError> {
        validate_gurus(gurus)?;
        let mut conn = self.connection().await?;
        self.write_document(&mut conn, GURUS_KEY, gurus).await?;
        debug!(session_id = %self.session_id, count = gurus.len(), "gurus saved");
        Ok(())
    }

    pub async fn get_guru_by_id(&self, guru_id: &str) -> Result<Option<Guru>, StorageError> {
        Ok(self
            .get_gurus()
            .await?
            .into_iter()
            .find(|g| g.id == guru_id))
    }

    pub async fn get_reports(&self) -> Result<Vec<Report>, StorageError> {
        let mut conn = self.connection().await?;
        let settings = self.settings_in(&mut conn).await?;
        self.reports_in(&mut conn, settings).await
    }

    /// Replaces the report document of the active data source. In mock mode
    /// the seed reports are dropped before writing since they are always
    /// served from the seed.
    pub async fn save_reports(&self, reports: &[Report]) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let settings = self.settings_in(&mut conn).await?;
        validate_reports(user_reports_key(settings), reports)?;
        if settings.use_mock_data {
            let user_reports: Vec<&Report> = reports
                .iter()
                .filter(|r| !mock_data::is_seed_report(&r.id))
                .collect();
            self.write_document(&mut conn, MOCK_REPORTS_KEY, &user_reports)
                .await?;
        } else {
            self.write_document(&mut conn, REPORTS_KEY, reports).await?;
        }
        debug!(session_id = %self.session_id, count = reports.len(), "reports saved");
        Ok(())
    }

    /// Files a report against a guru of the active data source.
    ///
    /// The report document is the only thing written; the guru's report list
    /// and update timestamp follow from it on the next read. The check for
    /// the owning guru, the duplicate check and the append share one
    /// transaction.
    pub async fn add_report(&self, report: Report) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        self.touch(&mut tx).await?;
        let settings = self.settings_in(&mut tx).await?;
        let key = user_reports_key(settings);
        validate_reports(key, std::slice::from_ref(&report))?;

        let records = self.guru_records_in(&mut tx, settings).await?;
        if !records.iter().any(|g| g.id == report.guru_id) {
            return Err(StorageError::UnknownGuru(report.guru_id));
        }

        let mut stored: Vec<Report> = self.stored_reports(&mut tx, key).await?;
        let clashes_with_seed = settings.use_mock_data && mock_data::is_seed_report(&report.id);
        if clashes_with_seed || stored.iter().any(|r| r.id == report.id) {
            return Err(StorageError::DuplicateReport(report.id));
        }

        let report_id = report.id.clone();
        let guru_id = report.guru_id.clone();
        stored.push(report);
        self.write_document(&mut tx, key, &stored).await?;
        tx.commit().await?;

        info!(
            session_id = %self.session_id,
            report_id = %report_id,
            guru_id = %guru_id,
            mock = settings.use_mock_data,
            "report added"
        );
        Ok(())
    }

    pub async fn search_gurus(
        &self,
        query: &str,
        niche: Option<&str>,
    ) -> Result<Vec<Guru>, StorageError> {
        let gurus = self.get_gurus().await?;
        Ok(guru_search::filter_gurus(gurus, query, niche))
    }

    /// Drops every document of this session.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        let removed =
            session_store_repo::delete_entries(&mut conn, &self.session_id, &ALL_KEYS).await?;
        info!(session_id = %self.session_id, removed, "session storage cleared");
        Ok(())
    }

    async fn connection(&self) -> Result<PoolConnection<Sqlite>, StorageError> {
        let mut conn = self.pool.acquire().await?;
        self.touch(&mut conn).await?;
        Ok(conn)
    }

    async fn touch(&self, conn: &mut SqliteConnection) -> Result<(), StorageError> {
        let now = session_store_repo::format_timestamp(Utc::now());
        session_store_repo::touch_session(conn, &self.session_id, &now).await?;
        Ok(())
    }

    async fn settings_in(&self, conn: &mut SqliteConnection) -> Result<AppSettings, StorageError> {
        if let Some(settings) = self.read_document(conn, SETTINGS_KEY).await? {
            return Ok(settings);
        }
        let defaults = AppSettings::default();
        self.write_document(conn, SETTINGS_KEY, &defaults).await?;
        debug!(session_id = %self.session_id, "default settings materialized");
        Ok(defaults)
    }

    async fn guru_records_in(
        &self,
        conn: &mut SqliteConnection,
        settings: AppSettings,
    ) -> Result<Vec<GuruRecord>, StorageError> {
        if settings.use_mock_data {
            return Ok(mock_data::gurus());
        }
        let records: Vec<GuruRecord> = self
            .read_document(conn, GURUS_KEY)
            .await?
            .unwrap_or_default();
        validate_gurus(&records)?;
        Ok(records)
    }

    async fn reports_in(
        &self,
        conn: &mut SqliteConnection,
        settings: AppSettings,
    ) -> Result<Vec<Report>, StorageError> {
        let user_reports = self
            .stored_reports(conn, user_reports_key(settings))
            .await?;
        if !settings.use_mock_data {
            return Ok(user_reports);
        }
        let mut reports = mock_data::reports();
        reports.extend(user_reports);
        Ok(reports)
    }

    async fn stored_reports(
        &self,
        conn: &mut SqliteConnection,
        key: &'static str,
    ) -> Result<Vec<Report>, StorageError> {
        let reports: Vec<Report> = self.read_document(conn, key).await?.unwrap_or_default();
        validate_reports(key, &reports)?;
        Ok(reports)
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        conn: &mut SqliteConnection,
        key: &'static str,
    ) -> Result<Option<T>, StorageError> {
        let Some(row) = session_store_repo::load_entry(conn, &self.session_id, key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&row.entry_value)
            .map(Some)
            .map_err(|source| StorageError::Malformed { key, source })
    }

    async fn write_document<T: Serialize + ?Sized>(
        &self,
        conn: &mut SqliteConnection,
        key: &'static str,
        value: &T,
    ) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;
        let updated_at = session_store_repo::format_timestamp(Utc::now());
        session_store_repo::upsert_entry(
            conn,
            SessionEntryWrite {
                session_id: &self.session_id,
                key,
                value: &json,
                updated_at: &updated_at,
            },
        )
        .await?;
        Ok(())
    }
}

fn user_reports_key(settings: AppSettings) -> &'static str {
    if settings.use_mock_data {
        MOCK_REPORTS_KEY
    } else {
        REPORTS_KEY
    }
}

fn invalid(key: &'static str, reason: String) -> StorageError {
    StorageError::Invalid { key, reason }
}

fn validate_gurus(gurus: &[GuruRecord]) -> Result<(), StorageError> {
    for guru in gurus {
        if guru.id.trim().is_empty() {
            return Err(invalid(GURUS_KEY, "guru with blank id".to_string()));
        }
        if guru.name.trim().is_empty() {
            return Err(invalid(GURUS_KEY, format!("guru {} has no name", guru.id)));
        }
        if !guru.rating.is_finite() || !(0.0..=MAX_RATING).contains(&guru.rating) {
            return Err(invalid(
                GURUS_KEY,
                format!("guru {} has rating {} outside 0-5", guru.id, guru.rating),
            ));
        }
        if let Some(ev) = guru.evidence.iter().find(|ev| ev.id.trim().is_empty()) {
            return Err(invalid(
                GURUS_KEY,
                format!("guru {} has evidence '{}' with blank id", guru.id, ev.title),
            ));
        }
    }
    Ok(())
}

fn validate_reports(key: &'static str, reports: &[Report]) -> Result<(), StorageError> {
    for report in reports {
        if report.id.trim().is_empty() {
            return Err(invalid(key, "report with blank id".to_string()));
        }
        if report.guru_id.trim().is_empty() {
            return Err(invalid(
                REPORTS_KEY,
                format!("report {} has no guru", report.id),
            ));
        }
        if report.title.trim().is_empty() {
            return Err(invalid(
                REPORTS_KEY,
                format!("report {} has no title", report.id),
            ));
        }
    }
    Ok(())
}
