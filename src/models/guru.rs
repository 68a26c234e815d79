use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Evidence, Report};

/// Guru as persisted in the session store. Reports are not embedded; they
/// live in the flat report document and are joined in on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuruRecord {
    pub id: String,
    pub name: String,
    pub niche: String,
    pub rating: f64,
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Guru with its reports attached, as handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guru {
    pub id: String,
    pub name: String,
    pub niche: String,
    pub rating: f64,
    pub bio: String,
    pub image_url: Option<String>,
    pub evidence: Vec<Evidence>,
    pub reports: Vec<Report>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guru {
    /// Joins a stored record with the reports filed against it. The update
    /// timestamp moves forward to the newest report.
    pub fn assemble(record: GuruRecord, all_reports: &[Report]) -> Self {
        let reports: Vec<Report> = all_reports
            .iter()
            .filter(|r| r.guru_id == record.id)
            .cloned()
            .collect();
        let updated_at = reports
            .iter()
            .map(|r| r.created_at)
            .fold(record.updated_at, |acc, ts| acc.max(ts));

        Guru {
            id: record.id,
            name: record.name,
            niche: record.niche,
            rating: record.rating,
            bio: record.bio,
            image_url: record.image_url,
            evidence: record.evidence,
            reports,
            created_at: record.created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportCategory;
    use chrono::TimeZone;

    fn record(id: &str) -> GuruRecord {
        GuruRecord {
            id: id.to_string(),
            name: "Test Guru".to_string(),
            niche: "Other".to_string(),
            rating: 2.0,
            bio: "bio".to_string(),
            image_url: None,
            evidence: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        }
    }

    fn report(id: &str, guru_id: &str, month: u32) -> Report {
        Report {
            id: id.to_string(),
            guru_id: guru_id.to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            category: ReportCategory::Other,
            evidence: None,
            reporter_name: None,
            created_at: Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn assemble_keeps_only_own_reports_in_order() {
        let reports = vec![
            report("a", "g1", 1),
            report("b", "g2", 1),
            report("c", "g1", 1),
        ];
        let guru = Guru::assemble(record("g1"), &reports);
        let ids: Vec<&str> = guru.reports.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn assemble_moves_updated_at_to_newest_report() {
        let guru = Guru::assemble(record("g1"), &[report("a", "g1", 5)]);
        assert_eq!(
            guru.updated_at,
            Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()
        );

        let guru = Guru::assemble(record("g1"), &[report("a", "g1", 1)]);
        assert_eq!(
            guru.updated_at,
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn stored_record_ignores_legacy_embedded_reports() {
        let raw = r#"{
            "id": "g1", "name": "n", "niche": "Other", "rating": 1.5, "bio": "b",
            "evidence": [], "reports": [{"id": "x"}],
            "createdAt": "2024-01-01T00:00:00.000Z", "updatedAt": "2024-01-02T00:00:00.000Z"
        }"#;
        let parsed: GuruRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, "g1");
        assert_eq!(parsed.rating, 1.5);
    }
}
