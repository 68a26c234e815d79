use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Scam,
    Misleading,
    FalseClaims,
    Other,
}

impl ReportCategory {
    pub const ALL: [ReportCategory; 4] = [
        ReportCategory::Scam,
        ReportCategory::Misleading,
        ReportCategory::FalseClaims,
        ReportCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportCategory::Scam => "scam",
            ReportCategory::Misleading => "misleading",
            ReportCategory::FalseClaims => "false_claims",
            ReportCategory::Other => "other",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == input.trim())
    }
}

/// A user-submitted complaint about a guru.
///
/// Reports are the single source of truth for the per-guru report list: a
/// [`crate::models::Guru`] only ever carries the reports whose `guru_id`
/// points at it, in the order they were filed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub guru_id: String,
    pub title: String,
    pub description: String,
    pub category: ReportCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_name: Option<String>,
    pub created_at: DateTime<Utc>,
}
