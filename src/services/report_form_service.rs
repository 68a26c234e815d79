use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{Report, ReportCategory};
use crate::services::presentation;
use crate::services::storage_service::StorageService;

#[derive(Debug, Deserialize, Default)]
pub struct ReportFormQuery {
    pub guru_id: Option<String>,
}

/// Raw form fields as posted by the browser.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ReportSubmissionForm {
    pub guru_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub evidence: String,
    pub reporter_name: String,
}

impl ReportSubmissionForm {
    pub fn blank(preselected_guru_id: Option<String>) -> Self {
        Self {
            guru_id: preselected_guru_id.unwrap_or_default(),
            category: ReportCategory::Scam.as_str().to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportFormError {
    #[error("Please fill in all required fields.")]
    MissingRequired,
    #[error("Unknown report category '{0}'.")]
    UnknownCategory(String),
}

#[derive(Debug, Error)]
pub enum SubmitReportError {
    #[error(transparent)]
    Invalid(#[from] ReportFormError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Turns a posted form into a new report. Nothing is written here.
pub fn validate_submission(
    form: &ReportSubmissionForm,
    now: DateTime<Utc>,
) -> Result<Report, ReportFormError> {
    let (Some(guru_id), Some(title), Some(description), Some(category)) = (
        non_blank(&form.guru_id),
        non_blank(&form.title),
        non_blank(&form.description),
        non_blank(&form.category),
    ) else {
        return Err(ReportFormError::MissingRequired);
    };

    let category =
        ReportCategory::parse(&category).ok_or(ReportFormError::UnknownCategory(category))?;

    Ok(Report {
        id: Uuid::new_v4().to_string(),
        guru_id,
        title,
        description,
        category,
        evidence: non_blank(&form.evidence),
        reporter_name: non_blank(&form.reporter_name),
        created_at: now,
    })
}

pub async fn submit_report(
    storage: &StorageService,
    form: &ReportSubmissionForm,
) -> Result<Report, SubmitReportError> {
    let report = validate_submission(form, Utc::now())?;
    storage.add_report(report.clone()).await?;
    Ok(report)
}

#[derive(Clone)]
pub struct GuruOptionView {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct CategoryOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub struct ReportFormPageData {
    pub guru_options: Vec<GuruOptionView>,
    pub category_options: Vec<CategoryOptionView>,
    pub values: ReportSubmissionForm,
    pub error: Option<String>,
}

pub async fn build_report_form_page(
    storage: &StorageService,
    values: ReportSubmissionForm,
    error: Option<String>,
) -> Result<ReportFormPageData, StorageError> {
    let gurus = storage.get_gurus().await?;

    let guru_options = gurus
        .iter()
        .map(|g| GuruOptionView {
            id: g.id.clone(),
            label: format!("{} ({})", g.name, g.niche),
            selected: g.id == values.guru_id,
        })
        .collect();

    let category_options = ReportCategory::ALL
        .into_iter()
        .map(|c| CategoryOptionView {
            value: c.as_str(),
            label: presentation::report_category_label(c),
            selected: c.as_str() == values.category,
        })
        .collect();

    Ok(ReportFormPageData {
        guru_options,
        category_options,
        values,
        error,
    })
}

pub struct ReportSuccessView {
    pub guru_id: String,
    pub redirect_delay_secs: u64,
}
