use serde::Deserialize;

use crate::error::StorageError;
use crate::models::{Evidence, Guru, Report};
use crate::services::guru_search::{self, ALL_NICHES_LABEL, NICHES};
use crate::services::presentation::{self, RatingBand};
use crate::services::storage_service::StorageService;

#[derive(Debug, Deserialize, Default)]
pub struct DirectoryQuery {
    pub q: Option<String>,
    pub niche: Option<String>,
}

#[derive(Clone)]
pub struct GuruCardView {
    pub id: String,
    pub name: String,
    pub initial: String,
    pub niche: String,
    pub stars: String,
    pub rating_label: String,
    pub rating_class: &'static str,
    pub bio: String,
    pub evidence_count: usize,
    pub report_count: usize,
}

#[derive(Clone)]
pub struct NicheOptionView {
    pub value: String,
    pub selected: bool,
}

pub struct DirectoryStats {
    pub guru_count: usize,
    pub report_count: usize,
    pub evidence_count: usize,
}

pub struct DirectoryPageData {
    pub cards: Vec<GuruCardView>,
    pub search_query: String,
    pub niche_options: Vec<NicheOptionView>,
    pub heading: &'static str,
    pub total_count: usize,
    pub result_count: usize,
    pub use_mock_data: bool,
    pub empty_message: Option<&'static str>,
    pub offer_mock_data: bool,
    pub stats: Option<DirectoryStats>,
}

pub async fn build_directory_page(
    storage: &StorageService,
    query: &DirectoryQuery,
) -> Result<DirectoryPageData, StorageError> {
    let settings = storage.get_settings().await?;
    let all = storage.get_gurus().await?;

    let search_query = query.q.as_deref().unwrap_or("").to_string();
    let niche = guru_search::parse_niche_filter(query.niche.as_deref());
    let results = storage.search_gurus(&search_query, niche.as_deref()).await?;

    let total_count = all.len();
    let result_count = results.len();
    let heading = if result_count == total_count {
        "All Gurus"
    } else {
        "Search Results"
    };

    let empty_message = match (result_count, total_count) {
        (0, 0) => Some(
            "No gurus found. Enable mock data to see sample gurus or add some real data.",
        ),
        (0, _) => Some("No gurus match your search criteria."),
        _ => None,
    };

    let stats = (total_count > 0).then(|| DirectoryStats {
        guru_count: total_count,
        report_count: all.iter().map(|g| g.reports.len()).sum(),
        evidence_count: all.iter().map(|g| g.evidence.len()).sum(),
    });

    Ok(DirectoryPageData {
        cards: results.iter().map(build_card).collect(),
        search_query,
        niche_options: niche_options(niche.as_deref()),
        heading,
        total_count,
        result_count,
        use_mock_data: settings.use_mock_data,
        empty_message,
        offer_mock_data: total_count == 0 && !settings.use_mock_data,
        stats,
    })
}

fn niche_options(selected: Option<&str>) -> Vec<NicheOptionView> {
    std::iter::once(ALL_NICHES_LABEL)
        .chain(NICHES)
        .map(|value| NicheOptionView {
            value: value.to_string(),
            selected: match selected {
                Some(s) => s == value,
                None => value == ALL_NICHES_LABEL,
            },
        })
        .collect()
}

fn build_card(guru: &Guru) -> GuruCardView {
    GuruCardView {
        id: guru.id.clone(),
        name: guru.name.clone(),
        initial: presentation::initial(&guru.name),
        niche: guru.niche.clone(),
        stars: presentation::rating_stars(guru.rating),
        rating_label: presentation::rating_label(guru.rating),
        rating_class: RatingBand::for_rating(guru.rating).css_class(),
        bio: guru.bio.clone(),
        evidence_count: guru.evidence.len(),
        report_count: guru.reports.len(),
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct GuruDetailQuery {
    pub tab: Option<String>, // evidence|reports
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Evidence,
    Reports,
}

impl DetailTab {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailTab::Evidence => "evidence",
            DetailTab::Reports => "reports",
        }
    }
}

fn parse_tab(input: Option<&str>) -> DetailTab {
    match input.unwrap_or("evidence") {
        "reports" => DetailTab::Reports,
        _ => DetailTab::Evidence,
    }
}

pub struct EvidenceView {
    pub title: String,
    pub description: String,
    pub kind_label: &'static str,
    pub badge_class: &'static str,
    pub date_label: String,
    pub url: Option<String>,
}

pub struct ReportView {
    pub title: String,
    pub description: String,
    pub category_label: &'static str,
    pub badge_class: &'static str,
    pub date_label: String,
    pub evidence: Option<String>,
    pub reporter_label: String,
}

pub struct GuruDetailView {
    pub id: String,
    pub name: String,
    pub initial: String,
    pub niche: String,
    pub stars: String,
    pub rating_label: String,
    pub rating_class: &'static str,
    pub bio: String,
    pub created_label: String,
    pub updated_label: String,
    pub tab: &'static str,
    pub evidence: Vec<EvidenceView>,
    pub reports: Vec<ReportView>,
}

pub async fn load_guru_detail_view(
    storage: &StorageService,
    guru_id: &str,
    query: &GuruDetailQuery,
) -> Result<Option<GuruDetailView>, StorageError> {
    let Some(guru) = storage.get_guru_by_id(guru_id).await? else {
        return Ok(None);
    };
    Ok(Some(build_detail(guru, parse_tab(query.tab.as_deref()))))
}

fn build_detail(guru: Guru, tab: DetailTab) -> GuruDetailView {
    GuruDetailView {
        initial: presentation::initial(&guru.name),
        stars: presentation::rating_stars(guru.rating),
        rating_label: presentation::rating_label(guru.rating),
        rating_class: RatingBand::for_rating(guru.rating).css_class(),
        created_label: presentation::date_label(guru.created_at),
        updated_label: presentation::date_label(guru.updated_at),
        tab: tab.as_str(),
        evidence: guru.evidence.iter().map(evidence_view).collect(),
        reports: guru.reports.iter().map(report_view).collect(),
        id: guru.id,
        name: guru.name,
        niche: guru.niche,
        bio: guru.bio,
    }
}

fn evidence_view(ev: &Evidence) -> EvidenceView {
    EvidenceView {
        title: ev.title.clone(),
        description: ev.description.clone(),
        kind_label: presentation::evidence_label(ev.kind),
        badge_class: presentation::evidence_badge_class(ev.kind),
        date_label: presentation::date_label(ev.created_at),
        url: ev.url.clone(),
    }
}

fn report_view(report: &Report) -> ReportView {
    ReportView {
        title: report.title.clone(),
        description: report.description.clone(),
        category_label: presentation::report_category_label(report.category),
        badge_class: presentation::report_badge_class(report.category),
        date_label: presentation::date_label(report.created_at),
        evidence: report.evidence.clone(),
        reporter_label: report
            .reporter_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Anonymous".to_string()),
    }
}
