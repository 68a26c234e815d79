//! Fixed demo dataset served while mock mode is on.

use chrono::{DateTime, TimeZone, Utc};

use crate::models::{Evidence, EvidenceKind, GuruRecord, Report, ReportCategory};

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn evidence(
    id: &str,
    title: &str,
    description: &str,
    kind: EvidenceKind,
    url: Option<&str>,
    created_at: DateTime<Utc>,
) -> Evidence {
    Evidence {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        kind,
        url: url.map(str::to_string),
        created_at,
    }
}

fn seed_evidence() -> [Evidence; 5] {
    [
        evidence(
            "ev1",
            "Course Success Story",
            "Student claims to have made $10k in first month",
            EvidenceKind::Success,
            Some("https://example.com/success-story"),
            day(2024, 1, 15),
        ),
        evidence(
            "ev2",
            "Contradictory Advice",
            "Gave completely opposite advice in two different videos",
            EvidenceKind::Questionable,
            None,
            day(2024, 2, 1),
        ),
        evidence(
            "ev3",
            "Failed Prediction",
            "Predicted market crash that never happened",
            EvidenceKind::Failure,
            None,
            day(2024, 3, 10),
        ),
        evidence(
            "ev4",
            "Verified Results",
            "Independently verified trading results",
            EvidenceKind::Success,
            Some("https://example.com/verified-results"),
            day(2024, 1, 20),
        ),
        evidence(
            "ev5",
            "Exaggerated Claims",
            "Claims to turn $1000 into $1M in 30 days",
            EvidenceKind::Questionable,
            None,
            day(2024, 2, 15),
        ),
    ]
}

/// Seed reports, one per seed guru.
pub fn reports() -> Vec<Report> {
    vec![
        Report {
            id: "r1".to_string(),
            guru_id: "guru1".to_string(),
            title: "Course Doesn't Deliver".to_string(),
            description: "Paid $2000 for course but content was basic YouTube material"
                .to_string(),
            category: ReportCategory::Scam,
            evidence: Some("Screenshots of course content vs free YouTube videos".to_string()),
            reporter_name: Some("Anonymous".to_string()),
            created_at: day(2024, 3, 1),
        },
        Report {
            id: "r2".to_string(),
            guru_id: "guru2".to_string(),
            title: "Fake Trading Results".to_string(),
            description:
                "Screenshots appear to be edited and don't match real broker statements"
                    .to_string(),
            category: ReportCategory::FalseClaims,
            evidence: Some("Metadata analysis of screenshots".to_string()),
            reporter_name: Some("TradingExpert2024".to_string()),
            created_at: day(2024, 2, 20),
        },
        Report {
            id: "r3".to_string(),
            guru_id: "guru3".to_string(),
            title: "Misleading Marketing".to_string(),
            description: "Advertises \"guaranteed results\" which is impossible in trading"
                .to_string(),
            category: ReportCategory::Misleading,
            evidence: Some("Screenshots of ads and marketing material".to_string()),
            reporter_name: Some("RegulatedTrader".to_string()),
            created_at: day(2024, 3, 5),
        },
    ]
}

/// Seed gurus. Their reports come from [`reports`] at read time.
pub fn gurus() -> Vec<GuruRecord> {
    let [ev1, ev2, ev3, ev4, ev5] = seed_evidence();
    let placeholder = Some("/api/placeholder/150/150".to_string());

    vec![
        GuruRecord {
            id: "guru1".to_string(),
            name: "Alex Trading Pro".to_string(),
            niche: "Forex Trading".to_string(),
            rating: 2.5,
            bio: "Self-proclaimed forex expert with \"10 years of experience\". Sells expensive courses and trading signals.".to_string(),
            image_url: placeholder.clone(),
            evidence: vec![ev1, ev2],
            created_at: day(2023, 6, 1),
            updated_at: day(2024, 3, 15),
        },
        GuruRecord {
            id: "guru2".to_string(),
            name: "Sarah Crypto Queen".to_string(),
            niche: "Cryptocurrency".to_string(),
            rating: 1.5,
            bio: "Claims to be a \"crypto millionaire\" who can teach you to make millions in crypto. Known for flashy lifestyle posts.".to_string(),
            image_url: placeholder.clone(),
            evidence: vec![ev3, ev5],
            created_at: day(2023, 8, 15),
            updated_at: day(2024, 3, 10),
        },
        GuruRecord {
            id: "guru3".to_string(),
            name: "Michael Stock Genius".to_string(),
            niche: "Stock Trading".to_string(),
            rating: 3.0,
            bio: "Former finance professional turned educator. Has some legitimate experience but makes exaggerated claims about returns.".to_string(),
            image_url: placeholder,
            evidence: vec![ev4],
            created_at: day(2023, 9, 1),
            updated_at: day(2024, 3, 12),
        },
    ]
}

pub fn is_seed_report(report_id: &str) -> bool {
    reports().iter().any(|r| r.id == report_id)
}
