use chrono::{DateTime, Utc};

use crate::models::{EvidenceKind, ReportCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingBand {
    Green,
    Yellow,
    Orange,
    Red,
}

impl RatingBand {
    pub fn for_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            RatingBand::Green
        } else if rating >= 3.0 {
            RatingBand::Yellow
        } else if rating >= 2.0 {
            RatingBand::Orange
        } else {
            RatingBand::Red
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            RatingBand::Green => "rating-green",
            RatingBand::Yellow => "rating-yellow",
            RatingBand::Orange => "rating-orange",
            RatingBand::Red => "rating-red",
        }
    }
}

const STAR_COUNT: usize = 5;

/// Five glyphs: one filled star per whole rating point, the rest hollow.
pub fn rating_stars(rating: f64) -> String {
    let full = if rating.is_finite() {
        rating.floor().clamp(0.0, STAR_COUNT as f64) as usize
    } else {
        0
    };
    let mut stars = "★".repeat(full);
    stars.push_str(&"☆".repeat(STAR_COUNT - full));
    stars
}

pub fn rating_label(rating: f64) -> String {
    format!("{:.1}", rating)
}

pub fn evidence_badge_class(kind: EvidenceKind) -> &'static str {
    match kind {
        EvidenceKind::Success => "badge-green",
        EvidenceKind::Failure => "badge-red",
        EvidenceKind::Questionable => "badge-yellow",
    }
}

pub fn evidence_label(kind: EvidenceKind) -> &'static str {
    kind.as_str()
}

pub fn report_badge_class(category: ReportCategory) -> &'static str {
    match category {
        ReportCategory::Scam => "badge-red",
        ReportCategory::Misleading => "badge-orange",
        ReportCategory::FalseClaims => "badge-yellow",
        ReportCategory::Other => "badge-gray",
    }
}

pub fn report_category_label(category: ReportCategory) -> &'static str {
    match category {
        ReportCategory::Scam => "Scam",
        ReportCategory::Misleading => "Misleading Claims",
        ReportCategory::FalseClaims => "False Claims",
        ReportCategory::Other => "Other",
    }
}

pub fn date_label(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d").to_string()
}

pub fn initial(name: &str) -> String {
    name.trim()
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn band_boundaries_fall_into_the_higher_band() {
        assert_eq!(RatingBand::for_rating(5.0), RatingBand::Green);
        assert_eq!(RatingBand::for_rating(4.0), RatingBand::Green);
        assert_eq!(RatingBand::for_rating(3.99), RatingBand::Yellow);
        assert_eq!(RatingBand::for_rating(3.0), RatingBand::Yellow);
        assert_eq!(RatingBand::for_rating(2.0), RatingBand::Orange);
        assert_eq!(RatingBand::for_rating(1.99), RatingBand::Red);
        assert_eq!(RatingBand::for_rating(0.5), RatingBand::Red);
    }

    #[test]
    fn stars_round_down_and_pad_to_five() {
        assert_eq!(rating_stars(2.5), "★★☆☆☆");
        assert_eq!(rating_stars(3.0), "★★★☆☆");
        assert_eq!(rating_stars(0.0), "☆☆☆☆☆");
        assert_eq!(rating_stars(5.0), "★★★★★");
        assert_eq!(rating_stars(9.0), "★★★★★");
        assert_eq!(rating_stars(f64::NAN), "☆☆☆☆☆");
    }

    #[test]
    fn labels() {
        assert_eq!(rating_label(1.5), "1.5");
        assert_eq!(rating_label(3.0), "3.0");
        assert_eq!(report_category_label(ReportCategory::FalseClaims), "False Claims");
        assert_eq!(report_badge_class(ReportCategory::Misleading), "badge-orange");
        assert_eq!(evidence_badge_class(EvidenceKind::Questionable), "badge-yellow");
        assert_eq!(initial("  sarah"), "S");
        assert_eq!(initial(""), "?");
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 13, 0, 0).unwrap();
        assert_eq!(date_label(ts), "2024-03-05");
    }
}
