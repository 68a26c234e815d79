use crate::models::Guru;

pub const ALL_NICHES_LABEL: &str = "All Niches";

pub const NICHES: [&str; 8] = [
    "Forex Trading",
    "Cryptocurrency",
    "Stock Trading",
    "Real Estate",
    "Drop Shipping",
    "Digital Marketing",
    "Course Creation",
    "Other",
];

/// Maps the selector value to a niche filter. The catch-all entry and blank
/// input mean "any niche".
pub fn parse_niche_filter(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != ALL_NICHES_LABEL)
        .map(str::to_string)
}

pub fn matches(guru: &Guru, query_lower: &str, niche: Option<&str>) -> bool {
    let matches_query = query_lower.is_empty()
        || guru.name.to_lowercase().contains(query_lower)
        || guru.bio.to_lowercase().contains(query_lower);
    let matches_niche = niche.map_or(true, |n| guru.niche == n);
    matches_query && matches_niche
}

/// Case-insensitive substring match on name or bio, AND exact niche match.
/// Keeps the input order.
pub fn filter_gurus(gurus: Vec<Guru>, query: &str, niche: Option<&str>) -> Vec<Guru> {
    let query_lower = query.to_lowercase();
    gurus
        .into_iter()
        .filter(|g| matches(g, &query_lower, niche))
        .collect()
}
