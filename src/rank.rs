//! Relevance ranking over the submission log.
//!
//! The dashboard search brings matches to the top instead of hiding the rest:
//! every row stays visible, matching rows float up by weighted score. The
//! settlement name dominates, the contact number comes second, the wider
//! administrative levels count less, and the narrative fields least.

use serde::Deserialize;

use crate::records::SubmissionRow;

/// Per-column substring queries, all optional. Matching is case-sensitive
/// substring containment against the stored cell text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub region: String,
    pub province: String,
    pub commune: String,
    pub douar: String,
    pub urgency: String,
    pub damage: String,
    pub needs: String,
    pub phone: String,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.region.is_empty()
            && self.province.is_empty()
            && self.commune.is_empty()
            && self.douar.is_empty()
            && self.urgency.is_empty()
            && self.damage.is_empty()
            && self.needs.is_empty()
            && self.phone.is_empty()
    }
}

const DOUAR_WEIGHT: u32 = 100;
const PHONE_WEIGHT: u32 = 50;
const AREA_WEIGHT: u32 = 10;
const URGENCY_WEIGHT: u32 = 5;
const NARRATIVE_WEIGHT: u32 = 2;

/// Relevance score of one log row: the sum of the weights of every filter
/// whose non-empty query is contained in that row's field.
pub fn score(row: &SubmissionRow, filters: &SearchFilters) -> u32 {
    let hit = |query: &str, value: &str| !query.is_empty() && value.contains(query);

    let mut score = 0;
    if hit(&filters.region, &row.region) {
        score += AREA_WEIGHT;
    }
    if hit(&filters.province, &row.province) {
        score += AREA_WEIGHT;
    }
    if hit(&filters.commune, &row.commune) {
        score += AREA_WEIGHT;
    }
    if hit(&filters.douar, &row.douar) {
        score += DOUAR_WEIGHT;
    }
    if hit(&filters.urgency, &row.urgency) {
        score += URGENCY_WEIGHT;
    }
    if hit(&filters.damage, &row.damage) {
        score += NARRATIVE_WEIGHT;
    }
    if hit(&filters.needs, &row.needs) {
        score += NARRATIVE_WEIGHT;
    }
    if hit(&filters.phone, &row.phone) {
        score += PHONE_WEIGHT;
    }
    score
}

/// Order the log by descending relevance. The sort is stable: rows with
/// equal scores keep their input order, so re-ranking on every keystroke
/// never shuffles ties.
pub fn rank_reports(rows: &[SubmissionRow], filters: &SearchFilters) -> Vec<SubmissionRow> {
    let mut scored: Vec<(u32, SubmissionRow)> = rows
        .iter()
        .map(|row| (score(row, filters), row.clone()))
        .collect();
    scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
    scored.into_iter().map(|(_, row)| row).collect()
}
