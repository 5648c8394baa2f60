//! Dependent option derivation for the four-level administrative hierarchy
//! (region → province → commune → douar).
//!
//! Option lists are pure functions of (all rows, current selection): they are
//! recomputed wholesale on every change, deduplicated, and ordered by Arabic
//! collation so the output never depends on row arrival order.
//!
//! Value comparison is exact string match after trimming (case-sensitive).
//! Diacritic variants present in the source data are NOT folded together;
//! that is a known limitation of the feed, not something this engine fixes.

use std::collections::HashSet;

use anyhow::Result;
use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use serde::{Deserialize, Serialize};

use crate::records::AdminRow;

/// The partially-filled administrative selection. Empty string means "not
/// selected at this level".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSelection {
    pub region: String,
    pub province: String,
    pub commune: String,
    pub douar: String,
}

/// Candidate values at each level for the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LevelOptions {
    pub regions: Vec<String>,
    pub provinces: Vec<String>,
    pub communes: Vec<String>,
    pub douars: Vec<String>,
}

/// Derives the dependent option lists from the full administrative row set.
pub struct HierarchyIndex {
    collator: Collator,
    region_allow_list: Option<HashSet<String>>,
}

impl HierarchyIndex {
    /// Build the engine. When `region_allow_list` is set, only rows whose
    /// region literally matches a member are exposed as region options — a
    /// hard filter, not a sort hint.
    pub fn new(region_allow_list: Option<HashSet<String>>) -> Result<Self> {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Tertiary);
        let collator = Collator::try_new(&locale!("ar").into(), options)
            .map_err(|e| anyhow::anyhow!("failed to build Arabic collator: {e}"))?;
        Ok(Self { collator, region_allow_list })
    }

    /// Derive the candidate set at every level for `selection`.
    ///
    /// A level is empty until its parent level is selected; each populated
    /// level is restricted to rows matching every selected ancestor.
    pub fn derive_options(&self, rows: &[AdminRow], selection: &AdminSelection) -> LevelOptions {
        let regions = self.distinct_sorted(
            rows.iter()
                .filter(|r| self.region_allowed(&r.region))
                .map(|r| r.region.clone()),
        );

        let provinces = if selection.region.is_empty() {
            Vec::new()
        } else {
            self.distinct_sorted(
                rows.iter()
                    .filter(|r| r.region == selection.region)
                    .map(|r| r.province.clone()),
            )
        };

        let communes = if selection.region.is_empty() || selection.province.is_empty() {
            Vec::new()
        } else {
            self.distinct_sorted(
                rows.iter()
                    .filter(|r| {
                        r.region == selection.region && r.province == selection.province
                    })
                    .map(|r| r.commune.clone()),
            )
        };

        let douars = if selection.region.is_empty()
            || selection.province.is_empty()
            || selection.commune.is_empty()
        {
            Vec::new()
        } else {
            self.distinct_sorted(
                rows.iter()
                    .filter(|r| {
                        r.region == selection.region
                            && r.province == selection.province
                            && r.commune == selection.commune
                    })
                    .map(|r| r.douar.clone()),
            )
        };

        LevelOptions { regions, provinces, communes, douars }
    }

    fn region_allowed(&self, region: &str) -> bool {
        self.region_allow_list
            .as_ref()
            .map_or(true, |allowed| allowed.contains(region))
    }

    fn distinct_sorted(&self, values: impl Iterator<Item = String>) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out: Vec<String> = Vec::new();
        for value in values {
            if seen.insert(value.clone()) {
                out.push(value);
            }
        }
        out.sort_by(|a, b| self.collator.compare(a, b));
        out
    }
}
