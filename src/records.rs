//! Typed records mapped from the raw CSV feeds.
//!
//! Both feeds are position-dependent: the mapper reads cells by column index
//! and ignores header names entirely. Reordering columns upstream corrupts
//! every field downstream, so the index constants here are the single place
//! the column contract lives.

use serde::{Deserialize, Serialize};

/// Column contract of the administrative hierarchy sheet (indices 0..3).
pub const ADMIN_COLUMNS: usize = 4;

/// Column contract of the submission log sheet (indices 0..9).
pub const SUBMISSION_COLUMNS: usize = 10;

/// One authoritative geographic unit mapping from the hierarchy sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRow {
    pub region: String,
    pub province: String,
    pub commune: String,
    pub douar: String,
}

/// One field report already persisted in the log sheet.
///
/// `urgency` is free text on read-back (the sheet stores the display label,
/// which may carry numeral glyphs), not the closed [`UrgencyLevel`] set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRow {
    pub region: String,
    pub province: String,
    pub commune: String,
    pub douar: String,
    pub urgency: String,
    pub damage: String,
    pub needs: String,
    pub phone: String,
    /// "lat,lng" in one delimited cell; may be malformed or absent.
    pub location_xy: String,
    pub map_link: String,
}

/// A data row that was shorter than its column contract.
///
/// Short rows are still mapped (missing cells default to empty strings, for
/// compatibility with the live feed) but the gap is reported instead of
/// disappearing silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowWarning {
    /// 1-based data row number, header excluded.
    pub row: usize,
    pub expected: usize,
    pub actual: usize,
}

/// Mapped records plus the warnings accumulated while mapping them.
#[derive(Debug)]
pub struct MappedRows<T> {
    pub rows: Vec<T>,
    pub warnings: Vec<RowWarning>,
}

fn cell(raw: &[String], index: usize) -> String {
    raw.get(index).map(|c| c.trim().to_string()).unwrap_or_default()
}

/// Map parsed CSV rows to [`AdminRow`]s. The first row is the header and is
/// discarded; records with an empty region are discarded as malformed.
pub fn map_admin_rows(raw: &[Vec<String>]) -> MappedRows<AdminRow> {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (i, line) in raw.iter().skip(1).enumerate() {
        if line.len() < ADMIN_COLUMNS {
            warnings.push(RowWarning {
                row: i + 1,
                expected: ADMIN_COLUMNS,
                actual: line.len(),
            });
        }
        let record = AdminRow {
            region: cell(line, 0),
            province: cell(line, 1),
            commune: cell(line, 2),
            douar: cell(line, 3),
        };
        if record.region.is_empty() {
            continue;
        }
        rows.push(record);
    }

    MappedRows { rows, warnings }
}

/// Map parsed CSV rows to [`SubmissionRow`]s under the fixed 10-column
/// contract. Same defaulting and discard rules as [`map_admin_rows`].
pub fn map_submission_rows(raw: &[Vec<String>]) -> MappedRows<SubmissionRow> {
    let mut rows = Vec::new();
    let mut warnings = Vec::new();

    for (i, line) in raw.iter().skip(1).enumerate() {
        if line.len() < SUBMISSION_COLUMNS {
            warnings.push(RowWarning {
                row: i + 1,
                expected: SUBMISSION_COLUMNS,
                actual: line.len(),
            });
        }
        let record = SubmissionRow {
            region: cell(line, 0),
            province: cell(line, 1),
            commune: cell(line, 2),
            douar: cell(line, 3),
            urgency: cell(line, 4),
            damage: cell(line, 5),
            needs: cell(line, 6),
            phone: cell(line, 7),
            location_xy: cell(line, 8),
            map_link: cell(line, 9),
        };
        if record.region.is_empty() {
            continue;
        }
        rows.push(record);
    }

    MappedRows { rows, warnings }
}

/// Closed severity classification attached to a new report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl UrgencyLevel {
    pub const ALL: [UrgencyLevel; 4] = [
        UrgencyLevel::Low,
        UrgencyLevel::Medium,
        UrgencyLevel::High,
        UrgencyLevel::Critical,
    ];

    /// Display label, as stored in the log sheet.
    pub fn label(self) -> &'static str {
        match self {
            UrgencyLevel::Low => "1- منخفض",
            UrgencyLevel::Medium => "2- متوسط",
            UrgencyLevel::High => "3- مرتفع",
            UrgencyLevel::Critical => "4- حرج جداً",
        }
    }
}
