//! Explicit session state: the fetched row sets and the in-progress draft.
//!
//! One client session owns one of these. Row sets are replaced wholesale on
//! every load — there is no incremental merge — so when two refreshes race,
//! the later completion simply overwrites the earlier one (last write wins,
//! accepted). All derivations over the rows live in `hierarchy`, `rank` and
//! `geo` as pure functions; nothing here caches derived results.

use crate::draft::ReportDraft;
use crate::records::{AdminRow, MappedRows, SubmissionRow};

#[derive(Debug, Default)]
pub struct SessionState {
    pub admin_rows: Vec<AdminRow>,
    pub reports: Vec<SubmissionRow>,
    pub draft: ReportDraft,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the administrative row set with a freshly mapped fetch.
    pub fn replace_admin_rows(&mut self, mapped: MappedRows<AdminRow>) {
        log_warnings("admin", &mapped);
        self.admin_rows = mapped.rows;
    }

    /// Replace the submission log with a freshly mapped fetch.
    pub fn replace_reports(&mut self, mapped: MappedRows<SubmissionRow>) {
        log_warnings("log", &mapped);
        self.reports = mapped.rows;
    }
}

fn log_warnings<T>(feed: &str, mapped: &MappedRows<T>) {
    for warning in &mapped.warnings {
        tracing::warn!(
            "{} feed row {} has {} of {} columns; missing cells defaulted",
            feed,
            warning.row,
            warning.actual,
            warning.expected
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv;
    use crate::records::map_admin_rows;

    #[test]
    fn test_replacement_is_wholesale_not_additive() {
        let text = "region,province,commune,douar\nR1,P1,C1,D1\nR1,P1,C1,D2\n";
        let mut state = SessionState::new();

        state.replace_admin_rows(map_admin_rows(&parse_csv(text)));
        assert_eq!(state.admin_rows.len(), 2);

        // Loading the same feed again must not accumulate.
        state.replace_admin_rows(map_admin_rows(&parse_csv(text)));
        assert_eq!(state.admin_rows.len(), 2);

        // A shrunken feed replaces the old set entirely.
        let smaller = "region,province,commune,douar\nR1,P1,C1,D1\n";
        state.replace_admin_rows(map_admin_rows(&parse_csv(smaller)));
        assert_eq!(state.admin_rows.len(), 1);
    }

    #[test]
    fn test_fresh_session_is_usable_with_zero_rows() {
        let state = SessionState::new();
        assert!(state.admin_rows.is_empty());
        assert!(state.reports.is_empty());
        assert_eq!(state.draft.region, "");
    }
}
