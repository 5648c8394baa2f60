//! Core engine for the field data-collection platform.
//!
//! Field agents submit structured damage/needs reports that land in a
//! spreadsheet-backed log; this crate owns everything between the sheet
//! endpoints and the surfaces that render them:
//! - `csv` / `records`: CSV scanning and the positional row mapping
//! - `fetch` / `submit`: the two read endpoints and the write endpoint
//! - `hierarchy` / `draft`: dependent selects and the cascading form state
//! - `rank` / `geo`: dashboard relevance ranking and map-point derivation
//! - `state` / `config`: the per-session row sets and the endpoint knobs
//!
//! The JSON API server over this engine is behind the `api` feature.

pub mod config;
pub mod csv;
pub mod draft;
pub mod fetch;
pub mod geo;
pub mod hierarchy;
pub mod rank;
pub mod records;
pub mod state;
pub mod submit;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::Config;
pub use draft::{DraftField, ReportDraft, ValidationError};
pub use fetch::{CsvFetcher, FetchError};
pub use hierarchy::{AdminSelection, HierarchyIndex, LevelOptions};
pub use rank::{rank_reports, SearchFilters};
pub use records::{map_admin_rows, map_submission_rows, AdminRow, SubmissionRow, UrgencyLevel};
pub use state::SessionState;
pub use submit::{ReportSubmitter, SubmitAck, SubmitError};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
