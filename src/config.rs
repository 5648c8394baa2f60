//! Endpoint and behavior configuration.
//!
//! Defaults point at the production sheet; every knob has an environment
//! override so a staging sheet or a restricted region list can be swapped in
//! without a rebuild:
//! - `ADMIN_CSV_URL`, `LOGS_CSV_URL`: the two CSV export endpoints
//! - `SCRIPT_URL`: the intake script (write endpoint)
//! - `REGION_ALLOW_LIST`: comma-separated canonical region names; unset
//!   means every region in the feed is exposed

use std::collections::HashSet;

/// CSV export of the administrative hierarchy sheet (region → douar).
pub const ADMIN_SHEET_CSV_URL: &str =
    "https://docs.google.com/spreadsheets/d/1EWdDVYYX7P5TcZElS54N6V49sCTJ5gnVkrgvhN1B9M4/export?format=csv";

/// CSV export of the submission log tab.
pub const LOGS_SHEET_CSV_URL: &str =
    "https://docs.google.com/spreadsheets/d/1EWdDVYYX7P5TcZElS54N6V49sCTJ5gnVkrgvhN1B9M4/export?format=csv&gid=1";

/// Apps Script web app that appends a submitted report to the log sheet.
pub const SCRIPT_URL: &str =
    "https://script.google.com/macros/s/AKfycbwzP4-CfvneO1xKcScwpnVTpqpU0cESy9WCiQAtef4g0bwesy3t67wvkbTUaQc2-mfc/exec";

#[derive(Debug, Clone)]
pub struct Config {
    pub admin_csv_url: String,
    pub logs_csv_url: String,
    pub script_url: String,
    /// When set, only these canonical region names are exposed as options.
    pub region_allow_list: Option<HashSet<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_csv_url: ADMIN_SHEET_CSV_URL.to_string(),
            logs_csv_url: LOGS_SHEET_CSV_URL.to_string(),
            script_url: SCRIPT_URL.to_string(),
            region_allow_list: None,
        }
    }
}

impl Config {
    /// Read the environment overrides, falling back to the production
    /// defaults field by field.
    pub fn from_env() -> Self {
        let region_allow_list = std::env::var("REGION_ALLOW_LIST")
            .ok()
            .map(parse_allow_list)
            .filter(|list| !list.is_empty());

        Self {
            admin_csv_url: std::env::var("ADMIN_CSV_URL")
                .unwrap_or_else(|_| ADMIN_SHEET_CSV_URL.to_string()),
            logs_csv_url: std::env::var("LOGS_CSV_URL")
                .unwrap_or_else(|_| LOGS_SHEET_CSV_URL.to_string()),
            script_url: std::env::var("SCRIPT_URL")
                .unwrap_or_else(|_| SCRIPT_URL.to_string()),
            region_allow_list,
        }
    }
}

fn parse_allow_list(raw: String) -> HashSet<String> {
    raw.split(',')
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
