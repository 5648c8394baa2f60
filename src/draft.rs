//! The in-progress report and its cascading selection rules.
//!
//! A draft lives only in the session that composes it: created with defaults,
//! mutated by edits and by the geolocation callback, partially reset after a
//! successful submission, gone on reload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::records::UrgencyLevel;

/// A required field was empty at submit time. Caught before any network call
/// and reported inline; the submission is not attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required field is empty: {field}")]
pub struct ValidationError {
    /// Payload key of the offending field.
    pub field: &'static str,
}

/// Editable fields routed through [`ReportDraft::set_field`]. Administrative
/// levels cascade; coordinate fields recompute the map link; the narrative
/// fields carry no extra rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Region,
    Province,
    Commune,
    Douar,
    Damage,
    Needs,
    Phone,
    Latitude,
    Longitude,
}

/// The report being composed. Serializes to the exact JSON shape the intake
/// script appends to the log sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportDraft {
    pub region: String,
    pub province: String,
    pub commune: String,
    #[serde(rename = "nom_douar")]
    pub douar: String,
    #[serde(rename = "niveau_urgence")]
    pub urgency: UrgencyLevel,
    #[serde(rename = "nature_dommages")]
    pub damage: String,
    #[serde(rename = "besoins_essentiels")]
    pub needs: String,
    #[serde(rename = "numero_telephone")]
    pub phone: String,
    pub latitude: String,
    pub longitude: String,
    #[serde(rename = "lien_maps")]
    pub map_link: String,
}

impl Default for ReportDraft {
    fn default() -> Self {
        Self {
            region: String::new(),
            province: String::new(),
            commune: String::new(),
            douar: String::new(),
            urgency: UrgencyLevel::default(),
            damage: String::new(),
            needs: String::new(),
            phone: String::new(),
            latitude: "0.000000".to_string(),
            longitude: "0.000000".to_string(),
            map_link: String::new(),
        }
    }
}

impl ReportDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one field edit.
    ///
    /// Overwriting a higher administrative level clears every level below it,
    /// so the draft never holds an inconsistent partial address. Writing the
    /// value already present is a no-op — re-selecting the same option must
    /// not wipe the levels below. Coordinate writes recompute the map link;
    /// that recomputation is independent of the cascade.
    pub fn set_field(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Region => {
                if self.region == value {
                    return;
                }
                self.region = value.to_string();
                self.province.clear();
                self.commune.clear();
                self.douar.clear();
            }
            DraftField::Province => {
                if self.province == value {
                    return;
                }
                self.province = value.to_string();
                self.commune.clear();
                self.douar.clear();
            }
            DraftField::Commune => {
                if self.commune == value {
                    return;
                }
                self.commune = value.to_string();
                self.douar.clear();
            }
            DraftField::Douar => {
                self.douar = value.to_string();
            }
            DraftField::Damage => {
                self.damage = value.to_string();
            }
            DraftField::Needs => {
                self.needs = value.to_string();
            }
            DraftField::Phone => {
                self.phone = value.to_string();
            }
            DraftField::Latitude => {
                self.latitude = value.to_string();
                self.refresh_map_link();
            }
            DraftField::Longitude => {
                self.longitude = value.to_string();
                self.refresh_map_link();
            }
        }
    }

    /// Take a fix from the geolocation capability: 6-decimal formatting for
    /// display and for the map link.
    pub fn apply_position(&mut self, latitude: f64, longitude: f64) {
        self.latitude = format!("{latitude:.6}");
        self.longitude = format!("{longitude:.6}");
        self.refresh_map_link();
    }

    fn refresh_map_link(&mut self) {
        self.map_link = maps_link(&self.latitude, &self.longitude);
    }

    /// Check the required fields, in form order. Returns the first gap.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required: [(&'static str, &str); 7] = [
            ("region", &self.region),
            ("province", &self.province),
            ("commune", &self.commune),
            ("nom_douar", &self.douar),
            ("nature_dommages", &self.damage),
            ("numero_telephone", &self.phone),
            ("besoins_essentiels", &self.needs),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError { field });
            }
        }
        Ok(())
    }

    /// Clear the address and narrative fields after a successful submission.
    /// Urgency and the coordinate pair carry over to the next report.
    pub fn reset_after_submit(&mut self) {
        self.region.clear();
        self.province.clear();
        self.commune.clear();
        self.douar.clear();
        self.damage.clear();
        self.needs.clear();
        self.phone.clear();
    }
}

/// External map URL for a coordinate pair; regenerated whenever either
/// coordinate changes.
pub fn maps_link(latitude: &str, longitude: &str) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}
