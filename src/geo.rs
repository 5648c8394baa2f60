//! Geographic read-back helpers: coordinate parsing, severity classes, and
//! the location-tagged points handed to the map surface.

use serde::Serialize;

use crate::records::SubmissionRow;

/// Fallback map center (Morocco) for sessions without a position fix.
pub const DEFAULT_CENTER: (f64, f64) = (31.7917, -7.0926);

/// Parse a "lat,lng" cell. Both parts must parse to finite numbers; anything
/// else is `None` and the corresponding row is skipped for plotting (it still
/// appears in the tabular dashboard).
pub fn parse_location_xy(raw: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() < 2 {
        return None;
    }
    let lat: f64 = parts[0].trim().parse().ok()?;
    let lng: f64 = parts[1].trim().parse().ok()?;
    (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
}

/// Severity classification recovered from the free-text urgency label.
///
/// The log sheet stores display labels, and historical rows carry the rank
/// numeral in either ASCII or Arabic-Indic digits, so classification matches
/// the Arabic keyword or either glyph set. Rows that match nothing stay
/// unclassified rather than being dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityClass {
    Critical,
    High,
    Medium,
    Low,
    Unclassified,
}

impl SeverityClass {
    pub fn from_urgency(label: &str) -> Self {
        let has = |needles: &[&str]| needles.iter().any(|n| label.contains(n));
        if has(&["حرج", "4", "٤"]) {
            SeverityClass::Critical
        } else if has(&["مرتفع", "3", "٣"]) {
            SeverityClass::High
        } else if has(&["متوسط", "2", "٢"]) {
            SeverityClass::Medium
        } else if has(&["منخفض", "1", "١"]) {
            SeverityClass::Low
        } else {
            SeverityClass::Unclassified
        }
    }

    /// Marker fill color used by the map surface.
    pub fn marker_color(self) -> &'static str {
        match self {
            SeverityClass::Critical => "#ef4444",
            SeverityClass::High => "#f97316",
            SeverityClass::Medium => "#fbbf24",
            SeverityClass::Low => "#10b981",
            SeverityClass::Unclassified => "#64748b",
        }
    }
}

/// One plottable report: parsed coordinates plus the popup fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub lat: f64,
    pub lng: f64,
    pub severity: SeverityClass,
    pub color: &'static str,
    pub douar: String,
    pub commune: String,
    pub province: String,
    pub damage: String,
    pub needs: String,
    pub phone: String,
}

/// Derive the plottable points from the submission log. Rows whose
/// `location_xy` does not parse to two finite numbers are skipped.
pub fn collect_map_points(rows: &[SubmissionRow]) -> Vec<MapPoint> {
    rows.iter()
        .filter_map(|row| {
            let (lat, lng) = parse_location_xy(&row.location_xy)?;
            let severity = SeverityClass::from_urgency(&row.urgency);
            Some(MapPoint {
                lat,
                lng,
                severity,
                color: severity.marker_color(),
                douar: row.douar.clone(),
                commune: row.commune.clone(),
                province: row.province.clone(),
                damage: row.damage.clone(),
                needs: row.needs.clone(),
                phone: row.phone.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_valid_pair() {
        let (lat, lng) = parse_location_xy("31.791700, -7.092600").unwrap();
        assert_relative_eq!(lat, 31.7917, epsilon = 1e-9);
        assert_relative_eq!(lng, -7.0926, epsilon = 1e-9);
    }

    #[test]
    fn test_parse_rejects_malformed_pairs() {
        assert_eq!(parse_location_xy(""), None);
        assert_eq!(parse_location_xy("31.5"), None);
        assert_eq!(parse_location_xy("not-a-number,12.3"), None);
        assert_eq!(parse_location_xy("31.5,NaN"), None);
        assert_eq!(parse_location_xy("inf,12.3"), None);
    }

    #[test]
    fn test_severity_from_arabic_keywords() {
        assert_eq!(SeverityClass::from_urgency("4- حرج جداً"), SeverityClass::Critical);
        assert_eq!(SeverityClass::from_urgency("3- مرتفع"), SeverityClass::High);
        assert_eq!(SeverityClass::from_urgency("2- متوسط"), SeverityClass::Medium);
        assert_eq!(SeverityClass::from_urgency("1- منخفض"), SeverityClass::Low);
        assert_eq!(SeverityClass::from_urgency("غير محدد"), SeverityClass::Unclassified);
    }

    #[test]
    fn test_severity_from_numerals_in_either_glyph_set() {
        assert_eq!(SeverityClass::from_urgency("٤"), SeverityClass::Critical);
        assert_eq!(SeverityClass::from_urgency("4"), SeverityClass::Critical);
        assert_eq!(SeverityClass::from_urgency("درجة ٣"), SeverityClass::High);
        assert_eq!(SeverityClass::from_urgency("niveau 2"), SeverityClass::Medium);
    }

    #[test]
    fn test_marker_colors() {
        assert_eq!(SeverityClass::Critical.marker_color(), "#ef4444");
        assert_eq!(SeverityClass::Unclassified.marker_color(), "#64748b");
    }

    #[test]
    fn test_collect_skips_malformed_points_only() {
        let mut ok = SubmissionRow {
            region: "R1".into(),
            province: "P1".into(),
            commune: "C1".into(),
            douar: "D1".into(),
            urgency: "4- حرج جداً".into(),
            damage: "انهيار".into(),
            needs: "خيام".into(),
            phone: "0612345678".into(),
            location_xy: "31.5,-7.1".into(),
            map_link: String::new(),
        };
        let mut bad = ok.clone();
        bad.douar = "D2".into();
        bad.location_xy = "not-a-number,12.3".into();
        let mut absent = ok.clone();
        absent.douar = "D3".into();
        absent.location_xy = String::new();
        ok.douar = "D1".into();

        let points = collect_map_points(&[ok, bad, absent]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].douar, "D1");
        assert_eq!(points[0].severity, SeverityClass::Critical);
        assert_relative_eq!(points[0].lat, 31.5);
    }
}
