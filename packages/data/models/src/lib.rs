#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Raw fixture document schemas for the booth-map data loader.
//!
//! These mirror the JSON files emitted by the PDF extraction pipeline:
//! `master.json` (district hierarchy) and one detail file per constituency.
//! Field names are the pipeline's snake_case, and every field is
//! defaulted so a missing or null value never fails the parse; the
//! normalization step in `booth_map_data` substitutes the documented
//! defaults instead.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `master.json`: the district-level summary document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMaster {
    /// State the election was held in.
    pub state: String,
    /// Election year.
    pub election_year: u16,
    /// District groupings.
    pub districts: Vec<RawDistrict>,
}

/// One district entry in `master.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDistrict {
    /// District code.
    pub code: String,
    /// District name.
    pub name: String,
    /// Constituencies within the district.
    pub constituencies: Vec<RawConstituencyRef>,
}

/// Pointer to a constituency detail file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConstituencyRef {
    /// Assembly constituency number (zero-padded string, e.g. `"036"`).
    pub ac_number: String,
    /// Constituency name.
    pub name: String,
    /// Seat reservation type.
    #[serde(rename = "type")]
    pub kind: String,
    /// File name of the detail document, relative to the data root.
    pub data_file: String,
    /// Whether the detail file carries geocoded booths.
    pub has_geocoding: bool,
    /// Booth count recorded at generation time.
    pub total_booths: u32,
}

/// A per-constituency detail document (e.g. `uthiramerur.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConstituency {
    /// Display name with AC number, e.g. `"Uthiramerur (AC036)"`.
    pub constituency: String,
    /// Assembly constituency number.
    pub ac_number: String,
    /// Aggregate figures for the constituency.
    pub summary: RawSummary,
    /// Booth-level results.
    pub booths: Vec<RawBooth>,
}

/// The `summary` sub-object of a detail document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSummary {
    /// Number of booths in the file.
    pub total_booths: u32,
    /// Booths where DMK polled ahead.
    pub dmk_won: u32,
    /// Booths where AIADMK polled ahead.
    pub aiadmk_won: u32,
    /// Booths with a margin under 5 points.
    pub swing: u32,
    /// Booths with a margin between 5 and 10 points.
    pub lean: u32,
    /// Booths with a margin above 10 points.
    pub strong: u32,
    /// Mean DMK swing vs the prior election, when merged in.
    pub avg_dmk_swing: Option<f64>,
    /// Mean AIADMK swing vs the prior election, when merged in.
    pub avg_aiadmk_swing: Option<f64>,
    /// Mean turnout change vs the prior election, when merged in.
    pub avg_turnout_change: Option<f64>,
}

/// One booth entry as extracted from the Form 20 PDFs.
///
/// `booth_no` is the pipeline's unique sequential label while
/// `station_no` is the polling-station number printed on the form; older
/// files omit `station_no` and carry labels like `"5 (M)"` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBooth {
    /// Unique sequential booth label within the file.
    pub booth_no: String,
    /// Numeric polling-station number, when the pipeline extracted one.
    pub station_no: Option<u32>,
    /// Winning-side label (`"DMK"` / `"AIADMK"`).
    pub winner: String,
    /// Votes for the DMK candidate.
    pub dmk_votes: Option<u64>,
    /// Votes for the AIADMK candidate.
    pub aiadmk_votes: Option<u64>,
    /// Per-party breakdown of the remaining candidates.
    pub other_parties: BTreeMap<String, u64>,
    /// Combined votes for all other candidates.
    pub others_votes: Option<u64>,
    /// Total valid votes polled.
    pub total_votes: Option<u64>,
    /// Absolute vote lead of the winner.
    pub margin: Option<i64>,
    /// Winner's lead as a percentage of total votes.
    pub margin_pct: Option<f64>,
    /// Category recorded at generation time; recomputed on load and
    /// therefore ignored by the loader.
    pub category: String,
    /// Village or locality name from geocoding.
    pub village: String,
    /// Polling-station building name from geocoding.
    pub building: String,
    /// Geocoded latitude, if any.
    pub lat: Option<f64>,
    /// Geocoded longitude, if any.
    pub lng: Option<f64>,
    /// Prior-election comparison, merged in for constituencies with 2016
    /// data.
    pub comparison: Option<RawComparison>,
}

/// Prior-election comparison figures for one booth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawComparison {
    /// Swing toward DMK in percentage points.
    pub dmk_swing: Option<f64>,
    /// Swing toward AIADMK in percentage points.
    pub aiadmk_swing: Option<f64>,
    /// Turnout change in percentage points.
    pub turnout_change: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booth_parses_with_missing_optional_fields() {
        let raw: RawBooth = serde_json::from_str(r#"{"booth_no": "12"}"#).unwrap();
        assert_eq!(raw.booth_no, "12");
        assert_eq!(raw.station_no, None);
        assert_eq!(raw.dmk_votes, None);
        assert!(raw.village.is_empty());
        assert!(raw.comparison.is_none());
    }

    #[test]
    fn booth_parses_null_coordinates() {
        let raw: RawBooth =
            serde_json::from_str(r#"{"booth_no": "1", "lat": null, "lng": 79.75}"#).unwrap();
        assert_eq!(raw.lat, None);
        assert_eq!(raw.lng, Some(79.75));
    }

    #[test]
    fn constituency_file_round_trips() {
        let json = r#"{
            "constituency": "Uthiramerur (AC036)",
            "ac_number": "036",
            "summary": {
                "total_booths": 2,
                "dmk_won": 1,
                "aiadmk_won": 1,
                "swing": 1,
                "lean": 0,
                "strong": 1,
                "avg_turnout_change": -1.2
            },
            "booths": [
                {
                    "booth_no": "1",
                    "station_no": 1,
                    "winner": "DMK",
                    "dmk_votes": 412,
                    "aiadmk_votes": 230,
                    "other_parties": {"NTK": 40},
                    "others_votes": 40,
                    "total_votes": 682,
                    "margin": 182,
                    "margin_pct": 26.69,
                    "category": "STRONG",
                    "village": "Salavakkam",
                    "building": "Panchayat Union Primary School",
                    "lat": 12.61,
                    "lng": 79.79,
                    "comparison": {
                        "dmk_swing": 4.1,
                        "aiadmk_swing": -2.5,
                        "turnout_change": -0.8
                    }
                }
            ]
        }"#;

        let file: RawConstituency = serde_json::from_str(json).unwrap();
        assert_eq!(file.summary.total_booths, 2);
        assert_eq!(file.summary.avg_dmk_swing, None);
        assert_eq!(file.booths.len(), 1);
        assert_eq!(file.booths[0].other_parties.get("NTK"), Some(&40));
        assert_eq!(
            file.booths[0].comparison.unwrap().dmk_swing,
            Some(4.1)
        );
    }

    #[test]
    fn master_parses_type_field() {
        let json = r#"{
            "state": "Tamil Nadu",
            "election_year": 2021,
            "districts": [{
                "code": "KPM",
                "name": "Kanchipuram",
                "constituencies": [{
                    "ac_number": "036",
                    "name": "Uthiramerur",
                    "type": "GEN",
                    "data_file": "uthiramerur.json",
                    "has_geocoding": true,
                    "total_booths": 359
                }]
            }]
        }"#;

        let master: RawMaster = serde_json::from_str(json).unwrap();
        assert_eq!(master.districts[0].constituencies[0].kind, "GEN");
    }
}
