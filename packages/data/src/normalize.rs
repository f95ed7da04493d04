//! Raw document to canonical record conversion.
//!
//! All defaulting happens here, once per load: missing numeric fields
//! become 0, missing names become empty strings, and coordinates are kept
//! only when both halves are present. Downstream code never sees a
//! partially-populated booth.

use std::sync::LazyLock;

use booth_map_booth_models::{
    Booth, BoothComparison, ConstituencyRef, ConstituencySummary, Coordinates, District,
    MasterSummary, VoteTotals,
};
use booth_map_data_models::{RawBooth, RawConstituency, RawMaster};
use regex::Regex;

/// First run of digits in a polling-station label like `"5 (M)"`.
static STATION_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("station number pattern is valid"));

/// Converts the district-level summary document into canonical form.
#[must_use]
pub fn normalize_master(raw: RawMaster) -> MasterSummary {
    MasterSummary {
        state: raw.state,
        election_year: raw.election_year,
        districts: raw
            .districts
            .into_iter()
            .map(|d| District {
                code: d.code,
                name: d.name,
                constituencies: d
                    .constituencies
                    .into_iter()
                    .map(|c| ConstituencyRef {
                        ac_number: c.ac_number,
                        name: c.name,
                        kind: c.kind,
                        data_file: c.data_file,
                        has_geocoding: c.has_geocoding,
                        total_booths: c.total_booths,
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Converts a constituency detail document into its summary and booth
/// list, assigning dense zero-based identifiers in file order.
///
/// Identifiers are re-derived on every load; nothing may hold on to them
/// across a constituency switch.
#[must_use]
pub fn normalize(raw: RawConstituency) -> (ConstituencySummary, Vec<Booth>) {
    let summary = ConstituencySummary {
        total_booths: raw.summary.total_booths,
        dmk_won: raw.summary.dmk_won,
        aiadmk_won: raw.summary.aiadmk_won,
        swing: raw.summary.swing,
        lean: raw.summary.lean,
        strong: raw.summary.strong,
        avg_dmk_swing: raw.summary.avg_dmk_swing,
        avg_aiadmk_swing: raw.summary.avg_aiadmk_swing,
        avg_turnout_change: raw.summary.avg_turnout_change,
    };

    let booths = raw
        .booths
        .into_iter()
        .enumerate()
        .map(|(id, raw)| normalize_booth(id, raw))
        .collect();

    (summary, booths)
}

fn normalize_booth(id: usize, raw: RawBooth) -> Booth {
    let booth_no = if raw.booth_no.trim().is_empty() {
        (id + 1).to_string()
    } else {
        raw.booth_no
    };

    let station_no = raw
        .station_no
        .or_else(|| extract_station_no(&booth_no))
        .unwrap_or_else(|| u32::try_from(id + 1).unwrap_or(u32::MAX));

    let votes = VoteTotals {
        dmk: raw.dmk_votes.unwrap_or(0),
        aiadmk: raw.aiadmk_votes.unwrap_or(0),
        others: raw
            .others_votes
            .unwrap_or_else(|| raw.other_parties.values().sum()),
    };

    let location = match (raw.lat, raw.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ => None,
    };

    Booth {
        id,
        booth_no,
        station_no,
        village: raw.village,
        building: raw.building,
        location,
        total_votes: raw.total_votes.unwrap_or_else(|| votes.total()),
        votes,
        winner: raw.winner,
        margin_pct: raw.margin_pct.unwrap_or(0.0),
        comparison: raw.comparison.map(|c| BoothComparison {
            dmk_swing: c.dmk_swing.unwrap_or(0.0),
            aiadmk_swing: c.aiadmk_swing.unwrap_or(0.0),
            turnout_change: c.turnout_change.unwrap_or(0.0),
        }),
    }
}

/// Pulls the numeric station number out of a label like `"5 (M)"`.
fn extract_station_no(label: &str) -> Option<u32> {
    STATION_NO.find(label)?.as_str().parse().ok()
}
