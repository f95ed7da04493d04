#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Canonical booth-level election result types.
//!
//! This crate defines the domain model shared across the booth-map system:
//! one [`Booth`] per polling station, the derived [`Category`] taxonomy,
//! and the constituency/district summary types. Raw fixture documents are
//! normalized into these types at the load boundary; nothing downstream
//! touches untyped JSON.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Display name of the primary party in the two-party comparison.
pub const PRIMARY_PARTY: &str = "DMK";

/// Display name of the rival party in the two-party comparison.
pub const RIVAL_PARTY: &str = "AIADMK";

/// Competitiveness classification for a booth or a spatial cell.
///
/// Derived from the vote margin and the winning side; never stored in the
/// input fixtures, always recomputed. Margins of exactly 10 points or less
/// classify as [`Category::Swing`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Category {
    /// DMK won with a margin above 10 points.
    StrongDmk,
    /// AIADMK won with a margin above 10 points.
    StrongAiadmk,
    /// Margin at or below 10 points, or an unrecognized winner.
    Swing,
}

impl Category {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::StrongDmk, Self::StrongAiadmk, Self::Swing]
    }
}

/// Vote counts for the three outcome buckets tracked per booth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTotals {
    /// Votes for the DMK candidate.
    pub dmk: u64,
    /// Votes for the AIADMK candidate.
    pub aiadmk: u64,
    /// Combined votes for all other candidates.
    pub others: u64,
}

impl VoteTotals {
    /// Sum across all three buckets.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.dmk + self.aiadmk + self.others
    }

    /// Adds another booth's counts into this running total.
    pub const fn accumulate(&mut self, other: Self) {
        self.dmk += other.dmk;
        self.aiadmk += other.aiadmk;
        self.others += other.others;
    }
}

/// Geographic position of a booth. Only present when the source data
/// carries both latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

/// Prior-election comparison figures for one booth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothComparison {
    /// Swing toward DMK since the prior election, in percentage points.
    pub dmk_swing: f64,
    /// Swing toward AIADMK since the prior election, in percentage points.
    pub aiadmk_swing: f64,
    /// Change in turnout percentage since the prior election.
    pub turnout_change: f64,
}

/// One polling-station-level result.
///
/// `id` is a dense zero-based index assigned when a constituency file is
/// loaded. It is unique and stable within that loaded set, and re-derived
/// (so potentially different) on every load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booth {
    /// Dense zero-based identifier within the loaded record set.
    pub id: usize,
    /// Display label for the booth (e.g. `"42"`), the table's key column.
    pub booth_no: String,
    /// Numeric polling-station number extracted from the source label.
    pub station_no: u32,
    /// Village or locality name; the area the booth belongs to.
    pub village: String,
    /// Name of the building housing the polling station.
    pub building: String,
    /// Geocoded position, when both coordinates are known.
    pub location: Option<Coordinates>,
    /// Vote counts per outcome bucket.
    pub votes: VoteTotals,
    /// Total valid votes polled at this booth.
    pub total_votes: u64,
    /// Winning-side label as supplied by the source data.
    pub winner: String,
    /// Lead of the winner over the runner-up as a percentage, as supplied
    /// by the source data (not recomputed here).
    pub margin_pct: f64,
    /// Prior-election comparison, when available.
    pub comparison: Option<BoothComparison>,
}

/// Aggregate figures for one constituency, from the detail file's
/// `summary` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituencySummary {
    /// Number of booths in the constituency.
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
    /// Mean DMK swing across booths with comparison data.
    pub avg_dmk_swing: Option<f64>,
    /// Mean AIADMK swing across booths with comparison data.
    pub avg_aiadmk_swing: Option<f64>,
    /// Mean turnout change across booths with comparison data.
    pub avg_turnout_change: Option<f64>,
}

/// Pointer to one constituency's detail file in the district-level
/// summary document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstituencyRef {
    /// Assembly constituency number (e.g. `"036"`).
    pub ac_number: String,
    /// Constituency name.
    pub name: String,
    /// Seat reservation type (`"GEN"`, `"SC"`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// File name of the per-constituency detail document.
    pub data_file: String,
    /// Whether any booth in the file carries coordinates.
    pub has_geocoding: bool,
    /// Booth count, for display before the detail file is loaded.
    pub total_booths: u32,
}

/// One district and its constituencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct District {
    /// District code.
    pub code: String,
    /// District name.
    pub name: String,
    /// Constituencies within the district.
    pub constituencies: Vec<ConstituencyRef>,
}

/// The district-level summary document: the dashboard's entry point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterSummary {
    /// State the election was held in.
    pub state: String,
    /// Election year.
    pub election_year: u16,
    /// Districts covered by the dataset.
    pub districts: Vec<District>,
}

impl MasterSummary {
    /// Finds a constituency reference by name, case-insensitively.
    #[must_use]
    pub fn find_constituency(&self, name: &str) -> Option<&ConstituencyRef> {
        self.districts
            .iter()
            .flat_map(|d| d.constituencies.iter())
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}
