#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Derived aggregate and view-state types for booth analytics.
//!
//! Everything here is recomputed from the loaded booth set: spatial cell
//! aggregates for the map overlay, and the filter/sort/page state that
//! drives the table view. None of it survives a constituency switch.

use booth_map_booth_models::{Booth, Category, VoteTotals};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Geographic bounding rectangle of one spatial cell, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBounds {
    /// Southern latitude edge.
    pub south: f64,
    /// Western longitude edge.
    pub west: f64,
    /// Northern latitude edge.
    pub north: f64,
    /// Eastern longitude edge.
    pub east: f64,
}

impl CellBounds {
    /// Whether the given point falls inside this rectangle (edges
    /// inclusive).
    #[must_use]
    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.south && lat <= self.north && lng >= self.west && lng <= self.east
    }
}

/// Mean prior-election swing figures across a cell's member booths.
///
/// Members without comparison data contribute zeros; the denominator is
/// always the full member count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellSwing {
    /// Mean DMK swing in percentage points.
    pub dmk_swing: f64,
    /// Mean AIADMK swing in percentage points.
    pub aiadmk_swing: f64,
    /// Mean turnout change in percentage points.
    pub turnout_change: f64,
}

/// One fixed-precision geohash cell aggregating the booths whose
/// coordinates fall inside its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialCell {
    /// The geohash key this cell was bucketed under.
    pub geohash: String,
    /// Decoded bounding rectangle of the key.
    pub bounds: CellBounds,
    /// Member booth identifiers, in input order.
    pub booth_ids: Vec<usize>,
    /// Summed vote counts across members.
    pub votes: VoteTotals,
    /// Dominant category over the summed two-party totals.
    pub category: Category,
    /// Averaged swing metrics, when any member carries comparison data.
    pub swing: Option<CellSwing>,
}

/// The table filter predicates currently in effect.
///
/// `area: None` is the "all areas" state and `category: None` means no
/// category filter; at most one category is ever active (the controller
/// replaces rather than stacks them).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Free-text search over booth number, village, and building.
    pub search: String,
    /// Selected village name, or `None` for all areas.
    pub area: Option<String>,
    /// Active category filter, or `None` for all categories.
    pub category: Option<Category>,
}

impl FilterState {
    /// Whether every predicate is relaxed (filtering is the identity).
    /// The search string counts as relaxed when it is all whitespace,
    /// matching how the filter itself treats it.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.area.is_none() && self.category.is_none()
    }
}

/// Columns the booth table can be sorted by.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortColumn {
    /// Polling-station number (the table's natural key).
    #[default]
    StationNo,
    /// Booth label.
    BoothNo,
    /// Village name.
    Village,
    /// Building name.
    Building,
    /// Winning-side label.
    Winner,
    /// DMK vote count.
    DmkVotes,
    /// AIADMK vote count.
    AiadmkVotes,
    /// Combined other-candidate vote count.
    OthersVotes,
    /// Total votes polled.
    TotalVotes,
    /// Margin percentage.
    MarginPct,
    /// Derived category.
    Category,
}

/// Active sort column and direction for the booth table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SortState {
    /// Column the table is ordered by.
    pub column: SortColumn,
    /// Descending when set; ascending otherwise.
    pub descending: bool,
}

/// One page of the sorted, filtered booth table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage {
    /// Rows on this page, at most the fixed page size.
    pub rows: Vec<Booth>,
    /// 1-based page number this slice corresponds to.
    pub page: usize,
    /// Total number of pages for the filtered set (0 when empty).
    pub total_pages: usize,
}
