#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the booth map server.
//!
//! These types are serialized to JSON for the REST API. They are separate
//! from the domain types so the API contract can evolve independently of
//! the in-memory model.

use booth_map_analytics::category::categorize_booth;
use booth_map_analytics_models::{
    CellBounds, CellSwing, FilterState, SortColumn, SortState, SpatialCell,
};
use booth_map_booth_models::{Booth, BoothComparison, Category, Coordinates, VoteTotals};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the booth table endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoothQueryParams {
    /// Constituency name to load.
    pub constituency: String,
    /// Village name to filter by, or `all`.
    pub area: Option<String>,
    /// Category name to filter by (`strong-dmk`, `strong-aiadmk`,
    /// `swing`), or `all`.
    pub category: Option<String>,
    /// Free-text search over booth number, village, and building.
    pub q: Option<String>,
    /// Column to sort by (camelCase column name).
    pub sort_by: Option<String>,
    /// Sort descending when true.
    pub desc: Option<bool>,
    /// 1-based page number.
    pub page: Option<usize>,
}

impl BoothQueryParams {
    /// Builds the filter predicates these parameters describe.
    ///
    /// The `all` sentinel and unrecognized category names both relax the
    /// corresponding predicate rather than erroring.
    #[must_use]
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            search: self.q.clone().unwrap_or_default(),
            area: self
                .area
                .as_deref()
                .filter(|a| !a.is_empty() && !a.eq_ignore_ascii_case("all"))
                .map(ToString::to_string),
            category: self
                .category
                .as_deref()
                .and_then(|c| c.parse::<Category>().ok()),
        }
    }

    /// Builds the sort state these parameters describe. An unrecognized
    /// column name falls back to the default column.
    #[must_use]
    pub fn sort_state(&self) -> SortState {
        SortState {
            column: self
                .sort_by
                .as_deref()
                .and_then(|c| c.parse::<SortColumn>().ok())
                .unwrap_or_default(),
            descending: self.desc.unwrap_or(false),
        }
    }
}

/// Query parameters for the spatial cells endpoint. Same filter fields
/// as the table endpoint, without sorting or pagination.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellQueryParams {
    /// Constituency name to load.
    pub constituency: String,
    /// Village name to filter by, or `all`.
    pub area: Option<String>,
    /// Category name to filter by, or `all`.
    pub category: Option<String>,
    /// Free-text search over booth number, village, and building.
    pub q: Option<String>,
}

impl From<&CellQueryParams> for BoothQueryParams {
    fn from(p: &CellQueryParams) -> Self {
        Self {
            constituency: p.constituency.clone(),
            area: p.area.clone(),
            category: p.category.clone(),
            q: p.q.clone(),
            sort_by: None,
            desc: None,
            page: None,
        }
    }
}

/// Query parameters for the constituency summary endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQueryParams {
    /// Constituency name to load.
    pub constituency: String,
}

/// One booth row as returned by the table endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBoothRow {
    /// Dense identifier within the loaded constituency.
    pub id: usize,
    /// Booth label.
    pub booth_no: String,
    /// Numeric polling-station number.
    pub station_no: u32,
    /// Village name.
    pub village: String,
    /// Building name.
    pub building: String,
    /// Geocoded position, when known.
    pub location: Option<Coordinates>,
    /// Vote counts per outcome bucket.
    pub votes: VoteTotals,
    /// Total valid votes polled.
    pub total_votes: u64,
    /// Winning-side label.
    pub winner: String,
    /// Winner's lead as a percentage of total votes.
    pub margin_pct: f64,
    /// Derived competitiveness category.
    pub category: Category,
    /// Prior-election comparison, when available.
    pub comparison: Option<BoothComparison>,
}

impl From<&Booth> for ApiBoothRow {
    fn from(booth: &Booth) -> Self {
        Self {
            id: booth.id,
            booth_no: booth.booth_no.clone(),
            station_no: booth.station_no,
            village: booth.village.clone(),
            building: booth.building.clone(),
            location: booth.location,
            votes: booth.votes,
            total_votes: booth.total_votes,
            winner: booth.winner.clone(),
            margin_pct: booth.margin_pct,
            category: categorize_booth(booth),
            comparison: booth.comparison,
        }
    }
}

/// One page of the booth table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTablePage {
    /// Rows on this page.
    pub rows: Vec<ApiBoothRow>,
    /// 1-based page number this slice corresponds to.
    pub page: usize,
    /// Total pages for the filtered set (0 when empty).
    pub total_pages: usize,
}

/// One spatial cell as returned by the cells endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCell {
    /// Geohash key of the cell.
    pub geohash: String,
    /// Bounding rectangle of the cell.
    pub bounds: CellBounds,
    /// Number of member booths.
    pub booth_count: usize,
    /// Member booth identifiers.
    pub booth_ids: Vec<usize>,
    /// Summed vote counts across members.
    pub votes: VoteTotals,
    /// Dominant category over the summed two-party totals.
    pub category: Category,
    /// Averaged swing metrics, when available.
    pub swing: Option<CellSwing>,
}

impl From<SpatialCell> for ApiCell {
    fn from(cell: SpatialCell) -> Self {
        Self {
            geohash: cell.geohash,
            bounds: cell.bounds,
            booth_count: cell.booth_ids.len(),
            booth_ids: cell.booth_ids,
            votes: cell.votes,
            category: cell.category,
            swing: cell.swing,
        }
    }
}

/// Response from the constituency summary endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummaryResponse {
    /// Constituency name as listed in the master document.
    pub constituency: String,
    /// Assembly constituency number.
    pub ac_number: String,
    /// Aggregate figures from the detail file.
    pub summary: booth_map_booth_models::ConstituencySummary,
    /// Distinct village names in the loaded set, sorted.
    pub areas: Vec<String>,
}

/// Error payload returned by failing endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Human-readable description of the failure.
    pub error: String,
}
