//! Stable sorting and fixed-size pagination for the booth table.

use std::cmp::Ordering;

use booth_map_analytics_models::{SortColumn, SortState};
use booth_map_booth_models::Booth;

use crate::category::categorize_booth;

/// Fixed number of rows per table page.
pub const PAGE_SIZE: usize = 25;

/// Comparison key for one cell of the active sort column.
///
/// Numeric values compare numerically; text compares lowercased by code
/// point. When the two sides disagree (a booth label that parses as a
/// number next to one that does not), both are coerced to lowercase text.
#[derive(Debug, Clone)]
enum SortKey {
    Num(f64),
    Text(String),
}

impl SortKey {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Num(a), Self::Num(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) => a.to_text().cmp(&b.to_text()),
        }
    }

    fn to_text(&self) -> String {
        match self {
            Self::Num(n) => n.to_string(),
            Self::Text(t) => t.clone(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn sort_key(booth: &Booth, column: SortColumn) -> SortKey {
    match column {
        SortColumn::StationNo => SortKey::Num(f64::from(booth.station_no)),
        // Booth labels are usually plain numbers but older files carry
        // suffixes like "5 (M)"; fall back to text for those.
        SortColumn::BoothNo => booth
            .booth_no
            .trim()
            .parse::<f64>()
            .map_or_else(|_| SortKey::Text(booth.booth_no.to_lowercase()), SortKey::Num),
        SortColumn::Village => SortKey::Text(booth.village.to_lowercase()),
        SortColumn::Building => SortKey::Text(booth.building.to_lowercase()),
        SortColumn::Winner => SortKey::Text(booth.winner.to_lowercase()),
        SortColumn::DmkVotes => SortKey::Num(booth.votes.dmk as f64),
        SortColumn::AiadmkVotes => SortKey::Num(booth.votes.aiadmk as f64),
        SortColumn::OthersVotes => SortKey::Num(booth.votes.others as f64),
        SortColumn::TotalVotes => SortKey::Num(booth.total_votes as f64),
        SortColumn::MarginPct => SortKey::Num(booth.margin_pct),
        SortColumn::Category => SortKey::Text(categorize_booth(booth).to_string()),
    }
}

/// Sorts booth references by the active column and direction.
///
/// Uses `slice::sort_by`, which the standard library guarantees to be
/// stable: rows with equal keys keep their relative input order, in both
/// directions (the direction flag reverses the comparator, and equal
/// stays equal).
#[must_use]
pub fn sort<'a>(mut rows: Vec<&'a Booth>, state: &SortState) -> Vec<&'a Booth> {
    rows.sort_by(|a, b| {
        let ordering = sort_key(a, state.column).compare(&sort_key(b, state.column));
        if state.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    rows
}

/// Slices a row list into the requested 1-based page.
///
/// Returns the page slice and the total page count
/// (`ceil(len / page_size)`). A page past the end yields an empty slice;
/// an empty input yields an empty slice and zero pages. Page 0 is treated
/// as page 1. Clamping the navigable range is the caller's job.
#[must_use]
pub fn paginate<T>(rows: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    let total_pages = rows.len().div_ceil(page_size);
    let page = page.max(1);
    let start = (page - 1).saturating_mul(page_size);
    if start >= rows.len() {
        (&[], total_pages)
    } else {
        let end = (start + page_size).min(rows.len());
        (&rows[start..end], total_pages)
    }
}

/// Sorts and slices in one step: the table view's contract.
#[must_use]
pub fn sort_and_page<'a>(
    rows: Vec<&'a Booth>,
    state: &SortState,
    page: usize,
    page_size: usize,
) -> (Vec<&'a Booth>, usize) {
    let sorted = sort(rows, state);
    let (slice, total_pages) = paginate(&sorted, page, page_size);
    (slice.to_vec(), total_pages)
}
