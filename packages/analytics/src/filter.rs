//! Predicate filtering over the loaded booth set.

use booth_map_analytics_models::FilterState;
use booth_map_booth_models::Booth;

use crate::category::categorize_booth;

/// Narrows a booth slice to those matching every active predicate,
/// preserving input order.
///
/// The predicates AND together: village equality (unless no area is
/// selected), derived-category equality (unless no category filter is
/// active), and a case-insensitive substring search over the booth label,
/// village, and building fields (unless the search string is empty).
/// Empty fields simply never match a non-empty search.
#[must_use]
pub fn filter<'a>(booths: &'a [Booth], state: &FilterState) -> Vec<&'a Booth> {
    let needle = state.search.trim().to_lowercase();

    booths
        .iter()
        .filter(|booth| {
            state
                .area
                .as_deref()
                .is_none_or(|area| booth.village == area)
        })
        .filter(|booth| {
            state
                .category
                .is_none_or(|category| categorize_booth(booth) == category)
        })
        .filter(|booth| needle.is_empty() || matches_search(booth, &needle))
        .collect()
}

/// Whether any searchable field contains the lowercased needle.
fn matches_search(booth: &Booth, needle: &str) -> bool {
    [&booth.booth_no, &booth.village, &booth.building]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
}
