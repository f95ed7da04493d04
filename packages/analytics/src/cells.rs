//! Geohash bucketing of geocoded booths into spatial cells.
//!
//! Each booth with coordinates is assigned to the fixed-precision geohash
//! cell containing it; the cell accumulates member ids and vote totals,
//! then derives its dominant category and averaged swing metrics. Keys are
//! kept in a `BTreeMap` so re-bucketing the same set always produces the
//! same cells in the same order.

use std::collections::BTreeMap;

use booth_map_analytics_models::{CellBounds, CellSwing, SpatialCell};
use booth_map_booth_models::{Booth, VoteTotals};
use geohash::Coord;

use crate::category::cell_category;

/// Geohash precision for the map overlay. Six characters is roughly a
/// 1.2km x 0.6km rectangle, which matches the density of rural booth
/// clusters without merging whole villages.
pub const CELL_PRECISION: usize = 6;

/// Running per-cell accumulator before finalization.
struct CellAccumulator {
    bounds: CellBounds,
    booth_ids: Vec<usize>,
    votes: VoteTotals,
    swing_sums: (f64, f64, f64),
    any_comparison: bool,
}

/// Buckets geocoded booths into geohash cells at the given precision.
///
/// Accepts any iterator of booth references so the overlay can bucket a
/// filtered subset as easily as the full loaded set. Booths without
/// coordinates are skipped. Coordinates that fall outside the valid
/// lat/lng range (a geocoding bug upstream) are skipped with a warning
/// rather than failing the whole bucketing pass.
pub fn bucket<'a, I>(booths: I, precision: usize) -> BTreeMap<String, SpatialCell>
where
    I: IntoIterator<Item = &'a Booth>,
{
    let mut accumulators: BTreeMap<String, CellAccumulator> = BTreeMap::new();

    for booth in booths {
        let Some(location) = booth.location else {
            continue;
        };

        let coord = Coord {
            x: location.lng,
            y: location.lat,
        };
        let hash = match geohash::encode(coord, precision) {
            Ok(hash) => hash,
            Err(e) => {
                log::warn!(
                    "Skipping booth {} with unencodable coordinates ({}, {}): {e}",
                    booth.booth_no,
                    location.lat,
                    location.lng
                );
                continue;
            }
        };

        let cell = match accumulators.entry(hash.clone()) {
            std::collections::btree_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::btree_map::Entry::Vacant(entry) => {
                let Some(bounds) = decode_bounds(&hash) else {
                    continue;
                };
                entry.insert(CellAccumulator {
                    bounds,
                    booth_ids: Vec::new(),
                    votes: VoteTotals::default(),
                    swing_sums: (0.0, 0.0, 0.0),
                    any_comparison: false,
                })
            }
        };

        cell.booth_ids.push(booth.id);
        cell.votes.accumulate(booth.votes);
        // Missing comparison contributes zeros; the denominator stays the
        // full member count.
        if let Some(comparison) = booth.comparison {
            cell.swing_sums.0 += comparison.dmk_swing;
            cell.swing_sums.1 += comparison.aiadmk_swing;
            cell.swing_sums.2 += comparison.turnout_change;
            cell.any_comparison = true;
        }
    }

    accumulators
        .into_iter()
        .map(|(hash, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let members = acc.booth_ids.len() as f64;
            let swing = acc.any_comparison.then(|| CellSwing {
                dmk_swing: acc.swing_sums.0 / members,
                aiadmk_swing: acc.swing_sums.1 / members,
                turnout_change: acc.swing_sums.2 / members,
            });

            let cell = SpatialCell {
                geohash: hash.clone(),
                bounds: acc.bounds,
                booth_ids: acc.booth_ids,
                votes: acc.votes,
                category: cell_category(acc.votes),
                swing,
            };
            (hash, cell)
        })
        .collect()
}

/// Decodes a geohash key back into the four corners of its bounding
/// rectangle.
#[must_use]
pub fn decode_bounds(hash: &str) -> Option<CellBounds> {
    let rect = geohash::decode_bbox(hash).ok()?;
    Some(CellBounds {
        south: rect.min().y,
        west: rect.min().x,
        north: rect.max().y,
        east: rect.max().x,
    })
}

#[cfg(test)]
mod tests {
    use booth_map_booth_models::{BoothComparison, Category, Coordinates};

    use super::*;

    fn booth(id: usize, location: Option<(f64, f64)>, dmk: u64, aiadmk: u64) -> Booth {
        Booth {
            id,
            booth_no: (id + 1).to_string(),
            station_no: u32::try_from(id).unwrap() + 1,
            village: String::new(),
            building: String::new(),
            location: location.map(|(lat, lng)| Coordinates { lat, lng }),
            votes: VoteTotals {
                dmk,
                aiadmk,
                others: 0,
            },
            total_votes: dmk + aiadmk,
            winner: if dmk >= aiadmk { "DMK" } else { "AIADMK" }.to_string(),
            margin_pct: 0.0,
            comparison: None,
        }
    }

    #[test]
    fn skips_booths_without_coordinates() {
        let booths = vec![
            booth(0, Some((12.61, 79.79)), 100, 50),
            booth(1, None, 400, 300),
        ];
        let cells = bucket(&booths, CELL_PRECISION);

        let members: Vec<usize> = cells.values().flat_map(|c| c.booth_ids.clone()).collect();
        assert_eq!(members, vec![0]);
    }

    #[test]
    fn members_partition_the_geocoded_booths() {
        let booths = vec![
            booth(0, Some((12.61, 79.79)), 10, 5),
            booth(1, Some((12.95, 80.18)), 20, 25),
            booth(2, None, 7, 7),
            booth(3, Some((13.21, 79.55)), 30, 10),
        ];
        let cells = bucket(&booths, CELL_PRECISION);

        let mut members: Vec<usize> =
            cells.values().flat_map(|c| c.booth_ids.clone()).collect();
        members.sort_unstable();
        assert_eq!(members, vec![0, 1, 3]);
    }

    #[test]
    fn bucketing_is_idempotent() {
        let booths = vec![
            booth(0, Some((12.61, 79.79)), 100, 50),
            booth(1, Some((12.610_01, 79.790_01)), 60, 80),
            booth(2, Some((12.95, 80.18)), 20, 25),
        ];
        let first = bucket(&booths, CELL_PRECISION);
        let second = bucket(&booths, CELL_PRECISION);
        assert_eq!(first, second);
    }

    #[test]
    fn nearby_booths_share_a_cell_and_sum_totals() {
        // Two pairs: one pair inside the same precision-6 cell, another
        // pair far away in a distinct cell.
        let booths = vec![
            booth(0, Some((12.610_00, 79.790_00)), 100, 40),
            booth(1, Some((12.610_02, 79.790_02)), 150, 60),
            booth(2, Some((12.950_00, 80.180_00)), 30, 90),
            booth(3, Some((12.950_01, 80.180_01)), 10, 70),
        ];
        let cells = bucket(&booths, CELL_PRECISION);
        assert_eq!(cells.len(), 2);

        let mut counts: Vec<usize> = cells.values().map(|c| c.booth_ids.len()).collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![2, 2]);

        for cell in cells.values() {
            for id in &cell.booth_ids {
                let loc = booths[*id].location.unwrap();
                assert!(cell.bounds.contains(loc.lat, loc.lng));
            }
        }

        let first = cells
            .values()
            .find(|c| c.booth_ids.contains(&0))
            .unwrap();
        assert_eq!(first.booth_ids, vec![0, 1]);
        assert_eq!(
            first.votes,
            VoteTotals {
                dmk: 250,
                aiadmk: 100,
                others: 0
            }
        );
        assert_eq!(first.category, Category::StrongDmk);
    }

    #[test]
    fn swing_averages_over_full_member_count() {
        let mut a = booth(0, Some((12.61, 79.79)), 100, 50);
        a.comparison = Some(BoothComparison {
            dmk_swing: 4.0,
            aiadmk_swing: -2.0,
            turnout_change: 1.0,
        });
        // Same cell, no comparison data: contributes zeros but still
        // counts in the denominator.
        let b = booth(1, Some((12.610_01, 79.790_01)), 60, 80);

        let cells = bucket(&[a, b], CELL_PRECISION);
        assert_eq!(cells.len(), 1);

        let cell = cells.values().next().unwrap();
        let swing = cell.swing.unwrap();
        assert!((swing.dmk_swing - 2.0).abs() < f64::EPSILON);
        assert!((swing.aiadmk_swing - (-1.0)).abs() < f64::EPSILON);
        assert!((swing.turnout_change - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn no_swing_when_no_member_has_comparison_data() {
        let booths = vec![booth(0, Some((12.61, 79.79)), 100, 50)];
        let cells = bucket(&booths, CELL_PRECISION);
        assert!(cells.values().next().unwrap().swing.is_none());
    }

    #[test]
    fn decode_bounds_round_trips_the_source_point() {
        let hash = geohash::encode(
            Coord {
                x: 79.79,
                y: 12.61,
            },
            CELL_PRECISION,
        )
        .unwrap();
        let bounds = decode_bounds(&hash).unwrap();
        assert!(bounds.contains(12.61, 79.79));
        assert!(bounds.south < bounds.north);
        assert!(bounds.west < bounds.east);
    }

    #[test]
    fn out_of_range_coordinates_are_skipped() {
        let booths = vec![
            booth(0, Some((95.0, 200.0)), 10, 10),
            booth(1, Some((12.61, 79.79)), 10, 10),
        ];
        let cells = bucket(&booths, CELL_PRECISION);
        let members: Vec<usize> = cells.values().flat_map(|c| c.booth_ids.clone()).collect();
        assert_eq!(members, vec![1]);
    }
}
