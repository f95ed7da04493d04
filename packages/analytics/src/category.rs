//! Margin-threshold booth classifier.

use booth_map_booth_models::{Booth, Category, PRIMARY_PARTY, RIVAL_PARTY, VoteTotals};

/// Margin (in percentage points) above which a booth counts as a
/// stronghold. Strictly above: a margin of exactly 10 is still swing.
pub const STRONG_MARGIN_PCT: f64 = 10.0;

/// Classifies a result by winning-side label and margin percentage.
///
/// Pure function of its two arguments. The winner label is
/// case-normalized, and `ADMK` is accepted as an alias for AIADMK (some
/// extracted files abbreviate it that way). Any unrecognized winner falls
/// through to [`Category::Swing`] regardless of margin.
#[must_use]
pub fn categorize(winner: &str, margin_pct: f64) -> Category {
    if margin_pct > STRONG_MARGIN_PCT {
        match winner.trim().to_lowercase().as_str() {
            "dmk" => return Category::StrongDmk,
            "aiadmk" | "admk" => return Category::StrongAiadmk,
            _ => {}
        }
    }
    Category::Swing
}

/// Classifies a single booth from its supplied winner and margin.
#[must_use]
pub fn categorize_booth(booth: &Booth) -> Category {
    categorize(&booth.winner, booth.margin_pct)
}

/// Dominant category for a spatial cell's summed vote totals.
///
/// The margin is taken over the two-party sum only; "others" votes do not
/// enter the comparison. This intentionally differs from the booth-level
/// margin, which the extraction pipeline computed over the full total.
#[must_use]
pub fn cell_category(votes: VoteTotals) -> Category {
    let (winner, lead) = if votes.dmk > votes.aiadmk {
        (PRIMARY_PARTY, votes.dmk - votes.aiadmk)
    } else {
        (RIVAL_PARTY, votes.aiadmk - votes.dmk)
    };

    let two_party = votes.dmk + votes.aiadmk;
    #[allow(clippy::cast_precision_loss)]
    let margin_pct = if two_party > 0 {
        lead as f64 / two_party as f64 * 100.0
    } else {
        0.0
    };

    categorize(winner, margin_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive_at_ten() {
        assert_eq!(categorize("DMK", 10.0), Category::Swing);
        assert_eq!(categorize("DMK", 10.0001), Category::StrongDmk);
        assert_eq!(categorize("AIADMK", 10.0), Category::Swing);
        assert_eq!(categorize("AIADMK", 10.0001), Category::StrongAiadmk);
    }

    #[test]
    fn winner_label_is_case_normalized() {
        assert_eq!(categorize("dmk", 15.0), Category::StrongDmk);
        assert_eq!(categorize(" Dmk ", 15.0), Category::StrongDmk);
        assert_eq!(categorize("aiadmk", 15.0), Category::StrongAiadmk);
    }

    #[test]
    fn admk_alias_counts_as_rival() {
        assert_eq!(categorize("ADMK", 22.5), Category::StrongAiadmk);
        assert_eq!(categorize("admk", 22.5), Category::StrongAiadmk);
    }

    #[test]
    fn unknown_winner_is_swing_even_with_wide_margin() {
        assert_eq!(categorize("NTK", 40.0), Category::Swing);
        assert_eq!(categorize("", 40.0), Category::Swing);
    }

    #[test]
    fn narrow_margins_are_swing() {
        assert_eq!(categorize("DMK", 0.0), Category::Swing);
        assert_eq!(categorize("AIADMK", 5.0), Category::Swing);
        assert_eq!(categorize("DMK", 9.99), Category::Swing);
    }

    #[test]
    fn cell_category_ignores_others_in_the_margin() {
        // Two-party margin: (600 - 400) / 1000 = 20% -> strong, even
        // though a huge "others" pile would dilute it below threshold if
        // the booth-level normalization were applied.
        let votes = VoteTotals {
            dmk: 600,
            aiadmk: 400,
            others: 5000,
        };
        assert_eq!(cell_category(votes), Category::StrongDmk);
    }

    #[test]
    fn cell_category_handles_empty_and_tied_cells() {
        assert_eq!(cell_category(VoteTotals::default()), Category::Swing);
        let tied = VoteTotals {
            dmk: 250,
            aiadmk: 250,
            others: 10,
        };
        assert_eq!(cell_category(tied), Category::Swing);
    }

    #[test]
    fn cell_category_rival_lead() {
        let votes = VoteTotals {
            dmk: 300,
            aiadmk: 450,
            others: 25,
        };
        assert_eq!(cell_category(votes), Category::StrongAiadmk);
    }
}
