//! Bracket construction: first-round rows from the pairings, empty rows for every later round.

use crate::logic::rounds::{matches_in_round, round_count, successor_of};
use crate::logic::seeding::Pairing;
use crate::models::{Bracket, CategoryId, Match, MatchResult};
use chrono::Utc;

/// Materialize the full bracket for `pairings` (in seeding order).
///
/// A one-sided first-round pairing is stamped `BYE` on the spot and its competitor is written
/// straight into round 2, so bye propagation only has to look at rounds 2 and up.
pub fn build_bracket(category: CategoryId, pairings: &[Pairing]) -> Bracket {
    let first_round_matches = pairings.len();
    let last_round = round_count(first_round_matches);

    let mut matches = Vec::new();
    for (i, pairing) in pairings.iter().enumerate() {
        let mut m = Match::new(
            category,
            1,
            i as u32 + 1,
            pairing.a.map(|c| c.registration_id),
            pairing.b.map(|c| c.registration_id),
        );
        if pairing.is_bye() {
            m.result = Some(MatchResult::Bye);
        }
        matches.push(m);
    }
    for round in 2..=last_round {
        for position in 1..=matches_in_round(first_round_matches, round) as u32 {
            matches.push(Match::placeholder(category, round, position));
        }
    }

    let mut bracket = Bracket {
        category,
        last_round,
        first_round_matches,
        matches,
        generated_at: Utc::now(),
    };

    if last_round >= 2 {
        let byes: Vec<_> = bracket
            .round(1)
            .filter(|m| m.result == Some(MatchResult::Bye))
            .filter_map(|m| m.sole_occupant().map(|(_, occupant)| (m.position, occupant)))
            .collect();
        for (position, occupant) in byes {
            let (round, next_position, slot) = successor_of(1, position);
            if let Some(idx) = bracket.index_at(round, next_position) {
                bracket.matches[idx].set_slot(slot, Some(occupant));
            }
        }
    }

    log::debug!(
        "Built bracket for category {}: {} first-round matches, {} rounds",
        category,
        first_round_matches,
        last_round
    );
    bracket
}
