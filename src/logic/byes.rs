//! Bye resolution for rounds after the first.
//!
//! A later-round match is a bye when it has one occupant and its other slot can never be
//! filled because the feeder position does not exist in the previous round. Slots whose
//! feeder is merely undecided are left alone.

use crate::logic::rounds::{feeder_exists, matches_in_round, successor_of};
use crate::models::{Bracket, MatchResult};

/// Resolve every bye in rounds 2 and up. Run once, right after the bracket is built.
/// Returns the number of matches stamped `BYE`.
pub fn propagate_byes(bracket: &mut Bracket) -> usize {
    let mut resolved = 0;
    // Low to high: a bye forwarded out of round r can create one in round r + 1.
    for round in 2..bracket.last_round {
        let size = matches_in_round(bracket.first_round_matches, round) as u32;
        for position in 1..=size {
            if let Some(idx) = bracket.index_at(round, position) {
                if resolve_bye(bracket, idx).is_some() {
                    resolved += 1;
                }
            }
        }
    }
    resolved
}

/// Keep forwarding from `idx` while each match reached is a bye. Returns how many were stamped.
pub(crate) fn forward_byes(bracket: &mut Bracket, mut idx: usize) -> usize {
    let mut resolved = 0;
    while let Some(next) = resolve_bye(bracket, idx) {
        resolved += 1;
        idx = next;
    }
    resolved
}

/// Stamp the match at `idx` as a bye and forward its occupant, if it is one.
/// Returns the successor's index on success.
///
/// The final is never stamped: it always has two feeders, and a lone finalist still waits for
/// an opponent.
pub(crate) fn resolve_bye(bracket: &mut Bracket, idx: usize) -> Option<usize> {
    let m = &bracket.matches[idx];
    if m.result.is_some() || m.round <= 1 || m.round >= bracket.last_round {
        return None;
    }
    let (slot, occupant) = m.sole_occupant()?;
    if feeder_exists(bracket.first_round_matches, m.round, m.position, slot.other()) {
        return None;
    }
    let (round, position) = (m.round, m.position);
    let (next_round, next_position, next_slot) = successor_of(round, position);
    let next = bracket.index_at(next_round, next_position)?;

    bracket.matches[idx].set_result(Some(MatchResult::Bye));
    bracket.matches[next].set_slot(next_slot, Some(occupant));
    log::debug!(
        "Bye: round {} position {} forwarded {} to round {} position {}",
        round,
        position,
        occupant,
        next_round,
        next_position
    );
    Some(next)
}
