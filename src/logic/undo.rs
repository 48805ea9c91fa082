//! Reverting a recorded winner.

use crate::logic::rounds::successor_of;
use crate::models::{Bracket, BracketError, MatchId, MatchResult};

/// Clear the result of `match_id` and pull its winner back out of the next round.
///
/// Only human decisions can be undone; byes cannot. If the winner had been carried on through
/// bye matches, those are reopened as well. Fails with `DownstreamLocked` when the first
/// non-bye match downstream already has a winner.
pub fn undo_match(bracket: &mut Bracket, match_id: MatchId) -> Result<(), BracketError> {
    let idx = bracket
        .index_of(match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    let m = &bracket.matches[idx];
    if !m.result.is_some_and(MatchResult::is_decision) {
        return Err(BracketError::NothingToUndo(match_id));
    }

    // (index, slot holding the forwarded winner, was a bye)
    let mut chain = Vec::new();
    let (mut round, mut position) = (m.round, m.position);
    while round < bracket.last_round {
        let (next_round, next_position, next_slot) = successor_of(round, position);
        let Some(next) = bracket.index_at(next_round, next_position) else {
            break;
        };
        let next_match = &bracket.matches[next];
        match next_match.result {
            Some(MatchResult::Bye) => {
                chain.push((next, next_slot, true));
                round = next_round;
                position = next_position;
            }
            Some(_) => {
                return Err(BracketError::DownstreamLocked {
                    match_id,
                    downstream: next_match.id,
                })
            }
            None => {
                chain.push((next, next_slot, false));
                break;
            }
        }
    }

    bracket.matches[idx].set_result(None);
    for (next, slot, was_bye) in chain {
        let m = &mut bracket.matches[next];
        m.set_slot(slot, None);
        if was_bye {
            m.set_result(None);
        }
    }
    log::debug!("Match {} result reverted", match_id);
    Ok(())
}
