//! Recording a winner and moving them into the next round.

use crate::logic::byes::forward_byes;
use crate::logic::rounds::successor_of;
use crate::models::{Advance, Bracket, BracketError, MatchId, MatchState, Slot};

/// Record `slot` as the winner of `match_id`.
///
/// The match must be `Ready` (both slots filled, no result). A match still awaiting an
/// opponent is rejected with `InvalidState` on purpose: real walkovers are already resolved as
/// byes, so deciding early would strand the opponent still to come.
///
/// The winner is written into the successor's slot; if that successor can never get an
/// opponent it is resolved as a bye and the winner keeps moving. Deciding the final returns the champion and writes nothing else.
pub fn advance_match(
    bracket: &mut Bracket,
    match_id: MatchId,
    slot: Slot,
) -> Result<Advance, BracketError> {
    let idx = bracket
        .index_of(match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    let m = &bracket.matches[idx];
    match m.state() {
        MatchState::Decided => {
            return Err(BracketError::InvalidState {
                match_id,
                reason: "match already has a winner",
            })
        }
        MatchState::Bye => {
            return Err(BracketError::InvalidState {
                match_id,
                reason: "match was resolved as a bye",
            })
        }
        _ => {}
    }
    let winner = m.slot(slot).ok_or(BracketError::InvalidState {
        match_id,
        reason: "no competitor in the chosen slot",
    })?;
    if m.slot(slot.other()).is_none() {
        return Err(BracketError::InvalidState {
            match_id,
            reason: "match is still waiting for an opponent",
        });
    }

    let (round, position) = (m.round, m.position);
    if round >= bracket.last_round {
        bracket.matches[idx].set_result(Some(slot.winner()));
        log::debug!("Final {} decided: champion {}", match_id, winner);
        return Ok(Advance::Champion {
            champion_competitor_id: winner,
        });
    }

    let (next_round, next_position, next_slot) = successor_of(round, position);
    let next = bracket
        .index_at(next_round, next_position)
        .ok_or(BracketError::InvalidState {
            match_id,
            reason: "successor match is missing",
        })?;
    let result = slot.winner();
    bracket.matches[idx].set_result(Some(result));
    bracket.matches[next].set_slot(next_slot, Some(winner));
    let successor_match_id = bracket.matches[next].id;
    let byes = forward_byes(bracket, next);
    log::debug!(
        "Match {} decided ({}): {} advances to round {} position {} ({} bye(s) followed)",
        match_id,
        result.as_str(),
        winner,
        next_round,
        next_position,
        byes
    );
    Ok(Advance::Successor { successor_match_id })
}
