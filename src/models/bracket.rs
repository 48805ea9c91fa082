//! Match rows, slots and results that make up a single-elimination bracket.

use crate::models::competitor::{CategoryId, RegistrationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match row.
pub type MatchId = Uuid;

/// One of the two competitor slots of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }

    /// Winner marker recorded when this slot wins.
    pub fn winner(self) -> MatchResult {
        match self {
            Slot::A => MatchResult::WinnerA,
            Slot::B => MatchResult::WinnerB,
        }
    }
}

/// Persisted outcome of a match. Undecided matches carry no result at all.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    /// Auto-resolved: the sole occupant advanced without an opponent.
    #[serde(rename = "BYE")]
    Bye,
    #[serde(rename = "WINNER_1")]
    WinnerA,
    #[serde(rename = "WINNER_2")]
    WinnerB,
}

impl MatchResult {
    /// True for a human decision (anything but a bye).
    pub fn is_decision(self) -> bool {
        !matches!(self, MatchResult::Bye)
    }

    pub fn winning_slot(self) -> Option<Slot> {
        match self {
            MatchResult::Bye => None,
            MatchResult::WinnerA => Some(Slot::A),
            MatchResult::WinnerB => Some(Slot::B),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MatchResult::Bye => "BYE",
            MatchResult::WinnerA => "WINNER_1",
            MatchResult::WinnerB => "WINNER_2",
        }
    }
}

/// Derived state of a match; never stored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    Empty,
    AwaitingOpponent,
    Ready,
    Decided,
    Bye,
}

/// A single match row, keyed naturally by (category, round, position).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub category: CategoryId,
    /// 1-based; the final is the highest round.
    pub round: u32,
    /// 1-based, dense within the round.
    pub position: u32,
    pub slot_a: Option<RegistrationId>,
    pub slot_b: Option<RegistrationId>,
    pub result: Option<MatchResult>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    pub fn new(
        category: CategoryId,
        round: u32,
        position: u32,
        slot_a: Option<RegistrationId>,
        slot_b: Option<RegistrationId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            category,
            round,
            position,
            slot_a,
            slot_b,
            result: None,
            updated_at: Utc::now(),
        }
    }

    /// Empty placeholder for a later round.
    pub fn placeholder(category: CategoryId, round: u32, position: u32) -> Self {
        Self::new(category, round, position, None, None)
    }

    pub fn slot(&self, slot: Slot) -> Option<RegistrationId> {
        match slot {
            Slot::A => self.slot_a,
            Slot::B => self.slot_b,
        }
    }

    pub fn set_slot(&mut self, slot: Slot, occupant: Option<RegistrationId>) {
        match slot {
            Slot::A => self.slot_a = occupant,
            Slot::B => self.slot_b = occupant,
        }
        self.updated_at = Utc::now();
    }

    pub fn set_result(&mut self, result: Option<MatchResult>) {
        self.result = result;
        self.updated_at = Utc::now();
    }

    pub fn occupants(&self) -> usize {
        self.slot_a.is_some() as usize + self.slot_b.is_some() as usize
    }

    /// The only occupied slot, if exactly one is filled.
    pub fn sole_occupant(&self) -> Option<(Slot, RegistrationId)> {
        match (self.slot_a, self.slot_b) {
            (Some(a), None) => Some((Slot::A, a)),
            (None, Some(b)) => Some((Slot::B, b)),
            _ => None,
        }
    }

    /// Competitor that left this match forward: the decided winner or the bye occupant.
    pub fn advancing(&self) -> Option<RegistrationId> {
        match self.result? {
            MatchResult::Bye => self.sole_occupant().map(|(_, id)| id),
            decided => decided.winning_slot().and_then(|s| self.slot(s)),
        }
    }

    pub fn state(&self) -> MatchState {
        match self.result {
            Some(MatchResult::Bye) => MatchState::Bye,
            Some(_) => MatchState::Decided,
            None => match self.occupants() {
                0 => MatchState::Empty,
                1 => MatchState::AwaitingOpponent,
                _ => MatchState::Ready,
            },
        }
    }
}

/// Every match row of one category, ordered by (round, position).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub category: CategoryId,
    /// Round of the final.
    pub last_round: u32,
    /// Number of round-1 matches; fixes the shape of every later round.
    pub first_round_matches: usize,
    pub matches: Vec<Match>,
    pub generated_at: DateTime<Utc>,
}

impl Bracket {
    pub fn index_of(&self, match_id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id == match_id)
    }

    pub fn index_at(&self, round: u32, position: u32) -> Option<usize> {
        self.matches
            .iter()
            .position(|m| m.round == round && m.position == position)
    }

    pub fn get(&self, match_id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == match_id)
    }

    pub fn at(&self, round: u32, position: u32) -> Option<&Match> {
        self.index_at(round, position).map(|i| &self.matches[i])
    }

    pub fn round(&self, round: u32) -> impl Iterator<Item = &Match> + '_ {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// The single match of the last round.
    pub fn final_match(&self) -> Option<&Match> {
        self.at(self.last_round, 1)
    }

    pub fn summary(&self, competitors: usize) -> BracketSummary {
        BracketSummary {
            category: self.category,
            competitors,
            rounds: self.last_round,
            matches: self.matches.len(),
            byes: self
                .matches
                .iter()
                .filter(|m| m.result == Some(MatchResult::Bye))
                .count(),
            generated_at: self.generated_at,
        }
    }
}

/// What `generate` reports back.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketSummary {
    pub category: CategoryId,
    pub competitors: usize,
    pub rounds: u32,
    pub matches: usize,
    /// Matches auto-resolved as byes right after generation.
    pub byes: usize,
    pub generated_at: DateTime<Utc>,
}

/// Outcome of recording a winner.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Advance {
    /// The winner was written into this match of the next round.
    Successor { successor_match_id: MatchId },
    /// The decided match was the final.
    Champion { champion_competitor_id: RegistrationId },
}
