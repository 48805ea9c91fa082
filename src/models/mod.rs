//! Data structures for the bracket engine: competitors, matches, brackets, tournaments.

mod bracket;
mod competitor;
mod error;
mod tournament;

pub use bracket::{Advance, Bracket, BracketSummary, Match, MatchId, MatchResult, MatchState, Slot};
pub use competitor::{
    AffiliationId, CategoryId, Competitor, Registration, RegistrationId, RegistrationStatus,
};
pub use error::BracketError;
pub use tournament::{Category, CategoryStatus, StageStatus, Tournament, TournamentId};
