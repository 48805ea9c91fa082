//! Single-elimination bracket engine for martial-arts tournament categories:
//! models, bracket logic, registrations and the transactional engine.

pub mod engine;
pub mod logic;
pub mod models;
pub mod registrations;

pub use engine::BracketEngine;
pub use logic::{
    advance_match, build_bracket, champion, pair_competitors, propagate_byes, seeding_order,
    stage_status, undo_match, Pairing,
};
pub use models::{
    Advance, AffiliationId, Bracket, BracketError, BracketSummary, Category, CategoryId,
    CategoryStatus, Competitor, Match, MatchId, MatchResult, MatchState, Registration,
    RegistrationId, RegistrationStatus, Slot, StageStatus, Tournament, TournamentId,
};
pub use registrations::{RegistrationSource, Registry};
