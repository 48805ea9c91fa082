//! Errors raised by bracket operations.

use crate::models::bracket::MatchId;
use crate::models::competitor::{CategoryId, RegistrationId};

/// Errors that can occur during bracket operations.
///
/// Everything except `Storage` and `Registrations` is a precondition violation the caller can
/// correct; none of them is worth retrying.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Fewer than two confirmed registrations in the category.
    InsufficientParticipants { found: usize },
    /// Match rows already exist for the category.
    AlreadyGenerated(CategoryId),
    MatchNotFound(MatchId),
    /// The match is not in a state that allows this action.
    InvalidState { match_id: MatchId, reason: &'static str },
    /// The match has no human decision to revert (undecided or bye).
    NothingToUndo(MatchId),
    /// A decision further down the bracket depends on this match's result.
    DownstreamLocked { match_id: MatchId, downstream: MatchId },
    DuplicateRegistration(RegistrationId),
    RegistrationNotFound(RegistrationId),
    /// Registration import failed (malformed CSV, bad ids).
    Registrations(String),
    /// The underlying store is unusable (poisoned lock).
    Storage(String),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InsufficientParticipants { found } => write!(
                f,
                "Need at least 2 confirmed registrations to generate a bracket (found {})",
                found
            ),
            BracketError::AlreadyGenerated(_) => {
                write!(f, "A bracket has already been generated for this category")
            }
            BracketError::MatchNotFound(_) => write!(f, "Match not found"),
            BracketError::InvalidState { reason, .. } => {
                write!(f, "Invalid state for this action: {}", reason)
            }
            BracketError::NothingToUndo(_) => write!(f, "Match has no recorded result to undo"),
            BracketError::DownstreamLocked { .. } => write!(
                f,
                "Cannot undo: the next match already has a result, undo that one first"
            ),
            BracketError::DuplicateRegistration(_) => {
                write!(f, "A registration with this id already exists")
            }
            BracketError::RegistrationNotFound(_) => write!(f, "Registration not found"),
            BracketError::Registrations(msg) => write!(f, "Registration import failed: {}", msg),
            BracketError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for BracketError {}

impl From<csv::Error> for BracketError {
    fn from(err: csv::Error) -> Self {
        BracketError::Registrations(err.to_string())
    }
}
