//! Bracket business logic: seeding, construction, byes, advancing, undo, status.

mod advance;
mod builder;
mod byes;
pub mod rounds;
mod seeding;
mod status;
mod undo;

pub use advance::advance_match;
pub use builder::build_bracket;
pub use byes::propagate_byes;
pub use seeding::{pair_competitors, seeding_order, Pairing};
pub use status::{champion, stage_status};
pub use undo::undo_match;
