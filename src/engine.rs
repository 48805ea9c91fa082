//! Bracket engine: the transactional entry point used by the rest of the system.
//!
//! All brackets live behind one lock. Each mutating operation holds the write guard for its
//! whole read-modify-write, and the logic functions check every precondition before writing,
//! so callers never observe a half-applied operation.

use crate::logic::{
    advance_match, build_bracket, pair_competitors, propagate_byes, stage_status, undo_match,
};
use crate::models::{
    Advance, Bracket, BracketError, BracketSummary, CategoryId, Match, MatchId, Slot, StageStatus,
};
use crate::registrations::RegistrationSource;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Brackets {
    by_category: HashMap<CategoryId, Bracket>,
    /// Which category each match row belongs to.
    match_index: HashMap<MatchId, CategoryId>,
}

impl Brackets {
    fn bracket_of_match(&mut self, match_id: MatchId) -> Result<&mut Bracket, BracketError> {
        let category = self
            .match_index
            .get(&match_id)
            .ok_or(BracketError::MatchNotFound(match_id))?;
        self.by_category
            .get_mut(category)
            .ok_or(BracketError::MatchNotFound(match_id))
    }
}

/// Generates and drives single-elimination brackets for the categories of `S`.
#[derive(Debug)]
pub struct BracketEngine<S> {
    registrations: S,
    brackets: RwLock<Brackets>,
}

impl<S: RegistrationSource> BracketEngine<S> {
    pub fn new(registrations: S) -> Self {
        Self {
            registrations,
            brackets: RwLock::new(Brackets::default()),
        }
    }

    pub fn registrations(&self) -> &S {
        &self.registrations
    }

    /// Seed the confirmed registrations of `category` and build its bracket.
    pub fn generate(&self, category: CategoryId) -> Result<BracketSummary, BracketError> {
        self.generate_with_rng(category, &mut rand::thread_rng())
    }

    /// `generate` with a caller-supplied random source (seeded in tests).
    pub fn generate_with_rng<R: Rng>(
        &self,
        category: CategoryId,
        rng: &mut R,
    ) -> Result<BracketSummary, BracketError> {
        let mut g = self.write()?;
        if g
            .by_category
            .get(&category)
            .is_some_and(|b| !b.matches.is_empty())
        {
            return Err(BracketError::AlreadyGenerated(category));
        }

        let competitors = self.registrations.confirmed(category)?;
        let pairings = pair_competitors(&competitors, rng)?;
        let mut bracket = build_bracket(category, &pairings);
        propagate_byes(&mut bracket);
        let summary = bracket.summary(competitors.len());

        for m in &bracket.matches {
            g.match_index.insert(m.id, category);
        }
        g.by_category.insert(category, bracket);
        log::info!(
            "Generated bracket for category {}: {} competitors, {} rounds, {} matches, {} byes",
            category,
            summary.competitors,
            summary.rounds,
            summary.matches,
            summary.byes
        );
        Ok(summary)
    }

    /// Delete every match row of `category`. Resetting a category without a bracket is a no-op.
    pub fn reset(&self, category: CategoryId) -> Result<(), BracketError> {
        let mut g = self.write()?;
        if let Some(bracket) = g.by_category.remove(&category) {
            for m in &bracket.matches {
                g.match_index.remove(&m.id);
            }
            log::info!(
                "Reset bracket for category {} ({} matches removed)",
                category,
                bracket.matches.len()
            );
        }
        Ok(())
    }

    /// Record `slot` as the winner of `match_id`.
    pub fn advance(&self, match_id: MatchId, slot: Slot) -> Result<Advance, BracketError> {
        let mut g = self.write()?;
        let bracket = g.bracket_of_match(match_id)?;
        advance_match(bracket, match_id, slot)
    }

    /// Revert the recorded winner of `match_id`.
    pub fn undo(&self, match_id: MatchId) -> Result<(), BracketError> {
        let mut g = self.write()?;
        let bracket = g.bracket_of_match(match_id)?;
        undo_match(bracket, match_id)
    }

    /// Match rows of `category` ordered by (round, position); empty if never generated.
    pub fn list_matches(&self, category: CategoryId) -> Result<Vec<Match>, BracketError> {
        let g = self.read()?;
        let mut matches = g
            .by_category
            .get(&category)
            .map(|b| b.matches.clone())
            .unwrap_or_default();
        matches.sort_by_key(|m| (m.round, m.position));
        Ok(matches)
    }

    /// Single match row by id.
    pub fn get_match(&self, match_id: MatchId) -> Result<Match, BracketError> {
        let g = self.read()?;
        g.match_index
            .get(&match_id)
            .and_then(|category| g.by_category.get(category))
            .and_then(|b| b.get(match_id))
            .cloned()
            .ok_or(BracketError::MatchNotFound(match_id))
    }

    /// Whether every one of `categories` has a champion.
    pub fn stage_status(&self, categories: &[CategoryId]) -> Result<StageStatus, BracketError> {
        let g = self.read()?;
        Ok(stage_status(categories, |category| g.by_category.get(&category)))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Brackets>, BracketError> {
        self.brackets
            .read()
            .map_err(|_| BracketError::Storage("bracket lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Brackets>, BracketError> {
        self.brackets
            .write()
            .map_err(|_| BracketError::Storage("bracket lock poisoned".to_string()))
    }
}
