//! Champion lookup and tournament-wide stage status.

use crate::models::{Bracket, CategoryId, CategoryStatus, RegistrationId, StageStatus};

/// Winner of the final, once the final holds a real decision.
pub fn champion(bracket: &Bracket) -> Option<RegistrationId> {
    let final_match = bracket.final_match()?;
    match final_match.result {
        Some(result) if result.is_decision() => final_match.advancing(),
        _ => None,
    }
}

/// Stage status over `categories`, looking each bracket up with `bracket_of`.
///
/// A category without a bracket has no champion. An empty category list is reported as
/// complete; check `StageStatus::is_vacuous` before acting on it.
pub fn stage_status<'a, F>(categories: &[CategoryId], mut bracket_of: F) -> StageStatus
where
    F: FnMut(CategoryId) -> Option<&'a Bracket>,
{
    let categories: Vec<CategoryStatus> = categories
        .iter()
        .map(|&category| {
            let bracket = bracket_of(category);
            CategoryStatus {
                category,
                generated: bracket.is_some_and(|b| !b.matches.is_empty()),
                champion: bracket.and_then(champion),
            }
        })
        .collect();
    let bracket_complete = categories.iter().all(|c| c.champion.is_some());
    StageStatus {
        categories,
        bracket_complete,
    }
}
