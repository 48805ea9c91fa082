//! Tournament, its categories, and the stage status derived from their brackets.

use crate::models::competitor::{CategoryId, RegistrationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// A category/modality inside a tournament (e.g. one weight class).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A tournament: a named set of categories, each with its own bracket.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a new tournament with no categories.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            categories: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Add a category and return its id. Blank names are trimmed but allowed.
    pub fn add_category(&mut self, name: impl Into<String>) -> CategoryId {
        let id = Uuid::new_v4();
        self.categories.push(Category {
            id,
            name: name.into().trim().to_string(),
        });
        id
    }

    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

/// Per-category view used for the stage status.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryStatus {
    pub category: CategoryId,
    /// Match rows exist for the category.
    pub generated: bool,
    /// Set only once the final holds a real decision.
    pub champion: Option<RegistrationId>,
}

/// Whether every category of a tournament has crowned a champion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageStatus {
    pub categories: Vec<CategoryStatus>,
    pub bracket_complete: bool,
}

impl StageStatus {
    /// No categories at all: `bracket_complete` is true but means nothing.
    pub fn is_vacuous(&self) -> bool {
        self.categories.is_empty()
    }
}
