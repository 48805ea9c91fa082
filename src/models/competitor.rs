//! Competitors and the registrations they are drawn from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a registration (an individual athlete or a team entry).
pub type RegistrationId = Uuid;

/// Club or association a competitor belongs to.
pub type AffiliationId = Uuid;

/// A tournament category/modality: the unit a bracket is generated for.
pub type CategoryId = Uuid;

/// What the bracket engine sees of an entrant: who it is and which club it fights for.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub registration_id: RegistrationId,
    pub affiliation_id: Option<AffiliationId>,
}

impl Competitor {
    pub fn new(registration_id: RegistrationId, affiliation_id: Option<AffiliationId>) -> Self {
        Self {
            registration_id,
            affiliation_id,
        }
    }

    /// Competitor with a fresh id and no affiliation.
    pub fn unaffiliated() -> Self {
        Self::new(Uuid::new_v4(), None)
    }

    /// Competitor with a fresh id fighting for `affiliation_id`.
    pub fn affiliated(affiliation_id: AffiliationId) -> Self {
        Self::new(Uuid::new_v4(), Some(affiliation_id))
    }
}

/// Registration lifecycle. Only confirmed registrations are seeded.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Confirmed,
    Withdrawn,
}

/// A registration of one entrant into one category.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub category: CategoryId,
    pub affiliation_id: Option<AffiliationId>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(
        id: RegistrationId,
        category: CategoryId,
        affiliation_id: Option<AffiliationId>,
        status: RegistrationStatus,
    ) -> Self {
        Self {
            id,
            category,
            affiliation_id,
            status,
            registered_at: Utc::now(),
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == RegistrationStatus::Confirmed
    }

    pub fn competitor(&self) -> Competitor {
        Competitor::new(self.id, self.affiliation_id)
    }
}
