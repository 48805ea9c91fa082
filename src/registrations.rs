//! Registrations: where the competitor pool of a category comes from.

use crate::models::{
    AffiliationId, BracketError, CategoryId, Competitor, Registration, RegistrationId,
    RegistrationStatus,
};
use serde::Deserialize;
use std::io::Read;
use std::sync::RwLock;

/// Read-only source of confirmed entrants, consumed by bracket generation.
pub trait RegistrationSource {
    /// Confirmed competitors of `category`.
    fn confirmed(&self, category: CategoryId) -> Result<Vec<Competitor>, BracketError>;
}

/// In-memory registration store.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<Vec<Registration>>,
}

/// One CSV row: `category_id,registration_id,affiliation_id,status`.
#[derive(Debug, Deserialize)]
struct CsvRow {
    category_id: CategoryId,
    registration_id: RegistrationId,
    affiliation_id: Option<AffiliationId>,
    /// Missing or empty means pending.
    #[serde(default)]
    status: Option<RegistrationStatus>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration. Ids must be unique across categories.
    pub fn register(&self, registration: Registration) -> Result<(), BracketError> {
        let mut entries = self.entries.write().map_err(|_| lock_error())?;
        if entries.iter().any(|r| r.id == registration.id) {
            return Err(BracketError::DuplicateRegistration(registration.id));
        }
        entries.push(registration);
        Ok(())
    }

    pub fn set_status(
        &self,
        id: RegistrationId,
        status: RegistrationStatus,
    ) -> Result<Registration, BracketError> {
        let mut entries = self.entries.write().map_err(|_| lock_error())?;
        let entry = entries
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(BracketError::RegistrationNotFound(id))?;
        entry.status = status;
        Ok(entry.clone())
    }

    /// All registrations of `category`, whatever their status.
    pub fn list(&self, category: CategoryId) -> Result<Vec<Registration>, BracketError> {
        let entries = self.entries.read().map_err(|_| lock_error())?;
        Ok(entries
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect())
    }

    /// Import registrations from CSV (with header). Rows are validated before any is stored,
    /// so a bad file adds nothing. Returns the number of rows imported.
    pub fn load_csv<R: Read>(&self, reader: R) -> Result<usize, BracketError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut rows = Vec::new();
        for row in rdr.deserialize() {
            let row: CsvRow = row?;
            rows.push(Registration::new(
                row.registration_id,
                row.category_id,
                row.affiliation_id,
                row.status.unwrap_or_default(),
            ));
        }

        let mut entries = self.entries.write().map_err(|_| lock_error())?;
        for (i, row) in rows.iter().enumerate() {
            let duplicate = entries.iter().any(|r| r.id == row.id)
                || rows[..i].iter().any(|r| r.id == row.id);
            if duplicate {
                return Err(BracketError::DuplicateRegistration(row.id));
            }
        }
        let count = rows.len();
        entries.extend(rows);
        log::info!("Imported {} registration(s) from CSV", count);
        Ok(count)
    }
}

impl RegistrationSource for Registry {
    fn confirmed(&self, category: CategoryId) -> Result<Vec<Competitor>, BracketError> {
        let entries = self.entries.read().map_err(|_| lock_error())?;
        Ok(entries
            .iter()
            .filter(|r| r.category == category && r.is_confirmed())
            .map(Registration::competitor)
            .collect())
    }
}

fn lock_error() -> BracketError {
    BracketError::Storage("registry lock poisoned".to_string())
}
