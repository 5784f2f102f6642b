//! Spy cats: the field agents missions are assigned to.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{MissionId, SpyCatId};

/// A registered spy cat.
///
/// `mission_id` is only ever set by mission assignment and always points at
/// a mission whose `spy_cat_id` points back at this cat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpyCat {
    pub id: SpyCatId,
    pub name: String,
    pub years_of_experience: i32,
    /// Breed name as listed by the breed catalog.
    pub breed: String,
    pub salary: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_id: Option<MissionId>,
    /// Optimistic concurrency token, bumped by the store on every write.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SpyCat {
    /// Build a fresh, unassigned cat from validated input.
    #[must_use]
    pub fn new(input: NewSpyCat) -> Self {
        let now = Utc::now();
        Self {
            id: SpyCatId::new(),
            name: input.name,
            years_of_experience: input.years_of_experience,
            breed: input.breed,
            salary: input.salary,
            mission_id: None,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the cat is currently on a mission.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.mission_id.is_some()
    }
}

/// Input for registering a new spy cat.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSpyCat {
    pub name: String,
    pub years_of_experience: i32,
    pub breed: String,
    pub salary: Decimal,
}

impl NewSpyCat {
    /// Check the fields that do not need the breed catalog.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" });
        }
        if self.breed.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "breed" });
        }
        if self.years_of_experience <= 0 {
            return Err(DomainError::NonPositiveExperience);
        }
        validate_salary(self.salary)
    }
}

/// Salaries are strictly positive.
pub fn validate_salary(salary: Decimal) -> Result<(), DomainError> {
    if salary <= Decimal::ZERO {
        return Err(DomainError::NonPositiveSalary);
    }
    Ok(())
}
