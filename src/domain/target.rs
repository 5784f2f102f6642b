//! Targets: the individual objectives of a mission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{MissionId, TargetId};

/// A mission target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: TargetId,
    /// Owning mission, fixed at creation.
    pub mission_id: MissionId,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Target {
    /// Build a target for `mission_id` from validated input.
    #[must_use]
    pub fn new(mission_id: MissionId, input: NewTarget) -> Self {
        let now = Utc::now();
        Self {
            id: TargetId::new(),
            mission_id,
            name: input.name,
            country: input.country,
            notes: input.notes,
            completed: input.completed,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for a new target.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewTarget {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
}

impl NewTarget {
    /// Convenience constructor for an open target with empty notes.
    pub fn open(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            notes: String::new(),
            completed: false,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "name" });
        }
        if self.country.trim().is_empty() {
            return Err(DomainError::EmptyField { field: "country" });
        }
        Ok(())
    }
}

/// Partial update of a target. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TargetUpdate {
    pub notes: Option<String>,
    pub completed: Option<bool>,
}

impl TargetUpdate {
    #[must_use]
    pub fn notes(notes: impl Into<String>) -> Self {
        Self {
            notes: Some(notes.into()),
            completed: None,
        }
    }

    #[must_use]
    pub fn completed(completed: bool) -> Self {
        Self {
            notes: None,
            completed: Some(completed),
        }
    }
}
