//! Missions and the rules that bound their targets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{MissionId, SpyCatId};
use super::spy_cat::SpyCat;
use super::target::{NewTarget, Target};

/// Fewest targets a mission is created with.
pub const MIN_TARGETS: usize = 1;

/// Most targets a mission may ever hold.
pub const MAX_TARGETS: usize = 3;

/// A mission record.
///
/// Targets are stored separately and joined in [`MissionDetails`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: MissionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy_cat_id: Option<SpyCatId>,
    pub completed: bool,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mission {
    #[must_use]
    pub fn new(completed: bool) -> Self {
        let now = Utc::now();
        Self {
            id: MissionId::new(),
            spy_cat_id: None,
            completed,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if a cat has been assigned.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.spy_cat_id.is_some()
    }
}

/// A mission joined with its live targets and assigned cat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissionDetails {
    #[serde(flatten)]
    pub mission: Mission,
    pub targets: Vec<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spy_cat: Option<SpyCat>,
}

/// Input for a new mission.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewMission {
    #[serde(default)]
    pub completed: bool,
    pub targets: Vec<NewTarget>,
}

/// Check the target count a mission is created with.
pub fn validate_target_count(count: usize) -> Result<(), DomainError> {
    if !(MIN_TARGETS..=MAX_TARGETS).contains(&count) {
        return Err(DomainError::InvalidTargetCount { count });
    }
    Ok(())
}

/// True once every target is completed.
///
/// An empty slice never completes a mission.
#[must_use]
pub fn all_targets_completed(targets: &[Target]) -> bool {
    !targets.is_empty() && targets.iter().all(|t| t.completed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(mission: &Mission, completed: bool) -> Target {
        Target::new(
            mission.id.clone(),
            NewTarget {
                completed,
                ..NewTarget::open("Lyon", "FR")
            },
        )
    }

    #[test]
    fn target_count_bounds() {
        assert_eq!(
            validate_target_count(0),
            Err(DomainError::InvalidTargetCount { count: 0 })
        );
        assert!(validate_target_count(1).is_ok());
        assert!(validate_target_count(3).is_ok());
        assert_eq!(
            validate_target_count(4),
            Err(DomainError::InvalidTargetCount { count: 4 })
        );
    }

    #[test]
    fn completion_requires_every_target() {
        let mission = Mission::new(false);
        assert!(!all_targets_completed(&[]));
        assert!(!all_targets_completed(&[
            target(&mission, true),
            target(&mission, false)
        ]));
        assert!(all_targets_completed(&[
            target(&mission, true),
            target(&mission, true)
        ]));
    }

    #[test]
    fn details_serialize_flat() {
        let mission = Mission::new(false);
        let details = MissionDetails {
            targets: vec![target(&mission, false)],
            mission: mission.clone(),
            spy_cat: None,
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], mission.id.as_str());
        assert_eq!(json["completed"], false);
        assert_eq!(json["targets"].as_array().unwrap().len(), 1);
        assert!(json.get("spyCat").is_none());
        assert!(json.get("spyCatId").is_none());
    }
}
