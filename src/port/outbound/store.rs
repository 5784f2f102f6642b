//! Record store port for spy cats, missions and targets.
//!
//! Reads only ever return live rows: anything carrying a `deleted_at`
//! tombstone is invisible. Writes are optimistic: an update names the
//! version it was read at and fails with [`Error::Conflict`] if the stored
//! row has moved on or was deleted in the meantime.
//!
//! [`Error::Conflict`]: crate::error::Error::Conflict

use async_trait::async_trait;

use crate::domain::{Mission, MissionId, SpyCat, SpyCatId, Target, TargetId};
use crate::error::Result;

/// A single staged write inside a [`ChangeSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Insert a new target row.
    InsertTarget(Target),
    /// Overwrite a target, checked against its `version`.
    UpdateTarget(Target),
    /// Overwrite a mission, checked against its `version`.
    UpdateMission(Mission),
    /// Overwrite a spy cat, checked against its `version`.
    UpdateSpyCat(SpyCat),
}

impl Change {
    /// Entity kind, for logs and conflict reports.
    #[must_use]
    pub fn entity(&self) -> &'static str {
        match self {
            Change::InsertTarget(_) | Change::UpdateTarget(_) => "target",
            Change::UpdateMission(_) => "mission",
            Change::UpdateSpyCat(_) => "spy cat",
        }
    }
}

/// Writes that must land together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn insert_target(mut self, target: Target) -> Self {
        self.changes.push(Change::InsertTarget(target));
        self
    }

    #[must_use]
    pub fn update_target(mut self, target: Target) -> Self {
        self.changes.push(Change::UpdateTarget(target));
        self
    }

    #[must_use]
    pub fn update_mission(mut self, mission: Mission) -> Self {
        self.changes.push(Change::UpdateMission(mission));
        self
    }

    #[must_use]
    pub fn update_spy_cat(mut self, cat: SpyCat) -> Self {
        self.changes.push(Change::UpdateSpyCat(cat));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

/// Durable storage for the agency's records.
///
/// Every write stamps `updated_at` and stores `version + 1`; the returned
/// entity reflects what was stored.
#[async_trait]
pub trait Store: Send + Sync {
    /// Get a live spy cat by ID.
    async fn get_spy_cat(&self, id: &SpyCatId) -> Result<Option<SpyCat>>;

    /// Insert a new spy cat.
    async fn create_spy_cat(&self, cat: &SpyCat) -> Result<()>;

    /// Versioned full-row overwrite of a spy cat.
    async fn update_spy_cat(&self, cat: &SpyCat) -> Result<SpyCat>;

    /// Tombstone a spy cat and release any mission that references it.
    ///
    /// Returns false if no live cat had this ID.
    async fn delete_spy_cat(&self, id: &SpyCatId) -> Result<bool>;

    /// All live spy cats in creation order.
    async fn list_spy_cats(&self) -> Result<Vec<SpyCat>>;

    /// Get a live mission by ID.
    async fn get_mission(&self, id: &MissionId) -> Result<Option<Mission>>;

    /// Insert a mission together with its initial targets.
    async fn create_mission(&self, mission: &Mission, targets: &[Target]) -> Result<()>;

    /// Versioned full-row overwrite of a mission.
    async fn update_mission(&self, mission: &Mission) -> Result<Mission>;

    /// Versioned tombstone of a mission and all of its targets.
    async fn delete_mission(&self, mission: &Mission) -> Result<()>;

    /// All live missions in creation order.
    async fn list_missions(&self) -> Result<Vec<Mission>>;

    /// Get a live target by ID.
    async fn get_target(&self, id: &TargetId) -> Result<Option<Target>>;

    /// Versioned tombstone of a single target.
    async fn delete_target(&self, target: &Target) -> Result<()>;

    /// Live targets of a mission in creation order.
    async fn list_targets(&self, mission_id: &MissionId) -> Result<Vec<Target>>;

    /// Apply every change in one transaction.
    async fn commit(&self, changes: ChangeSet) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTarget;

    #[test]
    fn change_set_keeps_staging_order() {
        let mission = Mission::new(false);
        let target = Target::new(mission.id.clone(), NewTarget::open("Paris", "FR"));

        let changes = ChangeSet::new()
            .update_mission(mission.clone())
            .insert_target(target.clone());

        assert_eq!(changes.len(), 2);
        let kinds: Vec<_> = changes.iter().map(Change::entity).collect();
        assert_eq!(kinds, vec!["mission", "target"]);
        assert_eq!(
            changes.into_iter().last(),
            Some(Change::InsertTarget(target))
        );
    }
}
