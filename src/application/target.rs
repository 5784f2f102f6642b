//! Target creation, updates and deletion, including the mission completion
//! cascade.
//!
//! Every target write also rewrites the parent mission at the version that
//! was read. Two requests racing on the same mission therefore cannot both
//! commit: one of them fails with a conflict instead of pushing the mission
//! past its target cap or missing a completion.

use std::sync::Arc;

use tracing::info;

use super::reject;
use crate::domain::error::{ADD_TARGET, UPDATE_TARGET};
use crate::domain::mission::all_targets_completed;
use crate::domain::{
    DomainError, MissionId, NewTarget, Target, TargetId, TargetUpdate, MAX_TARGETS,
};
use crate::error::Result;
use crate::port::outbound::{ChangeSet, Store};

/// Target use cases.
pub struct TargetService {
    store: Arc<dyn Store>,
}

impl TargetService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Add a target to an open mission that has room for it.
    pub async fn create(&self, mission_id: &MissionId, input: NewTarget) -> Result<Target> {
        info!(mission_id = %mission_id, name = %input.name, "Creating target");

        if let Err(err) = input.validate() {
            return reject("create target", err);
        }
        let Some(mission) = self.store.get_mission(mission_id).await? else {
            return reject("create target", DomainError::MissionNotFound);
        };
        if mission.completed {
            return reject(
                "create target",
                DomainError::MissionCompleted { action: ADD_TARGET },
            );
        }
        let existing = self.store.list_targets(mission_id).await?;
        if existing.len() >= MAX_TARGETS {
            return reject("create target", DomainError::TooManyTargets);
        }

        let target = Target::new(mission.id.clone(), input);
        self.store
            .commit(
                ChangeSet::new()
                    .update_mission(mission)
                    .insert_target(target.clone()),
            )
            .await?;

        info!(target_id = %target.id, mission_id = %mission_id, "Target created");
        Ok(target)
    }

    /// Apply a partial update.
    ///
    /// Notes are frozen once the target or its mission is completed.
    /// Completing the last open target completes the mission in the same
    /// commit.
    pub async fn update(&self, id: &TargetId, update: TargetUpdate) -> Result<Target> {
        info!(
            target_id = %id,
            notes = update.notes.is_some(),
            completed = ?update.completed,
            "Updating target"
        );

        let Some(mut target) = self.store.get_target(id).await? else {
            return reject("update target", DomainError::TargetNotFound);
        };
        let Some(mut mission) = self.store.get_mission(&target.mission_id).await? else {
            return reject("update target", DomainError::MissionNotFound);
        };

        if let Some(notes) = update.notes {
            if target.completed || mission.completed {
                return reject(
                    "update target",
                    DomainError::MissionCompleted {
                        action: UPDATE_TARGET,
                    },
                );
            }
            target.notes = notes;
        }

        let mut cascaded = false;
        if let Some(completed) = update.completed {
            target.completed = completed;
            if completed && !mission.completed {
                let siblings: Vec<Target> = self
                    .store
                    .list_targets(&mission.id)
                    .await?
                    .into_iter()
                    .map(|t| if t.id == target.id { target.clone() } else { t })
                    .collect();
                if all_targets_completed(&siblings) {
                    mission.completed = true;
                    cascaded = true;
                }
            }
        }

        let mission_id = mission.id.clone();
        self.store
            .commit(
                ChangeSet::new()
                    .update_target(target)
                    .update_mission(mission),
            )
            .await?;

        if cascaded {
            info!(mission_id = %mission_id, "All targets completed, mission completed");
        }
        info!(target_id = %id, "Target updated");

        match self.store.get_target(id).await? {
            Some(target) => Ok(target),
            None => reject("update target", DomainError::TargetNotFound),
        }
    }

    /// Delete an open target.
    pub async fn delete(&self, id: &TargetId) -> Result<()> {
        info!(target_id = %id, "Deleting target");

        let Some(target) = self.store.get_target(id).await? else {
            return reject("delete target", DomainError::TargetNotFound);
        };
        if target.completed {
            return reject("delete target", DomainError::TargetCompleted);
        }
        self.store.delete_target(&target).await?;

        info!(target_id = %id, "Target deleted");
        Ok(())
    }

    /// Live targets of a mission. An unknown mission has none.
    pub async fn list(&self, mission_id: &MissionId) -> Result<Vec<Target>> {
        let targets = self.store.list_targets(mission_id).await?;
        info!(mission_id = %mission_id, count = targets.len(), "Listed targets");
        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::application::MissionService;
    use crate::domain::{MissionDetails, NewMission};
    use crate::error::Error;

    struct Fixture {
        store: Arc<MemoryStore>,
        missions: MissionService,
        targets: TargetService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            missions: MissionService::new(store.clone()),
            targets: TargetService::new(store.clone()),
            store,
        }
    }

    async fn mission(f: &Fixture, names: &[&str]) -> MissionDetails {
        f.missions
            .create(NewMission {
                completed: false,
                targets: names.iter().map(|n| NewTarget::open(*n, "FR")).collect(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn cannot_exceed_three_targets() {
        let f = fixture();
        let m = mission(&f, &["A", "B", "C"]).await;

        let err = f
            .targets
            .create(&m.mission.id, NewTarget::open("D", "DE"))
            .await
            .unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::TooManyTargets));
        assert_eq!(f.targets.list(&m.mission.id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn completed_mission_rejects_new_targets_below_cap() {
        let f = fixture();
        let m = mission(&f, &["A"]).await;
        f.missions.update(&m.mission.id, true).await.unwrap();

        let err = f
            .targets
            .create(&m.mission.id, NewTarget::open("B", "DE"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot add target to completed mission");
    }

    #[tokio::test]
    async fn create_on_missing_mission_is_not_found() {
        let f = fixture();
        let err = f
            .targets
            .create(&MissionId::from("ghost"), NewTarget::open("A", "FR"))
            .await
            .unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::MissionNotFound));
    }

    #[tokio::test]
    async fn completing_last_open_target_completes_mission() {
        let f = fixture();
        let m = mission(&f, &["Paris", "Lyon"]).await;
        let (paris, lyon) = (&m.targets[0], &m.targets[1]);

        f.targets
            .update(&paris.id, TargetUpdate::completed(true))
            .await
            .unwrap();
        let after_first = f.missions.get(&m.mission.id).await.unwrap();
        assert!(!after_first.mission.completed);

        let done = f
            .targets
            .update(&lyon.id, TargetUpdate::completed(true))
            .await
            .unwrap();
        assert!(done.completed);
        assert!(f.missions.get(&m.mission.id).await.unwrap().mission.completed);

        let err = f
            .targets
            .create(&m.mission.id, NewTarget::open("Nice", "FR"))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::MissionCompleted { action: ADD_TARGET })
        );
    }

    #[tokio::test]
    async fn notes_frozen_on_completed_target_even_if_mission_reopened() {
        let f = fixture();
        let m = mission(&f, &["Paris", "Lyon"]).await;
        let paris = &m.targets[0];

        f.targets
            .update(&paris.id, TargetUpdate::completed(true))
            .await
            .unwrap();
        f.missions.update(&m.mission.id, false).await.unwrap();

        let err = f
            .targets
            .update(&paris.id, TargetUpdate::notes("new intel"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "cannot update target in completed mission");

        // Still-open targets of the reopened mission remain editable.
        let lyon = f
            .targets
            .update(&m.targets[1].id, TargetUpdate::notes("station"))
            .await
            .unwrap();
        assert_eq!(lyon.notes, "station");
    }

    #[tokio::test]
    async fn notes_frozen_when_mission_completed() {
        let f = fixture();
        let m = mission(&f, &["Paris"]).await;
        f.missions.update(&m.mission.id, true).await.unwrap();

        let err = f
            .targets
            .update(&m.targets[0].id, TargetUpdate::notes("late"))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::MissionCompleted {
                action: UPDATE_TARGET
            })
        );
    }

    #[tokio::test]
    async fn notes_checked_against_prior_state() {
        let f = fixture();
        let m = mission(&f, &["Paris", "Lyon"]).await;

        // Notes and completion in one request: the target was open before.
        let updated = f
            .targets
            .update(
                &m.targets[0].id,
                TargetUpdate {
                    notes: Some("final report".into()),
                    completed: Some(true),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.notes, "final report");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn completed_target_cannot_be_deleted() {
        let f = fixture();
        let m = mission(&f, &["Paris", "Lyon"]).await;

        f.targets
            .update(&m.targets[0].id, TargetUpdate::completed(true))
            .await
            .unwrap();
        let err = f.targets.delete(&m.targets[0].id).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::TargetCompleted));

        f.targets.delete(&m.targets[1].id).await.unwrap();
        let remaining = f.targets.list(&m.mission.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Paris");
    }

    #[tokio::test]
    async fn missing_target_is_not_found() {
        let f = fixture();
        let id = TargetId::from("ghost");

        let err = f
            .targets
            .update(&id, TargetUpdate::completed(true))
            .await
            .unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::TargetNotFound));

        let err = f.targets.delete(&id).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::TargetNotFound));
    }

    #[tokio::test]
    async fn stale_mission_write_rolls_back_target_write() {
        let f = fixture();
        let m = mission(&f, &["Paris"]).await;
        let mut target = m.targets[0].clone();
        target.completed = true;

        // Someone else touched the mission after it was read.
        f.missions.update(&m.mission.id, false).await.unwrap();

        let err = f
            .store
            .commit(
                ChangeSet::new()
                    .update_target(target.clone())
                    .update_mission(m.mission.clone()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { .. }));
        let stored = f.store.get_target(&target.id).await.unwrap().unwrap();
        assert!(!stored.completed);
    }
}
