//! Mission creation, completion, deletion and cat assignment.

use std::sync::Arc;

use tracing::info;

use super::reject;
use crate::domain::mission::validate_target_count;
use crate::domain::{
    DomainError, Mission, MissionDetails, MissionId, NewMission, SpyCatId, Target,
};
use crate::error::Result;
use crate::port::outbound::{ChangeSet, Store};

/// Mission use cases.
pub struct MissionService {
    store: Arc<dyn Store>,
}

impl MissionService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create a mission together with its 1 to 3 initial targets.
    pub async fn create(&self, input: NewMission) -> Result<MissionDetails> {
        info!(
            targets = input.targets.len(),
            completed = input.completed,
            "Creating mission"
        );

        if let Err(err) = validate_target_count(input.targets.len()) {
            return reject("create mission", err);
        }
        for target in &input.targets {
            if let Err(err) = target.validate() {
                return reject("create mission", err);
            }
        }

        let mission = Mission::new(input.completed);
        let targets: Vec<Target> = input
            .targets
            .into_iter()
            .map(|t| Target::new(mission.id.clone(), t))
            .collect();
        self.store.create_mission(&mission, &targets).await?;

        info!(mission_id = %mission.id, targets = targets.len(), "Mission created");
        Ok(MissionDetails {
            mission,
            targets,
            spy_cat: None,
        })
    }

    pub async fn get(&self, id: &MissionId) -> Result<MissionDetails> {
        let Some(mission) = self.store.get_mission(id).await? else {
            return reject("get mission", DomainError::MissionNotFound);
        };
        self.details(mission).await
    }

    /// Set the completed flag directly.
    ///
    /// This never touches targets: reopening a mission leaves completed
    /// targets completed.
    pub async fn update(&self, id: &MissionId, completed: bool) -> Result<MissionDetails> {
        info!(mission_id = %id, completed, "Updating mission");

        let Some(mut mission) = self.store.get_mission(id).await? else {
            return reject("update mission", DomainError::MissionNotFound);
        };
        mission.completed = completed;
        let mission = self.store.update_mission(&mission).await?;

        info!(mission_id = %mission.id, version = mission.version, "Mission updated");
        self.details(mission).await
    }

    /// Delete an unassigned mission and its targets.
    pub async fn delete(&self, id: &MissionId) -> Result<()> {
        info!(mission_id = %id, "Deleting mission");

        let Some(mission) = self.store.get_mission(id).await? else {
            return reject("delete mission", DomainError::MissionNotFound);
        };
        if mission.is_assigned() {
            return reject("delete mission", DomainError::AssignedToCat);
        }
        self.store.delete_mission(&mission).await?;

        info!(mission_id = %id, "Mission deleted");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<MissionDetails>> {
        let missions = self.store.list_missions().await?;
        let mut details = Vec::with_capacity(missions.len());
        for mission in missions {
            details.push(self.details(mission).await?);
        }
        info!(count = details.len(), "Listed missions");
        Ok(details)
    }

    /// Assign a free cat to an unassigned mission.
    ///
    /// Checks run in order: mission exists, mission has no cat, cat exists,
    /// cat has no mission. Both sides of the link are written in one commit.
    pub async fn assign(&self, mission_id: &MissionId, spy_cat_id: &SpyCatId) -> Result<()> {
        info!(mission_id = %mission_id, spy_cat_id = %spy_cat_id, "Assigning spy cat");

        let Some(mut mission) = self.store.get_mission(mission_id).await? else {
            return reject("assign spy cat", DomainError::MissionNotFound);
        };
        if mission.is_assigned() {
            return reject("assign spy cat", DomainError::AlreadyAssigned);
        }
        let Some(mut cat) = self.store.get_spy_cat(spy_cat_id).await? else {
            return reject("assign spy cat", DomainError::SpyCatNotFound);
        };
        if cat.is_assigned() {
            return reject("assign spy cat", DomainError::CatBusy);
        }

        mission.spy_cat_id = Some(cat.id.clone());
        cat.mission_id = Some(mission.id.clone());
        self.store
            .commit(ChangeSet::new().update_mission(mission).update_spy_cat(cat))
            .await?;

        info!(mission_id = %mission_id, spy_cat_id = %spy_cat_id, "Spy cat assigned");
        Ok(())
    }

    async fn details(&self, mission: Mission) -> Result<MissionDetails> {
        let targets = self.store.list_targets(&mission.id).await?;
        let spy_cat = match &mission.spy_cat_id {
            Some(id) => self.store.get_spy_cat(id).await?,
            None => None,
        };
        Ok(MissionDetails {
            mission,
            targets,
            spy_cat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::{NewSpyCat, NewTarget, SpyCat};
    use rust_decimal_macros::dec;

    fn setup() -> (Arc<MemoryStore>, MissionService) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), MissionService::new(store))
    }

    fn new_mission(count: usize) -> NewMission {
        NewMission {
            completed: false,
            targets: (0..count)
                .map(|i| NewTarget::open(format!("target-{i}"), "FR"))
                .collect(),
        }
    }

    async fn hire(store: &MemoryStore, name: &str) -> SpyCat {
        let cat = SpyCat::new(NewSpyCat {
            name: name.into(),
            years_of_experience: 1,
            breed: "Siamese".into(),
            salary: dec!(100),
        });
        store.create_spy_cat(&cat).await.unwrap();
        cat
    }

    #[tokio::test]
    async fn create_rejects_bad_target_counts() {
        let (store, service) = setup();

        for count in [0, 4] {
            let err = service.create(new_mission(count)).await.unwrap_err();
            assert_eq!(
                err.as_domain(),
                Some(&DomainError::InvalidTargetCount { count })
            );
        }
        assert!(store.list_missions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_returns_mission_with_targets() {
        let (_, service) = setup();
        let created = service.create(new_mission(3)).await.unwrap();
        assert_eq!(created.targets.len(), 3);
        assert!(created
            .targets
            .iter()
            .all(|t| t.mission_id == created.mission.id));

        let fetched = service.get(&created.mission.id).await.unwrap();
        assert_eq!(fetched.targets, created.targets);
        assert!(fetched.spy_cat.is_none());
    }

    #[tokio::test]
    async fn assign_links_both_sides() {
        let (store, service) = setup();
        let mission = service.create(new_mission(1)).await.unwrap().mission;
        let cat = hire(&store, "Tom").await;

        service.assign(&mission.id, &cat.id).await.unwrap();

        let details = service.get(&mission.id).await.unwrap();
        assert_eq!(details.mission.spy_cat_id.as_ref(), Some(&cat.id));
        assert_eq!(details.spy_cat.unwrap().mission_id, Some(mission.id.clone()));
    }

    #[tokio::test]
    async fn assign_checks_run_in_order() {
        let (store, service) = setup();
        let m = service.create(new_mission(1)).await.unwrap().mission;
        let n = service.create(new_mission(1)).await.unwrap().mission;
        let a = hire(&store, "A").await;
        let b = hire(&store, "B").await;

        service.assign(&m.id, &a.id).await.unwrap();

        let busy = service.assign(&n.id, &a.id).await.unwrap_err();
        assert_eq!(busy.as_domain(), Some(&DomainError::CatBusy));

        let taken = service.assign(&m.id, &b.id).await.unwrap_err();
        assert_eq!(taken.as_domain(), Some(&DomainError::AlreadyAssigned));

        // Mission checks come before cat checks.
        let missing = service
            .assign(&MissionId::from("nope"), &SpyCatId::from("nobody"))
            .await
            .unwrap_err();
        assert_eq!(missing.as_domain(), Some(&DomainError::MissionNotFound));

        let taken_first = service
            .assign(&m.id, &SpyCatId::from("nobody"))
            .await
            .unwrap_err();
        assert_eq!(taken_first.as_domain(), Some(&DomainError::AlreadyAssigned));

        let no_cat = service
            .assign(&n.id, &SpyCatId::from("nobody"))
            .await
            .unwrap_err();
        assert_eq!(no_cat.as_domain(), Some(&DomainError::SpyCatNotFound));
    }

    #[tokio::test]
    async fn assigned_mission_cannot_be_deleted() {
        let (store, service) = setup();
        let mission = service.create(new_mission(2)).await.unwrap().mission;
        let cat = hire(&store, "Tom").await;
        service.assign(&mission.id, &cat.id).await.unwrap();

        let err = service.delete(&mission.id).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::AssignedToCat));
        assert_eq!(service.get(&mission.id).await.unwrap().targets.len(), 2);
    }

    #[tokio::test]
    async fn delete_removes_mission_and_targets() {
        let (store, service) = setup();
        let created = service.create(new_mission(2)).await.unwrap();
        let id = created.mission.id.clone();

        service.delete(&id).await.unwrap();

        let err = service.get(&id).await.unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::MissionNotFound));
        assert!(store.list_targets(&id).await.unwrap().is_empty());
        assert!(store
            .get_target(&created.targets[0].id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_sets_completed_flag_only() {
        let (_, service) = setup();
        let created = service.create(new_mission(2)).await.unwrap();

        let done = service.update(&created.mission.id, true).await.unwrap();
        assert!(done.mission.completed);
        assert!(done.targets.iter().all(|t| !t.completed));

        let reopened = service.update(&created.mission.id, false).await.unwrap();
        assert!(!reopened.mission.completed);
        assert_eq!(reopened.mission.version, 3);
    }

    #[tokio::test]
    async fn list_populates_targets_and_cat() {
        let (store, service) = setup();
        let first = service.create(new_mission(1)).await.unwrap().mission;
        service.create(new_mission(2)).await.unwrap();
        let cat = hire(&store, "Tom").await;
        service.assign(&first.id, &cat.id).await.unwrap();

        let missions = service.list().await.unwrap();
        assert_eq!(missions.len(), 2);
        assert_eq!(missions[0].mission.id, first.id);
        assert_eq!(missions[0].spy_cat.as_ref().map(|c| &c.id), Some(&cat.id));
        assert_eq!(missions[1].targets.len(), 2);
        assert!(missions[1].spy_cat.is_none());
    }
}
