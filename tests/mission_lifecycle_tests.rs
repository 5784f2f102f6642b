//! Mission and target lifecycle against the SQLite store.

mod harness;
mod support;

use harness::temp_db::TempDb;
use spycats::domain::error::{ADD_TARGET, UPDATE_TARGET};
use spycats::domain::{DomainError, NewTarget, TargetUpdate};
use spycats::port::outbound::Store;
use spycats::testkit::config::services;
use spycats::testkit::domain::new_mission;
use support::assertions::assert_rejected;

#[tokio::test]
async fn mission_creation_enforces_target_count() {
    let db = TempDb::create("target-count");
    let store = db.store();
    let services = services(store.clone());

    assert_rejected(
        services.missions.create(new_mission(&[])).await,
        DomainError::InvalidTargetCount { count: 0 },
    );
    assert_rejected(
        services
            .missions
            .create(new_mission(&["A", "B", "C", "D"]))
            .await,
        DomainError::InvalidTargetCount { count: 4 },
    );
    assert!(store.list_missions().await.unwrap().is_empty());

    let created = services
        .missions
        .create(new_mission(&["A", "B", "C"]))
        .await
        .unwrap();
    let stored = store.list_targets(&created.mission.id).await.unwrap();
    let names: Vec<_> = stored.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn paris_lyon_cascade_closes_mission() {
    let db = TempDb::create("cascade");
    let services = services(db.store());

    let mission = services
        .missions
        .create(new_mission(&["Paris", "Lyon"]))
        .await
        .unwrap();
    let paris = &mission.targets[0];
    let lyon = &mission.targets[1];

    services
        .targets
        .update(&paris.id, TargetUpdate::completed(true))
        .await
        .unwrap();
    let midway = services.missions.get(&mission.mission.id).await.unwrap();
    assert!(!midway.mission.completed);

    services
        .targets
        .update(&lyon.id, TargetUpdate::completed(true))
        .await
        .unwrap();
    let done = services.missions.get(&mission.mission.id).await.unwrap();
    assert!(done.mission.completed);
    assert!(done.targets.iter().all(|t| t.completed));

    assert_rejected(
        services
            .targets
            .create(&mission.mission.id, NewTarget::open("Nice", "FR"))
            .await,
        DomainError::MissionCompleted { action: ADD_TARGET },
    );
}

#[tokio::test]
async fn completed_target_stays_frozen_after_reopen() {
    let db = TempDb::create("frozen");
    let services = services(db.store());

    let mission = services
        .missions
        .create(new_mission(&["Paris", "Lyon"]))
        .await
        .unwrap();
    let paris = &mission.targets[0];

    services
        .targets
        .update(&paris.id, TargetUpdate::completed(true))
        .await
        .unwrap();
    services
        .missions
        .update(&mission.mission.id, false)
        .await
        .unwrap();

    assert_rejected(
        services
            .targets
            .update(&paris.id, TargetUpdate::notes("more intel"))
            .await,
        DomainError::MissionCompleted {
            action: UPDATE_TARGET,
        },
    );
    assert_rejected(
        services.targets.delete(&paris.id).await,
        DomainError::TargetCompleted,
    );

    // A reopened mission below the cap accepts new targets again.
    let nice = services
        .targets
        .create(&mission.mission.id, NewTarget::open("Nice", "FR"))
        .await
        .unwrap();
    assert!(!nice.completed);
    assert_rejected(
        services
            .targets
            .create(&mission.mission.id, NewTarget::open("Lille", "FR"))
            .await,
        DomainError::TooManyTargets,
    );
}

#[tokio::test]
async fn deleting_mission_removes_its_targets() {
    let db = TempDb::create("delete-mission");
    let store = db.store();
    let services = services(store.clone());

    let mission = services
        .missions
        .create(new_mission(&["Paris", "Lyon"]))
        .await
        .unwrap();
    services.missions.delete(&mission.mission.id).await.unwrap();

    assert!(store.list_missions().await.unwrap().is_empty());
    assert!(store
        .list_targets(&mission.mission.id)
        .await
        .unwrap()
        .is_empty());
    assert_rejected(
        services
            .targets
            .update(&mission.targets[0].id, TargetUpdate::notes("late"))
            .await,
        DomainError::TargetNotFound,
    );
}

#[tokio::test]
async fn concurrent_target_creation_never_exceeds_cap() {
    let db = TempDb::create("target-race");
    let store = db.store();
    let services = services(store.clone());

    let mission = services
        .missions
        .create(new_mission(&["A", "B"]))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..4 {
        let services = services.clone();
        let id = mission.mission.id.clone();
        handles.push(tokio::spawn(async move {
            services
                .targets
                .create(&id, NewTarget::open(format!("extra-{i}"), "DE"))
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            created += 1;
        }
    }

    assert_eq!(created, 1);
    let targets = store.list_targets(&mission.mission.id).await.unwrap();
    assert_eq!(targets.len(), 2 + created);
    assert!(targets.len() <= 3);
}
