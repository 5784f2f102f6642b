//! In-memory record store.
//!
//! Same semantics as the SQLite store: tombstones, versioned writes and
//! all-or-nothing commits. All three tables live behind one lock so a
//! commit can stage against a copy and swap it in.

use std::collections::HashMap;
use std::hash::Hash;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::domain::{Mission, MissionId, SpyCat, SpyCatId, Target, TargetId};
use crate::error::{Error, Result};
use crate::port::outbound::store::{Change, ChangeSet, Store};

#[derive(Debug, Clone)]
struct Row<T> {
    value: T,
    seq: u64,
    deleted_at: Option<DateTime<Utc>>,
}

impl<T> Row<T> {
    fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    spy_cats: HashMap<SpyCatId, Row<SpyCat>>,
    missions: HashMap<MissionId, Row<Mission>>,
    targets: HashMap<TargetId, Row<Target>>,
    next_seq: u64,
}

fn live<K, T>(table: &HashMap<K, Row<T>>, id: &K) -> Option<T>
where
    K: Eq + Hash,
    T: Clone,
{
    table.get(id).filter(|r| r.is_live()).map(|r| r.value.clone())
}

fn ordered<'a, T, I>(rows: I) -> Vec<T>
where
    T: Clone + 'a,
    I: Iterator<Item = &'a Row<T>>,
{
    let mut rows: Vec<_> = rows.filter(|r| r.is_live()).collect();
    rows.sort_by_key(|r| r.seq);
    rows.into_iter().map(|r| r.value.clone()).collect()
}

/// Find the live row at `version`, or report a conflict.
fn versioned<'a, K, T>(
    table: &'a mut HashMap<K, Row<T>>,
    id: &K,
    version: i64,
    entity: &'static str,
    current: impl Fn(&T) -> i64,
) -> Result<&'a mut Row<T>>
where
    K: Eq + Hash + ToString,
{
    match table.get_mut(id) {
        Some(row) if row.is_live() && current(&row.value) == version => Ok(row),
        _ => Err(Error::Conflict {
            entity,
            id: id.to_string(),
        }),
    }
}

impl Tables {
    fn seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn insert_spy_cat(&mut self, cat: &SpyCat) -> Result<()> {
        if self.spy_cats.contains_key(&cat.id) {
            return Err(Error::Database(format!("duplicate spy cat id {}", cat.id)));
        }
        let seq = self.seq();
        self.spy_cats.insert(
            cat.id.clone(),
            Row {
                value: cat.clone(),
                seq,
                deleted_at: None,
            },
        );
        Ok(())
    }

    fn insert_mission(&mut self, mission: &Mission) -> Result<()> {
        if self.missions.contains_key(&mission.id) {
            return Err(Error::Database(format!(
                "duplicate mission id {}",
                mission.id
            )));
        }
        let seq = self.seq();
        self.missions.insert(
            mission.id.clone(),
            Row {
                value: mission.clone(),
                seq,
                deleted_at: None,
            },
        );
        Ok(())
    }

    fn insert_target(&mut self, target: &Target) -> Result<()> {
        if self.targets.contains_key(&target.id) {
            return Err(Error::Database(format!("duplicate target id {}", target.id)));
        }
        if !self.missions.contains_key(&target.mission_id) {
            return Err(Error::Database(format!(
                "target {} references unknown mission {}",
                target.id, target.mission_id
            )));
        }
        let seq = self.seq();
        self.targets.insert(
            target.id.clone(),
            Row {
                value: target.clone(),
                seq,
                deleted_at: None,
            },
        );
        Ok(())
    }

    fn update_spy_cat(&mut self, cat: &SpyCat, now: DateTime<Utc>) -> Result<SpyCat> {
        let row = versioned(&mut self.spy_cats, &cat.id, cat.version, "spy cat", |c| {
            c.version
        })?;
        row.value = SpyCat {
            version: cat.version + 1,
            updated_at: now,
            ..cat.clone()
        };
        Ok(row.value.clone())
    }

    fn update_mission(&mut self, mission: &Mission, now: DateTime<Utc>) -> Result<Mission> {
        let row = versioned(
            &mut self.missions,
            &mission.id,
            mission.version,
            "mission",
            |m| m.version,
        )?;
        row.value = Mission {
            version: mission.version + 1,
            updated_at: now,
            ..mission.clone()
        };
        Ok(row.value.clone())
    }

    fn update_target(&mut self, target: &Target, now: DateTime<Utc>) -> Result<Target> {
        let row = versioned(
            &mut self.targets,
            &target.id,
            target.version,
            "target",
            |t| t.version,
        )?;
        // Parent mission is fixed after creation.
        let mission_id = row.value.mission_id.clone();
        row.value = Target {
            mission_id,
            version: target.version + 1,
            updated_at: now,
            ..target.clone()
        };
        Ok(row.value.clone())
    }

    fn apply(&mut self, change: &Change, now: DateTime<Utc>) -> Result<()> {
        match change {
            Change::InsertTarget(target) => self.insert_target(target),
            Change::UpdateTarget(target) => self.update_target(target, now).map(|_| ()),
            Change::UpdateMission(mission) => self.update_mission(mission, now).map(|_| ()),
            Change::UpdateSpyCat(cat) => self.update_spy_cat(cat, now).map(|_| ()),
        }
    }
}

/// In-memory [`Store`], used in tests and for throwaway local runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_spy_cat(&self, id: &SpyCatId) -> Result<Option<SpyCat>> {
        Ok(live(&self.tables.read().spy_cats, id))
    }

    async fn create_spy_cat(&self, cat: &SpyCat) -> Result<()> {
        self.tables.write().insert_spy_cat(cat)
    }

    async fn update_spy_cat(&self, cat: &SpyCat) -> Result<SpyCat> {
        self.tables.write().update_spy_cat(cat, Utc::now())
    }

    async fn delete_spy_cat(&self, id: &SpyCatId) -> Result<bool> {
        let now = Utc::now();
        let mut tables = self.tables.write();

        match tables.spy_cats.get_mut(id) {
            Some(row) if row.is_live() => {
                row.deleted_at = Some(now);
                row.value.version += 1;
                row.value.updated_at = now;
            }
            _ => return Ok(false),
        }

        for row in tables.missions.values_mut().filter(|r| r.is_live()) {
            if row.value.spy_cat_id.as_ref() == Some(id) {
                row.value.spy_cat_id = None;
                row.value.version += 1;
                row.value.updated_at = now;
            }
        }
        Ok(true)
    }

    async fn list_spy_cats(&self) -> Result<Vec<SpyCat>> {
        Ok(ordered(self.tables.read().spy_cats.values()))
    }

    async fn get_mission(&self, id: &MissionId) -> Result<Option<Mission>> {
        Ok(live(&self.tables.read().missions, id))
    }

    async fn create_mission(&self, mission: &Mission, targets: &[Target]) -> Result<()> {
        let mut tables = self.tables.write();
        let mut staged = tables.clone();
        staged.insert_mission(mission)?;
        for target in targets {
            staged.insert_target(target)?;
        }
        *tables = staged;
        Ok(())
    }

    async fn update_mission(&self, mission: &Mission) -> Result<Mission> {
        self.tables.write().update_mission(mission, Utc::now())
    }

    async fn delete_mission(&self, mission: &Mission) -> Result<()> {
        let now = Utc::now();
        let mut tables = self.tables.write();

        let row = versioned(
            &mut tables.missions,
            &mission.id,
            mission.version,
            "mission",
            |m| m.version,
        )?;
        row.deleted_at = Some(now);
        row.value.version += 1;
        row.value.updated_at = now;

        for row in tables.targets.values_mut().filter(|r| r.is_live()) {
            if row.value.mission_id == mission.id {
                row.deleted_at = Some(now);
                row.value.version += 1;
                row.value.updated_at = now;
            }
        }
        Ok(())
    }

    async fn list_missions(&self) -> Result<Vec<Mission>> {
        Ok(ordered(self.tables.read().missions.values()))
    }

    async fn get_target(&self, id: &TargetId) -> Result<Option<Target>> {
        Ok(live(&self.tables.read().targets, id))
    }

    async fn delete_target(&self, target: &Target) -> Result<()> {
        let now = Utc::now();
        let mut tables = self.tables.write();
        let row = versioned(
            &mut tables.targets,
            &target.id,
            target.version,
            "target",
            |t| t.version,
        )?;
        row.deleted_at = Some(now);
        row.value.version += 1;
        row.value.updated_at = now;
        Ok(())
    }

    async fn list_targets(&self, mission_id: &MissionId) -> Result<Vec<Target>> {
        let tables = self.tables.read();
        Ok(ordered(
            tables
                .targets
                .values()
                .filter(|r| &r.value.mission_id == mission_id),
        ))
    }

    async fn commit(&self, changes: ChangeSet) -> Result<()> {
        let now = Utc::now();
        let mut tables = self.tables.write();
        let mut staged = tables.clone();
        for change in changes.iter() {
            staged.apply(change, now)?;
        }
        *tables = staged;
        Ok(())
    }
}
