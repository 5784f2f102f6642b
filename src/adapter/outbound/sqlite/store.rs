//! SQLite record store implementation.
//!
//! Diesel calls are blocking, so every operation runs on the blocking pool
//! with its own pooled connection. Multi-row writes take an immediate
//! transaction so concurrent writers serialize on the database lock instead
//! of failing mid-transaction.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    timestamp, MissionChanges, MissionRow, SpyCatChanges, SpyCatRow, TargetChanges, TargetRow,
};
use crate::adapter::outbound::sqlite::database::schema::{missions, spy_cats, targets};
use crate::domain::{Mission, MissionId, SpyCat, SpyCatId, Target, TargetId};
use crate::error::{Error, Result};
use crate::port::outbound::store::{Change, ChangeSet, Store};

/// SQLite-backed [`Store`].
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            op(&mut *conn)
        })
        .await
        .map_err(|e| Error::Connection(format!("store task failed: {e}")))?
    }
}

fn conflict(entity: &'static str, id: &str) -> Error {
    Error::Conflict {
        entity,
        id: id.to_string(),
    }
}

fn update_spy_cat(conn: &mut SqliteConnection, cat: &SpyCat) -> Result<SpyCat> {
    let changes = SpyCatChanges::next(cat, Utc::now());
    let updated = diesel::update(
        spy_cats::table
            .filter(spy_cats::id.eq(cat.id.as_str()))
            .filter(spy_cats::version.eq(cat.version))
            .filter(spy_cats::deleted_at.is_null()),
    )
    .set(&changes)
    .execute(conn)?;
    if updated == 0 {
        return Err(conflict("spy cat", cat.id.as_str()));
    }
    load_spy_cat(conn, &cat.id)?.ok_or_else(|| conflict("spy cat", cat.id.as_str()))
}

fn update_mission(conn: &mut SqliteConnection, mission: &Mission) -> Result<Mission> {
    let changes = MissionChanges::next(mission, Utc::now());
    let updated = diesel::update(
        missions::table
            .filter(missions::id.eq(mission.id.as_str()))
            .filter(missions::version.eq(mission.version))
            .filter(missions::deleted_at.is_null()),
    )
    .set(&changes)
    .execute(conn)?;
    if updated == 0 {
        return Err(conflict("mission", mission.id.as_str()));
    }
    load_mission(conn, &mission.id)?.ok_or_else(|| conflict("mission", mission.id.as_str()))
}

fn update_target(conn: &mut SqliteConnection, target: &Target) -> Result<()> {
    let changes = TargetChanges::next(target, Utc::now());
    let updated = diesel::update(
        targets::table
            .filter(targets::id.eq(target.id.as_str()))
            .filter(targets::version.eq(target.version))
            .filter(targets::deleted_at.is_null()),
    )
    .set(&changes)
    .execute(conn)?;
    if updated == 0 {
        return Err(conflict("target", target.id.as_str()));
    }
    Ok(())
}

fn insert_target(conn: &mut SqliteConnection, target: &Target) -> Result<()> {
    diesel::insert_into(targets::table)
        .values(TargetRow::from(target))
        .execute(conn)?;
    Ok(())
}

fn load_spy_cat(conn: &mut SqliteConnection, id: &SpyCatId) -> Result<Option<SpyCat>> {
    spy_cats::table
        .filter(spy_cats::id.eq(id.as_str()))
        .filter(spy_cats::deleted_at.is_null())
        .select(SpyCatRow::as_select())
        .first::<SpyCatRow>(conn)
        .optional()?
        .map(SpyCat::try_from)
        .transpose()
}

fn load_mission(conn: &mut SqliteConnection, id: &MissionId) -> Result<Option<Mission>> {
    missions::table
        .filter(missions::id.eq(id.as_str()))
        .filter(missions::deleted_at.is_null())
        .select(MissionRow::as_select())
        .first::<MissionRow>(conn)
        .optional()?
        .map(Mission::try_from)
        .transpose()
}

fn apply(conn: &mut SqliteConnection, change: &Change) -> Result<()> {
    match change {
        Change::InsertTarget(target) => insert_target(conn, target),
        Change::UpdateTarget(target) => update_target(conn, target),
        Change::UpdateMission(mission) => update_mission(conn, mission).map(|_| ()),
        Change::UpdateSpyCat(cat) => update_spy_cat(conn, cat).map(|_| ()),
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn get_spy_cat(&self, id: &SpyCatId) -> Result<Option<SpyCat>> {
        let id = id.clone();
        self.run(move |conn| load_spy_cat(conn, &id)).await
    }

    async fn create_spy_cat(&self, cat: &SpyCat) -> Result<()> {
        let row = SpyCatRow::from(cat);
        self.run(move |conn| {
            diesel::insert_into(spy_cats::table)
                .values(&row)
                .execute(conn)?;
            Ok(())
        })
        .await
    }

    async fn update_spy_cat(&self, cat: &SpyCat) -> Result<SpyCat> {
        let cat = cat.clone();
        self.run(move |conn| update_spy_cat(conn, &cat)).await
    }

    async fn delete_spy_cat(&self, id: &SpyCatId) -> Result<bool> {
        let id = id.to_string();
        self.run(move |conn| {
            conn.immediate_transaction::<_, Error, _>(|conn| {
                let now = timestamp(Utc::now());
                let deleted = diesel::update(
                    spy_cats::table
                        .filter(spy_cats::id.eq(&id))
                        .filter(spy_cats::deleted_at.is_null()),
                )
                .set((
                    spy_cats::deleted_at.eq(&now),
                    spy_cats::updated_at.eq(&now),
                    spy_cats::version.eq(spy_cats::version + 1),
                ))
                .execute(conn)?;
                if deleted == 0 {
                    return Ok(false);
                }

                diesel::update(
                    missions::table
                        .filter(missions::spy_cat_id.eq(&id))
                        .filter(missions::deleted_at.is_null()),
                )
                .set((
                    missions::spy_cat_id.eq(None::<String>),
                    missions::updated_at.eq(&now),
                    missions::version.eq(missions::version + 1),
                ))
                .execute(conn)?;
                Ok(true)
            })
        })
        .await
    }

    async fn list_spy_cats(&self) -> Result<Vec<SpyCat>> {
        self.run(|conn| {
            spy_cats::table
                .filter(spy_cats::deleted_at.is_null())
                .order((spy_cats::created_at.asc(), sql::<BigInt>("rowid").asc()))
                .select(SpyCatRow::as_select())
                .load::<SpyCatRow>(conn)?
                .into_iter()
                .map(SpyCat::try_from)
                .collect()
        })
        .await
    }

    async fn get_mission(&self, id: &MissionId) -> Result<Option<Mission>> {
        let id = id.clone();
        self.run(move |conn| load_mission(conn, &id)).await
    }

    async fn create_mission(&self, mission: &Mission, targets: &[Target]) -> Result<()> {
        let mission = MissionRow::from(mission);
        let rows: Vec<TargetRow> = targets.iter().map(TargetRow::from).collect();
        self.run(move |conn| {
            conn.immediate_transaction::<_, Error, _>(|conn| {
                diesel::insert_into(missions::table)
                    .values(&mission)
                    .execute(conn)?;
                for row in &rows {
                    diesel::insert_into(targets::table).values(row).execute(conn)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn update_mission(&self, mission: &Mission) -> Result<Mission> {
        let mission = mission.clone();
        self.run(move |conn| update_mission(conn, &mission)).await
    }

    async fn delete_mission(&self, mission: &Mission) -> Result<()> {
        let id = mission.id.to_string();
        let version = mission.version;
        self.run(move |conn| {
            conn.immediate_transaction::<_, Error, _>(|conn| {
                let now = timestamp(Utc::now());
                let deleted = diesel::update(
                    missions::table
                        .filter(missions::id.eq(&id))
                        .filter(missions::version.eq(version))
                        .filter(missions::deleted_at.is_null()),
                )
                .set((
                    missions::deleted_at.eq(&now),
                    missions::updated_at.eq(&now),
                    missions::version.eq(missions::version + 1),
                ))
                .execute(conn)?;
                if deleted == 0 {
                    return Err(conflict("mission", &id));
                }

                diesel::update(
                    targets::table
                        .filter(targets::mission_id.eq(&id))
                        .filter(targets::deleted_at.is_null()),
                )
                .set((
                    targets::deleted_at.eq(&now),
                    targets::updated_at.eq(&now),
                    targets::version.eq(targets::version + 1),
                ))
                .execute(conn)?;
                Ok(())
            })
        })
        .await
    }

    async fn list_missions(&self) -> Result<Vec<Mission>> {
        self.run(|conn| {
            missions::table
                .filter(missions::deleted_at.is_null())
                .order((missions::created_at.asc(), sql::<BigInt>("rowid").asc()))
                .select(MissionRow::as_select())
                .load::<MissionRow>(conn)?
                .into_iter()
                .map(Mission::try_from)
                .collect()
        })
        .await
    }

    async fn get_target(&self, id: &TargetId) -> Result<Option<Target>> {
        let id = id.to_string();
        self.run(move |conn| {
            targets::table
                .filter(targets::id.eq(&id))
                .filter(targets::deleted_at.is_null())
                .select(TargetRow::as_select())
                .first::<TargetRow>(conn)
                .optional()?
                .map(Target::try_from)
                .transpose()
        })
        .await
    }

    async fn delete_target(&self, target: &Target) -> Result<()> {
        let id = target.id.to_string();
        let version = target.version;
        self.run(move |conn| {
            let now = timestamp(Utc::now());
            let deleted = diesel::update(
                targets::table
                    .filter(targets::id.eq(&id))
                    .filter(targets::version.eq(version))
                    .filter(targets::deleted_at.is_null()),
            )
            .set((
                targets::deleted_at.eq(&now),
                targets::updated_at.eq(&now),
                targets::version.eq(targets::version + 1),
            ))
            .execute(conn)?;
            if deleted == 0 {
                return Err(conflict("target", &id));
            }
            Ok(())
        })
        .await
    }

    async fn list_targets(&self, mission_id: &MissionId) -> Result<Vec<Target>> {
        let mission_id = mission_id.to_string();
        self.run(move |conn| {
            targets::table
                .filter(targets::mission_id.eq(&mission_id))
                .filter(targets::deleted_at.is_null())
                .order((targets::created_at.asc(), sql::<BigInt>("rowid").asc()))
                .select(TargetRow::as_select())
                .load::<TargetRow>(conn)?
                .into_iter()
                .map(Target::try_from)
                .collect()
        })
        .await
    }

    async fn commit(&self, changes: ChangeSet) -> Result<()> {
        if changes.is_empty() {
            return Ok(());
        }
        self.run(move |conn| {
            conn.immediate_transaction::<_, Error, _>(|conn| {
                for change in changes.iter() {
                    apply(conn, change)?;
                }
                Ok(())
            })
        })
        .await
    }
}
