//! Database model types for Diesel ORM.
//!
//! Timestamps are RFC 3339 text with fixed microsecond precision so that
//! lexical order matches chronological order. Salaries are decimal text.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use super::schema::{missions, spy_cats, targets};
use crate::domain::{Mission, MissionId, SpyCat, SpyCatId, Target, TargetId};
use crate::error::{Error, Result};

/// Format a timestamp for storage.
#[must_use]
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::Parse(format!("timestamp {raw:?}: {e}")))?
        .with_timezone(&Utc))
}

/// Database row for a spy cat.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = spy_cats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SpyCatRow {
    pub id: String,
    pub name: String,
    pub years_of_experience: i32,
    pub breed: String,
    pub salary: String,
    pub mission_id: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// Full-row overwrite of a spy cat.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = spy_cats)]
#[diesel(treat_none_as_null = true)]
pub struct SpyCatChanges {
    pub name: String,
    pub years_of_experience: i32,
    pub breed: String,
    pub salary: String,
    pub mission_id: Option<String>,
    pub version: i64,
    pub updated_at: String,
}

impl From<&SpyCat> for SpyCatRow {
    fn from(cat: &SpyCat) -> Self {
        Self {
            id: cat.id.to_string(),
            name: cat.name.clone(),
            years_of_experience: cat.years_of_experience,
            breed: cat.breed.clone(),
            salary: cat.salary.to_string(),
            mission_id: cat.mission_id.as_ref().map(ToString::to_string),
            version: cat.version,
            created_at: timestamp(cat.created_at),
            updated_at: timestamp(cat.updated_at),
            deleted_at: None,
        }
    }
}

impl SpyCatChanges {
    /// Changes that move `cat` to the next version.
    #[must_use]
    pub fn next(cat: &SpyCat, now: DateTime<Utc>) -> Self {
        Self {
            name: cat.name.clone(),
            years_of_experience: cat.years_of_experience,
            breed: cat.breed.clone(),
            salary: cat.salary.to_string(),
            mission_id: cat.mission_id.as_ref().map(ToString::to_string),
            version: cat.version + 1,
            updated_at: timestamp(now),
        }
    }
}

impl TryFrom<SpyCatRow> for SpyCat {
    type Error = Error;

    fn try_from(row: SpyCatRow) -> Result<Self> {
        let salary = Decimal::from_str(&row.salary)
            .map_err(|e| Error::Parse(format!("salary {:?}: {e}", row.salary)))?;
        Ok(SpyCat {
            id: SpyCatId::from(row.id),
            name: row.name,
            years_of_experience: row.years_of_experience,
            breed: row.breed,
            salary,
            mission_id: row.mission_id.map(MissionId::from),
            version: row.version,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Database row for a mission.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = missions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MissionRow {
    pub id: String,
    pub spy_cat_id: Option<String>,
    pub completed: bool,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// Full-row overwrite of a mission.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = missions)]
#[diesel(treat_none_as_null = true)]
pub struct MissionChanges {
    pub spy_cat_id: Option<String>,
    pub completed: bool,
    pub version: i64,
    pub updated_at: String,
}

impl From<&Mission> for MissionRow {
    fn from(mission: &Mission) -> Self {
        Self {
            id: mission.id.to_string(),
            spy_cat_id: mission.spy_cat_id.as_ref().map(ToString::to_string),
            completed: mission.completed,
            version: mission.version,
            created_at: timestamp(mission.created_at),
            updated_at: timestamp(mission.updated_at),
            deleted_at: None,
        }
    }
}

impl MissionChanges {
    #[must_use]
    pub fn next(mission: &Mission, now: DateTime<Utc>) -> Self {
        Self {
            spy_cat_id: mission.spy_cat_id.as_ref().map(ToString::to_string),
            completed: mission.completed,
            version: mission.version + 1,
            updated_at: timestamp(now),
        }
    }
}

impl TryFrom<MissionRow> for Mission {
    type Error = Error;

    fn try_from(row: MissionRow) -> Result<Self> {
        Ok(Mission {
            id: MissionId::from(row.id),
            spy_cat_id: row.spy_cat_id.map(SpyCatId::from),
            completed: row.completed,
            version: row.version,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Database row for a target.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = targets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TargetRow {
    pub id: String,
    pub mission_id: String,
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

/// Overwrite of a target's mutable columns. `mission_id` is never rewritten.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = targets)]
pub struct TargetChanges {
    pub name: String,
    pub country: String,
    pub notes: String,
    pub completed: bool,
    pub version: i64,
    pub updated_at: String,
}

impl From<&Target> for TargetRow {
    fn from(target: &Target) -> Self {
        Self {
            id: target.id.to_string(),
            mission_id: target.mission_id.to_string(),
            name: target.name.clone(),
            country: target.country.clone(),
            notes: target.notes.clone(),
            completed: target.completed,
            version: target.version,
            created_at: timestamp(target.created_at),
            updated_at: timestamp(target.updated_at),
            deleted_at: None,
        }
    }
}

impl TargetChanges {
    #[must_use]
    pub fn next(target: &Target, now: DateTime<Utc>) -> Self {
        Self {
            name: target.name.clone(),
            country: target.country.clone(),
            notes: target.notes.clone(),
            completed: target.completed,
            version: target.version + 1,
            updated_at: timestamp(now),
        }
    }
}

impl TryFrom<TargetRow> for Target {
    type Error = Error;

    fn try_from(row: TargetRow) -> Result<Self> {
        Ok(Target {
            id: TargetId::from(row.id),
            mission_id: MissionId::from(row.mission_id),
            name: row.name,
            country: row.country,
            notes: row.notes,
            completed: row.completed,
            version: row.version,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewSpyCat;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn timestamps_have_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let fraction = whole + chrono::Duration::microseconds(1500);
        assert_eq!(timestamp(whole), "2024-05-01T12:00:00.000000Z");
        assert_eq!(timestamp(fraction), "2024-05-01T12:00:00.001500Z");
        assert!(timestamp(whole) < timestamp(fraction));
    }

    #[test]
    fn spy_cat_row_preserves_salary_scale() {
        let cat = SpyCat::new(NewSpyCat {
            name: "Tom".into(),
            years_of_experience: 4,
            breed: "Bengal".into(),
            salary: dec!(1234.50),
        });
        let row = SpyCatRow::from(&cat);
        assert_eq!(row.salary, "1234.50");
        assert!(row.deleted_at.is_none());

        let back = SpyCat::try_from(row).unwrap();
        assert_eq!(back.salary, dec!(1234.50));
        assert_eq!(back.id, cat.id);
    }

    #[test]
    fn corrupt_salary_is_a_parse_error() {
        let cat = SpyCat::new(NewSpyCat {
            name: "Tom".into(),
            years_of_experience: 4,
            breed: "Bengal".into(),
            salary: dec!(1),
        });
        let row = SpyCatRow {
            salary: "lots".into(),
            ..SpyCatRow::from(&cat)
        };
        assert!(matches!(SpyCat::try_from(row), Err(Error::Parse(_))));
    }
}
