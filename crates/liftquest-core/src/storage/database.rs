//! SQLite-backed progression store.
//!
//! Provides persistent storage for:
//! - Users and their performer profiles
//! - Per-body-part level tracks and the character aggregate
//! - Logged workouts
//! - Unlocked skills

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{data_dir, migrations};
use crate::catalog::{BodyPart, Sex};
use crate::error::{CoreError, DatabaseError, Result, ValidationError};
use crate::leveling::{BodyPartProgress, Character, LevelRewards};
use crate::progression::{ExpectedProgress, ProgressionChanges, ProgressionStore};
use crate::workout::{PerformerProfile, WorkoutRecord};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    #[serde(flatten)]
    pub profile: PerformerProfile,
    pub created_at: DateTime<Utc>,
}

/// SQLite database for progression state.
pub struct SqliteStore {
    conn: Connection,
}

const WORKOUT_COLUMNS: &str = "id, user_id, exercise_id, body_part, sets, reps, weight_kg, rpe,
    prescribed_reps, workout_date, estimated_one_rm, grade, exp_gained, verified";

impl SqliteStore {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/liftquest.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self> {
        Self::open_at(&data_dir()?.join("liftquest.db"))
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    /// Run `f` inside `BEGIN IMMEDIATE`, committing on success and rolling
    /// back on any error.
    fn immediate<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        self.conn.execute_batch("BEGIN IMMEDIATE TRANSACTION;")?;
        let result = f(&self.conn).and_then(|value| {
            self.conn.execute_batch("COMMIT;")?;
            Ok(value)
        });
        if result.is_err() {
            let _ = self.conn.execute_batch("ROLLBACK;");
        }
        result
    }

    // === Users ===

    /// Register a user with level-1 tracks for every body part and a fresh
    /// character.
    pub fn init_user(&self, name: &str, age: u32, bodyweight_kg: f64, sex: Sex) -> Result<UserRecord> {
        let user = UserRecord {
            name: name.to_string(),
            profile: PerformerProfile {
                user_id: Uuid::new_v4().to_string(),
                age,
                bodyweight_kg,
                sex,
            },
            created_at: Utc::now(),
        };
        user.profile.validate()?;

        let now = user.created_at.to_rfc3339();
        self.immediate(|conn| {
            conn.execute(
                "INSERT INTO users (id, name, age, bodyweight_kg, sex, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.profile.user_id,
                    user.name,
                    user.profile.age,
                    user.profile.bodyweight_kg,
                    user.profile.sex.code(),
                    now,
                ],
            )?;
            for part in BodyPart::ALL {
                conn.execute(
                    "INSERT INTO body_part_progress (user_id, body_part, level, current_exp, best_one_rm, updated_at)
                     VALUES (?1, ?2, 1, 0, 0, ?3)",
                    params![user.profile.user_id, part.code(), now],
                )?;
            }
            conn.execute(
                "INSERT INTO characters (user_id, total_level, skill_points, titles, updated_at)
                 VALUES (?1, 1, 0, '[]', ?2)",
                params![user.profile.user_id, now],
            )?;
            Ok(())
        })?;

        tracing::info!(user_id = %user.profile.user_id, "user created");
        Ok(user)
    }

    pub fn user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let user = self
            .conn
            .query_row(
                "SELECT id, name, age, bodyweight_kg, sex, created_at FROM users WHERE id = ?1",
                params![user_id],
                |row| {
                    Ok(UserRecord {
                        name: row.get(1)?,
                        profile: PerformerProfile {
                            user_id: row.get(0)?,
                            age: row.get(2)?,
                            bodyweight_kg: row.get(3)?,
                            sex: parse_column(row, 4)?,
                        },
                        created_at: parse_date(row, 5)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    pub fn list_users(&self) -> Result<Vec<UserRecord>> {
        let mut stmt = self.conn.prepare("SELECT id FROM users ORDER BY created_at")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(user) = self.user(&id)? {
                users.push(user);
            }
        }
        Ok(users)
    }

    // === Progress ===

    pub fn list_progress(&self, user_id: &str) -> Result<Vec<BodyPartProgress>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, body_part, level, current_exp, best_one_rm
             FROM body_part_progress WHERE user_id = ?1",
        )?;
        let mut rows = stmt
            .query_map(params![user_id], progress_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.sort_by_key(|p| p.body_part.display_order());
        Ok(rows)
    }

    // === Workouts ===

    /// Workouts for a user, most recent first, optionally for one exercise.
    pub fn list_workouts(&self, user_id: &str, exercise_id: Option<&str>, limit: usize) -> Result<Vec<WorkoutRecord>> {
        let sql = format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts
             WHERE user_id = ?1 AND (?2 IS NULL OR exercise_id = ?2)
             ORDER BY workout_date DESC, rowid DESC
             LIMIT ?3"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![user_id, exercise_id, limit as i64], workout_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Flip the verification flag; the only mutable workout field.
    pub fn set_verified(&self, workout_id: &str, verified: bool) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE workouts SET verified = ?2 WHERE id = ?1",
            params![workout_id, verified],
        )?;
        if changed == 0 {
            return Err(CoreError::not_found("workout", workout_id));
        }
        Ok(())
    }

    // === Skills ===

    pub fn unlocked_skills(&self, user_id: &str) -> Result<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT skill_id FROM unlocked_skills WHERE user_id = ?1")?;
        let ids = stmt
            .query_map(params![user_id], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    /// Record an unlock and spend one skill point in the same transaction.
    ///
    /// The point is taken from the stored balance, so a concurrent level-up
    /// or unlock is never overwritten. Returns the character after the spend.
    pub fn save_unlock(&self, user_id: &str, skill_id: &str) -> Result<Character> {
        self.immediate(|conn| {
            let spent = conn.execute(
                "UPDATE characters SET skill_points = skill_points - 1, updated_at = ?2
                 WHERE user_id = ?1 AND skill_points > 0",
                params![user_id, Utc::now().to_rfc3339()],
            )?;
            if spent == 0 {
                return Err(match read_character(conn, user_id)? {
                    Some(_) => ValidationError::InvalidValue {
                        field: format!("skill '{skill_id}'"),
                        message: "no skill points available".into(),
                    }
                    .into(),
                    None => CoreError::not_found("character", user_id),
                });
            }
            conn.execute(
                "INSERT INTO unlocked_skills (user_id, skill_id, unlocked_at) VALUES (?1, ?2, ?3)",
                params![user_id, skill_id, Utc::now().to_rfc3339()],
            )?;
            read_character(conn, user_id)?.ok_or_else(|| CoreError::not_found("character", user_id))
        })
    }
}

impl ProgressionStore for SqliteStore {
    fn performer_profile(&self, user_id: &str) -> Result<Option<PerformerProfile>> {
        Ok(self.user(user_id)?.map(|u| u.profile))
    }

    fn recent_workouts(&self, user_id: &str, exercise_id: &str, limit: usize) -> Result<Vec<WorkoutRecord>> {
        self.list_workouts(user_id, Some(exercise_id), limit)
    }

    fn best_one_rm(&self, user_id: &str, exercise_id: &str) -> Result<Option<f64>> {
        let best = self.conn.query_row(
            "SELECT MAX(estimated_one_rm) FROM workouts WHERE user_id = ?1 AND exercise_id = ?2",
            params![user_id, exercise_id],
            |row| row.get::<_, Option<f64>>(0),
        )?;
        Ok(best)
    }

    fn body_part_progress(&self, user_id: &str, body_part: BodyPart) -> Result<Option<BodyPartProgress>> {
        let progress = self
            .conn
            .query_row(
                "SELECT user_id, body_part, level, current_exp, best_one_rm
                 FROM body_part_progress WHERE user_id = ?1 AND body_part = ?2",
                params![user_id, body_part.code()],
                progress_from_row,
            )
            .optional()?;
        Ok(progress)
    }

    fn body_part_levels(&self, user_id: &str) -> Result<Vec<(BodyPart, u32)>> {
        Ok(self
            .list_progress(user_id)?
            .into_iter()
            .map(|p| (p.body_part, p.level))
            .collect())
    }

    fn character(&self, user_id: &str) -> Result<Option<Character>> {
        read_character(&self.conn, user_id)
    }

    fn commit(&mut self, changes: &ProgressionChanges) -> Result<Option<Character>> {
        let progress = &changes.progress;
        let ExpectedProgress { level, current_exp } = changes.expected;
        let now = Utc::now().to_rfc3339();

        let result = self.immediate(|conn| {
            let updated = conn.execute(
                "UPDATE body_part_progress
                 SET level = ?3, current_exp = ?4, best_one_rm = ?5, updated_at = ?6
                 WHERE user_id = ?1 AND body_part = ?2 AND level = ?7 AND current_exp = ?8",
                params![
                    progress.user_id,
                    progress.body_part.code(),
                    progress.level,
                    progress.current_exp,
                    progress.best_one_rm,
                    now,
                    level,
                    current_exp,
                ],
            )?;
            if updated == 0 {
                return Err(DatabaseError::Conflict { key: progress.key() }.into());
            }

            if let Some(workout) = &changes.workout {
                insert_workout(conn, workout)?;
            }
            match &changes.rewards {
                Some(rewards) => fold_level_up(conn, &progress.user_id, rewards).map(Some),
                None => Ok(None),
            }
        });

        match &result {
            Ok(_) => tracing::debug!(key = %progress.key(), level = progress.level, "progression committed"),
            Err(CoreError::Database(DatabaseError::Conflict { key })) => {
                tracing::warn!(%key, "progress changed since it was read; commit refused")
            }
            Err(_) => {}
        }
        result
    }
}

fn insert_workout(conn: &Connection, workout: &WorkoutRecord) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO workouts ({WORKOUT_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        ),
        params![
            workout.id,
            workout.user_id,
            workout.exercise_id,
            workout.body_part.code(),
            workout.sets,
            workout.reps,
            workout.weight_kg,
            workout.rpe,
            workout.prescribed_reps,
            workout.workout_date.to_rfc3339(),
            workout.estimated_one_rm,
            workout.grade.code(),
            workout.exp_gained,
            workout.verified,
        ],
    )?;
    Ok(())
}

fn read_character(conn: &Connection, user_id: &str) -> Result<Option<Character>> {
    let row = conn
        .query_row(
            "SELECT user_id, total_level, skill_points, titles FROM characters WHERE user_id = ?1",
            params![user_id],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;
    match row {
        Some((user_id, total_level, skill_points, titles)) => Ok(Some(Character {
            user_id,
            total_level,
            skill_points,
            titles: serde_json::from_str(&titles)?,
        })),
        None => Ok(None),
    }
}

/// Re-read the character and every body-part level inside the open
/// transaction, bank `rewards` on top and write the result back.
fn fold_level_up(conn: &Connection, user_id: &str, rewards: &LevelRewards) -> Result<Character> {
    let mut character = read_character(conn, user_id)?.unwrap_or_else(|| Character::new(user_id));
    let levels = {
        let mut stmt = conn.prepare("SELECT level FROM body_part_progress WHERE user_id = ?1")?;
        let levels = stmt
            .query_map(params![user_id], |row| row.get::<_, u32>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        levels
    };
    character.apply_level_up(&levels, rewards);
    write_character(conn, &character)?;
    Ok(character)
}

fn write_character(conn: &Connection, character: &Character) -> Result<()> {
    conn.execute(
        "INSERT INTO characters (user_id, total_level, skill_points, titles, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(user_id) DO UPDATE SET
            total_level = excluded.total_level,
            skill_points = excluded.skill_points,
            titles = excluded.titles,
            updated_at = excluded.updated_at",
        params![
            character.user_id,
            character.total_level,
            character.skill_points,
            serde_json::to_string(&character.titles)?,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn progress_from_row(row: &Row<'_>) -> rusqlite::Result<BodyPartProgress> {
    Ok(BodyPartProgress {
        user_id: row.get(0)?,
        body_part: parse_column(row, 1)?,
        level: row.get(2)?,
        current_exp: row.get(3)?,
        best_one_rm: row.get(4)?,
    })
}

fn workout_from_row(row: &Row<'_>) -> rusqlite::Result<WorkoutRecord> {
    Ok(WorkoutRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        exercise_id: row.get(2)?,
        body_part: parse_column(row, 3)?,
        sets: row.get(4)?,
        reps: row.get(5)?,
        weight_kg: row.get(6)?,
        rpe: row.get(7)?,
        prescribed_reps: row.get(8)?,
        workout_date: parse_date(row, 9)?,
        estimated_one_rm: row.get(10)?,
        grade: parse_column(row, 11)?,
        exp_gained: row.get(12)?,
        verified: row.get(13)?,
    })
}

/// Parse a TEXT column through `FromStr`.
fn parse_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}

fn parse_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e)))
}
