//! Database schema migrations for liftquest.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Current schema version; 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> SqliteResult<i32> {
    match conn.query_row("SELECT version FROM schema_version", [], |row| row.get::<_, i32>(0)) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: users, per-body-part progress, characters, workouts and
/// unlocked skills.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id            TEXT PRIMARY KEY,
            name          TEXT NOT NULL,
            age           INTEGER NOT NULL,
            bodyweight_kg REAL NOT NULL,
            sex           TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS body_part_progress (
            user_id     TEXT NOT NULL REFERENCES users(id),
            body_part   TEXT NOT NULL,
            level       INTEGER NOT NULL DEFAULT 1,
            current_exp REAL NOT NULL DEFAULT 0,
            best_one_rm REAL NOT NULL DEFAULT 0,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (user_id, body_part)
        );

        CREATE TABLE IF NOT EXISTS characters (
            user_id      TEXT PRIMARY KEY REFERENCES users(id),
            total_level  INTEGER NOT NULL DEFAULT 1,
            skill_points INTEGER NOT NULL DEFAULT 0,
            titles       TEXT NOT NULL DEFAULT '[]',
            updated_at   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS workouts (
            id               TEXT PRIMARY KEY,
            user_id          TEXT NOT NULL REFERENCES users(id),
            exercise_id      TEXT NOT NULL,
            body_part        TEXT NOT NULL,
            sets             INTEGER NOT NULL,
            reps             INTEGER NOT NULL,
            weight_kg        REAL NOT NULL,
            rpe              REAL,
            prescribed_reps  INTEGER,
            workout_date     TEXT NOT NULL,
            estimated_one_rm REAL NOT NULL,
            grade            TEXT NOT NULL,
            exp_gained       REAL NOT NULL,
            verified         INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS unlocked_skills (
            user_id     TEXT NOT NULL REFERENCES users(id),
            skill_id    TEXT NOT NULL,
            unlocked_at TEXT NOT NULL,
            PRIMARY KEY (user_id, skill_id)
        );

        CREATE INDEX IF NOT EXISTS idx_workouts_user_exercise_date
            ON workouts(user_id, exercise_id, workout_date);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()?;
    Ok(())
}

/// Migration v2: index for personal-record lookups.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_workouts_user_exercise_one_rm
            ON workouts(user_id, exercise_id, estimated_one_rm);",
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'index') AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            > 0
    }

    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        for table in ["users", "body_part_progress", "characters", "workouts", "unlocked_skills"] {
            assert!(table_exists(&conn, table), "missing {table}");
        }
        assert!(table_exists(&conn, "idx_workouts_user_exercise_one_rm"));
    }

    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_incremental_migration() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);
        assert!(!table_exists(&conn, "idx_workouts_user_exercise_one_rm"));

        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 2);
        assert!(table_exists(&conn, "idx_workouts_user_exercise_one_rm"));
    }
}
