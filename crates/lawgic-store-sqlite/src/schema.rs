//! SQL schema and connection setup for the Lawgic SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

use rusqlite::{Connection, functions::FunctionFlags};

/// Name of the SQL function installed by [`install_functions`].
pub const FOLD: &str = "fold";

/// Register `fold(text)`, a Unicode lowercase. SQLite's own `lower()` and
/// `LIKE` only fold ASCII.
pub fn install_functions(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
  )
}

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Timestamps are fixed-width `YYYY-MM-DDTHH:MM:SS.mmmZ` strings, so text
/// comparison and `ORDER BY` are chronological.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS cases (
    case_id             TEXT PRIMARY KEY,
    defendant_name      TEXT NOT NULL,
    defendant_address   TEXT,
    crime_type          TEXT,
    crime_date          TEXT,
    crime_location      TEXT,
    arrest_officer      TEXT,
    arrest_date         TEXT,
    start_date          TEXT,
    expected_completion TEXT,
    status              TEXT NOT NULL DEFAULT 'Pending'
                        CHECK (status IN ('Pending', 'Ongoing', 'Resolved')),
    judge_name          TEXT,
    prosecutor_name     TEXT,
    lawyer_name         TEXT,
    court_name          TEXT,
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL
);

-- case_id is not a foreign key: hearings may reference cases
-- that do not exist.
CREATE TABLE IF NOT EXISTS schedules (
    schedule_id        TEXT PRIMARY KEY,
    case_id            TEXT NOT NULL,
    hearing_date       TEXT,
    adjourn_reason     TEXT,
    proceeding_summary TEXT,
    next_hearing_date  TEXT,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS users (
    user_id    TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    username   TEXT NOT NULL UNIQUE,
    password   TEXT NOT NULL,  -- plaintext
    dob        TEXT,
    email      TEXT,
    phone      TEXT,
    role       TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS cases_status_idx       ON cases(status);
CREATE INDEX IF NOT EXISTS schedules_hearing_idx  ON schedules(hearing_date);
CREATE INDEX IF NOT EXISTS schedules_case_idx     ON schedules(case_id);

PRAGMA user_version = 1;
";
