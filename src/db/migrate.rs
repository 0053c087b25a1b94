use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// (version, description, SQL). Applied in order, each exactly once.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250601_0001_create_workers",
        "Created workers table",
        r#"
        CREATE TABLE IF NOT EXISTS workers (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            email        TEXT NOT NULL,
            phone        TEXT,
            shift        TEXT NOT NULL,
            area         TEXT,
            notes        TEXT,
            status       TEXT DEFAULT 'off-duty',
            last_active  TEXT,
            created_at   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_workers_created ON workers(created_at);
        "#,
    ),
    (
        "20250601_0002_create_attendance",
        "Created attendance table",
        r#"
        CREATE TABLE IF NOT EXISTS attendance (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            worker_id   INTEGER NOT NULL REFERENCES workers(id),
            kind        TEXT NOT NULL
                        CHECK(kind IN ('clock-in','clock-out','break-start','break-end')),
            timestamp   TEXT NOT NULL,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_attendance_worker_ts ON attendance(worker_id, timestamp);
        "#,
    ),
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Called from `db::initialize::init_db`.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table (it also tracks applied migrations)
    ensure_log_table(conn)?;

    // 2) Apply missing migrations in order
    for (version, description, sql) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)?;

        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            params![version, description],
        )?;

        success(format!("Migration applied: {} → {}", version, description));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let applied: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(applied, MIGRATIONS.len() as i64);
    }

    #[test]
    fn attendance_kind_is_constrained() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        conn.execute(
            "INSERT INTO workers (name, email, shift, created_at) VALUES ('a','a@b','x','t')",
            [],
        )
        .unwrap();

        let bad = conn.execute(
            "INSERT INTO attendance (worker_id, kind, timestamp, created_at)
             VALUES (1, 'lunch', 't', 't')",
            [],
        );
        assert!(bad.is_err());
    }
}
