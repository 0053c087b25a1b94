use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEvent, EventId};
use crate::models::attendance_type::AttendanceType;
use crate::models::status::WorkerStatus;
use crate::models::worker::{NewWorker, Worker, WorkerId};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const WORKER_COLUMNS: &str =
    "id, name, email, phone, shift, area, notes, status, last_active, created_at";

const ATTENDANCE_COLUMNS: &str = "id, worker_id, kind, timestamp, created_at";

/// Fixed-width UTC text, so lexical order == chronological order in SQL.
pub fn ts_to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn ts_from_db(idx: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                Box::new(AppError::InvalidTime(raw.to_string())),
            )
        })
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

pub fn map_worker(row: &Row) -> Result<Worker> {
    let raw_status: Option<String> = row.get("status")?;
    let last_active: Option<String> = row.get("last_active")?;
    let created_at: String = row.get("created_at")?;

    Ok(Worker {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        shift: row.get("shift")?,
        area: row.get("area")?,
        notes: row.get("notes")?,
        // unknown / NULL status → off-duty
        status: WorkerStatus::normalize(raw_status.as_deref()),
        last_active: last_active
            .as_deref()
            .map(|s| ts_from_db(8, s))
            .transpose()?,
        created_at: ts_from_db(9, &created_at)?,
    })
}

pub fn map_attendance(row: &Row) -> Result<AttendanceEvent> {
    let kind_str: String = row.get("kind")?;
    let kind = AttendanceType::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            Box::new(AppError::Other(format!("Invalid attendance kind: {}", kind_str))),
        )
    })?;

    let timestamp: String = row.get("timestamp")?;
    let created_at: String = row.get("created_at")?;

    Ok(AttendanceEvent {
        id: Some(row.get("id")?),
        worker_id: row.get("worker_id")?,
        kind,
        timestamp: ts_from_db(3, &timestamp)?,
        created_at: ts_from_db(4, &created_at)?,
    })
}

// ---------------------------------------------------------------------------
// Workers
// ---------------------------------------------------------------------------

pub fn load_worker(conn: &Connection, id: WorkerId) -> AppResult<Option<Worker>> {
    let sql = format!("SELECT {WORKER_COLUMNS} FROM workers WHERE id = ?1");
    let worker = conn.query_row(&sql, [id], map_worker).optional()?;
    Ok(worker)
}

pub fn load_workers(conn: &Connection) -> AppResult<Vec<Worker>> {
    let sql = format!("SELECT {WORKER_COLUMNS} FROM workers ORDER BY created_at DESC, id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_worker)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn insert_worker(conn: &Connection, w: &NewWorker, now: &DateTime<Utc>) -> AppResult<WorkerId> {
    let now = ts_to_db(now);
    conn.execute(
        "INSERT INTO workers (name, email, phone, shift, area, notes, status, last_active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            w.name,
            w.email,
            w.phone,
            w.shift,
            w.area,
            w.notes,
            w.status.to_db_str(),
            now,
            now,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update the editable fields (status is owned by the state machine).
pub fn update_worker_fields(conn: &Connection, w: &Worker) -> AppResult<()> {
    conn.execute(
        "UPDATE workers
         SET name = ?1, email = ?2, phone = ?3, shift = ?4, area = ?5, notes = ?6
         WHERE id = ?7",
        params![w.name, w.email, w.phone, w.shift, w.area, w.notes, w.id],
    )?;
    Ok(())
}

/// Returns the number of rows touched (0 → unknown worker).
pub fn update_status(
    conn: &Connection,
    id: WorkerId,
    status: WorkerStatus,
    last_active: &DateTime<Utc>,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE workers SET status = ?1, last_active = ?2 WHERE id = ?3",
        params![status.to_db_str(), ts_to_db(last_active), id],
    )?;
    Ok(n)
}

/// Attendance rows first, then the worker row. Returns workers deleted.
pub fn delete_worker_and_attendance(conn: &Connection, id: WorkerId) -> AppResult<usize> {
    conn.execute("DELETE FROM attendance WHERE worker_id = ?1", [id])?;
    let n = conn.execute("DELETE FROM workers WHERE id = ?1", [id])?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

pub fn insert_attendance(conn: &Connection, ev: &AttendanceEvent) -> AppResult<EventId> {
    conn.execute(
        "INSERT INTO attendance (worker_id, kind, timestamp, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            ev.worker_id,
            ev.kind.to_db_str(),
            ts_to_db(&ev.timestamp),
            ts_to_db(&ev.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_recent_attendance(
    conn: &Connection,
    worker_id: WorkerId,
    limit: usize,
) -> AppResult<Vec<AttendanceEvent>> {
    let sql = format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM attendance
         WHERE worker_id = ?1
         ORDER BY timestamp DESC, id DESC
         LIMIT ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt.query_map(params![worker_id, limit], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Attendance with `start <= timestamp < end`, optionally for one worker.
pub fn load_attendance_between(
    conn: &Connection,
    worker_id: Option<WorkerId>,
    start: &DateTime<Utc>,
    end: &DateTime<Utc>,
) -> AppResult<Vec<AttendanceEvent>> {
    let sql = format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM attendance
         WHERE (?1 IS NULL OR worker_id = ?1)
           AND timestamp >= ?2 AND timestamp < ?3
         ORDER BY worker_id ASC, timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![worker_id, ts_to_db(start), ts_to_db(end)],
        map_attendance,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_all_attendance(
    conn: &Connection,
    worker_id: Option<WorkerId>,
) -> AppResult<Vec<AttendanceEvent>> {
    let sql = format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM attendance
         WHERE (?1 IS NULL OR worker_id = ?1)
         ORDER BY worker_id ASC, timestamp ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![worker_id], map_attendance)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
