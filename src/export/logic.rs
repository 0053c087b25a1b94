// src/export/logic.rs

use crate::core::calculator::sessions::compute_sessions;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_attendance, load_attendance_between, load_workers};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EventExport, SessionExport};
use crate::export::range::parse_range;
use crate::models::attendance::AttendanceEvent;
use crate::models::worker::WorkerId;
use crate::ui::messages::warning;
use crate::utils::date::day_range;
use crate::utils::path::{expand_tilde, is_absolute};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export attendance events, or the reconciled sessions with `sessions`.
    ///
    /// - `file`: absolute output path
    /// - `range`: `None`, `"all"` or one of
    ///   `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, `YYYY:YYYY`, `YYYY-MM:YYYY-MM`,
    ///   `YYYY-MM-DD:YYYY-MM-DD` (local calendar days, inclusive)
    /// - `worker`: restrict to a single worker
    ///
    /// Returns the number of rows written (0 when nothing matched).
    pub fn export(
        pool: &mut DbPool,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        worker: Option<WorkerId>,
        sessions: bool,
        force: bool,
    ) -> AppResult<usize> {
        if !is_absolute(file) {
            return Err(AppError::Export(format!(
                "Output file path must be absolute: {file}"
            )));
        }

        let events = load_events(pool, range, worker)?;

        if events.is_empty() {
            warning("No attendance found for the selected range.");
            return Ok(0);
        }

        let names: BTreeMap<WorkerId, String> = load_workers(&pool.conn)?
            .into_iter()
            .map(|w| (w.id, w.name))
            .collect();
        let name_of = |id: WorkerId| names.get(&id).map(String::as_str).unwrap_or("");

        let path = expand_tilde(file);
        let path = path.as_path();

        ensure_writable(path, force)?;

        if sessions {
            let rows = session_rows(&events, name_of);
            if rows.is_empty() {
                warning("No sessions could be reconciled for the selected range.");
                return Ok(0);
            }
            write_rows(&format, &rows, path)?;
            Ok(rows.len())
        } else {
            let rows: Vec<EventExport> = events
                .iter()
                .map(|ev| EventExport::from_event(ev, name_of(ev.worker_id)))
                .collect();
            write_rows(&format, &rows, path)?;
            Ok(rows.len())
        }
    }
}

fn write_rows<T: Serialize>(format: &ExportFormat, rows: &[T], path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}

fn load_events(
    pool: &DbPool,
    range: Option<&str>,
    worker: Option<WorkerId>,
) -> AppResult<Vec<AttendanceEvent>> {
    match range {
        None => load_all_attendance(&pool.conn, worker),
        Some(r) if r.eq_ignore_ascii_case("all") => load_all_attendance(&pool.conn, worker),
        Some(r) => {
            let (first, last) = parse_range(r)?;
            let (start, _) = day_range(first);
            let (_, end) = day_range(last);
            load_attendance_between(&pool.conn, worker, &start, &end)
        }
    }
}

/// Reconcile per worker; events arrive ordered by worker then timestamp.
fn session_rows<'n>(
    events: &[AttendanceEvent],
    name_of: impl Fn(WorkerId) -> &'n str,
) -> Vec<SessionExport> {
    let mut by_worker: BTreeMap<WorkerId, Vec<AttendanceEvent>> = BTreeMap::new();
    for ev in events {
        by_worker.entry(ev.worker_id).or_default().push(ev.clone());
    }

    let mut rows = Vec::new();
    for (worker_id, evs) in by_worker {
        let report = compute_sessions(&evs);
        let name = name_of(worker_id);
        rows.extend(
            report
                .sessions
                .iter()
                .map(|s| SessionExport::from_session(worker_id, name, s)),
        );
    }
    rows
}
