use crate::core::calculator::sessions::{SessionReport, compute_sessions};
use crate::errors::AppResult;
use crate::models::attendance::AttendanceEvent;
use crate::models::worker::WorkerId;
use crate::store::EventStore;
use crate::utils::date;

/// Attendance records of a worker together with the reconciled sessions.
#[derive(Debug, Clone, Default)]
pub struct AttendanceSummary {
    /// Newest first, as shown in listings.
    pub records: Vec<AttendanceEvent>,
    pub report: SessionReport,
}

pub struct AttendanceLogic;

impl AttendanceLogic {
    /// Pull the most recent `limit` events and reconcile them.
    pub fn recent<S: EventStore>(
        store: &S,
        worker_id: WorkerId,
        limit: usize,
    ) -> AppResult<AttendanceSummary> {
        let records = store.query_by_worker(worker_id, limit)?;
        Ok(Self::summarize(records))
    }

    /// Events stamped today (local calendar day).
    pub fn today<S: EventStore>(store: &S, worker_id: WorkerId) -> AppResult<AttendanceSummary> {
        let (start, end) = date::today_range();
        let records = store.query_by_worker_and_time_range(worker_id, start, end)?;
        Ok(Self::summarize(records))
    }

    /// Reconcile in emission order `(timestamp, id)`, whatever order the
    /// store returned, then flip to newest first for display.
    fn summarize(mut records: Vec<AttendanceEvent>) -> AttendanceSummary {
        records.sort_by_key(|e| (e.timestamp, e.id));
        let report = compute_sessions(&records);
        records.reverse();
        AttendanceSummary { records, report }
    }
}
