use super::attendance_type::AttendanceType;
use super::worker::WorkerId;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

pub type EventId = i64;

/// A single, immutable attendance record (clock or break boundary).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceEvent {
    pub id: Option<EventId>,      // ⇔ attendance.id (None until appended)
    pub worker_id: WorkerId,      // ⇔ attendance.worker_id
    pub kind: AttendanceType,     // ⇔ attendance.kind
    pub timestamp: DateTime<Utc>, // ⇔ attendance.timestamp (RFC 3339)
    pub created_at: DateTime<Utc>, // audit only, never used for ordering
}

impl AttendanceEvent {
    /// Build a not-yet-persisted event.
    /// - `id = None` (assigned by the store on append)
    /// - `created_at = now()`
    pub fn new(worker_id: WorkerId, kind: AttendanceType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: None,
            worker_id,
            kind,
            timestamp,
            created_at: Utc::now(),
        }
    }

    pub fn with_id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn local_time(&self) -> DateTime<Local> {
        self.timestamp.with_timezone(&Local)
    }

    pub fn date_str(&self) -> String {
        self.local_time().format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.local_time().format("%H:%M").to_string()
    }

    pub fn get_date_time(&self) -> String {
        self.local_time().format("%Y-%m-%d %H:%M").to_string()
    }
}
