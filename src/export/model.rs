// src/export/model.rs

use crate::core::calculator::sessions::WorkSession;
use crate::models::attendance::AttendanceEvent;
use serde::Serialize;

/// Flat row for attendance event export.
#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub worker_id: i64,
    pub worker_name: String,
    pub kind: String,
    pub date: String,
    pub time: String,
    pub timestamp: String,
}

impl EventExport {
    pub fn from_event(ev: &AttendanceEvent, worker_name: &str) -> Self {
        Self {
            id: ev.id.unwrap_or_default(),
            worker_id: ev.worker_id,
            worker_name: worker_name.to_string(),
            kind: ev.kind.to_db_str().to_string(),
            date: ev.date_str(),
            time: ev.time_str(),
            timestamp: ev.timestamp.to_rfc3339(),
        }
    }
}

/// Flat row for reconciled session export (one per session).
#[derive(Serialize, Clone, Debug)]
pub struct SessionExport {
    pub worker_id: i64,
    pub worker_name: String,
    pub start: String,
    pub end: String,
    pub breaks: usize,
    pub break_hours: f64,
    pub net_hours: f64,
    pub closed: bool,
}

impl SessionExport {
    pub fn from_session(worker_id: i64, worker_name: &str, s: &WorkSession) -> Self {
        Self {
            worker_id,
            worker_name: worker_name.to_string(),
            start: s.start.to_rfc3339(),
            end: s.end.map(|e| e.to_rfc3339()).unwrap_or_default(),
            breaks: s.breaks.len(),
            break_hours: round2(s.break_hours()),
            net_hours: round2(s.net_hours()),
            closed: s.is_closed(),
        }
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
