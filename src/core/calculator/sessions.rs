use crate::models::attendance::AttendanceEvent;
use crate::models::attendance_type::AttendanceType;
use chrono::{DateTime, Utc};
use serde::Serialize;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / MILLIS_PER_HOUR
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakInterval {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl BreakInterval {
    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    /// Length in hours; an unclosed break counts as zero.
    pub fn hours(&self) -> f64 {
        self.end.map_or(0.0, |end| hours_between(self.start, end))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkSession {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub breaks: Vec<BreakInterval>,
}

impl WorkSession {
    fn open(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: None,
            breaks: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    pub fn break_hours(&self) -> f64 {
        self.breaks.iter().map(BreakInterval::hours).sum()
    }

    /// `(end - start) - closed breaks`, floored at zero. Open sessions: 0.
    pub fn net_hours(&self) -> f64 {
        match self.end {
            Some(end) => (hours_between(self.start, end) - self.break_hours()).max(0.0),
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionReport {
    pub sessions: Vec<WorkSession>,
    pub total_hours: f64,
}

impl SessionReport {
    pub fn closed_sessions(&self) -> impl Iterator<Item = &WorkSession> {
        self.sessions.iter().filter(|s| s.is_closed())
    }

    pub fn open_session(&self) -> Option<&WorkSession> {
        self.sessions.iter().find(|s| !s.is_closed())
    }
}

/// Pair attendance events of one worker into work sessions.
///
/// Never fails: unmatched or duplicated events are skipped and the result is
/// whatever can be reconstructed. A `clock-in` seen while a session is already
/// open is dropped (the session keeps its first start).
pub fn compute_sessions(events: &[AttendanceEvent]) -> SessionReport {
    if events.is_empty() {
        return SessionReport::default();
    }

    // -----------------------------
    // Sort chronologically (stable)
    // -----------------------------
    let mut sorted: Vec<&AttendanceEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    let mut sessions = Vec::new();
    let mut current: Option<WorkSession> = None;

    // -----------------------------
    // Single scan
    // -----------------------------
    for ev in sorted {
        match (ev.kind, current.as_mut()) {
            (AttendanceType::ClockIn, None) => {
                current = Some(WorkSession::open(ev.timestamp));
            }
            (AttendanceType::ClockIn, Some(_)) => {
                // duplicate clock-in: dropped
            }
            (AttendanceType::ClockOut, Some(session)) => {
                session.end = Some(ev.timestamp);
                sessions.extend(current.take());
            }
            (AttendanceType::BreakStart, Some(session)) => {
                let break_open = session.breaks.last().is_some_and(|b| !b.is_closed());
                if !break_open {
                    session.breaks.push(BreakInterval {
                        start: ev.timestamp,
                        end: None,
                    });
                }
            }
            (AttendanceType::BreakEnd, Some(session)) => {
                if let Some(last) = session.breaks.last_mut()
                    && last.end.is_none()
                {
                    last.end = Some(ev.timestamp);
                }
            }
            // clock-out / break events outside a session
            (_, None) => {}
        }
    }

    // trailing open session: shown, never counted
    sessions.extend(current);

    let total_hours = sessions.iter().map(WorkSession::net_hours).sum();

    SessionReport {
        sessions,
        total_hours,
    }
}
