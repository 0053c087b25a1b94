//! Status reconciliation pass.
//!
//! If a status update fails after its event was appended, the stored status
//! and the attendance trail disagree. This pass spots it by comparing the
//! stored status with the one implied by the latest event the state machine
//! would have accepted.

use crate::core::status::transition_event;
use crate::models::attendance::AttendanceEvent;
use crate::models::attendance_type::AttendanceType;
use crate::models::status::WorkerStatus;
use crate::models::worker::Worker;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDrift {
    pub worker_id: i64,
    pub stored: WorkerStatus,
    pub implied: WorkerStatus,
}

fn status_after(kind: AttendanceType) -> WorkerStatus {
    match kind {
        AttendanceType::ClockIn | AttendanceType::BreakEnd => WorkerStatus::Active,
        AttendanceType::BreakStart => WorkerStatus::OnBreak,
        AttendanceType::ClockOut => WorkerStatus::OffDuty,
    }
}

/// Replay the events through the transition table starting from off-duty,
/// skipping those the machine would have refused.
pub fn implied_status(events: &[AttendanceEvent]) -> WorkerStatus {
    let mut sorted: Vec<&AttendanceEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.timestamp);

    sorted.into_iter().fold(WorkerStatus::OffDuty, |current, ev| {
        let next = status_after(ev.kind);
        match transition_event(current, next) {
            Ok(Some(kind)) if kind == ev.kind => next,
            _ => current,
        }
    })
}

pub fn detect_drift(worker: &Worker, events: &[AttendanceEvent]) -> Option<StatusDrift> {
    let implied = implied_status(events);
    (implied != worker.status).then_some(StatusDrift {
        worker_id: worker.id,
        stored: worker.status,
        implied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn t(mins: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 20, 8, 0, 0).unwrap() + Duration::minutes(mins)
    }

    fn ev(mins: i64, kind: AttendanceType) -> AttendanceEvent {
        AttendanceEvent::new(3, kind, t(mins))
    }

    fn worker(status: WorkerStatus) -> Worker {
        Worker {
            id: 3,
            name: "Luis".into(),
            email: "luis@x.org".into(),
            phone: None,
            shift: "evening".into(),
            area: None,
            notes: None,
            status,
            last_active: None,
            created_at: t(0),
        }
    }

    #[test]
    fn no_events_implies_off_duty() {
        assert_eq!(implied_status(&[]), WorkerStatus::OffDuty);
    }

    #[test]
    fn replay_follows_the_transition_table() {
        let events = [
            ev(0, AttendanceType::ClockIn),
            ev(60, AttendanceType::BreakStart),
        ];
        assert_eq!(implied_status(&events), WorkerStatus::OnBreak);

        let events = [
            ev(0, AttendanceType::ClockIn),
            ev(60, AttendanceType::BreakStart),
            ev(70, AttendanceType::ClockOut), // refused while on break
        ];
        assert_eq!(implied_status(&events), WorkerStatus::OnBreak);
    }

    #[test]
    fn orphaned_clock_in_is_reported() {
        let events = [ev(0, AttendanceType::ClockIn)];
        let drift = detect_drift(&worker(WorkerStatus::OffDuty), &events).unwrap();
        assert_eq!(drift.stored, WorkerStatus::OffDuty);
        assert_eq!(drift.implied, WorkerStatus::Active);

        assert!(detect_drift(&worker(WorkerStatus::Active), &events).is_none());
    }
}
