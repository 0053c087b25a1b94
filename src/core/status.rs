//! Worker duty-status state machine.
//!
//! | From     | To       | Emits       |
//! |----------|----------|-------------|
//! | off-duty | active   | clock-in    |
//! | active   | off-duty | clock-out   |
//! | active   | on-break | break-start |
//! | on-break | active   | break-end   |
//!
//! Every other pair is rejected; a same-state request is a no-op.
//! Clocking out straight from a break is not allowed: the worker has to come
//! back to `active` first.

use crate::core::clock::{Clock, SystemClock};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEvent;
use crate::models::attendance_type::AttendanceType;
use crate::models::status::WorkerStatus;
use crate::models::worker::{Worker, WorkerId};
use crate::store::{EventStore, WorkerDirectory};
use chrono::{DateTime, Utc};

/// Table lookup: which event (if any) does `from -> to` emit.
pub fn transition_event(
    from: WorkerStatus,
    to: WorkerStatus,
) -> AppResult<Option<AttendanceType>> {
    use AttendanceType::*;
    use WorkerStatus::*;

    match (from, to) {
        (f, t) if f == t => Ok(None),
        (OffDuty, Active) => Ok(Some(ClockIn)),
        (Active, OffDuty) => Ok(Some(ClockOut)),
        (Active, OnBreak) => Ok(Some(BreakStart)),
        (OnBreak, Active) => Ok(Some(BreakEnd)),
        _ => Err(AppError::InvalidTransition { from, to }),
    }
}

/// Result of a (possibly no-op) transition.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub previous: WorkerStatus,
    pub status: WorkerStatus,
    /// The appended event, `None` for no-ops.
    pub event: Option<AttendanceEvent>,
    /// Worker snapshot after the transition.
    pub worker: Worker,
}

impl TransitionOutcome {
    pub fn is_noop(&self) -> bool {
        self.event.is_none()
    }
}

/// Applies status transitions for workers held in `S`.
///
/// Takes the store by `&mut`, so transitions issued through one machine are
/// serialized. For cross-process use over SQLite run it inside
/// `DbPool::serialized`.
pub struct StatusMachine<'a, S, C = SystemClock> {
    store: &'a mut S,
    clock: C,
}

impl<'a, S> StatusMachine<'a, S, SystemClock>
where
    S: EventStore + WorkerDirectory,
{
    pub fn new(store: &'a mut S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<'a, S, C> StatusMachine<'a, S, C>
where
    S: EventStore + WorkerDirectory,
    C: Clock,
{
    pub fn with_clock(store: &'a mut S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn request_transition(
        &mut self,
        worker_id: WorkerId,
        target: WorkerStatus,
    ) -> AppResult<TransitionOutcome> {
        let now = self.clock.now();
        self.request_transition_at(worker_id, target, now)
    }

    /// Same as [`request_transition`](Self::request_transition) with an
    /// explicit event instant (manual back-dated corrections).
    pub fn request_transition_at(
        &mut self,
        worker_id: WorkerId,
        target: WorkerStatus,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let worker = self.load(worker_id)?;
        self.apply(worker, target, at)
    }

    /// Clock toggle: off-duty ⇄ active. Rejected while on break.
    pub fn toggle_clock(&mut self, worker_id: WorkerId) -> AppResult<TransitionOutcome> {
        let now = self.clock.now();
        self.toggle_clock_at(worker_id, now)
    }

    pub fn toggle_clock_at(
        &mut self,
        worker_id: WorkerId,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let worker = self.load(worker_id)?;

        let target = match worker.status {
            WorkerStatus::OffDuty => WorkerStatus::Active,
            WorkerStatus::Active => WorkerStatus::OffDuty,
            WorkerStatus::OnBreak => {
                return Err(AppError::InvalidTransition {
                    from: WorkerStatus::OnBreak,
                    to: WorkerStatus::OffDuty,
                });
            }
        };

        self.apply(worker, target, at)
    }

    /// Break/duty toggle: active ⇄ on-break. No effect while off-duty.
    pub fn toggle_break(&mut self, worker_id: WorkerId) -> AppResult<TransitionOutcome> {
        let now = self.clock.now();
        self.toggle_break_at(worker_id, now)
    }

    pub fn toggle_break_at(
        &mut self,
        worker_id: WorkerId,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let worker = self.load(worker_id)?;

        let target = match worker.status {
            WorkerStatus::Active => WorkerStatus::OnBreak,
            WorkerStatus::OnBreak => WorkerStatus::Active,
            WorkerStatus::OffDuty => WorkerStatus::OffDuty,
        };

        self.apply(worker, target, at)
    }

    fn load(&self, worker_id: WorkerId) -> AppResult<Worker> {
        self.store
            .get_by_id(worker_id)?
            .ok_or(AppError::NotFound(worker_id))
    }

    fn apply(
        &mut self,
        mut worker: Worker,
        target: WorkerStatus,
        at: DateTime<Utc>,
    ) -> AppResult<TransitionOutcome> {
        let previous = worker.status;

        let Some(kind) = transition_event(previous, target)? else {
            return Ok(TransitionOutcome {
                previous,
                status: previous,
                event: None,
                worker,
            });
        };

        // 1️⃣ append first: if it fails the status must stay untouched
        let event = AttendanceEvent::new(worker.id, kind, at);
        let event_id = self.store.append(&event)?;

        // 2️⃣ then the status. A failure here leaves an orphaned event
        //    (detectable via core::calculator::drift).
        self.store.update_worker_status(worker.id, target, at)?;

        worker.status = target;
        worker.last_active = Some(at);

        Ok(TransitionOutcome {
            previous,
            status: target,
            event: Some(event.with_id(event_id)),
            worker,
        })
    }
}
