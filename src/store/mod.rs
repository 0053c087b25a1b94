//! Storage collaborators consumed by the core.
//!
//! The state machine and the reconciler never touch SQL directly: they talk
//! to these traits. `DbPool` (see `db::store`) is the production backend,
//! [`memory::MemoryStore`] is the in-process one used by tests.

pub mod memory;

use crate::errors::AppResult;
use crate::models::attendance::{AttendanceEvent, EventId};
use crate::models::status::WorkerStatus;
use crate::models::worker::{NewWorker, Worker, WorkerId, WorkerUpdate};
use chrono::{DateTime, Utc};

/// Append-only sink for attendance events plus the worker status update.
pub trait EventStore {
    /// Persist `event` and return its id.
    fn append(&mut self, event: &AttendanceEvent) -> AppResult<EventId>;

    /// Most recent `limit` events of a worker, in unspecified order.
    fn query_by_worker(&self, worker_id: WorkerId, limit: usize)
    -> AppResult<Vec<AttendanceEvent>>;

    /// Events with `start <= timestamp < end`.
    fn query_by_worker_and_time_range(
        &self,
        worker_id: WorkerId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<AttendanceEvent>>;

    fn update_worker_status(
        &mut self,
        worker_id: WorkerId,
        status: WorkerStatus,
        last_active: DateTime<Utc>,
    ) -> AppResult<()>;
}

pub trait WorkerDirectory {
    fn get_by_id(&self, worker_id: WorkerId) -> AppResult<Option<Worker>>;

    /// Delete the worker and all of its attendance events as one logical
    /// operation.
    fn delete_worker_cascade(&mut self, worker_id: WorkerId) -> AppResult<()>;

    fn create_worker(&mut self, worker: &NewWorker) -> AppResult<WorkerId>;

    fn update_worker(&mut self, worker_id: WorkerId, update: &WorkerUpdate) -> AppResult<Worker>;

    /// All workers, newest first.
    fn list_workers(&self) -> AppResult<Vec<Worker>>;
}

/// Callback seam for "the worker list changed" notifications.
/// Owned by the presentation layer; the core never subscribes itself.
pub trait WorkerListObserver {
    fn on_worker_list_changed(&mut self, workers: &[Worker]);
}
