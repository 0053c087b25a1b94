//! In-process store implementing both collaborators.
//!
//! Keeps everything in memory and supports failure injection, so callers can
//! observe the append-before-update ordering of the state machine.

use super::{EventStore, WorkerDirectory, WorkerListObserver};
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEvent, EventId};
use crate::models::status::WorkerStatus;
use crate::models::worker::{NewWorker, Worker, WorkerId, WorkerUpdate};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MemoryStore {
    workers: BTreeMap<WorkerId, Worker>,
    events: Vec<AttendanceEvent>,
    next_worker_id: WorkerId,
    next_event_id: EventId,
    observers: Vec<Box<dyn WorkerListObserver + Send>>,

    /// When set, `append` fails with a persistence error.
    pub fail_append: bool,
    /// When set, `update_worker_status` fails with a persistence error.
    pub fail_status_update: bool,

    pub append_calls: usize,
    pub status_updates: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer notified after every write touching workers.
    pub fn subscribe(&mut self, observer: Box<dyn WorkerListObserver + Send>) {
        self.observers.push(observer);
    }

    /// Every stored event, in append order.
    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }

    pub fn events_for(&self, worker_id: WorkerId) -> Vec<AttendanceEvent> {
        self.events
            .iter()
            .filter(|e| e.worker_id == worker_id)
            .cloned()
            .collect()
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.sorted_workers();
        for obs in self.observers.iter_mut() {
            obs.on_worker_list_changed(&snapshot);
        }
    }

    fn sorted_workers(&self) -> Vec<Worker> {
        let mut all: Vec<Worker> = self.workers.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        all
    }
}

impl EventStore for MemoryStore {
    fn append(&mut self, event: &AttendanceEvent) -> AppResult<EventId> {
        self.append_calls += 1;

        if self.fail_append {
            return Err(AppError::Persistence("append rejected".into()));
        }

        self.next_event_id += 1;
        let id = self.next_event_id;
        self.events.push(event.clone().with_id(id));
        Ok(id)
    }

    fn query_by_worker(
        &self,
        worker_id: WorkerId,
        limit: usize,
    ) -> AppResult<Vec<AttendanceEvent>> {
        let mut out = self.events_for(worker_id);
        out.sort_by(|a, b| (b.timestamp, b.id).cmp(&(a.timestamp, a.id)));
        out.truncate(limit);
        Ok(out)
    }

    fn query_by_worker_and_time_range(
        &self,
        worker_id: WorkerId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<AttendanceEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.worker_id == worker_id && e.timestamp >= start && e.timestamp < end)
            .cloned()
            .collect())
    }

    fn update_worker_status(
        &mut self,
        worker_id: WorkerId,
        status: WorkerStatus,
        last_active: DateTime<Utc>,
    ) -> AppResult<()> {
        if self.fail_status_update {
            return Err(AppError::Persistence("status update rejected".into()));
        }

        let worker = self
            .workers
            .get_mut(&worker_id)
            .ok_or(AppError::NotFound(worker_id))?;
        worker.status = status;
        worker.last_active = Some(last_active);
        self.status_updates += 1;

        self.notify();
        Ok(())
    }
}

impl WorkerDirectory for MemoryStore {
    fn get_by_id(&self, worker_id: WorkerId) -> AppResult<Option<Worker>> {
        Ok(self.workers.get(&worker_id).cloned())
    }

    fn delete_worker_cascade(&mut self, worker_id: WorkerId) -> AppResult<()> {
        if self.workers.remove(&worker_id).is_none() {
            return Err(AppError::NotFound(worker_id));
        }
        self.events.retain(|e| e.worker_id != worker_id);

        self.notify();
        Ok(())
    }

    fn create_worker(&mut self, new: &NewWorker) -> AppResult<WorkerId> {
        new.validate()?;

        self.next_worker_id += 1;
        let id = self.next_worker_id;
        let now = Utc::now();
        self.workers.insert(
            id,
            Worker {
                id,
                name: new.name.clone(),
                email: new.email.clone(),
                phone: new.phone.clone(),
                shift: new.shift.clone(),
                area: new.area.clone(),
                notes: new.notes.clone(),
                status: new.status,
                last_active: Some(now),
                created_at: now,
            },
        );

        self.notify();
        Ok(id)
    }

    fn update_worker(&mut self, worker_id: WorkerId, update: &WorkerUpdate) -> AppResult<Worker> {
        let mut snapshot = self
            .workers
            .get(&worker_id)
            .cloned()
            .ok_or(AppError::NotFound(worker_id))?;
        update.apply_to(&mut snapshot)?;
        self.workers.insert(worker_id, snapshot.clone());

        self.notify();
        Ok(snapshot)
    }

    fn list_workers(&self) -> AppResult<Vec<Worker>> {
        Ok(self.sorted_workers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance_type::AttendanceType;
    use chrono::{TimeZone, Timelike};
    use std::sync::{Arc, Mutex};

    fn new_worker(name: &str) -> NewWorker {
        NewWorker {
            name: name.into(),
            email: format!("{}@site.org", name.to_lowercase()),
            shift: "morning".into(),
            ..Default::default()
        }
    }

    struct Recorder(Arc<Mutex<Vec<usize>>>);

    impl WorkerListObserver for Recorder {
        fn on_worker_list_changed(&mut self, workers: &[Worker]) {
            self.0.lock().unwrap().push(workers.len());
        }
    }

    #[test]
    fn cascade_delete_removes_only_that_workers_events() {
        let mut store = MemoryStore::new();
        let a = store.create_worker(&new_worker("Ana")).unwrap();
        let b = store.create_worker(&new_worker("Ben")).unwrap();
        let t = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();

        store
            .append(&AttendanceEvent::new(a, AttendanceType::ClockIn, t))
            .unwrap();
        store
            .append(&AttendanceEvent::new(b, AttendanceType::ClockIn, t))
            .unwrap();

        store.delete_worker_cascade(a).unwrap();

        assert!(store.get_by_id(a).unwrap().is_none());
        assert!(store.events_for(a).is_empty());
        assert_eq!(store.events_for(b).len(), 1);
        assert!(matches!(
            store.delete_worker_cascade(a),
            Err(AppError::NotFound(id)) if id == a
        ));
    }

    #[test]
    fn time_range_is_half_open() {
        let mut store = MemoryStore::new();
        let id = store.create_worker(&new_worker("Ana")).unwrap();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();

        store
            .append(&AttendanceEvent::new(id, AttendanceType::ClockIn, t0))
            .unwrap();
        store
            .append(&AttendanceEvent::new(id, AttendanceType::ClockOut, t1))
            .unwrap();

        let hits = store.query_by_worker_and_time_range(id, t0, t1).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, AttendanceType::ClockIn);
    }

    #[test]
    fn query_by_worker_keeps_most_recent() {
        let mut store = MemoryStore::new();
        let id = store.create_worker(&new_worker("Ana")).unwrap();
        for h in 0..5 {
            let t = Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap();
            store
                .append(&AttendanceEvent::new(id, AttendanceType::ClockIn, t))
                .unwrap();
        }

        let recent = store.query_by_worker(id, 2).unwrap();
        assert_eq!(recent.len(), 2);
        assert!(recent.iter().all(|e| e.timestamp.hour() >= 3));
    }

    #[test]
    fn observers_are_notified_on_write() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut store = MemoryStore::new();
        store.subscribe(Box::new(Recorder(seen.clone())));

        let id = store.create_worker(&new_worker("Ana")).unwrap();
        store.create_worker(&new_worker("Ben")).unwrap();
        store
            .update_worker_status(id, WorkerStatus::Active, Utc::now())
            .unwrap();
        store.delete_worker_cascade(id).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 2, 1]);
    }

    #[test]
    fn status_update_on_missing_worker_is_not_found() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.update_worker_status(9, WorkerStatus::Active, Utc::now()),
            Err(AppError::NotFound(9))
        ));
    }
}
