//! `EventStore` / `WorkerDirectory` backed by SQLite.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::{AttendanceEvent, EventId};
use crate::models::status::WorkerStatus;
use crate::models::worker::{NewWorker, Worker, WorkerId, WorkerUpdate};
use crate::store::{EventStore, WorkerDirectory};
use chrono::{DateTime, Utc};

impl EventStore for DbPool {
    fn append(&mut self, event: &AttendanceEvent) -> AppResult<EventId> {
        queries::insert_attendance(&self.conn, event)
    }

    fn query_by_worker(
        &self,
        worker_id: WorkerId,
        limit: usize,
    ) -> AppResult<Vec<AttendanceEvent>> {
        queries::load_recent_attendance(&self.conn, worker_id, limit)
    }

    fn query_by_worker_and_time_range(
        &self,
        worker_id: WorkerId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<AttendanceEvent>> {
        queries::load_attendance_between(&self.conn, Some(worker_id), &start, &end)
    }

    fn update_worker_status(
        &mut self,
        worker_id: WorkerId,
        status: WorkerStatus,
        last_active: DateTime<Utc>,
    ) -> AppResult<()> {
        match queries::update_status(&self.conn, worker_id, status, &last_active)? {
            0 => Err(AppError::NotFound(worker_id)),
            _ => Ok(()),
        }
    }
}

impl WorkerDirectory for DbPool {
    fn get_by_id(&self, worker_id: WorkerId) -> AppResult<Option<Worker>> {
        queries::load_worker(&self.conn, worker_id)
    }

    fn delete_worker_cascade(&mut self, worker_id: WorkerId) -> AppResult<()> {
        // SAVEPOINT nests inside an outer `serialized` transaction too
        let sp = self.conn.savepoint()?;
        let deleted = queries::delete_worker_and_attendance(&sp, worker_id)?;
        if deleted == 0 {
            // dropping the savepoint rolls it back
            return Err(AppError::NotFound(worker_id));
        }
        sp.commit()?;
        Ok(())
    }

    fn create_worker(&mut self, worker: &NewWorker) -> AppResult<WorkerId> {
        worker.validate()?;
        queries::insert_worker(&self.conn, worker, &Utc::now())
    }

    fn update_worker(&mut self, worker_id: WorkerId, update: &WorkerUpdate) -> AppResult<Worker> {
        let mut worker =
            queries::load_worker(&self.conn, worker_id)?.ok_or(AppError::NotFound(worker_id))?;
        update.apply_to(&mut worker)?;
        queries::update_worker_fields(&self.conn, &worker)?;
        Ok(worker)
    }

    fn list_workers(&self) -> AppResult<Vec<Worker>> {
        queries::load_workers(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attendance::AttendanceLogic;
    use crate::core::calculator::sessions::compute_sessions;
    use crate::core::clock::FixedClock;
    use crate::core::status::StatusMachine;
    use crate::db::initialize::init_db;
    use crate::models::attendance_type::AttendanceType;
    use chrono::{Duration, TimeZone};

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    fn add(pool: &mut DbPool, name: &str) -> WorkerId {
        pool.create_worker(&NewWorker {
            name: name.into(),
            email: format!("{}@campus.edu", name.to_lowercase()),
            shift: "morning".into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn serialized_transition_commits_event_and_status() {
        let mut pool = pool();
        let id = add(&mut pool, "Tess");
        let t = Utc.with_ymd_and_hms(2025, 5, 5, 6, 0, 0).unwrap();

        let out = pool
            .serialized(|p| {
                StatusMachine::with_clock(p, FixedClock::new(t))
                    .request_transition(id, WorkerStatus::Active)
            })
            .unwrap();

        assert_eq!(out.status, WorkerStatus::Active);
        assert_eq!(
            pool.get_by_id(id).unwrap().unwrap().status,
            WorkerStatus::Active
        );
        let events = pool.query_by_worker(id, 10).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AttendanceType::ClockIn);
        assert_eq!(events[0].timestamp, t);
    }

    #[test]
    fn failed_unit_is_rolled_back() {
        let mut pool = pool();
        let id = add(&mut pool, "Tess");

        let res: AppResult<()> = pool.serialized(|p| {
            p.append(&AttendanceEvent::new(id, AttendanceType::ClockIn, Utc::now()))?;
            Err(AppError::Persistence("simulated".into()))
        });

        assert!(res.is_err());
        assert!(pool.query_by_worker(id, 10).unwrap().is_empty());
    }

    #[test]
    fn status_update_for_unknown_worker_is_not_found() {
        let mut pool = pool();
        assert!(matches!(
            pool.update_worker_status(404, WorkerStatus::Active, Utc::now()),
            Err(AppError::NotFound(404))
        ));
    }

    #[test]
    fn cascade_delete_removes_worker_and_events() {
        let mut pool = pool();
        let a = add(&mut pool, "Ana");
        let b = add(&mut pool, "Ben");
        let t = Utc.with_ymd_and_hms(2025, 5, 5, 6, 0, 0).unwrap();
        for id in [a, b] {
            pool.append(&AttendanceEvent::new(id, AttendanceType::ClockIn, t))
                .unwrap();
        }

        pool.delete_worker_cascade(a).unwrap();

        assert!(pool.get_by_id(a).unwrap().is_none());
        assert!(pool.query_by_worker(a, 10).unwrap().is_empty());
        assert_eq!(pool.query_by_worker(b, 10).unwrap().len(), 1);
        assert!(matches!(
            pool.delete_worker_cascade(a),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn range_query_and_reconcile_over_sqlite() {
        let mut pool = pool();
        let id = add(&mut pool, "Ana");
        let t0 = Utc.with_ymd_and_hms(2025, 5, 5, 6, 0, 0).unwrap();
        let kinds = [
            (0, AttendanceType::ClockIn),
            (120, AttendanceType::BreakStart),
            (150, AttendanceType::BreakEnd),
            (480, AttendanceType::ClockOut),
            (24 * 60, AttendanceType::ClockIn),
        ];
        for (m, k) in kinds {
            pool.append(&AttendanceEvent::new(id, k, t0 + Duration::minutes(m)))
                .unwrap();
        }

        let day = pool
            .query_by_worker_and_time_range(id, t0, t0 + Duration::days(1))
            .unwrap();
        assert_eq!(day.len(), 4);

        let report = compute_sessions(&pool.query_by_worker(id, 50).unwrap());
        assert_eq!(report.sessions.len(), 2);
        assert!((report.total_hours - 7.5).abs() < 1e-9);
    }

    #[test]
    fn list_is_newest_first_and_update_keeps_status() {
        let mut pool = pool();
        let a = add(&mut pool, "Ana");
        let b = add(&mut pool, "Ben");
        pool.update_worker_status(a, WorkerStatus::OnBreak, Utc::now())
            .unwrap();

        let ids: Vec<_> = pool.list_workers().unwrap().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![b, a]);

        let w = pool
            .update_worker(
                a,
                &WorkerUpdate {
                    shift: Some("night".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(w.shift, "night");
        assert_eq!(
            pool.get_by_id(a).unwrap().unwrap().status,
            WorkerStatus::OnBreak
        );
    }

    #[test]
    fn equal_timestamps_reconcile_in_emission_order() {
        let mut pool = pool();
        let id = add(&mut pool, "Ana");
        let t0 = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let kinds = [
            (0, AttendanceType::ClockIn),
            (0, AttendanceType::ClockOut),
            (60, AttendanceType::ClockIn),
            (540, AttendanceType::ClockOut),
        ];
        for (m, k) in kinds {
            pool.append(&AttendanceEvent::new(id, k, t0 + Duration::minutes(m)))
                .unwrap();
        }

        let shown = AttendanceLogic::recent(&pool, id, 50).unwrap();
        let all = queries::load_all_attendance(&pool.conn, Some(id)).unwrap();
        let exported = compute_sessions(&all);

        assert!((exported.total_hours - 8.0).abs() < 1e-9);
        assert!((shown.report.total_hours - exported.total_hours).abs() < 1e-9);
        assert_eq!(shown.report.sessions.len(), 2);
        assert_eq!(shown.records[0].kind, AttendanceType::ClockOut);
        assert_eq!(shown.records[3].kind, AttendanceType::ClockIn);
    }

    #[test]
    fn transition_outcome_matches_what_is_read_back() {
        let mut pool = pool();
        let id = add(&mut pool, "Tess");
        let t = Utc.with_ymd_and_hms(2025, 5, 5, 6, 0, 0).unwrap()
            + Duration::nanoseconds(123_456_789);

        let out = pool
            .serialized(|p| StatusMachine::with_clock(p, FixedClock::new(t)).toggle_clock(id))
            .unwrap();

        let stored = pool.get_by_id(id).unwrap().unwrap();
        assert_eq!(stored.last_active, out.worker.last_active);
        assert_eq!(stored.last_active, Some(t));
        let events = pool.query_by_worker(id, 10).unwrap();
        assert_eq!(Some(events[0].timestamp), out.event.map(|e| e.timestamp));
    }
}
