use chrono::{DateTime, Duration, TimeZone, Utc};
use janitrack::core::attendance::AttendanceLogic;
use janitrack::core::calculator::drift::detect_drift;
use janitrack::core::clock::FixedClock;
use janitrack::core::status::StatusMachine;
use janitrack::core::workers::{WorkerFilter, WorkerLogic};
use janitrack::db::initialize::init_db;
use janitrack::db::pool::DbPool;
use janitrack::errors::AppError;
use janitrack::models::attendance_type::AttendanceType;
use janitrack::models::status::WorkerStatus;
use janitrack::models::worker::{NewWorker, WorkerId};
use janitrack::store::memory::MemoryStore;
use janitrack::store::{EventStore, WorkerDirectory};
use std::sync::{Arc, Mutex};
use std::thread;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()
}

fn janitor(name: &str) -> NewWorker {
    NewWorker {
        name: name.into(),
        email: format!("{}@facility.io", name.to_lowercase().replace(' ', ".")),
        shift: "morning".into(),
        ..Default::default()
    }
}

/// 08:00 in, 12:00 break, 12:30 back, 16:00 out.
fn run_shift<S>(store: &mut S, id: WorkerId, clock: &FixedClock)
where
    S: EventStore + WorkerDirectory,
{
    let mut sm = StatusMachine::with_clock(store, clock);
    sm.toggle_clock(id).unwrap();
    clock.advance(Duration::hours(4));
    sm.toggle_break(id).unwrap();
    clock.advance(Duration::minutes(30));
    sm.toggle_break(id).unwrap();
    clock.advance(Duration::minutes(210));
    sm.toggle_clock(id).unwrap();
}

#[test]
fn shift_over_memory_store() {
    let mut store = MemoryStore::new();
    let id = WorkerLogic::add(&mut store, &janitor("Rosa Diaz")).unwrap().id;
    let clock = FixedClock::new(t0());

    run_shift(&mut store, id, &clock);

    let summary = AttendanceLogic::recent(&store, id, 50).unwrap();
    assert_eq!(summary.records.len(), 4);
    assert_eq!(summary.records[0].kind, AttendanceType::ClockOut);
    assert!((summary.report.total_hours - 7.5).abs() < 1e-9);
    assert_eq!(
        WorkerLogic::show(&store, id).unwrap().last_active,
        Some(t0() + Duration::hours(8))
    );
}

#[test]
fn shift_over_sqlite_inside_serialized_units() {
    let mut pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    let id = WorkerLogic::add(&mut pool, &janitor("Rosa Diaz")).unwrap().id;
    let clock = FixedClock::new(t0());

    pool.serialized(|p| {
        run_shift(p, id, &clock);
        Ok(())
    })
    .unwrap();

    // on break → clock toggle rejected, nothing committed
    clock.set(t0() + Duration::hours(10));
    pool.serialized(|p| StatusMachine::with_clock(p, &clock).toggle_clock(id))
        .unwrap();
    pool.serialized(|p| StatusMachine::with_clock(p, &clock).toggle_break(id))
        .unwrap();
    let err = pool
        .serialized(|p| StatusMachine::with_clock(p, &clock).toggle_clock(id))
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidTransition { .. }));

    let summary = AttendanceLogic::recent(&pool, id, 50).unwrap();
    assert_eq!(summary.records.len(), 6);
    assert!((summary.report.total_hours - 7.5).abs() < 1e-9);
    assert!(summary.report.open_session().is_some());
    assert_eq!(
        pool.get_by_id(id).unwrap().unwrap().status,
        WorkerStatus::OnBreak
    );
}

#[test]
fn transitions_behind_a_mutex_stay_consistent() {
    let store = Arc::new(Mutex::new(MemoryStore::new()));
    let id = WorkerLogic::add(&mut *store.lock().unwrap(), &janitor("Sam Ito"))
        .unwrap()
        .id;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut guard = store.lock().unwrap();
                StatusMachine::new(&mut *guard).toggle_clock(id).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let store = store.lock().unwrap();
    let kinds: Vec<_> = store.events_for(id).iter().map(|e| e.kind).collect();
    assert_eq!(kinds.len(), 8);
    for pair in kinds.chunks(2) {
        assert_eq!(pair, [AttendanceType::ClockIn, AttendanceType::ClockOut]);
    }
    assert_eq!(
        store.get_by_id(id).unwrap().unwrap().status,
        WorkerStatus::OffDuty
    );
}

#[test]
fn orphaned_event_is_visible_as_drift() {
    let mut store = MemoryStore::new();
    let id = WorkerLogic::add(&mut store, &janitor("Lee Chan")).unwrap().id;
    store.fail_status_update = true;

    let err = StatusMachine::new(&mut store).toggle_clock(id).unwrap_err();
    assert!(err.is_persistence_failure());
    assert_eq!(store.events_for(id).len(), 1);

    let worker = store.get_by_id(id).unwrap().unwrap();
    let drift = detect_drift(&worker, &store.events_for(id)).expect("drift");
    assert_eq!(drift.stored, WorkerStatus::OffDuty);
    assert_eq!(drift.implied, WorkerStatus::Active);
}

#[test]
fn cascade_delete_then_listing() {
    let mut pool = DbPool::in_memory().unwrap();
    init_db(&pool.conn).unwrap();
    let a = WorkerLogic::add(&mut pool, &janitor("Ana Ruiz")).unwrap().id;
    let b = WorkerLogic::add(&mut pool, &janitor("Bo Lind")).unwrap().id;
    let clock = FixedClock::new(t0());
    run_shift(&mut pool, a, &clock);
    run_shift(&mut pool, b, &clock);

    WorkerLogic::delete(&mut pool, a).unwrap();

    assert!(pool.query_by_worker(a, 50).unwrap().is_empty());
    assert_eq!(pool.query_by_worker(b, 50).unwrap().len(), 4);

    let listing = WorkerLogic::list(&pool, &WorkerFilter::default()).unwrap();
    assert_eq!(listing.workers.len(), 1);
    assert_eq!(listing.counts.off_duty, 1);
}
