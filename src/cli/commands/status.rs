use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::status::{StatusMachine, TransitionOutcome};
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::status::WorkerStatus;
use crate::ui::messages::{info, success};
use crate::utils::describe_status;
use crate::utils::time::parse_optional_instant;

/// Handle `status`, `clock` and `break`.
///
/// The read → append → update sequence runs inside one `BEGIN IMMEDIATE`
/// transaction so concurrent invocations on the same file are serialized.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let mut pool = open_db(cfg)?;

    let (op, outcome) = match cmd {
        Commands::Status { id, status, at } => {
            let target = WorkerStatus::from_db_str(status)
                .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;
            let at = parse_optional_instant(at.as_ref())?;

            let outcome = pool.serialized(|p| {
                let mut machine = StatusMachine::new(p);
                match at {
                    Some(ts) => machine.request_transition_at(*id, target, ts),
                    None => machine.request_transition(*id, target),
                }
            })?;
            ("status", outcome)
        }
        Commands::Clock { id, at } => {
            let at = parse_optional_instant(at.as_ref())?;

            let outcome = pool.serialized(|p| {
                let mut machine = StatusMachine::new(p);
                match at {
                    Some(ts) => machine.toggle_clock_at(*id, ts),
                    None => machine.toggle_clock(*id),
                }
            })?;
            ("clock", outcome)
        }
        Commands::Break { id, at } => {
            let at = parse_optional_instant(at.as_ref())?;

            let outcome = pool.serialized(|p| {
                let mut machine = StatusMachine::new(p);
                match at {
                    Some(ts) => machine.toggle_break_at(*id, ts),
                    None => machine.toggle_break(*id),
                }
            })?;
            ("break", outcome)
        }
        _ => return Ok(()),
    };

    report(&pool, op, &outcome);
    Ok(())
}

fn report(pool: &DbPool, op: &str, outcome: &TransitionOutcome) {
    let worker = &outcome.worker;

    let Some(event) = &outcome.event else {
        if op == "break" && !outcome.status.is_on_duty() {
            info(format!(
                "{} is off duty: clock in before taking a break.",
                worker.name
            ));
        } else {
            info(format!(
                "{} is already {}: nothing recorded.",
                worker.name,
                describe_status(outcome.status)
            ));
        }
        return;
    };

    success(format!(
        "{} {} at {} ({} → {})",
        worker.name,
        event.kind.label().to_lowercase(),
        event.get_date_time(),
        describe_status(outcome.previous),
        describe_status(outcome.status)
    ));

    ttlog_quiet(
        &pool.conn,
        op,
        &format!("worker {}", worker.id),
        &format!(
            "{}: {} -> {} ({} at {})",
            worker.name,
            outcome.previous,
            outcome.status,
            event.kind,
            event.timestamp.to_rfc3339()
        ),
    );
}
