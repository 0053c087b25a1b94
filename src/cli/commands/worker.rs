use crate::cli::commands::open_db;
use crate::cli::parser::{Commands, WorkerAction};
use crate::config::Config;
use crate::core::attendance::{AttendanceLogic, AttendanceSummary};
use crate::core::workers::{WorkerFilter, WorkerListing, WorkerLogic};
use crate::db::log::ttlog_quiet;
use crate::errors::{AppError, AppResult};
use crate::models::status::WorkerStatus;
use crate::models::worker::{NewWorker, Worker, WorkerUpdate};
use crate::ui::messages::{header, info, success, warning};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW, colorize_in_out};
use crate::utils::formatting::{bold, or_dash, print_separator};
use crate::utils::table::{Column, Table};
use crate::utils::time::hours2readable;
use crate::utils::{describe_status, format_hours};
use std::io::{self, Write};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Worker { action } = cmd else {
        return Ok(());
    };

    let mut pool = open_db(cfg)?;

    match action {
        WorkerAction::Add {
            name,
            email,
            shift,
            phone,
            area,
            notes,
            status,
        } => {
            let status = WorkerStatus::from_db_str(status)
                .ok_or_else(|| AppError::InvalidStatus(status.clone()))?;

            let new = NewWorker {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                phone: phone.clone(),
                shift: shift.clone().unwrap_or_else(|| cfg.default_shift.clone()),
                area: area.clone(),
                notes: notes.clone(),
                status,
            };

            let worker = WorkerLogic::add(&mut pool, &new)?;
            success(format!("Worker #{} {} added.", worker.id, worker.name));
            ttlog_quiet(
                &pool.conn,
                "worker_add",
                &format!("worker {}", worker.id),
                &format!("{} <{}> shift {}", worker.name, worker.email, worker.shift),
            );
        }

        WorkerAction::Edit {
            id,
            name,
            email,
            phone,
            shift,
            area,
            notes,
        } => {
            let update = WorkerUpdate {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                shift: shift.clone(),
                area: area.clone(),
                notes: notes.clone(),
            };

            let worker = WorkerLogic::edit(&mut pool, *id, &update)?;
            success(format!("Worker #{} {} updated.", worker.id, worker.name));
            ttlog_quiet(
                &pool.conn,
                "worker_edit",
                &format!("worker {}", worker.id),
                &format!("{} updated", worker.name),
            );
        }

        WorkerAction::Del { id, yes } => {
            let worker = WorkerLogic::show(&pool, *id)?;

            if !*yes && !confirm_delete(&worker)? {
                info("Deletion cancelled.");
                return Ok(());
            }

            let removed = WorkerLogic::delete(&mut pool, *id)?;
            success(format!(
                "Worker #{} {} and all attendance records deleted.",
                removed.id, removed.name
            ));
            ttlog_quiet(
                &pool.conn,
                "worker_del",
                &format!("worker {}", removed.id),
                &format!("{} deleted with attendance", removed.name),
            );
        }

        WorkerAction::List {
            search,
            status,
            shift,
        } => {
            let filter =
                WorkerFilter::from_raw(search.as_deref(), status.as_deref(), shift.as_deref())?;
            let listing = WorkerLogic::list(&pool, &filter)?;
            print_listing(&listing, cfg);
        }

        WorkerAction::Show { id, today } => {
            let worker = WorkerLogic::show(&pool, *id)?;
            let summary = if *today {
                AttendanceLogic::today(&pool, *id)?
            } else {
                AttendanceLogic::recent(&pool, *id, cfg.history_limit)?
            };
            print_details(&worker, &summary, cfg);
        }
    }

    Ok(())
}

fn confirm_delete(worker: &Worker) -> AppResult<bool> {
    warning(format!(
        "This removes worker #{} {} and every attendance record.",
        worker.id, worker.name
    ));
    print!("Are you sure? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn print_listing(listing: &WorkerListing, cfg: &Config) {
    if listing.workers.is_empty() {
        info("No workers match the given filters.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("NAME", 22),
        Column::new("EMAIL", 26),
        Column::new("PHONE", 14),
        Column::new("SHIFT", 10),
        Column::new("AREA", 12),
        Column::new("STATUS", 9),
        Column::new("LAST ACTIVE", 19),
    ]);

    for w in &listing.workers {
        table.add_row(vec![
            w.id.to_string(),
            w.name.clone(),
            w.email.clone(),
            or_dash(w.phone.as_deref()),
            w.shift.clone(),
            or_dash(w.area.as_deref()),
            describe_status(w.status),
            w.last_active_display(),
        ]);
    }

    print!("{}", table.render());
    print_separator(&cfg.separator_char, 122);

    let c = listing.counts;
    println!(
        "{} total | {GREEN}{} active{RESET} | {YELLOW}{} on break{RESET} | {GREY}{} off duty{RESET}",
        bold(&c.total.to_string()),
        c.active,
        c.on_break,
        c.off_duty,
    );
}

fn print_details(worker: &Worker, summary: &AttendanceSummary, cfg: &Config) {
    header(format!("#{} {}", worker.id, worker.name));

    println!("{CYAN}Email:{RESET}       {}", worker.email);
    println!("{CYAN}Phone:{RESET}       {}", or_dash(worker.phone.as_deref()));
    println!("{CYAN}Shift:{RESET}       {}", worker.shift);
    println!("{CYAN}Area:{RESET}        {}", or_dash(worker.area.as_deref()));
    println!("{CYAN}Notes:{RESET}       {}", or_dash(worker.notes.as_deref()));
    println!("{CYAN}Status:{RESET}      {}", describe_status(worker.status));
    println!("{CYAN}Last active:{RESET} {}", worker.last_active_display());
    println!();

    header("Attendance");
    if summary.records.is_empty() {
        info("No attendance records.");
    } else {
        for ev in &summary.records {
            println!(
                "  {} {} at {}",
                ev.kind.icon(),
                colorize_in_out(ev.kind.label(), ev.kind.resumes_work()),
                ev.get_date_time()
            );
        }
    }
    println!();

    header("Sessions");
    let report = &summary.report;
    for s in &report.sessions {
        let end = s
            .end
            .map(|e| e.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "in progress".to_string());
        println!(
            "  {} → {}  breaks: {}  net: {}",
            s.start.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
            end,
            s.breaks.len(),
            hours2readable(s.net_hours())
        );
    }

    print_separator(&cfg.separator_char, 40);
    println!(
        "Total Hours: {}",
        bold(&format_hours(report.total_hours, cfg.hours_precision))
    );
}
