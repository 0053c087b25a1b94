use crate::db::pool::DbPool;
use crate::models::status::WorkerStatus;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use chrono::{DateTime, Local};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) WORKERS (per status)
    //
    let workers: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM workers", [], |row| row.get(0))?;
    println!("{}• Workers:{} {}{}{}", CYAN, RESET, GREEN, workers, RESET);

    for status in WorkerStatus::ALL {
        let n: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM workers WHERE COALESCE(status, 'off-duty') = ?1",
            [status.to_db_str()],
            |row| row.get(0),
        )?;
        println!("    {:<9} {}", status.label(), n);
    }

    //
    // 3) TOTAL ATTENDANCE EVENTS
    //
    let count: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
    println!(
        "{}• Attendance events:{} {}{}{}",
        CYAN, RESET, GREEN, count, RESET
    );

    //
    // 4) DATE RANGE
    //
    let first: Option<String> = pool
        .conn
        .query_row("SELECT MIN(timestamp) FROM attendance", [], |row| row.get(0))
        .optional()?
        .flatten();
    let last: Option<String> = pool
        .conn
        .query_row("SELECT MAX(timestamp) FROM attendance", [], |row| row.get(0))
        .optional()?
        .flatten();

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", local_date_or_dash(first.as_deref()));
    println!("    to:   {}", local_date_or_dash(last.as_deref()));

    println!();
    Ok(())
}

fn local_date_or_dash(raw: Option<&str>) -> String {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| format!("{GREY}--{RESET}"))
}
