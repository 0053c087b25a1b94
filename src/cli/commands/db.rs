use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calculator::drift::detect_drift;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_attendance, load_workers};
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use crate::utils::describe_status;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
        drift,
    } = cmd
    {
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&mut pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        //
        // 5) DRIFT (stored status vs. status implied by attendance)
        //
        if *drift {
            report_drift(&pool)?;
        }
    }

    Ok(())
}

fn report_drift(pool: &DbPool) -> AppResult<()> {
    println!("{}▶ Comparing stored status with attendance…{}", CYAN, RESET);

    let mut found = 0usize;
    for worker in load_workers(&pool.conn)? {
        let events = load_all_attendance(&pool.conn, Some(worker.id))?;
        if let Some(d) = detect_drift(&worker, &events) {
            found += 1;
            println!(
                "{}✘ #{} {}:{} stored {} but attendance implies {}",
                YELLOW,
                d.worker_id,
                worker.name,
                RESET,
                describe_status(d.stored),
                describe_status(d.implied)
            );
        }
    }

    if found == 0 {
        println!("{}✔ No status drift found.{}\n", GREEN, RESET);
    } else {
        println!("{}{} worker(s) drifted.{}\n", YELLOW, found, RESET);
    }

    Ok(())
}
