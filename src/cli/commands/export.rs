use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        worker,
        range,
        sessions,
        force,
    } = cmd
    {
        let mut pool = open_db(cfg)?;

        let rows = ExportLogic::export(
            &mut pool,
            format.clone(),
            file,
            range.as_deref(),
            *worker,
            *sessions,
            *force,
        )?;

        if rows > 0 {
            let what = if *sessions { "sessions" } else { "events" };
            ttlog_quiet(
                &pool.conn,
                "export",
                file,
                &format!("{rows} {what} exported as {}", format.as_str()),
            );
        }
    }

    Ok(())
}
