use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for janitrack
/// CLI application to track janitor duty status and attendance with SQLite
#[derive(Parser)]
#[command(
    name = "janitrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Track janitor duty status, clock-in/out and breaks, and worked hours using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view, check or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            requires = "edit_config",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage janitors (add, edit, delete, list, show)
    Worker {
        #[command(subcommand)]
        action: WorkerAction,
    },

    /// Set a worker's duty status explicitly
    Status {
        /// Worker id
        id: i64,

        /// Target status: off-duty, active, on-break
        status: String,

        #[arg(
            long = "at",
            value_name = "WHEN",
            help = "Event time (RFC 3339 or 'YYYY-MM-DD HH:MM', local)"
        )]
        at: Option<String>,
    },

    /// Clock toggle: off-duty ⇄ active
    Clock {
        /// Worker id
        id: i64,

        #[arg(
            long = "at",
            value_name = "WHEN",
            help = "Event time (RFC 3339 or 'YYYY-MM-DD HH:MM', local)"
        )]
        at: Option<String>,
    },

    /// Break toggle: active ⇄ on-break
    Break {
        /// Worker id
        id: i64,

        #[arg(
            long = "at",
            value_name = "WHEN",
            help = "Event time (RFC 3339 or 'YYYY-MM-DD HH:MM', local)"
        )]
        at: Option<String>,
    },

    /// Export attendance events or reconciled sessions
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(long = "worker", value_name = "ID", help = "Export a single worker")]
        worker: Option<i64>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 's', help = "Export reconciled sessions instead of raw events")]
        sessions: bool,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Compact the database file")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database statistics")]
        info: bool,

        #[arg(
            long = "drift",
            help = "Report workers whose stored status disagrees with their attendance"
        )]
        drift: bool,
    },
}

#[derive(Subcommand)]
pub enum WorkerAction {
    /// Register a new janitor
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Defaults to `default_shift` from the configuration
        #[arg(long)]
        shift: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        area: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long, default_value = "off-duty", help = "Initial status")]
        status: String,
    },

    /// Edit a janitor's details (status is changed with `status`/`clock`/`break`)
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        shift: Option<String>,

        #[arg(long)]
        area: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a janitor and all of their attendance
    Del {
        id: i64,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List janitors with status counts
    List {
        #[arg(long, help = "Search name, email, phone or id")]
        search: Option<String>,

        #[arg(long, help = "off-duty, active, on-break or all")]
        status: Option<String>,

        #[arg(long, help = "Shift name or all")]
        shift: Option<String>,
    },

    /// Show details, attendance records and worked hours
    Show {
        id: i64,

        #[arg(long = "today", help = "Only today's attendance")]
        today: bool,
    },
}
