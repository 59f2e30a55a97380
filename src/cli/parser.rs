use clap::{Parser, Subcommand};

/// Command-line interface definition for shiftlog
/// CLI application to track shift attendance with SQLite
#[derive(Parser)]
#[command(
    name = "shiftlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "A shift attendance CLI: clock in/out against named shifts and track lateness using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the configured user identity
    #[arg(global = true, long = "user")]
    pub user: Option<String>,

    /// Act with admin rights (normally granted via the config file)
    #[arg(global = true, long = "admin", hide = true)]
    pub admin: bool,

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

    /// Manage the configuration file (view or check)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration (including the business timezone)")]
        check: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Clock in for a shift
    In {
        #[arg(long = "shift", help = "Shift code (defaults to the day's selection, else the closest shift)")]
        shift: Option<String>,

        #[arg(long = "type", help = "Shift type: regular or relief")]
        shift_type: Option<String>,

        #[arg(
            long = "at",
            help = "Wall-clock override \"YYYY-MM-DD HH:MM\" in the business timezone (defaults to now)"
        )]
        at: Option<String>,

        #[arg(long = "lat", requires = "lng", help = "Latitude of the clock action")]
        lat: Option<f64>,

        #[arg(long = "lng", requires = "lat", help = "Longitude of the clock action")]
        lng: Option<f64>,

        #[arg(long = "acc", help = "Position accuracy in meters")]
        acc: Option<f64>,
    },

    /// Clock out from the current shift
    Out {
        #[arg(long = "reason", help = "Early-departure reason (max 200 characters)")]
        reason: Option<String>,

        #[arg(long = "type", help = "Shift type: regular or relief")]
        shift_type: Option<String>,

        #[arg(
            long = "at",
            help = "Wall-clock override \"YYYY-MM-DD HH:MM\" in the business timezone (defaults to now)"
        )]
        at: Option<String>,

        #[arg(long = "lat", requires = "lng", help = "Latitude of the clock action")]
        lat: Option<f64>,

        #[arg(long = "lng", requires = "lat", help = "Longitude of the clock action")]
        lng: Option<f64>,

        #[arg(long = "acc", help = "Position accuracy in meters")]
        acc: Option<f64>,
    },

    /// Show the derived attendance state for a day
    Status {
        #[arg(long = "date", help = "Day to inspect (YYYY-MM-DD, defaults to today)")]
        date: Option<String>,

        #[arg(long = "json", help = "Emit the state as JSON")]
        json: bool,
    },

    /// Monthly attendance report
    Report {
        #[arg(long = "month", help = "Month to report (YYYY-MM, defaults to the current month)")]
        month: Option<String>,

        #[arg(long = "for", help = "Report another user (admin only)")]
        for_user: Option<String>,

        #[arg(long = "json", help = "Emit the report as JSON")]
        json: bool,
    },

    /// Delete all logs and the day record for a date (irreversible)
    Reset {
        #[arg(long = "date", help = "Day to reset (YYYY-MM-DD, defaults to today)")]
        date: Option<String>,
    },

    /// Inspect or manage the shift catalog
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// List catalog shifts (active only unless --all)
    List {
        #[arg(long = "all", help = "Include inactive shifts")]
        all: bool,
    },

    /// Select the shift (and optionally the type) for a day
    Set {
        /// Shift code to select
        code: String,

        #[arg(long = "type", help = "Shift type: regular or relief")]
        shift_type: Option<String>,

        #[arg(long = "date", help = "Day to set (YYYY-MM-DD, defaults to today)")]
        date: Option<String>,
    },

    /// Create a shift definition (admin)
    Add {
        /// Unique shift code
        code: String,

        #[arg(long, help = "Human-readable label")]
        label: String,

        #[arg(long, help = "Start time (HH:MM)")]
        start: String,

        #[arg(long, help = "End time (HH:MM); earlier than start means the shift crosses midnight")]
        end: String,

        #[arg(long, default_value_t = 0, help = "Catalog sort position")]
        sort: i32,

        #[arg(long, help = "Create the shift as inactive")]
        inactive: bool,
    },

    /// Edit a shift definition (admin)
    Update {
        /// Shift code to edit
        code: String,

        #[arg(long)]
        label: Option<String>,

        #[arg(long, help = "Start time (HH:MM)")]
        start: Option<String>,

        #[arg(long, help = "End time (HH:MM)")]
        end: Option<String>,

        #[arg(long)]
        sort: Option<i32>,

        #[arg(long, help = "Activate (true) or deactivate (false) the shift")]
        active: Option<bool>,
    },

    /// Delete a shift definition (admin)
    Del {
        /// Shift code to delete
        code: String,
    },
}
