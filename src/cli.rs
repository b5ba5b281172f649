use clap::Parser;

/// Command line interface for the application
#[derive(Parser, Debug)]
#[command(name = "libris", about = "HTTP service for authors and their books")]
pub struct Cli {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value_t = String::from("0.0.0.0"))]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,

    /// Path to the SQLite database file
    /// Falls back to the DATABASE_PATH environment variable, then "libris.db"
    #[arg(long)]
    pub database_path: Option<String>,

    /// Maximum number of pooled database connections
    #[arg(long, default_value_t = 10)]
    pub pool_size: u32,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    /// Default: "info"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to a daily rotating file under "logs"
    #[arg(long)]
    pub log_file: bool,
}
