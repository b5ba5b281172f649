use crate::cli::Cli;

/// Fallback database file when neither the CLI nor the environment names one
pub const DEFAULT_DATABASE_PATH: &str = "libris.db";

/// Environment variable consulted for the database path
pub const DATABASE_PATH_ENV: &str = "DATABASE_PATH";

/// Runtime settings for the service, resolved from CLI arguments and the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// SQLite database file
    pub database_path: String,
    /// Maximum pooled connections
    pub pool_size: u32,
}

impl ServiceConfig {
    /// Builds the configuration, reading `DATABASE_PATH` when no path was given on the command line
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(cli, std::env::var(DATABASE_PATH_ENV).ok())
    }

    fn resolve(cli: &Cli, env_database_path: Option<String>) -> Self {
        let database_path = cli
            .database_path
            .clone()
            .or(env_database_path)
            .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string());

        ServiceConfig {
            host: cli.host.clone(),
            port: cli.port,
            database_path,
            pool_size: cli.pool_size.max(1),
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
