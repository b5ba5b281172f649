use crate::api::routes;
use crate::config::ServiceConfig;
use crate::db::Database;
use tracing::info;

/// Opens the database, bootstraps the schema and serves the API until the process stops
///
/// # Arguments
/// * `config` - Resolved service configuration
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Error if the store or the listener cannot be set up
pub async fn launch_server(config: &ServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::new(&config.database_path, config.pool_size)?;
    database.init_schema()?;
    info!("Using database at {}", config.database_path);

    let app = routes::app(database);

    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
