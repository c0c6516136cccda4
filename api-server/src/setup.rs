use anyhow::{Context, Result};
use clinic_core::DoctorRepository;
use database::{MongoConnection, MongoDoctorRepository, MongoTaskRepository};
use http_api::ApiServer;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;

/// The HTTP server wired to MongoDB repositories
pub type ClinicServer = ApiServer<MongoTaskRepository, MongoDoctorRepository>;

/// Everything `main` needs to run and later shut down
pub struct Application {
    pub connection: Arc<MongoConnection>,
    pub server: ClinicServer,
}

/// Connect the shared client; fails when the cluster does not answer a ping
pub async fn connect_database(config: &Config) -> Result<Arc<MongoConnection>> {
    info!(endpoint = %config.database.endpoint, "Connecting to MongoDB");

    let connection = MongoConnection::connect(config.mongo_settings())
        .await
        .context("Failed to connect to MongoDB")?;

    Ok(Arc::new(connection))
}

/// Create both repositories over one connection and ensure their indexes
pub async fn create_repositories(
    connection: Arc<MongoConnection>,
) -> Result<(Arc<MongoTaskRepository>, Arc<MongoDoctorRepository>)> {
    let tasks = MongoTaskRepository::new(connection.clone());
    let doctors = MongoDoctorRepository::new(connection);

    info!("Ensuring doctor search index");
    doctors
        .ensure_indexes()
        .await
        .context("Failed to create doctor indexes")?;

    Ok((Arc::new(tasks), Arc::new(doctors)))
}

/// Initialize the complete application
pub async fn initialize_app(config: &Config) -> Result<Application> {
    info!("Initializing application");

    let connection = connect_database(config).await?;
    let (tasks, doctors) = create_repositories(connection.clone())
        .await
        .context("Failed to create repositories")?;

    let server = ApiServer::new(tasks, doctors);

    info!("Application initialized successfully");
    Ok(Application { connection, server })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_app_fails_without_database() {
        let mut config = Config::default();
        config.database.uri = Some("mongodb://127.0.0.1:1/?directConnection=true".to_string());
        config.database.connect_timeout = 1;

        let error = match initialize_app(&config).await {
            Ok(_) => panic!("Startup should fail without a reachable database"),
            Err(error) => error,
        };
        assert!(error.to_string().contains("Failed to connect to MongoDB"));
    }
}
