use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use database::MongoSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Prefix of layered environment overrides, e.g. `CLINIC_SERVER__PORT`
const ENV_PREFIX: &str = "CLINIC";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Complete connection string; when set, the credential fields are ignored
    #[serde(default)]
    pub uri: Option<String>,
    pub username: String,
    pub password: String,
    /// Host (and optional port) of the cluster
    pub endpoint: String,
    /// `mongodb` or `mongodb+srv`
    pub scheme: String,
    /// Connect and server selection timeout in seconds
    pub connect_timeout: u64,
    /// Maximum number of pooled connections
    pub max_pool_size: u32,
    pub tasks_database: String,
    pub doctors_database: String,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("uri", &self.uri.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .field("scheme", &self.scheme)
            .field("connect_timeout", &self.connect_timeout)
            .field("max_pool_size", &self.max_pool_size)
            .field("tasks_database", &self.tasks_database)
            .field("doctors_database", &self.doctors_database)
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    /// Listen address for the HTTP server
    pub listen_addr: String,
    /// Port number to listen on
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

/// `CLINIC_*` overrides; values stay strings until deserialization so
/// credentials like `007` are kept verbatim
fn prefixed_environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl Config {
    /// Load configuration from the embedded defaults, `CONFIG_FILE` and the environment
    pub fn from_env() -> Result<Self> {
        let config_file = env::var("CONFIG_FILE").ok();
        Self::load(config_file.as_deref(), false)
    }

    /// Load configuration from a specific file path layered over the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path), true)
    }

    fn load(config_file: Option<&str>, required: bool) -> Result<Self> {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(path) = config_file {
            builder = builder.add_source(
                File::with_name(path)
                    .required(required)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(prefixed_environment());

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.apply_standard_env_vars(|key| env::var(key).ok())?;

        Ok(result)
    }

    /// Apply the conventional deployment variables
    ///
    /// `MONGODB_URI`, `MONGODB_USERNAME`, `MONGODB_PASSWORD`,
    /// `MONGODB_ENDPOINT`, `MONGODB_SCHEME`, `LISTEN_ADDR`, `PORT` and
    /// `LOG_LEVEL` win over every file and prefixed variable.
    pub fn apply_standard_env_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGODB_URI").filter(|uri| !uri.is_empty()) {
            self.database.uri = Some(uri);
        }

        if let Some(username) = lookup("MONGODB_USERNAME") {
            self.database.username = username;
        }

        if let Some(password) = lookup("MONGODB_PASSWORD") {
            self.database.password = password;
        }

        if let Some(endpoint) = lookup("MONGODB_ENDPOINT") {
            self.database.endpoint = endpoint;
        }

        if let Some(scheme) = lookup("MONGODB_SCHEME") {
            self.database.scheme = scheme;
        }

        if let Some(listen_addr) = lookup("LISTEN_ADDR") {
            self.server.listen_addr = listen_addr;
        }

        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {port}"))?;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.logging.level = log_level;
        }

        Ok(())
    }

    /// Connection settings for the storage layer
    pub fn mongo_settings(&self) -> MongoSettings {
        MongoSettings {
            uri: self.database.uri.clone(),
            scheme: self.database.scheme.clone(),
            username: self.database.username.clone(),
            password: self.database.password.clone(),
            endpoint: self.database.endpoint.clone(),
            connect_timeout: Duration::from_secs(self.database.connect_timeout),
            max_pool_size: self.database.max_pool_size,
            tasks_database: self.database.tasks_database.clone(),
            doctors_database: self.database.doctors_database.clone(),
        }
    }

    /// Get the server address as `host:port`
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.listen_addr, self.server.port)
    }

    /// Get the server socket address
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .server
            .listen_addr
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.server.listen_addr))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        if self.database.uri.is_none() {
            if self.database.endpoint.trim().is_empty() {
                return Err(anyhow::anyhow!("Database endpoint cannot be empty"));
            }

            if !matches!(self.database.scheme.as_str(), "mongodb" | "mongodb+srv") {
                return Err(anyhow::anyhow!(
                    "Invalid database scheme: {}. Must be 'mongodb' or 'mongodb+srv'",
                    self.database.scheme
                ));
            }
        }

        if self.database.connect_timeout == 0 {
            return Err(anyhow::anyhow!(
                "Database connect_timeout must be greater than 0"
            ));
        }

        if self.database.max_pool_size == 0 {
            return Err(anyhow::anyhow!(
                "Database max_pool_size must be greater than 0"
            ));
        }

        if self.database.tasks_database.is_empty() || self.database.doctors_database.is_empty() {
            return Err(anyhow::anyhow!("Database names cannot be empty"));
        }

        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        self.socket_addr()?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                uri: None,
                username: String::new(),
                password: String::new(),
                endpoint: "localhost:27017".to_string(),
                scheme: "mongodb+srv".to_string(),
                connect_timeout: 10,
                max_pool_size: 10,
                tasks_database: "tasks".to_string(),
                doctors_database: "doctors".to_string(),
            },
            server: ServerConfig {
                listen_addr: "0.0.0.0".to_string(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
            },
        }
    }
}
