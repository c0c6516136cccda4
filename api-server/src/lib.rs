//! Clinic API Server Library
//!
//! This library provides configuration loading, telemetry setup and
//! application wiring for the clinic directory HTTP server.

pub mod config;
pub mod setup;
pub mod telemetry;

pub use config::Config;
pub use setup::{connect_database, create_repositories, initialize_app, Application};
pub use telemetry::init_telemetry;
