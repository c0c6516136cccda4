//! Database crate for the clinic directory API
//!
//! This crate provides MongoDB implementations of the `TaskRepository` and
//! `DoctorRepository` traits on top of a single pooled client.
//!
//! # Features
//!
//! - One shared, pooled client with a bounded connect timeout and a startup ping
//! - Typed BSON documents that omit empty fields on write
//! - Partial `$set` updates with upsert disabled
//! - Paginated, rating-sorted doctor listings with text search
//! - Driver errors mapped onto `ClinicError`
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use database::{MongoConnection, MongoDoctorRepository, MongoSettings};
//! use clinic_core::repository::DoctorRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = MongoSettings {
//!         scheme: "mongodb".to_string(),
//!         endpoint: "localhost:27017".to_string(),
//!         ..Default::default()
//!     };
//!     let connection = Arc::new(MongoConnection::connect(settings).await?);
//!
//!     let doctors = MongoDoctorRepository::new(connection.clone());
//!     doctors.ensure_indexes().await?;
//!
//!     println!("Database is healthy!");
//!     Ok(())
//! }
//! ```

mod common;
mod connection;
mod doctor_repository;
mod task_repository;

pub use common::{DoctorDocument, TaskDocument, RATING_FIELD, TEXT_INDEX_FIELD};
pub use connection::{MongoConnection, MongoSettings, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_SCHEME};
pub use doctor_repository::MongoDoctorRepository;
pub use task_repository::MongoTaskRepository;

// Re-export commonly used types from clinic-core for convenience
pub use clinic_core::{
    error::{ClinicError, Result},
    models::{Doctor, DoctorPage, DoctorQuery, NewDoctor, NewTask, Task, UpdateDoctor, UpdateTask},
    repository::{DoctorRepository, TaskRepository},
};
