//! Clinic Core Library
//!
//! This crate provides the domain models, error types, validation rules and
//! repository traits for the clinic directory API. The storage crate and the
//! HTTP crate both depend on the types and interfaces defined here.
//!
//! # Architecture
//!
//! - [`models`] - Task and doctor documents plus request payloads
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository traits for data persistence
//! - [`pagination`] - Offset/limit arithmetic for doctor listings
//! - [`validation`] - Identifier and query validation
//!
//! # Example
//!
//! ```rust
//! use clinic_core::{DoctorQuery, RecordValidator};
//!
//! let query = DoctorQuery {
//!     limit: 10,
//!     page: 2,
//!     gender: Some("female".to_string()),
//!     ..Default::default()
//! };
//!
//! RecordValidator::validate_doctor_query(&query).unwrap();
//! assert_eq!(query.pagination().skip(), 10);
//! ```

pub mod error;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{ClinicError, Result};
pub use models::{
    Doctor, DoctorPage, DoctorQuery, NewDoctor, NewTask, Task, UpdateDoctor, UpdateTask,
    DEFAULT_PAGE_LIMIT,
};
pub use pagination::Pagination;
pub use repository::{DoctorRepository, TaskRepository};
pub use validation::{RecordValidator, MAX_PAGE_LIMIT};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
