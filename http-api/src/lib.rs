//! HTTP API for the clinic directory
//!
//! Translates HTTP requests into repository calls and repository results
//! into JSON responses. The router is generic over any `TaskRepository` and
//! `DoctorRepository`, so tests can drive it with in-memory mocks.
//!
//! # Routes
//!
//! - `GET /`, `GET /ping`, `GET /health`
//! - `GET|POST|PUT /tasks/`, `GET /tasks/:id`
//! - `GET|POST|PUT /doctors/`, `GET /doctors/:id`

pub mod doctors;
pub mod error;
pub mod request_logger;
pub mod server;
pub mod tasks;

pub use error::ApiError;
pub use server::{ApiServer, AppState};
