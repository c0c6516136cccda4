//! Mock implementations and test utilities for the clinic directory API
//!
//! This crate provides comprehensive testing infrastructure including:
//! - In-memory mocks of `TaskRepository` and `DoctorRepository`
//! - Realistic test data generators
//! - Custom assertion helpers
//! - Property-based testing strategies
//! - Contract test helpers shared with the MongoDB implementations

pub mod assertions;
pub mod builders;
pub mod contracts;
pub mod fixtures;
pub mod generators;
pub mod repository;

pub use assertions::*;
pub use builders::*;
pub use contracts::*;
pub use fixtures::*;
pub use generators::*;
pub use repository::{MockDoctorRepository, MockTaskRepository};
