use async_trait::async_trait;
use crate::{
    error::Result,
    models::{Doctor, DoctorPage, DoctorQuery, NewDoctor, NewTask, Task, UpdateDoctor, UpdateTask},
};

/// Repository trait for the tasks collection
///
/// Implementations must be thread-safe; a single instance is shared by all
/// request handlers.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// List every task, unfiltered and in storage order
    ///
    /// # Returns
    /// * `Ok(Vec<Task>)` - All tasks (may be empty)
    /// * `Err(ClinicError::Query)` - If the scan or decoding fails
    async fn list(&self) -> Result<Vec<Task>>;

    /// Get a task by its hex identifier
    ///
    /// # Returns
    /// * `Ok(Task)` - The matching task
    /// * `Err(ClinicError::InvalidIdentifier)` - If `id` is not a valid object id
    /// * `Err(ClinicError::NotFound)` - If no task has that id
    /// * `Err(ClinicError::Query)` - If the lookup fails
    async fn get_by_id(&self, id: &str) -> Result<Task>;

    /// Insert a new task
    ///
    /// # Returns
    /// * `Ok(String)` - The generated identifier in hex form
    /// * `Err(ClinicError::Database)` - If the insert fails
    async fn create(&self, task: NewTask) -> Result<String>;

    /// Set the non-empty fields of `update` on the task it identifies
    ///
    /// Never inserts a new document.
    ///
    /// # Returns
    /// * `Ok(Task)` - The task as stored after the update
    /// * `Err(ClinicError::InvalidIdentifier)` - If the id is malformed
    /// * `Err(ClinicError::NotFound)` - If no task has that id
    /// * `Err(ClinicError::Database)` - If the update fails
    async fn update(&self, update: UpdateTask) -> Result<Task>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Repository trait for the doctors collection
#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// Make sure the free text index exists. Called once at startup.
    async fn ensure_indexes(&self) -> Result<()>;

    /// List one page of doctors, highest rating first
    ///
    /// # Arguments
    /// * `query` - Page window plus optional name search, service role and
    ///   gender filters
    ///
    /// # Returns
    /// * `Ok(DoctorPage)` - The page and the total page count for the filter
    /// * `Err(ClinicError::Validation)` - If the limit is out of range
    /// * `Err(ClinicError::Query)` - If counting or scanning fails
    async fn list(&self, query: DoctorQuery) -> Result<DoctorPage>;

    /// Get a doctor by its hex identifier
    async fn get_by_id(&self, id: &str) -> Result<Doctor>;

    /// Insert a new doctor and return the generated identifier
    async fn create(&self, doctor: NewDoctor) -> Result<String>;

    /// Set the non-empty fields of `update` on the doctor it identifies
    async fn update(&self, update: UpdateDoctor) -> Result<Doctor>;

    /// Check the backing store is reachable
    async fn health_check(&self) -> Result<()>;
}
