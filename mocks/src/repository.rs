//! Mock implementations of TaskRepository and DoctorRepository
//!
//! Provides thread-safe in-memory repositories with:
//! - Error injection capabilities
//! - Call tracking for verification
//! - The same filtering, ordering and paging rules as the MongoDB store

use std::collections::BTreeMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use clinic_core::{
    ClinicError, Doctor, DoctorPage, DoctorQuery, DoctorRepository, NewDoctor, NewTask,
    RecordValidator, Result, Task, TaskRepository, UpdateDoctor, UpdateTask,
};
use parking_lot::Mutex;

/// Hands out 24 character hex identifiers, like storage object ids
#[derive(Debug)]
struct IdSequence(AtomicU64);

impl IdSequence {
    fn starting_at(first: u64) -> Self {
        Self(AtomicU64::new(first))
    }

    fn next(&self) -> String {
        format!("{:024x}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

/// Object ids are hex, so lookups ignore the case the caller used
fn storage_key(id: &str) -> String {
    id.to_ascii_lowercase()
}

/// Error injection and call history shared by both mocks
#[derive(Debug, Default)]
struct Instrumentation {
    error_injection: Mutex<Option<ClinicError>>,
    call_history: Mutex<Vec<String>>,
}

impl Instrumentation {
    /// Check if an error should be injected, consuming it if so
    fn check_error_injection(&self) -> Result<()> {
        if let Some(error) = self.error_injection.lock().take() {
            return Err(error);
        }
        Ok(())
    }

    fn record_call(&self, method: &str) {
        self.call_history.lock().push(format!("{method}()"));
    }

    fn record_call_with_params(&self, method: &str, params: &str) {
        self.call_history.lock().push(format!("{method}({params})"));
    }

    fn assert_called(&self, method: &str) {
        let history = self.call_history.lock();
        assert!(
            history.iter().any(|call| call.starts_with(&format!("{method}("))),
            "Method '{}' was not called. Call history: {:?}",
            method,
            *history
        );
    }
}

/// Mock implementation of TaskRepository for testing
///
/// Tasks are kept in identifier order, which stands in for storage order.
#[derive(Clone)]
pub struct MockTaskRepository {
    tasks: Arc<Mutex<BTreeMap<String, Task>>>,
    ids: Arc<IdSequence>,
    instrumentation: Arc<Instrumentation>,
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTaskRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(BTreeMap::new())),
            ids: Arc::new(IdSequence::starting_at(1)),
            instrumentation: Arc::new(Instrumentation::default()),
        }
    }

    /// Create mock repository with pre-populated tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let repo = Self::new();
        {
            let mut stored = repo.tasks.lock();
            for task in tasks {
                stored.insert(storage_key(&task.id), task);
            }
        }
        repo
    }

    /// Inject error for next operation
    pub fn inject_error(&self, error: ClinicError) {
        *self.instrumentation.error_injection.lock() = Some(error);
    }

    /// Clear error injection
    pub fn clear_error(&self) {
        *self.instrumentation.error_injection.lock() = None;
    }

    /// Get history of called methods
    pub fn call_history(&self) -> Vec<String> {
        self.instrumentation.call_history.lock().clone()
    }

    /// Clear call history
    pub fn clear_history(&self) {
        self.instrumentation.call_history.lock().clear();
    }

    /// Assert method was called
    pub fn assert_called(&self, method: &str) {
        self.instrumentation.assert_called(method);
    }

    /// Number of stored tasks
    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

#[async_trait]
impl TaskRepository for MockTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        self.instrumentation.record_call("list");
        self.instrumentation.check_error_injection()?;

        Ok(self.tasks.lock().values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Task> {
        self.instrumentation
            .record_call_with_params("get_by_id", &format!("id={id}"));
        self.instrumentation.check_error_injection()?;

        RecordValidator::validate_id(id)?;
        self.tasks
            .lock()
            .get(&storage_key(id))
            .cloned()
            .ok_or_else(|| ClinicError::task_not_found(id))
    }

    async fn create(&self, task: NewTask) -> Result<String> {
        self.instrumentation
            .record_call_with_params("create", &format!("title={}", task.title));
        self.instrumentation.check_error_injection()?;

        let id = self.ids.next();
        self.tasks.lock().insert(
            id.clone(),
            Task {
                id: id.clone(),
                title: task.title,
                body: task.body,
            },
        );
        Ok(id)
    }

    async fn update(&self, update: UpdateTask) -> Result<Task> {
        self.instrumentation
            .record_call_with_params("update", &format!("id={}", update.id));
        self.instrumentation.check_error_injection()?;

        RecordValidator::validate_update_task(&update)?;
        let mut tasks = self.tasks.lock();
        let task = tasks
            .get_mut(&storage_key(&update.id))
            .ok_or_else(|| ClinicError::task_not_found(&update.id))?;
        update.apply_to(task);
        Ok(task.clone())
    }

    async fn health_check(&self) -> Result<()> {
        self.instrumentation.record_call("health_check");
        self.instrumentation.check_error_injection()
    }
}

/// Mock implementation of DoctorRepository for testing
///
/// The name search approximates a text index: every whitespace separated
/// term is matched case-insensitively against the words of `text_index`,
/// and a doctor matches when any term does.
#[derive(Clone)]
pub struct MockDoctorRepository {
    doctors: Arc<Mutex<BTreeMap<String, Doctor>>>,
    ids: Arc<IdSequence>,
    instrumentation: Arc<Instrumentation>,
}

impl Default for MockDoctorRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDoctorRepository {
    pub fn new() -> Self {
        Self {
            doctors: Arc::new(Mutex::new(BTreeMap::new())),
            ids: Arc::new(IdSequence::starting_at(1)),
            instrumentation: Arc::new(Instrumentation::default()),
        }
    }

    /// Create mock repository with pre-populated doctors
    pub fn with_doctors(doctors: Vec<Doctor>) -> Self {
        let repo = Self::new();
        {
            let mut stored = repo.doctors.lock();
            for doctor in doctors {
                stored.insert(storage_key(&doctor.id), doctor);
            }
        }
        repo
    }

    pub fn inject_error(&self, error: ClinicError) {
        *self.instrumentation.error_injection.lock() = Some(error);
    }

    pub fn clear_error(&self) {
        *self.instrumentation.error_injection.lock() = None;
    }

    pub fn call_history(&self) -> Vec<String> {
        self.instrumentation.call_history.lock().clone()
    }

    pub fn clear_history(&self) {
        self.instrumentation.call_history.lock().clear();
    }

    pub fn assert_called(&self, method: &str) {
        self.instrumentation.assert_called(method);
    }

    pub fn len(&self) -> usize {
        self.doctors.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.doctors.lock().is_empty()
    }

    fn matches(doctor: &Doctor, query: &DoctorQuery) -> bool {
        if let Some(role) = query.service_role_filter() {
            if doctor.service_role != role {
                return false;
            }
        }
        if let Some(gender) = query.gender_filter() {
            if doctor.gender != gender {
                return false;
            }
        }
        if let Some(name) = query.name_filter() {
            let words: Vec<String> = doctor
                .text_index
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            return name
                .split_whitespace()
                .map(str::to_lowercase)
                .any(|term| words.contains(&term));
        }
        true
    }
}

#[async_trait]
impl DoctorRepository for MockDoctorRepository {
    async fn ensure_indexes(&self) -> Result<()> {
        self.instrumentation.record_call("ensure_indexes");
        self.instrumentation.check_error_injection()
    }

    async fn list(&self, query: DoctorQuery) -> Result<DoctorPage> {
        self.instrumentation.record_call_with_params(
            "list",
            &format!("limit={}, page={}", query.limit, query.page),
        );
        self.instrumentation.check_error_injection()?;

        RecordValidator::validate_doctor_query(&query)?;
        let mut matching: Vec<Doctor> = self
            .doctors
            .lock()
            .values()
            .filter(|doctor| Self::matches(doctor, &query))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        let pagination = query.pagination();
        Ok(DoctorPage {
            pages: pagination.page_count(matching.len() as u64),
            doctors: pagination.window(matching),
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Doctor> {
        self.instrumentation
            .record_call_with_params("get_by_id", &format!("id={id}"));
        self.instrumentation.check_error_injection()?;

        RecordValidator::validate_id(id)?;
        self.doctors
            .lock()
            .get(&storage_key(id))
            .cloned()
            .ok_or_else(|| ClinicError::doctor_not_found(id))
    }

    async fn create(&self, doctor: NewDoctor) -> Result<String> {
        self.instrumentation
            .record_call_with_params("create", &format!("name={}", doctor.name));
        self.instrumentation.check_error_injection()?;

        let id = self.ids.next();
        self.doctors
            .lock()
            .insert(id.clone(), doctor.into_doctor(id.clone()));
        Ok(id)
    }

    async fn update(&self, update: UpdateDoctor) -> Result<Doctor> {
        self.instrumentation
            .record_call_with_params("update", &format!("id={}", update.id));
        self.instrumentation.check_error_injection()?;

        RecordValidator::validate_update_doctor(&update)?;
        let mut doctors = self.doctors.lock();
        let doctor = doctors
            .get_mut(&storage_key(&update.id))
            .ok_or_else(|| ClinicError::doctor_not_found(&update.id))?;
        update.apply_to(doctor);
        Ok(doctor.clone())
    }

    async fn health_check(&self) -> Result<()> {
        self.instrumentation.record_call("health_check");
        self.instrumentation.check_error_injection()
    }
}
