//! Standard test fixtures for consistent testing
//!
//! Provides pre-built test data including:
//! - A standard task and doctor
//! - Rated doctor rosters for paging and filtering scenarios
//! - Identifiers that are well formed but never stored

use clinic_core::{Doctor, NewDoctor, NewTask, Task};

/// Well formed identifier that no fixture uses
pub const UNKNOWN_ID: &str = "ffffffffffffffffffffffff";

/// Identifier that fails object id parsing
pub const MALFORMED_ID: &str = "not-an-object-id";

/// Create the task payload used in the API examples
pub fn create_new_task() -> NewTask {
    NewTask::new("buy milk", "2%")
}

/// Create a stored task with sensible defaults
pub fn create_test_task() -> Task {
    Task {
        id: "64b7f0c2a1b2c3d4e5f60718".to_string(),
        title: "buy milk".to_string(),
        body: "2%".to_string(),
    }
}

/// Create multiple stored tasks with sequential identifiers
pub fn create_test_tasks(count: usize) -> Vec<Task> {
    (1..=count)
        .map(|i| Task {
            id: format!("{i:024x}"),
            title: format!("Task {i}"),
            body: format!("Body of task number {i}"),
        })
        .collect()
}

/// Create a complete doctor payload
pub fn create_new_doctor() -> NewDoctor {
    NewDoctor {
        name: "Dr. Ada Lovelace".to_string(),
        profile_picture: "https://cdn.example.com/ada.png".to_string(),
        service_role: "cardiology".to_string(),
        rating: 4.8,
        rating_count: 132,
        video_introduction_url: "https://video.example.com/ada".to_string(),
        introduction_text: "Cardiologist with fifteen years of practice".to_string(),
        nationalities: "British".to_string(),
        age: 45,
        university: "University of London".to_string(),
        gender: "female".to_string(),
        text_index: "Ada Lovelace cardiology".to_string(),
    }
}

/// Create a stored doctor
pub fn create_test_doctor() -> Doctor {
    create_new_doctor().into_doctor("64b7f0c2a1b2c3d4e5f60719")
}

/// Create `count` doctors with distinct ratings, listed in insertion order
///
/// Doctor `i` (1-based) gets rating `i as f64 / 10.0`, so the highest rated
/// doctor is the last one created. Genders alternate starting with
/// "female" and every doctor shares `service_role`.
pub fn create_ranked_doctors(count: usize, service_role: &str) -> Vec<NewDoctor> {
    (1..=count)
        .map(|i| NewDoctor {
            name: format!("Doctor {i}"),
            service_role: service_role.to_string(),
            rating: i as f64 / 10.0,
            rating_count: i as i32,
            gender: if i % 2 == 1 { "female" } else { "male" }.to_string(),
            text_index: format!("doctor{i} {service_role}"),
            ..Default::default()
        })
        .collect()
}

/// Doctors with gender spellings that differ only in case
pub fn create_mixed_case_gender_doctors(service_role: &str) -> Vec<NewDoctor> {
    ["female", "Female", "FEMALE", "male"]
        .into_iter()
        .enumerate()
        .map(|(i, gender)| NewDoctor {
            name: format!("Case {i}"),
            service_role: service_role.to_string(),
            rating: 1.0 + i as f64,
            gender: gender.to_string(),
            ..Default::default()
        })
        .collect()
}
