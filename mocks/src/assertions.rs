//! Custom assertion helpers for testing
//!
//! Provides specialized assertions for:
//! - Doctor equality with clear error messages
//! - Rating order of listings
//! - Error classification

use clinic_core::{Doctor, NewDoctor, Result, Task};

/// Assert a stored doctor carries every field of the payload it was created from
pub fn assert_doctor_matches(actual: &Doctor, expected: &NewDoctor) {
    assert_eq!(actual.name, expected.name, "Doctor names don't match");
    assert_eq!(
        actual.profile_picture, expected.profile_picture,
        "Profile pictures don't match"
    );
    assert_eq!(
        actual.service_role, expected.service_role,
        "Service roles don't match"
    );
    assert_eq!(actual.rating, expected.rating, "Ratings don't match");
    assert_eq!(
        actual.rating_count, expected.rating_count,
        "Rating counts don't match"
    );
    assert_eq!(
        actual.video_introduction_url, expected.video_introduction_url,
        "Video introduction URLs don't match"
    );
    assert_eq!(
        actual.introduction_text, expected.introduction_text,
        "Introduction texts don't match"
    );
    assert_eq!(
        actual.nationalities, expected.nationalities,
        "Nationalities don't match"
    );
    assert_eq!(actual.age, expected.age, "Ages don't match");
    assert_eq!(actual.university, expected.university, "Universities don't match");
    assert_eq!(actual.gender, expected.gender, "Genders don't match");
    assert_eq!(actual.text_index, expected.text_index, "Text indexes don't match");
}

/// Assert a task has the given title and body
pub fn assert_task_content(task: &Task, title: &str, body: &str) {
    assert_eq!(task.title, title, "Task titles don't match");
    assert_eq!(task.body, body, "Task bodies don't match");
}

/// Assert doctors are ordered by rating, highest first
pub fn assert_sorted_by_rating(doctors: &[Doctor]) {
    for pair in doctors.windows(2) {
        assert!(
            pair[0].rating >= pair[1].rating,
            "Doctors not sorted by rating: {} ({}) listed before {} ({})",
            pair[0].name,
            pair[0].rating,
            pair[1].name,
            pair[1].rating
        );
    }
}

/// Assert every doctor in a listing has the given gender
pub fn assert_all_gender(doctors: &[Doctor], gender: &str) {
    for doctor in doctors {
        assert_eq!(
            doctor.gender, gender,
            "Doctor {} has unexpected gender",
            doctor.name
        );
    }
}

/// Assert a result failed with a not-found error
pub fn assert_not_found<T: std::fmt::Debug>(result: Result<T>) {
    match result {
        Err(ref error) if error.is_not_found() => {}
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

/// Assert a result failed because of bad client input
pub fn assert_client_error<T: std::fmt::Debug>(result: Result<T>) {
    match result {
        Err(ref error) if error.is_client_error() => {}
        other => panic!("Expected a client error, got: {other:?}"),
    }
}
