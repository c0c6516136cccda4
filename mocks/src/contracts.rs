//! Contract test helpers for validating trait implementations
//!
//! Provides standardized tests that any implementation of the repository
//! traits should pass, so the in-memory mocks and the MongoDB repositories
//! are held to the same behaviour.
//!
//! The helpers only assume they own the records they create. Doctor
//! scenarios scope every listing by a caller supplied service role tag, so
//! a store shared with other data still gives deterministic results.

use crate::{
    assert_all_gender, assert_client_error, assert_doctor_matches, assert_not_found,
    assert_sorted_by_rating, assert_task_content, create_mixed_case_gender_doctors,
    create_new_doctor, create_new_task, create_ranked_doctors, DoctorQueryBuilder,
    UpdateDoctorBuilder, UpdateTaskBuilder, MALFORMED_ID, UNKNOWN_ID,
};
use clinic_core::{DoctorRepository, NewTask, RecordValidator, TaskRepository};

/// Run every task repository contract
pub async fn task_repository_contract<R: TaskRepository>(repo: &R) {
    test_task_create_contract(repo).await;
    test_task_update_contract(repo).await;
    test_task_lookup_contract(repo).await;
    test_health_check_contract(repo.health_check().await);
}

/// Created tasks get an object id and show up in the listing
pub async fn test_task_create_contract<R: TaskRepository>(repo: &R) {
    let new_task = create_new_task();
    let id = repo
        .create(new_task.clone())
        .await
        .expect("Create should succeed");
    assert!(
        RecordValidator::validate_id(&id).is_ok(),
        "Created id should be a 24 character hex object id, got {id}"
    );

    let stored = repo.get_by_id(&id).await.expect("Get should succeed");
    assert_eq!(stored.id, id);
    assert_task_content(&stored, &new_task.title, &new_task.body);

    let listed = repo.list().await.expect("List should succeed");
    assert!(
        listed.iter().any(|task| task.id == id),
        "Created task should appear in the listing"
    );

    let empty_id = repo
        .create(NewTask::default())
        .await
        .expect("Create with empty fields should succeed");
    let empty = repo.get_by_id(&empty_id).await.expect("Get should succeed");
    assert_task_content(&empty, "", "");
}

/// Partial updates only touch supplied fields and return the new state
pub async fn test_task_update_contract<R: TaskRepository>(repo: &R) {
    let id = repo
        .create(NewTask::new("buy milk", "2%"))
        .await
        .expect("Create should succeed");

    let updated = repo
        .update(UpdateTaskBuilder::new(&id).with_title("buy bread").build())
        .await
        .expect("Update should succeed");
    assert_eq!(updated.id, id);
    assert_task_content(&updated, "buy bread", "2%");

    let unchanged = repo
        .update(UpdateTaskBuilder::new(&id).build())
        .await
        .expect("Empty update should succeed");
    assert_task_content(&unchanged, "buy bread", "2%");

    let stored = repo.get_by_id(&id).await.expect("Get should succeed");
    assert_eq!(stored, updated);

    assert_not_found(
        repo.update(UpdateTaskBuilder::new(UNKNOWN_ID).with_title("x").build())
            .await,
    );
    assert_client_error(
        repo.update(UpdateTaskBuilder::new(MALFORMED_ID).with_title("x").build())
            .await,
    );
    assert_client_error(repo.update(UpdateTaskBuilder::new("").build()).await);
}

/// Unknown ids are not found, malformed ids are rejected and hex case is ignored
pub async fn test_task_lookup_contract<R: TaskRepository>(repo: &R) {
    assert_not_found(repo.get_by_id(UNKNOWN_ID).await);
    assert_client_error(repo.get_by_id(MALFORMED_ID).await);

    let id = repo
        .create(NewTask::new("call back", ""))
        .await
        .expect("Create should succeed");
    let stored = repo
        .get_by_id(&id.to_ascii_uppercase())
        .await
        .expect("Ids should match regardless of hex case");
    assert_eq!(stored.id, id);
}

/// Run every doctor repository contract, scoping listings by `tag`
pub async fn doctor_repository_contract<R: DoctorRepository>(repo: &R, tag: &str) {
    repo.ensure_indexes()
        .await
        .expect("Ensuring indexes should succeed");
    repo.ensure_indexes()
        .await
        .expect("Ensuring indexes twice should succeed");

    test_doctor_create_contract(repo).await;
    test_doctor_update_contract(repo).await;
    test_doctor_paging_contract(repo, tag).await;
    test_doctor_filter_contract(repo, tag).await;
    test_doctor_query_validation_contract(repo).await;
    test_health_check_contract(repo.health_check().await);
}

/// Every submitted field round trips through storage
pub async fn test_doctor_create_contract<R: DoctorRepository>(repo: &R) {
    let new_doctor = create_new_doctor();
    let id = repo
        .create(new_doctor.clone())
        .await
        .expect("Create should succeed");
    assert!(RecordValidator::validate_id(&id).is_ok());

    let stored = repo.get_by_id(&id).await.expect("Get should succeed");
    assert_eq!(stored.id, id);
    assert_doctor_matches(&stored, &new_doctor);

    assert_not_found(repo.get_by_id(UNKNOWN_ID).await);
    assert_client_error(repo.get_by_id(MALFORMED_ID).await);
}

/// Partial updates leave other fields alone and ignore empty values
pub async fn test_doctor_update_contract<R: DoctorRepository>(repo: &R) {
    let original = create_new_doctor();
    let id = repo
        .create(original.clone())
        .await
        .expect("Create should succeed");

    let updated = repo
        .update(UpdateDoctorBuilder::new(&id).with_rating(3.9).build())
        .await
        .expect("Update should succeed");
    assert_eq!(updated.rating, 3.9);
    assert_eq!(updated.name, original.name);
    assert_eq!(updated.university, original.university);

    let updated = repo
        .update(
            UpdateDoctorBuilder::new(&id)
                .with_name("")
                .with_university("Open University")
                .build(),
        )
        .await
        .expect("Update should succeed");
    assert_eq!(updated.name, original.name, "Empty values should be ignored");
    assert_eq!(updated.university, "Open University");

    assert_not_found(
        repo.update(UpdateDoctorBuilder::new(UNKNOWN_ID).with_rating(1.0).build())
            .await,
    );
    assert_client_error(
        repo.update(UpdateDoctorBuilder::new(MALFORMED_ID).with_rating(1.0).build())
            .await,
    );
}

/// Listings are sorted by rating and split into pages
pub async fn test_doctor_paging_contract<R: DoctorRepository>(repo: &R, tag: &str) {
    for doctor in create_ranked_doctors(25, tag) {
        repo.create(doctor).await.expect("Create should succeed");
    }

    let first = repo
        .list(DoctorQueryBuilder::new().service_role(tag).build())
        .await
        .expect("List should succeed");
    assert_eq!(first.pages, 3);
    assert_eq!(first.doctors.len(), 10);
    assert_sorted_by_rating(&first.doctors);
    assert_eq!(first.doctors[0].name, "Doctor 25");

    let last = repo
        .list(DoctorQueryBuilder::new().service_role(tag).page(3).build())
        .await
        .expect("List should succeed");
    assert_eq!(last.pages, 3);
    assert_eq!(last.doctors.len(), 5);
    assert_eq!(last.doctors[4].name, "Doctor 1");

    let beyond = repo
        .list(DoctorQueryBuilder::new().service_role(tag).page(4).build())
        .await
        .expect("List should succeed");
    assert_eq!(beyond.pages, 3);
    assert!(beyond.doctors.is_empty());

    let unpaged = repo
        .list(DoctorQueryBuilder::new().service_role(tag).page(0).limit(25).build())
        .await
        .expect("List should succeed");
    assert_eq!(unpaged.pages, 1);
    assert_eq!(unpaged.doctors.len(), 25);

    let none = repo
        .list(
            DoctorQueryBuilder::new()
                .service_role(format!("{tag}-missing"))
                .build(),
        )
        .await
        .expect("List should succeed");
    assert_eq!(none.pages, 0);
    assert!(none.doctors.is_empty());
}

/// Gender and name filters narrow the listing
pub async fn test_doctor_filter_contract<R: DoctorRepository>(repo: &R, tag: &str) {
    let case_tag = format!("{tag}-case");
    for doctor in create_mixed_case_gender_doctors(&case_tag) {
        repo.create(doctor).await.expect("Create should succeed");
    }

    let female = repo
        .list(
            DoctorQueryBuilder::new()
                .service_role(&case_tag)
                .gender("female")
                .build(),
        )
        .await
        .expect("List should succeed");
    assert_eq!(female.doctors.len(), 1, "Gender match is case sensitive");
    assert_all_gender(&female.doctors, "female");

    let searched = repo
        .list(
            DoctorQueryBuilder::new()
                .service_role(tag)
                .name("doctor7")
                .build(),
        )
        .await
        .expect("List should succeed");
    assert_eq!(searched.doctors.len(), 1);
    assert_eq!(searched.doctors[0].name, "Doctor 7");
    assert_eq!(searched.pages, 1);
}

/// Limits outside 1..=100 are rejected before touching storage
pub async fn test_doctor_query_validation_contract<R: DoctorRepository>(repo: &R) {
    assert_client_error(repo.list(DoctorQueryBuilder::new().limit(0).build()).await);
    assert_client_error(repo.list(DoctorQueryBuilder::new().limit(-5).build()).await);
    assert_client_error(repo.list(DoctorQueryBuilder::new().limit(101).build()).await);
}

/// Health checks succeed on a reachable store
pub fn test_health_check_contract(result: clinic_core::Result<()>) {
    assert!(result.is_ok(), "Health check should pass: {result:?}");
}
