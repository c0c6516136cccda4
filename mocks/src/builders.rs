//! Builder pattern implementations for easy test data construction
//!
//! Provides fluent builders for:
//! - NewDoctor and UpdateDoctor payloads
//! - UpdateTask payloads
//! - DoctorQuery construction for listing tests

use clinic_core::{DoctorQuery, NewDoctor, UpdateDoctor, UpdateTask};

use crate::fixtures::create_new_doctor;

/// Builder for constructing NewDoctor instances in tests
pub struct NewDoctorBuilder {
    doctor: NewDoctor,
}

impl Default for NewDoctorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewDoctorBuilder {
    /// Start from the standard fixture doctor
    pub fn new() -> Self {
        Self {
            doctor: create_new_doctor(),
        }
    }

    /// Start from a doctor with every field empty
    pub fn empty() -> Self {
        Self {
            doctor: NewDoctor::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.doctor.name = name.into();
        self
    }

    pub fn with_service_role(mut self, service_role: impl Into<String>) -> Self {
        self.doctor.service_role = service_role.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.doctor.rating = rating;
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.doctor.gender = gender.into();
        self
    }

    pub fn with_age(mut self, age: i32) -> Self {
        self.doctor.age = age;
        self
    }

    pub fn with_text_index(mut self, text_index: impl Into<String>) -> Self {
        self.doctor.text_index = text_index.into();
        self
    }

    pub fn build(self) -> NewDoctor {
        self.doctor
    }
}

/// Builder for constructing UpdateDoctor instances in tests
pub struct UpdateDoctorBuilder {
    update: UpdateDoctor,
}

impl UpdateDoctorBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            update: UpdateDoctor {
                id: id.into(),
                ..Default::default()
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.update.name = Some(name.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.update.rating = Some(rating);
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.update.gender = Some(gender.into());
        self
    }

    pub fn with_university(mut self, university: impl Into<String>) -> Self {
        self.update.university = Some(university.into());
        self
    }

    pub fn build(self) -> UpdateDoctor {
        self.update
    }
}

/// Builder for constructing UpdateTask instances in tests
pub struct UpdateTaskBuilder {
    update: UpdateTask,
}

impl UpdateTaskBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            update: UpdateTask {
                id: id.into(),
                title: None,
                body: None,
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.update.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.update.body = Some(body.into());
        self
    }

    pub fn build(self) -> UpdateTask {
        self.update
    }
}

/// Builder for DoctorQuery
#[derive(Default)]
pub struct DoctorQueryBuilder {
    query: DoctorQuery,
}

impl DoctorQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.query.limit = limit;
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.query.page = page;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.query.name = Some(name.into());
        self
    }

    pub fn service_role(mut self, service_role: impl Into<String>) -> Self {
        self.query.service_role = Some(service_role.into());
        self
    }

    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.query.gender = Some(gender.into());
        self
    }

    pub fn build(self) -> DoctorQuery {
        self.query
    }
}
