use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Default page size for doctor listings when `limit` is not supplied
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// A stored task document.
///
/// JSON field names follow the public API (`ID`, `Title`, `Body`); the
/// lowercase spellings are accepted on input as well.
///
/// # Examples
///
/// ```rust
/// use clinic_core::models::Task;
///
/// let task = Task {
///     id: "64b7f0c2a1b2c3d4e5f60718".to_string(),
///     title: "buy milk".to_string(),
///     body: "2%".to_string(),
/// };
///
/// let json = serde_json::to_value(&task).unwrap();
/// assert_eq!(json["ID"], "64b7f0c2a1b2c3d4e5f60718");
/// assert_eq!(json["Title"], "buy milk");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    /// Hex encoded object id assigned by the storage engine
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(rename = "Body", alias = "body", default)]
    pub body: String,
}

/// Payload for creating a task. Any `ID` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct NewTask {
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(rename = "Body", alias = "body", default)]
    pub body: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Partial update of a task.
///
/// Only fields that are present and non-empty are written; the `ID` is
/// mandatory and selects the document to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTask {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    #[serde(rename = "Title", alias = "title", default)]
    pub title: Option<String>,
    #[serde(rename = "Body", alias = "body", default)]
    pub body: Option<String>,
}

impl UpdateTask {
    /// Check whether at least one field would be written
    pub fn has_changes(&self) -> bool {
        non_empty(&self.title).is_some() || non_empty(&self.body).is_some()
    }

    /// Apply the non-empty fields to an existing task
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = non_empty(&self.title) {
            task.title = title.to_string();
        }
        if let Some(body) = non_empty(&self.body) {
            task.body = body.to_string();
        }
    }
}

/// A stored doctor profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct Doctor {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    pub name: String,
    pub profile_picture: String,
    /// Service category, matched exactly by the `servicerole` list filter
    pub service_role: String,
    /// Average rating; listings are sorted on it, highest first
    pub rating: f64,
    pub rating_count: i32,
    #[serde(rename = "VideoIntroductionURL")]
    pub video_introduction_url: String,
    pub introduction_text: String,
    pub nationalities: String,
    pub age: i32,
    pub university: String,
    pub gender: String,
    /// Free text covered by the search index
    pub text_index: String,
}

/// Payload for creating a doctor. Any `ID` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct NewDoctor {
    pub name: String,
    pub profile_picture: String,
    pub service_role: String,
    pub rating: f64,
    pub rating_count: i32,
    #[serde(rename = "VideoIntroductionURL")]
    pub video_introduction_url: String,
    pub introduction_text: String,
    pub nationalities: String,
    pub age: i32,
    pub university: String,
    pub gender: String,
    pub text_index: String,
}

impl NewDoctor {
    /// Attach a storage identifier, producing the stored representation
    pub fn into_doctor(self, id: impl Into<String>) -> Doctor {
        Doctor {
            id: id.into(),
            name: self.name,
            profile_picture: self.profile_picture,
            service_role: self.service_role,
            rating: self.rating,
            rating_count: self.rating_count,
            video_introduction_url: self.video_introduction_url,
            introduction_text: self.introduction_text,
            nationalities: self.nationalities,
            age: self.age,
            university: self.university,
            gender: self.gender,
            text_index: self.text_index,
        }
    }
}

/// Partial update of a doctor profile.
///
/// Absent, empty and zero fields are left untouched, matching how the
/// stored documents omit empty values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateDoctor {
    #[serde(rename = "ID", alias = "id")]
    pub id: String,
    pub name: Option<String>,
    pub profile_picture: Option<String>,
    pub service_role: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<i32>,
    #[serde(rename = "VideoIntroductionURL")]
    pub video_introduction_url: Option<String>,
    pub introduction_text: Option<String>,
    pub nationalities: Option<String>,
    pub age: Option<i32>,
    pub university: Option<String>,
    pub gender: Option<String>,
    pub text_index: Option<String>,
}

impl UpdateDoctor {
    /// Check whether at least one field would be written
    pub fn has_changes(&self) -> bool {
        [
            &self.name,
            &self.profile_picture,
            &self.service_role,
            &self.video_introduction_url,
            &self.introduction_text,
            &self.nationalities,
            &self.university,
            &self.gender,
            &self.text_index,
        ]
        .into_iter()
        .any(|field| non_empty(field).is_some())
            || self.rating.is_some_and(|rating| rating != 0.0)
            || self.rating_count.is_some_and(|count| count != 0)
            || self.age.is_some_and(|age| age != 0)
    }

    /// Apply the non-empty fields to an existing doctor
    pub fn apply_to(&self, doctor: &mut Doctor) {
        let text_fields = [
            (&self.name, &mut doctor.name),
            (&self.profile_picture, &mut doctor.profile_picture),
            (&self.service_role, &mut doctor.service_role),
            (&self.video_introduction_url, &mut doctor.video_introduction_url),
            (&self.introduction_text, &mut doctor.introduction_text),
            (&self.nationalities, &mut doctor.nationalities),
            (&self.university, &mut doctor.university),
            (&self.gender, &mut doctor.gender),
            (&self.text_index, &mut doctor.text_index),
        ];
        for (update, current) in text_fields {
            if let Some(value) = non_empty(update) {
                *current = value.to_string();
            }
        }

        if let Some(rating) = self.rating.filter(|rating| *rating != 0.0) {
            doctor.rating = rating;
        }
        if let Some(count) = self.rating_count.filter(|count| *count != 0) {
            doctor.rating_count = count;
        }
        if let Some(age) = self.age.filter(|age| *age != 0) {
            doctor.age = age;
        }
    }
}

/// Query string of `GET /doctors/`.
///
/// `page` is 1-based; zero or negative values disable the offset. Empty
/// filter strings are treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DoctorQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_page")]
    pub page: i64,
    /// Free text search over the indexed field
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "servicerole")]
    pub service_role: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

fn default_limit() -> i64 {
    DEFAULT_PAGE_LIMIT
}

fn default_page() -> i64 {
    1
}

impl Default for DoctorQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            page: 1,
            name: None,
            service_role: None,
            gender: None,
        }
    }
}

impl DoctorQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.page)
    }

    pub fn name_filter(&self) -> Option<&str> {
        non_empty(&self.name)
    }

    pub fn service_role_filter(&self) -> Option<&str> {
        non_empty(&self.service_role)
    }

    pub fn gender_filter(&self) -> Option<&str> {
        non_empty(&self.gender)
    }
}

/// One page of a doctor listing plus the total number of pages
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DoctorPage {
    pub pages: u64,
    pub doctors: Vec<Doctor>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
