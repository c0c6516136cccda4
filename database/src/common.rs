use clinic_core::{
    error::{ClinicError, Result},
    models::{Doctor, DoctorQuery, NewDoctor, NewTask, Task, UpdateDoctor, UpdateTask},
};
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use serde::{Deserialize, Serialize};

/// Field covered by the doctors text index
pub const TEXT_INDEX_FIELD: &str = "textindex";

/// Field listings are sorted on, descending
pub const RATING_FIELD: &str = "rating";

/// Stored shape of a task; empty fields are not written
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TaskDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

impl From<NewTask> for TaskDocument {
    fn from(task: NewTask) -> Self {
        Self {
            id: None,
            title: task.title,
            body: task.body,
        }
    }
}

impl From<&UpdateTask> for TaskDocument {
    fn from(update: &UpdateTask) -> Self {
        Self {
            id: None,
            title: update.title.clone().unwrap_or_default(),
            body: update.body.clone().unwrap_or_default(),
        }
    }
}

impl From<TaskDocument> for Task {
    fn from(document: TaskDocument) -> Self {
        Task {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            title: document.title,
            body: document.body,
        }
    }
}

/// Stored shape of a doctor; empty strings and zero numbers are not written
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DoctorDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, rename = "profilepicture", skip_serializing_if = "String::is_empty")]
    pub profile_picture: String,
    #[serde(default, rename = "servicerole", skip_serializing_if = "String::is_empty")]
    pub service_role: String,
    #[serde(default, skip_serializing_if = "is_zero_f64")]
    pub rating: f64,
    #[serde(default, rename = "ratingcount", skip_serializing_if = "is_zero_i32")]
    pub rating_count: i32,
    #[serde(
        default,
        rename = "videointroductionurl",
        skip_serializing_if = "String::is_empty"
    )]
    pub video_introduction_url: String,
    #[serde(default, rename = "introductiontext", skip_serializing_if = "String::is_empty")]
    pub introduction_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub nationalities: String,
    #[serde(default, skip_serializing_if = "is_zero_i32")]
    pub age: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub university: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub gender: String,
    #[serde(default, rename = "textindex", skip_serializing_if = "String::is_empty")]
    pub text_index: String,
}

impl From<NewDoctor> for DoctorDocument {
    fn from(doctor: NewDoctor) -> Self {
        Self {
            id: None,
            name: doctor.name,
            profile_picture: doctor.profile_picture,
            service_role: doctor.service_role,
            rating: doctor.rating,
            rating_count: doctor.rating_count,
            video_introduction_url: doctor.video_introduction_url,
            introduction_text: doctor.introduction_text,
            nationalities: doctor.nationalities,
            age: doctor.age,
            university: doctor.university,
            gender: doctor.gender,
            text_index: doctor.text_index,
        }
    }
}

impl From<&UpdateDoctor> for DoctorDocument {
    fn from(update: &UpdateDoctor) -> Self {
        Self {
            id: None,
            name: update.name.clone().unwrap_or_default(),
            profile_picture: update.profile_picture.clone().unwrap_or_default(),
            service_role: update.service_role.clone().unwrap_or_default(),
            rating: update.rating.unwrap_or_default(),
            rating_count: update.rating_count.unwrap_or_default(),
            video_introduction_url: update.video_introduction_url.clone().unwrap_or_default(),
            introduction_text: update.introduction_text.clone().unwrap_or_default(),
            nationalities: update.nationalities.clone().unwrap_or_default(),
            age: update.age.unwrap_or_default(),
            university: update.university.clone().unwrap_or_default(),
            gender: update.gender.clone().unwrap_or_default(),
            text_index: update.text_index.clone().unwrap_or_default(),
        }
    }
}

impl From<DoctorDocument> for Doctor {
    fn from(document: DoctorDocument) -> Self {
        Doctor {
            id: document.id.map(|id| id.to_hex()).unwrap_or_default(),
            name: document.name,
            profile_picture: document.profile_picture,
            service_role: document.service_role,
            rating: document.rating,
            rating_count: document.rating_count,
            video_introduction_url: document.video_introduction_url,
            introduction_text: document.introduction_text,
            nationalities: document.nationalities,
            age: document.age,
            university: document.university,
            gender: document.gender,
            text_index: document.text_index,
        }
    }
}

fn is_zero_f64(value: &f64) -> bool {
    *value == 0.0
}

fn is_zero_i32(value: &i32) -> bool {
    *value == 0
}

/// Parse a hex identifier into an object id
pub fn parse_object_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| {
        tracing::warn!(id = %id, "Invalid id");
        ClinicError::invalid_identifier(id)
    })
}

/// Hex form of the id returned by an insert
pub fn inserted_id_to_hex(inserted_id: &Bson) -> Result<String> {
    inserted_id
        .as_object_id()
        .map(|id| id.to_hex())
        .ok_or_else(|| {
            ClinicError::Internal(format!("Insert returned a non object id: {inserted_id}"))
        })
}

/// Body of a `$set` update: every non-empty field except `_id`
pub fn set_document<T: Serialize>(document: &T) -> Result<Document> {
    let mut set = bson::to_document(document)
        .map_err(|e| ClinicError::Internal(format!("Failed to encode update: {e}")))?;
    set.remove("_id");
    Ok(set)
}

/// Filter for a doctor listing
///
/// The name is matched through the text index; service role and gender
/// are exact, case-sensitive matches.
pub fn build_doctor_filter(query: &DoctorQuery) -> Document {
    let mut filter = Document::new();

    if let Some(name) = query.name_filter() {
        filter.insert("$text", doc! { "$search": name });
    }
    if let Some(service_role) = query.service_role_filter() {
        filter.insert("servicerole", service_role);
    }
    if let Some(gender) = query.gender_filter() {
        filter.insert("gender", gender);
    }

    filter
}

/// Map a driver error raised while reading
pub fn query_error(err: MongoError) -> ClinicError {
    mongo_error_to_clinic_error(err, ClinicError::Query)
}

/// Map a driver error raised while writing
pub fn write_error(err: MongoError) -> ClinicError {
    mongo_error_to_clinic_error(err, ClinicError::Database)
}

fn mongo_error_to_clinic_error(err: MongoError, fallback: fn(String) -> ClinicError) -> ClinicError {
    match err.kind.as_ref() {
        ErrorKind::Authentication { .. }
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::ConnectionPoolCleared { .. }
        | ErrorKind::Io(_) => ClinicError::Connection(err.to_string()),
        ErrorKind::BsonDeserialization(_) => {
            tracing::error!(error = %err, "Failed marshalling");
            ClinicError::Query(format!("Failed to decode document: {err}"))
        }
        _ => fallback(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_document_omits_empty_fields() {
        let document = TaskDocument::from(NewTask::new("buy milk", ""));
        let encoded = bson::to_document(&document).unwrap();
        assert_eq!(encoded, doc! { "title": "buy milk" });
    }

    #[test]
    fn test_task_document_round_trip_to_model() {
        let id = ObjectId::new();
        let stored = doc! { "_id": id, "title": "buy milk", "body": "2%" };
        let document: TaskDocument = bson::from_document(stored).unwrap();
        let task = Task::from(document);
        assert_eq!(task.id, id.to_hex());
        assert_eq!(task.title, "buy milk");
        assert_eq!(task.body, "2%");
    }

    #[test]
    fn test_task_document_missing_fields_decode_empty() {
        let id = ObjectId::new();
        let document: TaskDocument = bson::from_document(doc! { "_id": id }).unwrap();
        assert_eq!(Task::from(document).title, "");
    }

    #[test]
    fn test_doctor_document_field_names() {
        let document = DoctorDocument::from(NewDoctor {
            name: "Dr. Ada".to_string(),
            service_role: "cardiology".to_string(),
            rating: 4.5,
            video_introduction_url: "https://video".to_string(),
            text_index: "ada cardiology".to_string(),
            ..Default::default()
        });
        let encoded = bson::to_document(&document).unwrap();
        assert_eq!(
            encoded,
            doc! {
                "name": "Dr. Ada",
                "servicerole": "cardiology",
                "rating": 4.5,
                "videointroductionurl": "https://video",
                "textindex": "ada cardiology",
            }
        );
    }

    #[test]
    fn test_doctor_document_accepts_integer_rating() {
        let id = ObjectId::new();
        let stored = doc! { "_id": id, "rating": 4_i32, "age": 52_i64, "gender": "female" };
        let document: DoctorDocument = bson::from_document(stored).unwrap();
        let doctor = Doctor::from(document);
        assert_eq!(doctor.rating, 4.0);
        assert_eq!(doctor.age, 52);
        assert_eq!(doctor.gender, "female");
        assert_eq!(doctor.id, id.to_hex());
    }

    #[test]
    fn test_set_document_only_contains_supplied_fields() {
        let update = UpdateTask {
            id: ObjectId::new().to_hex(),
            title: Some("new title".to_string()),
            body: None,
        };
        let set = set_document(&TaskDocument::from(&update)).unwrap();
        assert_eq!(set, doc! { "title": "new title" });

        let update = UpdateDoctor {
            id: ObjectId::new().to_hex(),
            age: Some(40),
            gender: Some(String::new()),
            ..Default::default()
        };
        let set = set_document(&DoctorDocument::from(&update)).unwrap();
        assert_eq!(set, doc! { "age": 40 });
    }

    #[test]
    fn test_set_document_strips_id() {
        let document = TaskDocument {
            id: Some(ObjectId::new()),
            title: "x".to_string(),
            body: String::new(),
        };
        let set = set_document(&document).unwrap();
        assert!(!set.contains_key("_id"));
    }

    #[test]
    fn test_build_doctor_filter() {
        assert_eq!(build_doctor_filter(&DoctorQuery::default()), Document::new());

        let query = DoctorQuery {
            name: Some("ada".to_string()),
            service_role: Some("cardiology".to_string()),
            gender: Some("female".to_string()),
            ..Default::default()
        };
        assert_eq!(
            build_doctor_filter(&query),
            doc! {
                "$text": { "$search": "ada" },
                "servicerole": "cardiology",
                "gender": "female",
            }
        );

        let query = DoctorQuery {
            name: Some(String::new()),
            gender: Some("Female".to_string()),
            ..Default::default()
        };
        assert_eq!(build_doctor_filter(&query), doc! { "gender": "Female" });
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex()).unwrap(), id);
        assert!(matches!(
            parse_object_id("xyz"),
            Err(ClinicError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_inserted_id_to_hex() {
        let id = ObjectId::new();
        assert_eq!(inserted_id_to_hex(&Bson::ObjectId(id)).unwrap(), id.to_hex());
        assert!(inserted_id_to_hex(&Bson::Int32(7)).is_err());
    }
}
