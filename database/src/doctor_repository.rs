use std::sync::Arc;

use async_trait::async_trait;
use clinic_core::{
    error::{ClinicError, Result},
    models::{Doctor, DoctorPage, DoctorQuery, NewDoctor, UpdateDoctor},
    repository::DoctorRepository,
    validation::RecordValidator,
};
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::ReturnDocument, Collection, IndexModel};

use crate::common::{
    build_doctor_filter, inserted_id_to_hex, parse_object_id, query_error, set_document,
    write_error, DoctorDocument, RATING_FIELD, TEXT_INDEX_FIELD,
};
use crate::connection::MongoConnection;

/// MongoDB implementation of the DoctorRepository trait
///
/// Listings rely on the text index over [`TEXT_INDEX_FIELD`]; call
/// [`DoctorRepository::ensure_indexes`] once before serving requests.
#[derive(Debug, Clone)]
pub struct MongoDoctorRepository {
    connection: Arc<MongoConnection>,
    collection: Collection<DoctorDocument>,
}

impl MongoDoctorRepository {
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        let collection = connection.doctors();
        Self {
            connection,
            collection,
        }
    }

    /// Direct access to the typed collection, mainly for tests
    pub fn collection(&self) -> &Collection<DoctorDocument> {
        &self.collection
    }
}

#[async_trait]
impl DoctorRepository for MongoDoctorRepository {
    async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { TEXT_INDEX_FIELD: "text" })
            .build();

        let result = self.collection.create_index(index).await.map_err(write_error)?;
        tracing::info!(index = %result.index_name, "Text index ensured");
        Ok(())
    }

    async fn list(&self, query: DoctorQuery) -> Result<DoctorPage> {
        RecordValidator::validate_doctor_query(&query)?;

        let filter = build_doctor_filter(&query);
        let pagination = query.pagination();

        let total = self
            .collection
            .count_documents(filter.clone())
            .await
            .map_err(query_error)?;

        let cursor = self
            .collection
            .find(filter)
            .sort(doc! { RATING_FIELD: -1 })
            .skip(pagination.skip())
            .limit(pagination.limit())
            .await
            .map_err(query_error)?;
        let documents: Vec<DoctorDocument> = cursor.try_collect().await.map_err(query_error)?;

        let pages = pagination.page_count(total);
        tracing::debug!(
            total = total,
            pages = pages,
            returned = documents.len(),
            page = pagination.page(),
            "Listed doctors"
        );

        Ok(DoctorPage {
            pages,
            doctors: documents.into_iter().map(Doctor::from).collect(),
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Doctor> {
        let object_id = parse_object_id(id)?;

        let document = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(query_error)?
            .ok_or_else(|| ClinicError::doctor_not_found(id))?;

        Ok(Doctor::from(document))
    }

    async fn create(&self, doctor: NewDoctor) -> Result<String> {
        let document = DoctorDocument::from(doctor);

        let result = self.collection.insert_one(&document).await.map_err(|e| {
            tracing::error!(error = %e, "Could not create doctor");
            write_error(e)
        })?;

        let id = inserted_id_to_hex(&result.inserted_id)?;
        tracing::info!(id = %id, "Doctor created");
        Ok(id)
    }

    async fn update(&self, update: UpdateDoctor) -> Result<Doctor> {
        RecordValidator::validate_update_doctor(&update)?;
        let object_id = parse_object_id(&update.id)?;

        let changes = set_document(&DoctorDocument::from(&update))?;
        if changes.is_empty() {
            return self.get_by_id(&update.id).await;
        }

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": changes })
            .upsert(false)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id = %update.id, "Could not save doctor");
                write_error(e)
            })?
            .ok_or_else(|| ClinicError::doctor_not_found(&update.id))?;

        tracing::info!(id = %update.id, "Doctor updated");
        Ok(Doctor::from(document))
    }

    async fn health_check(&self) -> Result<()> {
        self.connection.health_check().await
    }
}
