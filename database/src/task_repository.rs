use std::sync::Arc;

use async_trait::async_trait;
use clinic_core::{
    error::{ClinicError, Result},
    models::{NewTask, Task, UpdateTask},
    repository::TaskRepository,
    validation::RecordValidator,
};
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::ReturnDocument, Collection};

use crate::common::{
    inserted_id_to_hex, parse_object_id, query_error, set_document, write_error, TaskDocument,
};
use crate::connection::MongoConnection;

/// MongoDB implementation of the TaskRepository trait
#[derive(Debug, Clone)]
pub struct MongoTaskRepository {
    connection: Arc<MongoConnection>,
    collection: Collection<TaskDocument>,
}

impl MongoTaskRepository {
    pub fn new(connection: Arc<MongoConnection>) -> Self {
        let collection = connection.tasks();
        Self {
            connection,
            collection,
        }
    }

    /// Direct access to the typed collection, mainly for tests
    pub fn collection(&self) -> &Collection<TaskDocument> {
        &self.collection
    }
}

#[async_trait]
impl TaskRepository for MongoTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        let cursor = self.collection.find(doc! {}).await.map_err(query_error)?;
        let documents: Vec<TaskDocument> = cursor.try_collect().await.map_err(query_error)?;

        tracing::debug!(count = documents.len(), "Listed tasks");
        Ok(documents.into_iter().map(Task::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Task> {
        let object_id = parse_object_id(id)?;

        let document = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(query_error)?
            .ok_or_else(|| ClinicError::task_not_found(id))?;

        Ok(Task::from(document))
    }

    async fn create(&self, task: NewTask) -> Result<String> {
        let document = TaskDocument::from(task);

        let result = self.collection.insert_one(&document).await.map_err(|e| {
            tracing::error!(error = %e, "Could not create task");
            write_error(e)
        })?;

        let id = inserted_id_to_hex(&result.inserted_id)?;
        tracing::info!(id = %id, "Task created");
        Ok(id)
    }

    async fn update(&self, update: UpdateTask) -> Result<Task> {
        RecordValidator::validate_update_task(&update)?;
        let object_id = parse_object_id(&update.id)?;

        let changes = set_document(&TaskDocument::from(&update))?;
        if changes.is_empty() {
            // Nothing to write, return the task as stored
            return self.get_by_id(&update.id).await;
        }

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": changes })
            .upsert(false)
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, id = %update.id, "Could not save task");
                write_error(e)
            })?
            .ok_or_else(|| ClinicError::task_not_found(&update.id))?;

        tracing::info!(id = %update.id, "Task updated");
        Ok(Task::from(document))
    }

    async fn health_check(&self) -> Result<()> {
        self.connection.health_check().await
    }
}
