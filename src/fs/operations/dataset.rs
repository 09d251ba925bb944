//! Dataset lifecycle and metadata operations.

use serde_json::{Value, json};
use tracing::info;

use crate::api::client::{dataset_variables, field};
use crate::api::queries::{
    CREATE_DATASET, CREATE_SNAPSHOT, DATASET, DELETE_DATASET, DELETE_FILE, PUBLISH_DATASET,
    UPDATE_DESCRIPTION,
};
use crate::dataset::{Dataset, Snapshot};
use crate::error::{OpenNeuroError, Result};
use crate::fs::path::LogicalPath;
use crate::session::Session;

impl Session {
    pub(crate) async fn dataset(&self, dataset_id: &str) -> Result<Dataset> {
        let data = self
            .graphql()
            .execute(DATASET, dataset_variables(dataset_id), Some("dataset"))
            .await?;
        let dataset = field(&data, "dataset")?;
        if dataset.is_null() {
            return Err(OpenNeuroError::Protocol(format!(
                "dataset {} was not returned",
                dataset_id
            )));
        }
        Ok(serde_json::from_value(dataset.clone())?)
    }

    pub(crate) async fn create_dataset(&self, label: &str) -> Result<String> {
        let data = self
            .graphql()
            .execute(
                CREATE_DATASET,
                json!({ "label": label }),
                Some("createDataset"),
            )
            .await?;
        let id = string_field(field(&data, "createDataset")?, "id")?;
        info!(dataset = %id, "dataset created");
        Ok(id)
    }

    pub(crate) async fn delete_dataset(&self, dataset_id: &str) -> Result<()> {
        let data = self
            .graphql()
            .execute(
                DELETE_DATASET,
                dataset_variables(dataset_id),
                Some("deleteDataset"),
            )
            .await?;
        expect_true(&data, "deleteDataset")?;
        info!(dataset = dataset_id, "dataset deleted");
        Ok(())
    }

    /// Delete one file of a dataset draft.
    pub(crate) async fn delete_file(&self, dataset_id: &str, path: &LogicalPath) -> Result<()> {
        let data = self
            .graphql()
            .execute(
                DELETE_FILE,
                json!({
                    "datasetId": dataset_id,
                    "path": path.parent(),
                    "filename": path.filename(),
                }),
                Some("deleteFile"),
            )
            .await?;
        expect_true(&data, "deleteFile")?;
        info!(dataset = dataset_id, path = %path, "file deleted");
        Ok(())
    }

    /// Set one field of the draft's `dataset_description.json`.
    pub(crate) async fn update_description(
        &self,
        dataset_id: &str,
        field_name: &str,
        value: &str,
    ) -> Result<()> {
        let data = self
            .graphql()
            .execute(
                UPDATE_DESCRIPTION,
                json!({
                    "datasetId": dataset_id,
                    "field": field_name,
                    "value": value,
                }),
                Some("updateDescription"),
            )
            .await?;
        field(&data, "updateDescription")?;
        Ok(())
    }

    pub(crate) async fn create_snapshot(
        &self,
        dataset_id: &str,
        tag: &str,
        changes: &[String],
    ) -> Result<Snapshot> {
        let data = self
            .graphql()
            .execute(
                CREATE_SNAPSHOT,
                json!({
                    "datasetId": dataset_id,
                    "tag": tag,
                    "changes": changes,
                }),
                Some("createSnapshot"),
            )
            .await?;
        let snapshot: Snapshot = serde_json::from_value(field(&data, "createSnapshot")?.clone())?;
        info!(dataset = dataset_id, tag = %snapshot.tag, "snapshot created");
        Ok(snapshot)
    }

    pub(crate) async fn publish_dataset(&self, dataset_id: &str) -> Result<()> {
        let data = self
            .graphql()
            .execute(
                PUBLISH_DATASET,
                dataset_variables(dataset_id),
                Some("publishDataset"),
            )
            .await?;
        expect_true(&data, "publishDataset")?;
        info!(dataset = dataset_id, "dataset published");
        Ok(())
    }
}

fn string_field(value: &Value, name: &str) -> Result<String> {
    value
        .get(name)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| OpenNeuroError::Protocol(format!("response is missing string {}", name)))
}

/// Boolean mutations report refusal as `false` rather than an error entry.
fn expect_true(data: &Value, name: &str) -> Result<()> {
    match field(data, name)?.as_bool() {
        Some(true) => Ok(()),
        Some(false) => Err(OpenNeuroError::Custom(format!("{} was refused", name))),
        None => Err(OpenNeuroError::Protocol(format!(
            "{} did not return a boolean",
            name
        ))),
    }
}
