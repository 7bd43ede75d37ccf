//! Custom object record operations.

use std::collections::HashMap;

use reqwest::Method;

use super::{FreshdeskClient, CREATED, OK};
use crate::error::FreshdeskError;
use crate::models::{
    CustomObject, CustomObjectData, CustomObjectSearchResponse, CustomObjectUpdatePayload,
    CustomObjectUpdateResult,
};

fn records_path(schema_id: u64) -> String {
    format!("/api/v2/custom_objects/schemas/{}/records", schema_id)
}

impl FreshdeskClient {
    /// Searches records of a schema.
    ///
    /// Each `filter` entry becomes a query parameter, e.g.
    /// `("booking_status", "confirmed")`.
    pub async fn search_custom_objects(
        &self,
        schema_id: u64,
        filter: &HashMap<String, String>,
    ) -> Result<Vec<CustomObject>, FreshdeskError> {
        let path = records_path(schema_id);
        let request = self.request_builder(Method::GET, &path).query(filter);
        let response = self.send(request, &Method::GET, &path, OK).await?;

        let found: CustomObjectSearchResponse = Self::decode(response).await?;
        Ok(found.records)
    }

    /// Creates a record; `data` is sent as the request body.
    pub async fn create_custom_object(
        &self,
        schema_id: u64,
        data: &CustomObjectData,
    ) -> Result<CustomObjectUpdateResult, FreshdeskError> {
        self.post(&records_path(schema_id), data, CREATED).await
    }

    /// Updates a record.
    ///
    /// `payload.version` must be the version last read; the server rejects
    /// the write otherwise and the rejection surfaces as
    /// `FreshdeskError::Api`.
    pub async fn update_custom_object(
        &self,
        schema_id: u64,
        payload: &CustomObjectUpdatePayload,
    ) -> Result<CustomObjectUpdateResult, FreshdeskError> {
        let path = format!(
            "{}/{}",
            records_path(schema_id),
            urlencoding::encode(&payload.display_id)
        );
        self.put(&path, payload).await
    }
}
