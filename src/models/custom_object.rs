//! Custom object models for the Freshdesk API.
//!
//! Custom objects are records of a tenant-defined schema. Updates carry the
//! `version` last read from the server; the server rejects a stale version.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Free-form field map of a custom object record.
pub type CustomObjectData = serde_json::Map<String, serde_json::Value>;

/// A custom object record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomObject {
    /// Record key within its schema.
    pub display_id: String,

    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_time: u64,

    /// Last update time in epoch milliseconds.
    #[serde(default)]
    pub updated_time: u64,

    /// Field values.
    #[serde(default)]
    pub data: CustomObjectData,

    /// Optimistic concurrency token; send back unchanged on update.
    #[serde(default)]
    pub version: u64,

    /// Server-side metadata.
    #[serde(default)]
    pub metadata: CustomObjectData,

    /// Hypermedia links.
    #[serde(default, rename = "_links")]
    pub links: CustomObjectData,
}

/// Request body for updating a custom object record.
#[derive(Debug, Clone, Serialize)]
pub struct CustomObjectUpdatePayload {
    /// Record key; also used in the request path.
    pub display_id: String,

    /// The version last read.
    pub version: u64,

    /// New field values.
    pub data: CustomObjectData,
}

impl CustomObjectUpdatePayload {
    /// Starts an update from a record as last read, keeping its version.
    pub fn from_record(record: &CustomObject) -> Self {
        Self {
            display_id: record.display_id.clone(),
            version: record.version,
            data: record.data.clone(),
        }
    }
}

/// Record returned by the create and update endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomObjectUpdateResult {
    /// Record key.
    pub display_id: String,

    /// Creation time in epoch milliseconds.
    #[serde(default)]
    pub created_time: u64,

    /// Last update time in epoch milliseconds.
    #[serde(default)]
    pub updated_time: u64,

    /// Field values as stored.
    #[serde(default)]
    pub data: CustomObjectData,
}

/// Response of the record search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CustomObjectSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub records: Vec<CustomObject>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_object_deserialize() {
        let json = r#"{
            "display_id": "BK-12",
            "created_time": 1709280000000,
            "updated_time": 1709366400000,
            "version": 3,
            "data": {"seat": "14C", "confirmed": true},
            "metadata": {"created_by": "agent@example.com"},
            "_links": {"self": {"href": "/records/BK-12"}}
        }"#;
        let record: CustomObject = serde_json::from_str(json).unwrap();
        assert_eq!(record.display_id, "BK-12");
        assert_eq!(record.version, 3);
        assert_eq!(record.data["seat"], "14C");
        assert!(record.links.contains_key("self"));
    }

    #[test]
    fn test_update_payload_keeps_version() {
        let record: CustomObject = serde_json::from_str(
            r#"{"display_id": "BK-12", "version": 7, "data": {"seat": "14C"}}"#,
        )
        .unwrap();
        let mut payload = CustomObjectUpdatePayload::from_record(&record);
        payload.data.insert("seat".to_string(), serde_json::json!("2A"));

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["version"], 7);
        assert_eq!(json["display_id"], "BK-12");
        assert_eq!(json["data"]["seat"], "2A");
    }
}
