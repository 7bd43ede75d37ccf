//! Company models for the Freshdesk API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// An organisation that contacts belong to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Unique company ID.
    pub id: u64,

    /// Company name.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Email domains that map contacts to this company.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: Vec<String>,

    /// Internal note.
    #[serde(default)]
    pub note: Option<String>,

    /// Tenant-defined custom fields.
    #[serde(default)]
    pub custom_fields: serde_json::Value,

    /// Customer health score label.
    #[serde(default)]
    pub health_score: Option<String>,

    /// Account tier label.
    #[serde(default)]
    pub account_tier: Option<String>,

    /// Contract renewal date.
    #[serde(default)]
    pub renewal_date: Option<DateTime<Utc>>,

    /// Industry label.
    #[serde(default)]
    pub industry: Option<String>,

    /// Organisation-level company ID.
    #[serde(default)]
    pub org_company_id: Option<u64>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An ID/name pair returned by the company autocomplete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyName {
    /// Company ID.
    pub id: u64,

    /// Company name.
    pub name: String,
}

/// Request body for creating or updating a company.
///
/// `renewal_date` is sent as given (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyPayload {
    /// Company name (required on create).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Email domains.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<String>,

    /// Internal note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// Tenant-defined custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<serde_json::Value>,

    /// Customer health score label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_score: Option<String>,

    /// Account tier label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_tier: Option<String>,

    /// Contract renewal date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renewal_date: Option<String>,

    /// Industry label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
}

/// Payload accepted by the create endpoint.
pub type CompanyCreatePayload = CompanyPayload;

/// Payload accepted by the update endpoint.
pub type CompanyUpdatePayload = CompanyPayload;

impl CompanyPayload {
    /// Creates a payload carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Response of the company autocomplete endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchCompaniesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub companies: Vec<CompanyName>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_deserialize() {
        let json = r#"{
            "id": 100,
            "name": "Acme",
            "domains": ["acme.example"],
            "custom_fields": {"segment": "smb"},
            "renewal_date": null,
            "created_at": "2023-01-10T08:00:00Z"
        }"#;
        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.id, 100);
        assert_eq!(company.domains, vec!["acme.example"]);
        assert_eq!(company.custom_fields["segment"], "smb");
        assert!(company.renewal_date.is_none());
    }

    #[test]
    fn test_named_payload() {
        let json = serde_json::to_value(CompanyPayload::named("Initech")).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Initech"}));
    }
}
