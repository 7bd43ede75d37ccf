//! Contact models for the Freshdesk API.
//!
//! Contacts are the requesters of tickets. Besides a primary company a
//! contact may belong to several "other" companies, each with its own
//! ticket visibility flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A contact as returned by the single-contact and search endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique contact ID.
    pub id: u64,

    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,

    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,

    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,

    /// Secondary emails.
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_emails: Vec<String>,

    /// Work phone.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile phone.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Additional phone numbers; shape depends on the tenant.
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_phone_numbers: Vec<serde_json::Value>,

    /// Twitter handle.
    #[serde(default)]
    pub twitter_id: Option<String>,

    /// Facebook ID (string or number depending on the tenant).
    #[serde(default)]
    pub facebook_id: serde_json::Value,

    /// External identifier.
    #[serde(default)]
    pub unique_external_id: Option<String>,

    /// Primary company.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Whether the contact sees all tickets of the primary company.
    #[serde(default)]
    pub view_all_tickets: bool,

    /// Secondary company associations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_companies: Vec<CompanyContactOther>,

    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,

    /// Avatar metadata.
    #[serde(default)]
    pub avatar: serde_json::Value,

    /// Tenant-defined custom fields.
    #[serde(default)]
    pub custom_fields: serde_json::Value,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,

    /// Language code.
    #[serde(default)]
    pub language: Option<String>,

    /// Tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Time zone name.
    #[serde(default)]
    pub time_zone: Option<String>,

    /// Whether the contact has verified their email.
    #[serde(default)]
    pub active: bool,

    /// Whether the contact was soft-deleted.
    #[serde(default)]
    pub deleted: bool,

    /// Satisfaction rating.
    #[serde(default)]
    pub csat_rating: serde_json::Value,

    /// Organisation-level contact ID.
    #[serde(default)]
    pub org_contact_id: Option<u64>,

    /// Preferred channel.
    #[serde(default)]
    pub preferred_source: Option<String>,

    /// Web visitor ID.
    #[serde(default)]
    pub visitor_id: Option<String>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A contact as returned by the list endpoint.
///
/// The list endpoint reports other companies as bare IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactShort {
    /// Unique contact ID.
    pub id: u64,

    /// Full name.
    #[serde(default)]
    pub name: Option<String>,

    /// Primary email.
    #[serde(default)]
    pub email: Option<String>,

    /// Work phone.
    #[serde(default)]
    pub phone: Option<String>,

    /// Mobile phone.
    #[serde(default)]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(default)]
    pub twitter_id: Option<String>,

    /// Facebook ID.
    #[serde(default)]
    pub facebook_id: serde_json::Value,

    /// Primary company.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// IDs of secondary companies.
    #[serde(default, deserialize_with = "null_as_default")]
    pub other_companies: Vec<u64>,

    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,

    /// Tenant-defined custom fields.
    #[serde(default)]
    pub custom_fields: serde_json::Value,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Job title.
    #[serde(default)]
    pub job_title: Option<String>,

    /// Language code.
    #[serde(default)]
    pub language: Option<String>,

    /// Tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Whether the contact has verified their email.
    #[serde(default)]
    pub active: bool,

    /// Whether the contact was soft-deleted.
    #[serde(default)]
    pub deleted: bool,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A secondary company association as returned on a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyContactOther {
    /// Company ID.
    #[serde(alias = "company_id")]
    pub id: u64,

    /// Whether the contact sees all tickets of this company.
    #[serde(default)]
    pub view_all_tickets: bool,

    /// Company name.
    #[serde(default)]
    pub name: Option<String>,

    /// Company avatar metadata.
    #[serde(default)]
    pub avatar: serde_json::Value,
}

/// A secondary company association as sent on create and update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyContactOtherUpdatePayload {
    /// Company ID.
    #[serde(rename = "company_id")]
    pub id: u64,

    /// Whether the contact sees all tickets of this company.
    pub view_all_tickets: bool,
}

impl From<&CompanyContactOther> for CompanyContactOtherUpdatePayload {
    fn from(other: &CompanyContactOther) -> Self {
        Self {
            id: other.id,
            view_all_tickets: other.view_all_tickets,
        }
    }
}

/// Request body for creating a contact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactCreatePayload {
    /// Full name (required by the API).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Work phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Mobile phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// External identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Secondary emails.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_emails: Vec<String>,

    /// Primary company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,

    /// Whether the contact sees all tickets of the primary company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_all_tickets: Option<bool>,

    /// Secondary company associations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_companies: Vec<CompanyContactOtherUpdatePayload>,

    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Avatar metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<serde_json::Value>,

    /// Tenant-defined custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<serde_json::Value>,

    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    /// Language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Time zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// Request body for updating a contact.
///
/// The API treats an omitted list field as "no value", so updates that
/// must preserve company associations should start from
/// [`ContactUpdatePayload::from_contact`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactUpdatePayload {
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Primary email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Work phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Mobile phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Twitter handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// External identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Secondary emails.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_emails: Vec<String>,

    /// Primary company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,

    /// Whether the contact sees all tickets of the primary company.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_all_tickets: Option<bool>,

    /// Secondary company associations (replaces the existing list).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_companies: Vec<CompanyContactOtherUpdatePayload>,

    /// Postal address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Avatar metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<serde_json::Value>,

    /// Tenant-defined custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<serde_json::Value>,

    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Job title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    /// Language code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Time zone name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl ContactUpdatePayload {
    /// Copies every mutable field of `contact` into a full update payload.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            mobile: contact.mobile.clone(),
            twitter_id: contact.twitter_id.clone(),
            unique_external_id: contact.unique_external_id.clone(),
            other_emails: contact.other_emails.clone(),
            company_id: contact.company_id,
            view_all_tickets: Some(contact.view_all_tickets),
            other_companies: contact.other_companies.iter().map(Into::into).collect(),
            address: contact.address.clone(),
            avatar: non_null(&contact.avatar),
            custom_fields: non_null(&contact.custom_fields),
            description: contact.description.clone(),
            job_title: contact.job_title.clone(),
            language: contact.language.clone(),
            tags: contact.tags.clone(),
            time_zone: contact.time_zone.clone(),
        }
    }

    /// Adds a secondary company, replacing an existing entry for the same ID.
    pub fn upsert_other_company(&mut self, company_id: u64, view_all_tickets: bool) {
        let association = CompanyContactOtherUpdatePayload {
            id: company_id,
            view_all_tickets,
        };
        match self
            .other_companies
            .iter_mut()
            .find(|existing| existing.id == company_id)
        {
            Some(existing) => *existing = association,
            None => self.other_companies.push(association),
        }
    }
}

fn non_null(value: &serde_json::Value) -> Option<serde_json::Value> {
    (!value.is_null()).then(|| value.clone())
}

/// Response of the contact search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchContactsResponse {
    #[serde(default)]
    pub total: u64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Contact>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_contact() -> Contact {
        serde_json::from_value(serde_json::json!({
            "id": 9,
            "name": "Jane Roe",
            "email": "jane@example.com",
            "phone": "+45 1234",
            "company_id": 100,
            "view_all_tickets": false,
            "other_companies": [
                {"id": 7, "view_all_tickets": true, "name": "Seven Ltd"},
                {"company_id": 8, "view_all_tickets": false}
            ],
            "tags": ["vip"],
            "avatar": null,
            "custom_fields": {"tier": "gold"},
            "language": "da",
            "time_zone": "Copenhagen"
        }))
        .unwrap()
    }

    #[test]
    fn test_contact_deserialize() {
        let contact = sample_contact();
        assert_eq!(contact.id, 9);
        assert_eq!(contact.other_companies.len(), 2);
        assert_eq!(contact.other_companies[1].id, 8);
        assert!(contact.avatar.is_null());
    }

    #[test]
    fn test_from_contact_copies_mutable_fields() {
        let payload = ContactUpdatePayload::from_contact(&sample_contact());

        assert_eq!(payload.name.as_deref(), Some("Jane Roe"));
        assert_eq!(payload.company_id, Some(100));
        assert_eq!(payload.view_all_tickets, Some(false));
        assert_eq!(
            payload.other_companies,
            vec![
                CompanyContactOtherUpdatePayload { id: 7, view_all_tickets: true },
                CompanyContactOtherUpdatePayload { id: 8, view_all_tickets: false },
            ]
        );
        assert_eq!(payload.avatar, None);
        assert_eq!(payload.custom_fields, Some(serde_json::json!({"tier": "gold"})));
        assert_eq!(payload.tags, vec!["vip"]);
    }

    #[test]
    fn test_upsert_other_company() {
        let mut payload = ContactUpdatePayload::from_contact(&sample_contact());

        payload.upsert_other_company(42, true);
        assert_eq!(payload.other_companies.len(), 3);

        payload.upsert_other_company(7, false);
        assert_eq!(payload.other_companies.len(), 3);
        assert!(!payload.other_companies[0].view_all_tickets);
    }

    #[test]
    fn test_other_company_payload_uses_company_id_key() {
        let json = serde_json::to_value(CompanyContactOtherUpdatePayload {
            id: 42,
            view_all_tickets: true,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"company_id": 42, "view_all_tickets": true}));
    }
}
