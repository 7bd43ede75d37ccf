//! Ticket models for the Freshdesk API.
//!
//! This module defines the ticket representation returned by the API and
//! the payloads accepted by the create and update endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{null_as_default, Priority, Status, TicketMessage};

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket ID.
    pub id: u64,

    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,

    /// Current status.
    pub status: Status,

    /// Priority level.
    pub priority: Priority,

    /// HTML description.
    #[serde(default)]
    pub description: Option<String>,

    /// Plain-text description.
    #[serde(default)]
    pub description_text: Option<String>,

    /// Contact who raised the ticket.
    #[serde(default)]
    pub requester_id: Option<u64>,

    /// Agent the ticket is assigned to.
    #[serde(default)]
    pub responder_id: Option<u64>,

    /// Company of the requester.
    #[serde(default)]
    pub company_id: Option<u64>,

    /// Group the ticket is assigned to.
    #[serde(default)]
    pub group_id: Option<u64>,

    /// Product the ticket belongs to.
    #[serde(default)]
    pub product_id: Option<u64>,

    /// Mailbox the ticket arrived through.
    #[serde(default)]
    pub email_config_id: Option<u64>,

    /// Channel code (1 email, 2 portal, 3 phone, ...).
    #[serde(default)]
    pub source: Option<u32>,

    /// Ticket type label.
    #[serde(default, rename = "type")]
    pub ticket_type: Option<String>,

    /// Requester name as given at creation.
    #[serde(default)]
    pub name: Option<String>,

    /// Requester email as given at creation.
    #[serde(default)]
    pub email: Option<String>,

    /// Requester phone as given at creation.
    #[serde(default)]
    pub phone: Option<String>,

    /// Requester Facebook ID.
    #[serde(default)]
    pub facebook_id: Option<String>,

    /// Requester Twitter handle.
    #[serde(default)]
    pub twitter_id: Option<String>,

    /// CC addresses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cc_emails: Vec<String>,

    /// Forwarded-to addresses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub fwd_emails: Vec<String>,

    /// Reply CC addresses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub reply_cc_emails: Vec<String>,

    /// Original recipient addresses.
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_emails: Vec<String>,

    /// Tags.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Attachment metadata; shape depends on the tenant.
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachments: Vec<serde_json::Value>,

    /// Tenant-defined custom fields.
    #[serde(default)]
    pub custom_fields: serde_json::Value,

    /// Whether the ticket is in the trash.
    #[serde(default)]
    pub deleted: bool,

    /// Whether the ticket was marked as spam.
    #[serde(default)]
    pub spam: bool,

    /// Whether the resolution SLA was breached.
    #[serde(default)]
    pub is_escalated: bool,

    /// Whether the first-response SLA was breached.
    #[serde(default)]
    pub fr_escalated: bool,

    /// Resolution deadline.
    #[serde(default)]
    pub due_by: Option<DateTime<Utc>>,

    /// First-response deadline.
    #[serde(default)]
    pub fr_due_by: Option<DateTime<Utc>>,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Replies and notes, present only when requested with
    /// `include=conversations`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversations: Vec<TicketMessage>,
}

impl Ticket {
    /// Returns the subject or a placeholder.
    pub fn display_subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("(No subject)")
    }

    /// Returns true once the ticket is resolved or closed.
    pub fn is_done(&self) -> bool {
        matches!(self.status, Status::Resolved | Status::Closed)
    }
}

/// Request body for creating a ticket.
///
/// One of `requester_id`, `email`, `phone`, `facebook_id`, `twitter_id` or
/// `unique_external_id` identifies the requester; the API rejects the
/// payload otherwise.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketCreatePayload {
    /// Requester name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Requester contact ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,

    /// Requester email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Requester Facebook ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,

    /// Requester phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Requester Twitter handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// Requester external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Ticket type label.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// Initial status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Initial priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// HTML description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Assigned agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<u64>,

    /// CC addresses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,

    /// Tenant-defined custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<serde_json::Value>,

    /// Resolution deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_by: Option<DateTime<Utc>>,

    /// Mailbox to reply from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_config_id: Option<u64>,

    /// First-response deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr_due_by: Option<DateTime<Utc>>,

    /// Assigned group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    /// Channel code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<u32>,

    /// Tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Company of the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,

    /// Internal agent (shared ownership).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_agent_id: Option<u64>,

    /// Internal group (shared ownership).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_group_id: Option<u64>,
}

/// Request body for updating a ticket.
///
/// Only fields that are `Some` (or non-empty lists) are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketUpdatePayload {
    /// Requester name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Requester contact ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<u64>,

    /// Requester email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Requester Facebook ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_id: Option<String>,

    /// Requester phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Requester Twitter handle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    /// Requester external ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_external_id: Option<String>,

    /// Subject line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Ticket type label.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,

    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// HTML description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Assigned agent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responder_id: Option<u64>,

    /// Tenant-defined custom fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<serde_json::Value>,

    /// Resolution deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_by: Option<DateTime<Utc>>,

    /// Mailbox to reply from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_config_id: Option<u64>,

    /// First-response deadline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr_due_by: Option<DateTime<Utc>>,

    /// Assigned group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,

    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,

    /// Channel code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<u32>,

    /// Tags (replaces the existing list).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Company of the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<u64>,

    /// Internal agent (shared ownership).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_agent_id: Option<u64>,

    /// Internal group (shared ownership).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_group_id: Option<u64>,
}

/// Request body that changes only a ticket's status.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TicketStatusUpdatePayload {
    /// The new status; always sent.
    pub status: Status,
}

impl TicketStatusUpdatePayload {
    /// Creates a status-only update.
    pub fn new(status: Status) -> Self {
        Self { status }
    }
}

/// Envelope used by the service-desk flavour of the create endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SdTicketEnvelope {
    pub ticket: Ticket,
}
