//! Conversation models for the Freshdesk API.
//!
//! A conversation is a reply or note on a ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A reply or note attached to a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketMessage {
    /// Unique conversation ID.
    pub id: u64,

    /// HTML body.
    #[serde(default)]
    pub body: Option<String>,

    /// Plain-text body.
    #[serde(default)]
    pub body_text: Option<String>,

    /// Whether the message came from outside the helpdesk.
    #[serde(default, rename = "incoming")]
    pub is_incoming: bool,

    /// Whether the message is a private note.
    #[serde(default, rename = "private")]
    pub is_private: bool,

    /// Author of the message.
    #[serde(default)]
    pub user_id: Option<u64>,

    /// Support mailbox the message went through.
    #[serde(default)]
    pub support_email: Option<String>,

    /// Channel code (email, portal, ...).
    #[serde(default)]
    pub source: Option<u32>,

    /// Conversation category code.
    #[serde(default)]
    pub category: Option<u32>,

    /// Email recipients.
    #[serde(default, deserialize_with = "null_as_default")]
    pub to_emails: Vec<String>,

    /// Email sender.
    #[serde(default)]
    pub from_email: Option<String>,

    /// CC recipients.
    #[serde(default, deserialize_with = "null_as_default")]
    pub cc_emails: Vec<String>,

    /// BCC recipients.
    #[serde(default, deserialize_with = "null_as_default")]
    pub bcc_emails: Vec<String>,

    /// Failed delivery attempts.
    #[serde(default)]
    pub email_failure_count: Option<u64>,

    /// Outgoing delivery failures.
    #[serde(default)]
    pub outgoing_failures: Option<u64>,

    /// Email thread the message belongs to.
    #[serde(default)]
    pub thread_id: Option<u64>,

    /// Message within the email thread.
    #[serde(default)]
    pub thread_message_id: Option<u64>,

    /// When the message was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the message was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// When the message was last edited.
    #[serde(default, rename = "last_edited_at")]
    pub edited_at: Option<DateTime<Utc>>,

    /// Who edited the message last.
    #[serde(default, rename = "last_edited_user_id")]
    pub edited_by_user_id: Option<u64>,

    /// Attachment metadata, shape varies by tenant.
    #[serde(default)]
    pub attachments: serde_json::Value,

    /// Automation rule that produced the message.
    #[serde(default)]
    pub automation_id: Option<u64>,

    /// Kind of automation rule.
    #[serde(default)]
    pub automation_type_id: Option<u64>,

    /// Whether the message is an automatic response.
    #[serde(default, rename = "auto_response")]
    pub is_auto_response: bool,

    /// Ticket the message belongs to.
    #[serde(default)]
    pub ticket_id: Option<u64>,

    /// Channel-specific extras.
    #[serde(default)]
    pub source_additional_info: serde_json::Value,
}

/// Request body for replying to a ticket.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TicketMessageCreatePayload {
    /// HTML body of the reply.
    pub body: String,

    /// Attachment references.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<serde_json::Value>,

    /// Sender address; defaults to the helpdesk's support address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    /// Agent the reply is sent as.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// CC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cc_emails: Vec<String>,

    /// BCC recipients.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc_emails: Vec<String>,
}

impl TicketMessageCreatePayload {
    /// Creates a reply with the given HTML body.
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Default::default()
        }
    }

    /// Adds a CC recipient.
    pub fn with_cc(mut self, email: impl Into<String>) -> Self {
        self.cc_emails.push(email.into());
        self
    }
}

/// Envelope used by the service-desk flavour of the reply endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SdTicketMessageEnvelope {
    pub conversation: TicketMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_message_deserialize() {
        let json = r#"{
            "id": 3001,
            "body": "<div>Thanks!</div>",
            "body_text": "Thanks!",
            "incoming": true,
            "private": false,
            "user_id": 44,
            "to_emails": null,
            "cc_emails": ["boss@example.com"],
            "created_at": "2024-03-01T10:15:00Z",
            "attachments": [],
            "ticket_id": 7
        }"#;
        let message: TicketMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.id, 3001);
        assert!(message.is_incoming);
        assert!(!message.is_private);
        assert!(message.to_emails.is_empty());
        assert_eq!(message.cc_emails, vec!["boss@example.com"]);
        assert_eq!(message.ticket_id, Some(7));
        assert!(message.created_at.is_some());
    }

    #[test]
    fn test_create_payload_omits_empty_fields() {
        let payload = TicketMessageCreatePayload::new("<p>On it</p>").with_cc("cc@example.com");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["body"], "<p>On it</p>");
        assert_eq!(json["cc_emails"][0], "cc@example.com");
        assert!(json.get("bcc_emails").is_none());
        assert!(json.get("from_email").is_none());
        assert!(json.get("attachments").is_none());
    }
}
