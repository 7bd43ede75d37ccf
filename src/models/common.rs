//! Common types shared across Freshdesk API models.
//!
//! This module defines the ticket status and priority codes, the page type
//! returned by caller-driven pagination, and serde helpers for the API's
//! habit of sending `null` where a list is expected.

use serde::{Deserialize, Deserializer, Serialize};

/// Deserializes `null` as the type's default value.
///
/// Freshdesk sends `null` for empty list fields on some tenants and `[]` on
/// others; both become an empty `Vec`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Ticket status code.
///
/// Freshdesk lets tenants define extra statuses; unknown codes are kept
/// in [`Status::Custom`] rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Status {
    /// Open (2).
    Open,
    /// Pending (3).
    Pending,
    /// Resolved (4).
    Resolved,
    /// Closed (5).
    Closed,
    /// A tenant-defined status.
    Custom(u32),
}

impl From<u32> for Status {
    fn from(code: u32) -> Self {
        match code {
            2 => Status::Open,
            3 => Status::Pending,
            4 => Status::Resolved,
            5 => Status::Closed,
            other => Status::Custom(other),
        }
    }
}

impl From<Status> for u32 {
    fn from(status: Status) -> Self {
        match status {
            Status::Open => 2,
            Status::Pending => 3,
            Status::Resolved => 4,
            Status::Closed => 5,
            Status::Custom(code) => code,
        }
    }
}

/// Ticket priority code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum Priority {
    /// Low (1).
    Low,
    /// Medium (2).
    Medium,
    /// High (3).
    High,
    /// Urgent (4).
    Urgent,
    /// Any code outside 1–4.
    Other(u32),
}

impl From<u32> for Priority {
    fn from(code: u32) -> Self {
        match code {
            1 => Priority::Low,
            2 => Priority::Medium,
            3 => Priority::High,
            4 => Priority::Urgent,
            other => Priority::Other(other),
        }
    }
}

impl From<Priority> for u32 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Urgent => 4,
            Priority::Other(code) => code,
        }
    }
}

/// One page of a caller-driven listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// Records on this page, in server order.
    pub items: Vec<T>,

    /// Whether the server advertised another page via a `Link` header.
    ///
    /// Only the header's presence is checked, so the next page may be empty.
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_round_trip_through_json() {
        let statuses: Vec<Status> = serde_json::from_str("[2, 3, 4, 5, 12]").unwrap();
        assert_eq!(
            statuses,
            vec![
                Status::Open,
                Status::Pending,
                Status::Resolved,
                Status::Closed,
                Status::Custom(12)
            ]
        );
        assert_eq!(serde_json::to_string(&Status::Closed).unwrap(), "5");
    }

    #[test]
    fn test_priority_codes() {
        assert_eq!(Priority::from(4), Priority::Urgent);
        assert_eq!(u32::from(Priority::Low), 1);
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "3");
    }

    #[test]
    fn test_null_as_default() {
        #[derive(Deserialize)]
        struct Holder {
            #[serde(default, deserialize_with = "null_as_default")]
            tags: Vec<String>,
        }

        let holder: Holder = serde_json::from_str(r#"{"tags": null}"#).unwrap();
        assert!(holder.tags.is_empty());

        let holder: Holder = serde_json::from_str("{}").unwrap();
        assert!(holder.tags.is_empty());

        let holder: Holder = serde_json::from_str(r#"{"tags": ["vip"]}"#).unwrap();
        assert_eq!(holder.tags, vec!["vip"]);
    }
}
