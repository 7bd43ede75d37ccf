//! Agent group models for the Freshdesk API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A group of agents that tickets can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Unique group ID.
    pub id: u64,

    /// Group name.
    #[serde(default)]
    pub name: Option<String>,

    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,

    /// Agent notified when tickets stay unassigned.
    #[serde(default)]
    pub escalate_to: Option<u64>,

    /// How long a ticket may stay unassigned, e.g. `30m`.
    #[serde(default)]
    pub unassigned_for: Option<String>,

    /// Member agent IDs.
    #[serde(default, rename = "agent_ids", deserialize_with = "null_as_default")]
    pub agents: Vec<u64>,

    /// Whether members may toggle their own availability.
    #[serde(default, rename = "allow_agents_to_change_availability")]
    pub allow_agents_change_availability: bool,

    /// Business hours calendar.
    #[serde(default, rename = "business_calendar_id")]
    pub business_calendar: Option<u64>,

    /// Group type label.
    #[serde(default, rename = "type")]
    pub group_type: Option<String>,

    /// Automatic assignment settings.
    #[serde(default)]
    pub automatic_agent_assignment: serde_json::Value,

    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Returns the group name, falling back to its ID.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("group {}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_deserialize() {
        let json = r#"{
            "id": 5,
            "name": "Tier 2",
            "agent_ids": [11, 12],
            "allow_agents_to_change_availability": true,
            "business_calendar_id": null,
            "type": "support_agent_group"
        }"#;
        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.agents, vec![11, 12]);
        assert!(group.allow_agents_change_availability);
        assert_eq!(group.group_type.as_deref(), Some("support_agent_group"));
        assert_eq!(group.display_name(), "Tier 2");
    }

    #[test]
    fn test_display_name_fallback() {
        let group: Group = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(group.display_name(), "group 5");
    }
}
