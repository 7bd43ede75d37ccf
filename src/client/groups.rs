//! Agent group operations.

use super::FreshdeskClient;
use crate::error::FreshdeskError;
use crate::models::Group;

impl FreshdeskClient {
    /// Lists agent groups.
    pub async fn get_all_groups(&self) -> Result<Vec<Group>, FreshdeskError> {
        self.get("/api/v2/admin/groups").await
    }
}
