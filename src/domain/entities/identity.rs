use serde::{Deserialize, Serialize};

/// The acting identity resolved by the identity middleware for every
/// request. Stands in for a real authentication collaborator; nothing
/// outside the middleware knows where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub is_admin: bool,
}

impl Identity {
    pub fn can_edit(&self, owner_id: &str) -> bool {
        self.is_admin || self.user_id == owner_id
    }
}
