use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

/// The unique chat context tying one room owner, one finder and one room.
/// Uniqueness of (owner_id, finder_id, room_id) is a table constraint, not
/// a lookup convention; concurrent creates collapse onto the same row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ConversationEntity {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub finder_id: Uuid,
    pub room_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ConversationEntity {
    pub fn has_participant(&self, user_id: &Uuid) -> bool {
        self.owner_id == *user_id || self.finder_id == *user_id
    }
}
