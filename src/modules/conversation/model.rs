use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateConversationModel {
    pub room_id: Uuid,
}

/// One row of the user's conversation list straight out of the database:
/// the conversation plus its viewer-relative unread count and the latest
/// message, computed in the same query.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationListRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub finder_id: Uuid,
    pub room_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,

    pub unread_count: i64,

    pub last_message_id: Option<Uuid>,
    pub last_sender_id: Option<Uuid>,
    pub last_message: Option<String>,
    pub last_created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_read_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Room excerpt for the inbox. `image_urls` is derived the same way as on
/// the full room response, so list and detail views address images alike.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSummary {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub images: Vec<String>,
    pub image_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LastMessage {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub read_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Conversation enriched for the viewer's inbox.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationWithUnread {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub finder_id: Uuid,
    pub room_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub room: Option<RoomSummary>,
    pub unread_count: i64,
    pub last_message: Option<LastMessage>,
}
