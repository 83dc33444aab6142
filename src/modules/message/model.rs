use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct InsertMessage {
    pub conversation_id: Uuid,
    pub sender_id: Uuid,
    pub message: String,
}

#[derive(Deserialize, Validate)]
pub struct SendMessageModel {
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,
}
