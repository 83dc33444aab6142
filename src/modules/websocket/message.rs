/// Wire protocol between chat clients and the realtime server.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Authenticate the socket with a JWT access token.
    #[serde(rename_all = "camelCase")]
    Auth { token: String },

    /// Subscribe to a conversation's events.
    #[serde(rename_all = "camelCase")]
    JoinConversation { conversation_id: Uuid },

    /// Unsubscribe from a conversation's events.
    #[serde(rename_all = "camelCase")]
    LeaveConversation { conversation_id: Uuid },

    /// Keep-alive.
    Ping,
}

/// Messages pushed from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    AuthSuccess { user_id: Uuid },

    #[serde(rename_all = "camelCase")]
    AuthFailed { reason: String },

    /// A message was inserted into the conversation.
    #[serde(rename_all = "camelCase")]
    NewMessage {
        conversation_id: Uuid,
        message: serde_json::Value,
    },

    /// The other participant marked the conversation read.
    #[serde(rename_all = "camelCase")]
    MessagesRead { conversation_id: Uuid, user_id: Uuid },

    Pong,

    #[serde(rename_all = "camelCase")]
    Error { message: String },
}
