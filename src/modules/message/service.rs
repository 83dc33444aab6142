use actix::Addr;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::message::model::InsertMessage;
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageEntity;
use crate::modules::websocket::events::BroadcastToRoom;
use crate::modules::websocket::message::ServerMessage;
use crate::modules::websocket::server::WebSocketServer;

#[derive(Clone)]
pub struct MessageService {
    message_repo: Arc<dyn MessageRepository + Send + Sync>,
    conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
    /// None in test environments without a running actor system.
    ws_server: Option<Addr<WebSocketServer>>,
}

impl MessageService {
    pub fn with_dependencies(
        message_repo: Arc<dyn MessageRepository + Send + Sync>,
        conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
        ws_server: Option<Addr<WebSocketServer>>,
    ) -> Self {
        MessageService { message_repo, conversation_repo, ws_server }
    }

    /// Full history of a conversation, oldest first. Participants only.
    pub async fn history(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.check_participant(conversation_id, user_id).await?;
        self.message_repo.find_by_conversation(&conversation_id).await
    }

    /// Persist the message, then fan it out to everyone subscribed to the
    /// conversation channel except the sender. The write is the source of
    /// truth; a failed broadcast only delays delivery until the next fetch.
    pub async fn send(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        message: String,
    ) -> Result<MessageEntity, error::SystemError> {
        let message = message.trim().to_string();
        if message.is_empty() {
            return Err(error::SystemError::bad_request("Message cannot be empty"));
        }

        self.check_participant(conversation_id, sender_id).await?;

        let entity = self
            .message_repo
            .create(&InsertMessage { conversation_id, sender_id, message })
            .await?;

        if let Some(server) = &self.ws_server {
            server.do_send(BroadcastToRoom {
                conversation_id,
                message: ServerMessage::NewMessage {
                    conversation_id,
                    message: serde_json::to_value(&entity)?,
                },
                skip_user_id: Some(sender_id),
            });
        }

        Ok(entity)
    }

    async fn check_participant(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let conversation = self
            .conversation_repo
            .find_by_id(&conversation_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Conversation not found"))?;

        if !conversation.has_participant(&user_id) {
            return Err(error::SystemError::forbidden(
                "You are not a participant of this conversation",
            ));
        }

        Ok(())
    }
}
