use actix::Addr;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::conversation::model::{ConversationWithUnread, LastMessage, RoomSummary};
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::room::repository::RoomRepository;
use crate::modules::room::storage::RoomImageStore;
use crate::modules::websocket::events::BroadcastToRoom;
use crate::modules::websocket::message::ServerMessage;
use crate::modules::websocket::server::WebSocketServer;

#[derive(Clone)]
pub struct ConversationService {
    conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
    room_repo: Arc<dyn RoomRepository + Send + Sync>,
    storage: Arc<RoomImageStore>,
    /// None in test environments without a running actor system.
    ws_server: Option<Addr<WebSocketServer>>,
}

impl ConversationService {
    pub fn with_dependencies(
        conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
        room_repo: Arc<dyn RoomRepository + Send + Sync>,
        storage: Arc<RoomImageStore>,
        ws_server: Option<Addr<WebSocketServer>>,
    ) -> Self {
        ConversationService { conversation_repo, room_repo, storage, ws_server }
    }

    /// Find or create the conversation for (room owner, finder, room). The
    /// owner side is always derived from the room row; calling this twice
    /// with the same inputs yields the same conversation.
    pub async fn get_or_create(
        &self,
        room_id: Uuid,
        finder_id: Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let room = self
            .room_repo
            .find_by_id(&room_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Room not found"))?;

        if room.owner_id == finder_id {
            return Err(error::SystemError::bad_request(
                "You cannot start a conversation about your own room",
            ));
        }

        self.conversation_repo.create_if_absent(&room.owner_id, &finder_id, &room_id).await
    }

    /// The viewer's inbox: conversations newest first, each with its room
    /// summary, unread count and last message. Counts and last messages
    /// come out of one query; room summaries are one batched lookup.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationWithUnread>, error::SystemError> {
        let rows = self.conversation_repo.find_all_for_user(&user_id).await?;

        let mut room_ids: Vec<Uuid> = rows.iter().map(|r| r.room_id).collect();
        room_ids.sort_unstable();
        room_ids.dedup();

        let rooms = if room_ids.is_empty() {
            Vec::new()
        } else {
            self.room_repo.find_summaries_by_ids(&room_ids).await?
        };
        let room_map: HashMap<Uuid, RoomSummary> = rooms
            .into_iter()
            .map(|r| {
                let image_urls =
                    r.images.iter().map(|key| self.storage.public_url(key)).collect();
                (
                    r.id,
                    RoomSummary {
                        id: r.id,
                        title: r.title,
                        location: r.location,
                        images: r.images,
                        image_urls,
                    },
                )
            })
            .collect();

        let result = rows
            .into_iter()
            .map(|row| {
                let last_message = match (row.last_message_id, row.last_sender_id) {
                    (Some(id), Some(sender_id)) => Some(LastMessage {
                        id,
                        sender_id,
                        message: row.last_message.unwrap_or_default(),
                        created_at: row.last_created_at.unwrap_or(row.created_at),
                        read_at: row.last_read_at,
                    }),
                    _ => None,
                };

                ConversationWithUnread {
                    id: row.id,
                    owner_id: row.owner_id,
                    finder_id: row.finder_id,
                    room_id: row.room_id,
                    created_at: row.created_at,
                    room: room_map.get(&row.room_id).cloned(),
                    unread_count: row.unread_count,
                    last_message,
                }
            })
            .collect();

        Ok(result)
    }

    /// Mark every inbound unread message as read. Idempotent; pushes a
    /// read receipt to the conversation channel only when something
    /// actually changed.
    pub async fn mark_as_read(
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

        let marked = self.conversation_repo.mark_read(&conversation_id, &user_id).await?;

        if marked > 0 {
            if let Some(server) = &self.ws_server {
                server.do_send(BroadcastToRoom {
                    conversation_id,
                    message: ServerMessage::MessagesRead { conversation_id, user_id },
                    skip_user_id: Some(user_id),
                });
            }
        }

        Ok(())
    }

    /// Participant-gated lookup. The realtime layer runs this before a
    /// socket may subscribe to a conversation channel.
    pub async fn get_checked(
        &self,
        conversation_id: Uuid,
        user_id: Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
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

        Ok(conversation)
    }
}
