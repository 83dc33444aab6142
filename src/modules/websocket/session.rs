/// Per-connection session actor.
///
/// Holds the socket's auth state and forwards subscription changes to the
/// server actor. Outbound events are serialized here and pushed through an
/// mpsc channel that handler.rs drains into the socket. The session is
/// subscription-only: message sends go through the HTTP API, which
/// broadcasts back through the server actor.
use actix::prelude::*;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::ENV;
use crate::modules::conversation::service::ConversationService;
use crate::utils::{Claims, TypeClaims};

use super::events::*;
use super::message::{ClientMessage, ServerMessage};
use super::server::WebSocketServer;

pub struct WebSocketSession {
    pub id: Uuid,
    /// Set after a successful Auth frame.
    pub user_id: Option<Uuid>,
    pub server: Addr<WebSocketServer>,
    /// Gate for channel subscriptions: only participants may join.
    pub conversation_service: ConversationService,
    pub tx: mpsc::UnboundedSender<String>,
}

impl WebSocketSession {
    pub fn new(
        server: Addr<WebSocketServer>,
        conversation_service: ConversationService,
        tx: mpsc::UnboundedSender<String>,
    ) -> Self {
        Self { id: Uuid::now_v7(), user_id: None, server, conversation_service, tx }
    }

    fn send_to_client(&self, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = self.tx.send(json) {
                    tracing::error!("Failed to push to client (session {}): {}", self.id, e);
                }
            }
            Err(e) => {
                tracing::error!("Failed to serialize ServerMessage (session {}): {}", self.id, e);
            }
        }
    }

    fn send_error(&self, message: &str) {
        self.send_to_client(&ServerMessage::Error { message: message.to_string() });
    }

    fn require_auth(&self) -> Option<Uuid> {
        if self.user_id.is_none() {
            self.send_error("Authentication required");
            tracing::warn!("Session {} not authenticated, request refused", self.id);
        }
        self.user_id
    }

    fn handle_client_message(&mut self, msg: &ClientMessage, ctx: &mut Context<Self>) {
        match msg {
            ClientMessage::Auth { token } => {
                self.handle_auth(token);
            }

            // Same participant rule as the HTTP history/send paths; a token
            // alone does not grant access to an arbitrary channel.
            ClientMessage::JoinConversation { conversation_id } => {
                let Some(user_id) = self.require_auth() else {
                    return;
                };
                let conversation_id = *conversation_id;
                let service = self.conversation_service.clone();

                let check = async move { service.get_checked(conversation_id, user_id).await }
                    .into_actor(self)
                    .map(move |result, act, _ctx| match result {
                        Ok(_) => {
                            act.server.do_send(JoinRoom { user_id, conversation_id });
                        }
                        Err(e) => {
                            tracing::warn!(
                                "User {} refused subscription to conversation {}: {}",
                                user_id,
                                conversation_id,
                                e
                            );
                            act.send_error("You are not a participant of this conversation");
                        }
                    });
                ctx.spawn(check);
            }

            ClientMessage::LeaveConversation { conversation_id } => {
                let Some(user_id) = self.require_auth() else {
                    return;
                };
                self.server.do_send(LeaveRoom { user_id, conversation_id: *conversation_id });
            }

            ClientMessage::Ping => {
                self.send_to_client(&ServerMessage::Pong);
            }
        }
    }

    fn handle_auth(&mut self, token: &str) {
        if self.user_id.is_some() {
            self.send_error("Session already authenticated");
            return;
        }

        let claims = match Claims::decode(token, ENV.jwt_secret.as_ref()) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!("JWT verification failed (session {}): {}", self.id, e);
                self.send_to_client(&ServerMessage::AuthFailed {
                    reason: "Token invalid or expired".to_string(),
                });
                return;
            }
        };

        if claims._type.as_ref() != Some(&TypeClaims::AccessToken) {
            self.send_to_client(&ServerMessage::AuthFailed {
                reason: "Access token required".to_string(),
            });
            return;
        }

        let user_id = claims.sub;
        self.user_id = Some(user_id);

        self.server.do_send(Authenticate { session_id: self.id, user_id });
        self.send_to_client(&ServerMessage::AuthSuccess { user_id });

        tracing::info!("User {} authenticated on session {}", user_id, self.id);
    }
}

impl Actor for WebSocketSession {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!("Socket session started: {}", self.id);
        self.server.do_send(Connect { id: self.id, addr: ctx.address() });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!("Socket session stopped: {}", self.id);
        self.server.do_send(Disconnect { id: self.id });
    }
}

impl Message for ClientMessage {
    type Result = ();
}

impl Handler<ClientMessage> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, ctx: &mut Context<Self>) {
        self.handle_client_message(&msg, ctx);
    }
}

impl Handler<ServerMessage> for WebSocketSession {
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, _ctx: &mut Context<Self>) {
        self.send_to_client(&msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error;
    use crate::modules::conversation::model::ConversationListRow;
    use crate::modules::conversation::repository::ConversationRepository;
    use crate::modules::conversation::schema::ConversationEntity;
    use crate::modules::room::model::{InsertRoom, RoomFilter, UpdateRoom};
    use crate::modules::room::repository::RoomRepository;
    use crate::modules::room::schema::RoomEntity;
    use crate::modules::room::storage::{RoomImageStore, StorageConfig};
    use std::sync::Arc;
    use std::time::Duration;

    struct FixedConversationRepo {
        conversation: ConversationEntity,
    }

    #[async_trait::async_trait]
    impl ConversationRepository for FixedConversationRepo {
        async fn find_by_id(
            &self,
            id: &Uuid,
        ) -> Result<Option<ConversationEntity>, error::SystemError> {
            if self.conversation.id == *id {
                Ok(Some(self.conversation.clone()))
            } else {
                Ok(None)
            }
        }

        async fn create_if_absent(
            &self,
            _: &Uuid,
            _: &Uuid,
            _: &Uuid,
        ) -> Result<ConversationEntity, error::SystemError> {
            unimplemented!()
        }

        async fn find_all_for_user(
            &self,
            _: &Uuid,
        ) -> Result<Vec<ConversationListRow>, error::SystemError> {
            Ok(Vec::new())
        }

        async fn mark_read(&self, _: &Uuid, _: &Uuid) -> Result<u64, error::SystemError> {
            Ok(0)
        }

        async fn find_ids_by_room(&self, _: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(Vec::new())
        }

        async fn find_ids_by_user(&self, _: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(Vec::new())
        }

        async fn delete_by_ids(&self, _: &[Uuid]) -> Result<u64, error::SystemError> {
            Ok(0)
        }

        async fn delete_by_id(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(false)
        }

        async fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    struct EmptyRoomRepo;

    #[async_trait::async_trait]
    impl RoomRepository for EmptyRoomRepo {
        async fn find_by_id(&self, _: &Uuid) -> Result<Option<RoomEntity>, error::SystemError> {
            Ok(None)
        }
        async fn create(&self, _: &InsertRoom) -> Result<RoomEntity, error::SystemError> {
            unimplemented!()
        }
        async fn update(
            &self,
            _: &Uuid,
            _: &UpdateRoom,
        ) -> Result<RoomEntity, error::SystemError> {
            unimplemented!()
        }
        async fn find_filtered(
            &self,
            _: &RoomFilter,
        ) -> Result<Vec<RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_by_owner(&self, _: &Uuid) -> Result<Vec<RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_summaries_by_ids(
            &self,
            _: &[Uuid],
        ) -> Result<Vec<RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn set_images(&self, _: &Uuid, _: &[String]) -> Result<(), error::SystemError> {
            Ok(())
        }
        async fn delete(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(false)
        }
        async fn find_all(&self) -> Result<Vec<RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_ids_by_owner(&self, _: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    fn gate_for(conversation: ConversationEntity) -> ConversationService {
        let storage = Arc::new(RoomImageStore::new(StorageConfig {
            max_file_size: 1024,
            allowed_mime_types: vec!["image/png".to_string()],
            upload_dir: "/tmp/roomrent-session-test".to_string(),
            public_base_url: "http://localhost/storage".to_string(),
        }));
        ConversationService::with_dependencies(
            Arc::new(FixedConversationRepo { conversation }),
            Arc::new(EmptyRoomRepo),
            storage,
            None,
        )
    }

    /// Start an already-authenticated session for the given user.
    fn start_session(
        server: &Addr<WebSocketServer>,
        service: &ConversationService,
        user_id: Uuid,
    ) -> (Uuid, Addr<WebSocketSession>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = WebSocketSession {
            id: Uuid::now_v7(),
            user_id: Some(user_id),
            server: server.clone(),
            conversation_service: service.clone(),
            tx,
        };
        let session_id = session.id;
        let addr = session.start();
        server.do_send(Authenticate { session_id, user_id });
        (session_id, addr, rx)
    }

    #[actix_web::test]
    async fn test_join_is_participant_only() {
        let conversation = ConversationEntity {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            finder_id: Uuid::now_v7(),
            room_id: Uuid::now_v7(),
            created_at: chrono::Utc::now(),
        };
        let service = gate_for(conversation.clone());
        let server = WebSocketServer::new().start();

        let (_, participant, mut participant_rx) =
            start_session(&server, &service, conversation.finder_id);
        let (_, stranger, mut stranger_rx) = start_session(&server, &service, Uuid::now_v7());

        participant.do_send(ClientMessage::JoinConversation {
            conversation_id: conversation.id,
        });
        stranger.do_send(ClientMessage::JoinConversation { conversation_id: conversation.id });
        tokio::time::sleep(Duration::from_millis(100)).await;

        server.do_send(BroadcastToRoom {
            conversation_id: conversation.id,
            message: ServerMessage::NewMessage {
                conversation_id: conversation.id,
                message: serde_json::json!({ "message": "is it still free?" }),
            },
            skip_user_id: None,
        });
        tokio::time::sleep(Duration::from_millis(100)).await;

        let frame = participant_rx.try_recv().expect("participant should get the event");
        assert!(frame.contains("newMessage"));

        // The stranger only sees the refusal, never the message body.
        let frame = stranger_rx.try_recv().expect("stranger should get a refusal");
        assert!(frame.contains("error"));
        assert!(!frame.contains("is it still free?"));
        assert!(stranger_rx.try_recv().is_err());
    }

    #[actix_web::test]
    async fn test_join_requires_auth() {
        let conversation = ConversationEntity {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            finder_id: Uuid::now_v7(),
            room_id: Uuid::now_v7(),
            created_at: chrono::Utc::now(),
        };
        let service = gate_for(conversation.clone());
        let server = WebSocketServer::new().start();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let session = WebSocketSession::new(server, service, tx).start();

        session.do_send(ClientMessage::JoinConversation { conversation_id: conversation.id });
        tokio::time::sleep(Duration::from_millis(100)).await;

        let frame = rx.try_recv().expect("unauthenticated join should be refused");
        assert!(frame.contains("Authentication required"));
    }
}
