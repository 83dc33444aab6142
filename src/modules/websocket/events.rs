/// Messages exchanged between the session actors and the server actor.
use actix::prelude::*;
use uuid::Uuid;

use super::message::ServerMessage;
use super::session::WebSocketSession;

/// A new socket connected.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    pub id: Uuid,
    pub addr: Addr<WebSocketSession>,
}

/// A socket disconnected; tear down its room memberships.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: Uuid,
}

/// A socket authenticated as a user.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Authenticate {
    pub session_id: Uuid,
    pub user_id: Uuid,
}

/// Subscribe a user to a conversation channel.
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinRoom {
    pub user_id: Uuid,
    pub conversation_id: Uuid,
}

/// Unsubscribe a user from a conversation channel.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveRoom {
    pub user_id: Uuid,
    pub conversation_id: Uuid,
}

/// Push an event to every subscriber of a conversation channel.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct BroadcastToRoom {
    pub conversation_id: Uuid,
    pub message: ServerMessage,
    /// Usually the sender, who already has the message locally.
    pub skip_user_id: Option<Uuid>,
}
