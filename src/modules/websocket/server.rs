/// Realtime server actor.
///
/// Owns all live socket sessions and the per-conversation channels. Every
/// conversation maps to one channel named by its id; subscribers of that
/// channel receive the events the stores broadcast after a write commits.
use actix::prelude::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::events::*;
use super::message::ServerMessage;
use super::session::WebSocketSession;

pub struct WebSocketServer {
    /// session_id -> session actor address
    sessions: HashMap<Uuid, Addr<WebSocketSession>>,

    /// user_id -> set of session_ids (a user may have several tabs open)
    users: HashMap<Uuid, HashSet<Uuid>>,

    /// conversation_id -> set of subscribed user_ids
    rooms: HashMap<Uuid, HashSet<Uuid>>,
}

impl WebSocketServer {
    pub fn new() -> Self {
        Self { sessions: HashMap::new(), users: HashMap::new(), rooms: HashMap::new() }
    }

    fn send_to_session(&self, session_id: &Uuid, message: ServerMessage) {
        if let Some(session_addr) = self.sessions.get(session_id) {
            session_addr.do_send(message);
        }
    }
}

impl Default for WebSocketServer {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor for WebSocketServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("Realtime server started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("Realtime server stopped");
    }
}

impl Handler<Connect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) {
        tracing::debug!("New socket session connected: {}", msg.id);
        self.sessions.insert(msg.id, msg.addr);
    }
}

impl Handler<Disconnect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) {
        tracing::debug!("Socket session disconnected: {}", msg.id);

        self.sessions.remove(&msg.id);

        let mut user_to_remove: Option<Uuid> = None;
        for (&user_id, sessions) in self.users.iter_mut() {
            if sessions.remove(&msg.id) {
                if sessions.is_empty() {
                    user_to_remove = Some(user_id);
                }
                break;
            }
        }

        // Last session of the user gone: release every channel membership so
        // the subscription teardown contract holds even on abrupt closes.
        if let Some(user_id) = user_to_remove {
            self.users.remove(&user_id);

            for room_users in self.rooms.values_mut() {
                room_users.remove(&user_id);
            }
            self.rooms.retain(|_, users| !users.is_empty());

            tracing::debug!("User {} fully disconnected, removed from all channels", user_id);
        }
    }
}

impl Handler<Authenticate> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Authenticate, _: &mut Context<Self>) {
        let sessions = self.users.entry(msg.user_id).or_default();
        sessions.insert(msg.session_id);
        tracing::info!("User {} authenticated on session {}", msg.user_id, msg.session_id);
    }
}

impl Handler<JoinRoom> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: JoinRoom, _: &mut Context<Self>) {
        self.rooms.entry(msg.conversation_id).or_default().insert(msg.user_id);

        tracing::debug!(
            "User {} subscribed to conversation {} ({} subscribers)",
            msg.user_id,
            msg.conversation_id,
            self.rooms.get(&msg.conversation_id).map_or(0, HashSet::len)
        );
    }
}

impl Handler<LeaveRoom> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: LeaveRoom, _: &mut Context<Self>) {
        if let Some(room) = self.rooms.get_mut(&msg.conversation_id) {
            room.remove(&msg.user_id);

            if room.is_empty() {
                self.rooms.remove(&msg.conversation_id);
            }

            tracing::debug!(
                "User {} unsubscribed from conversation {}",
                msg.user_id,
                msg.conversation_id
            );
        }
    }
}

impl Handler<BroadcastToRoom> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: BroadcastToRoom, _: &mut Context<Self>) {
        let Some(room_users) = self.rooms.get(&msg.conversation_id) else {
            tracing::debug!("No subscribers for conversation {}", msg.conversation_id);
            return;
        };

        let mut sent_count = 0;

        for &user_id in room_users {
            if msg.skip_user_id == Some(user_id) {
                continue;
            }

            if let Some(session_ids) = self.users.get(&user_id) {
                for session_id in session_ids {
                    self.send_to_session(session_id, msg.message.clone());
                    sent_count += 1;
                }
            }
        }

        tracing::debug!(
            "Broadcast to conversation {}: {} sessions",
            msg.conversation_id,
            sent_count
        );
    }
}

impl Message for ServerMessage {
    type Result = ();
}
