/// Realtime delivery layer.
///
/// One channel per conversation, keyed by conversation id. Clients
/// authenticate with a JWT, join the conversation they are viewing and
/// receive `newMessage` / `messagesRead` events pushed for that room.
/// Delivery order is not guaranteed to match created_at order under
/// concurrent senders; consumers must not assume more than eventual
/// delivery.
pub mod events;
pub mod handler;
pub mod message;
pub mod server;
pub mod session;
