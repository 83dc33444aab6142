use uuid::Uuid;

use crate::{
    api::error,
    modules::conversation::{model::ConversationListRow, schema::ConversationEntity},
};

#[async_trait::async_trait]
pub trait ConversationRepository {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError>;

    /// Atomic insert-if-absent keyed on the (owner, finder, room) triple.
    /// Returns the existing row when the triple is already present, so two
    /// racing callers both get the same conversation.
    async fn create_if_absent(
        &self,
        owner_id: &Uuid,
        finder_id: &Uuid,
        room_id: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError>;

    /// All conversations where the user is owner or finder, newest first,
    /// with viewer-relative unread count and last message per row.
    async fn find_all_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationListRow>, error::SystemError>;

    /// Stamp read_at on every unread message not sent by `user_id`.
    /// Returns the number of messages marked; zero on repeat calls.
    async fn mark_read(
        &self,
        conversation_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<u64, error::SystemError>;

    async fn find_ids_by_room(&self, room_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;
    async fn find_ids_by_user(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;
    async fn delete_by_ids(&self, ids: &[Uuid]) -> Result<u64, error::SystemError>;
    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError>;
}
