use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{model::InsertMessage, schema::MessageEntity},
};

#[async_trait::async_trait]
pub trait MessageRepository {
    /// Inserts with read_at NULL; send never marks anything read.
    async fn create(&self, message: &InsertMessage)
    -> Result<MessageEntity, error::SystemError>;

    /// Full history, oldest first. No pagination by design.
    async fn find_by_conversation(
        &self,
        conversation_id: &Uuid,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, error::SystemError>;
    async fn delete_by_conversation_ids(&self, ids: &[Uuid]) -> Result<u64, error::SystemError>;
    async fn find_recent(&self, limit: i64) -> Result<Vec<MessageEntity>, error::SystemError>;
}
