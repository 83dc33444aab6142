use uuid::Uuid;

use crate::{
    api::error,
    modules::room::{
        model::{InsertRoom, RoomFilter, UpdateRoom},
        schema::RoomEntity,
    },
};

#[async_trait::async_trait]
pub trait RoomRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<RoomEntity>, error::SystemError>;
    async fn create(&self, room: &InsertRoom) -> Result<RoomEntity, error::SystemError>;
    async fn update(&self, id: &Uuid, room: &UpdateRoom)
    -> Result<RoomEntity, error::SystemError>;
    /// Filtered browse, newest first.
    async fn find_filtered(
        &self,
        filter: &RoomFilter,
    ) -> Result<Vec<RoomEntity>, error::SystemError>;
    async fn find_by_owner(&self, owner_id: &Uuid)
    -> Result<Vec<RoomEntity>, error::SystemError>;
    async fn find_summaries_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<RoomEntity>, error::SystemError>;
    async fn set_images(&self, id: &Uuid, images: &[String]) -> Result<(), error::SystemError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<RoomEntity>, error::SystemError>;
    async fn find_ids_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError>;
}
