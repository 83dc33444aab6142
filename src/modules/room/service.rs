use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::message::repository::MessageRepository;
use crate::modules::room::model::{
    InsertRoom, NewRoomModel, RoomFilter, RoomResponse, UpdateRoom, UpdateRoomModel,
};
use crate::modules::room::repository::RoomRepository;
use crate::modules::room::schema::RoomEntity;
use crate::modules::room::storage::RoomImageStore;

#[derive(Clone)]
pub struct RoomService {
    room_repo: Arc<dyn RoomRepository + Send + Sync>,
    conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
    message_repo: Arc<dyn MessageRepository + Send + Sync>,
    storage: Arc<RoomImageStore>,
}

impl RoomService {
    pub fn with_dependencies(
        room_repo: Arc<dyn RoomRepository + Send + Sync>,
        conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
        message_repo: Arc<dyn MessageRepository + Send + Sync>,
        storage: Arc<RoomImageStore>,
    ) -> Self {
        RoomService { room_repo, conversation_repo, message_repo, storage }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        model: NewRoomModel,
    ) -> Result<RoomResponse, error::SystemError> {
        let room = self
            .room_repo
            .create(&InsertRoom {
                title: model.title,
                location: model.location,
                rent_price: model.rent_price,
                property_type: model.property_type,
                tenant_preference: model.tenant_preference,
                contact_number: model.contact_number,
                description: model.description,
                owner_id,
            })
            .await?;
        Ok(self.to_response(room))
    }

    pub async fn get(&self, id: Uuid) -> Result<RoomResponse, error::SystemError> {
        let room = self
            .room_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Room not found"))?;
        Ok(self.to_response(room))
    }

    pub async fn list(
        &self,
        filter: RoomFilter,
    ) -> Result<Vec<RoomResponse>, error::SystemError> {
        let rooms = self.room_repo.find_filtered(&filter).await?;
        Ok(rooms.into_iter().map(|r| self.to_response(r)).collect())
    }

    pub async fn my_rooms(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<RoomResponse>, error::SystemError> {
        let rooms = self.room_repo.find_by_owner(&owner_id).await?;
        Ok(rooms.into_iter().map(|r| self.to_response(r)).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        requester_id: Uuid,
        model: UpdateRoomModel,
    ) -> Result<RoomResponse, error::SystemError> {
        self.find_owned(id, requester_id).await?;

        let room = self
            .room_repo
            .update(
                &id,
                &UpdateRoom {
                    title: model.title,
                    location: model.location,
                    rent_price: model.rent_price,
                    property_type: model.property_type,
                    tenant_preference: model.tenant_preference,
                    contact_number: model.contact_number,
                    description: model.description,
                },
            )
            .await?;
        Ok(self.to_response(room))
    }

    /// Store uploaded images and append their keys to the room row. Each
    /// file has already been size/type checked by the upload handler.
    pub async fn attach_images(
        &self,
        id: Uuid,
        requester_id: Uuid,
        files: Vec<(String, Vec<u8>)>,
    ) -> Result<RoomResponse, error::SystemError> {
        let room = self.find_owned(id, requester_id).await?;

        if files.is_empty() {
            return Err(error::SystemError::bad_request("No files uploaded"));
        }

        let timestamp = chrono::Utc::now().timestamp_millis();
        let mut keys = room.images.clone();
        for (index, (filename, bytes)) in files.iter().enumerate() {
            let key = RoomImageStore::object_key(
                &id,
                timestamp,
                index,
                RoomImageStore::extension_of(filename),
            );
            self.storage.save(&key, bytes).await?;
            keys.push(key);
        }

        self.room_repo.set_images(&id, &keys).await?;

        let mut updated = room;
        updated.images = keys;
        Ok(self.to_response(updated))
    }

    /// Cascade delete: messages first, then conversations, then storage
    /// objects, then the room row. Every step is idempotent so a crash
    /// midway leaves a state a retry can finish from.
    pub async fn delete(&self, id: Uuid, requester_id: Uuid) -> Result<(), error::SystemError> {
        let room = self.find_owned(id, requester_id).await?;
        self.cascade_delete(room).await
    }

    /// Same cascade, without the ownership check. Admin use only.
    pub async fn delete_unchecked(&self, id: Uuid) -> Result<(), error::SystemError> {
        let room = self
            .room_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Room not found"))?;
        self.cascade_delete(room).await
    }

    async fn cascade_delete(&self, room: RoomEntity) -> Result<(), error::SystemError> {
        let conversation_ids = self.conversation_repo.find_ids_by_room(&room.id).await?;
        if !conversation_ids.is_empty() {
            self.message_repo.delete_by_conversation_ids(&conversation_ids).await?;
            self.conversation_repo.delete_by_ids(&conversation_ids).await?;
        }
        self.storage.remove_all(&room.images).await;
        self.room_repo.delete(&room.id).await?;
        Ok(())
    }

    async fn find_owned(
        &self,
        id: Uuid,
        requester_id: Uuid,
    ) -> Result<RoomEntity, error::SystemError> {
        let room = self
            .room_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Room not found"))?;

        if room.owner_id != requester_id {
            return Err(error::SystemError::forbidden("You do not own this room"));
        }

        Ok(room)
    }

    fn to_response(&self, room: RoomEntity) -> RoomResponse {
        RoomResponse::from_entity(room, self.storage.public_base_url())
    }
}
