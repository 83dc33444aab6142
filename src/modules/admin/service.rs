use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::constants::INITIAL_ADMIN;
use crate::modules::admin::model::AdminEntity;
use crate::modules::admin::repository::AdminRepository;
use crate::modules::conversation::repository::ConversationRepository;
use crate::modules::conversation::schema::ConversationEntity;
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageEntity;
use crate::modules::room::repository::RoomRepository;
use crate::modules::room::schema::RoomEntity;
use crate::modules::room::service::RoomService;
use crate::modules::user::model::UserResponse;
use crate::modules::user::repository::UserRepository;

const ADMIN_LIST_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct AdminService {
    admin_repo: Arc<dyn AdminRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
    room_repo: Arc<dyn RoomRepository + Send + Sync>,
    conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
    message_repo: Arc<dyn MessageRepository + Send + Sync>,
    room_service: RoomService,
}

impl AdminService {
    pub fn with_dependencies(
        admin_repo: Arc<dyn AdminRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
        room_repo: Arc<dyn RoomRepository + Send + Sync>,
        conversation_repo: Arc<dyn ConversationRepository + Send + Sync>,
        message_repo: Arc<dyn MessageRepository + Send + Sync>,
        room_service: RoomService,
    ) -> Self {
        AdminService {
            admin_repo,
            user_repo,
            room_repo,
            conversation_repo,
            message_repo,
            room_service,
        }
    }

    /// Allow-list check. The initial admin is recognized without touching
    /// the store; storage failures answer "not an admin" rather than
    /// granting access.
    pub async fn is_admin(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        if email == INITIAL_ADMIN {
            return true;
        }

        match self.admin_repo.find_by_email(&email).await {
            Ok(found) => found.is_some(),
            Err(e) => {
                log::error!("Admin lookup failed for {}: {:?}", email, e);
                false
            }
        }
    }

    /// Initial admin first, then the stored list. A stored copy of the
    /// initial admin (from older data) is not repeated.
    pub async fn get_admins(&self) -> Result<Vec<String>, error::SystemError> {
        let stored = self.admin_repo.find_all().await?;

        let mut emails = vec![INITIAL_ADMIN.to_string()];
        for admin in stored {
            if admin.email != INITIAL_ADMIN {
                emails.push(admin.email);
            }
        }
        Ok(emails)
    }

    pub async fn add_admin(&self, email: &str) -> Result<AdminEntity, error::SystemError> {
        let email = email.to_lowercase();
        if email == INITIAL_ADMIN {
            return Err(error::SystemError::conflict_message("This admin already exists"));
        }
        self.admin_repo.insert(&email).await
    }

    pub async fn remove_admin(&self, email: &str) -> Result<(), error::SystemError> {
        let email = email.to_lowercase();
        if email == INITIAL_ADMIN {
            return Err(error::SystemError::bad_request("Cannot remove the initial admin"));
        }

        if !self.admin_repo.delete(&email).await? {
            return Err(error::SystemError::not_found("Admin not found"));
        }
        Ok(())
    }

    /// Remove a user and everything hanging off them: each owned room runs
    /// the full room cascade, then the user's remaining conversations as a
    /// finder go, then the account is soft-deleted. Steps are idempotent;
    /// a retry after a crash finishes the job.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), error::SystemError> {
        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let owned_rooms = self.room_repo.find_ids_by_owner(&user_id).await?;
        for room_id in owned_rooms {
            self.room_service.delete_unchecked(room_id).await?;
        }

        let conversation_ids = self.conversation_repo.find_ids_by_user(&user_id).await?;
        if !conversation_ids.is_empty() {
            self.message_repo.delete_by_conversation_ids(&conversation_ids).await?;
            self.conversation_repo.delete_by_ids(&conversation_ids).await?;
        }

        self.user_repo.delete(&user_id).await?;
        Ok(())
    }

    pub async fn delete_room(&self, room_id: Uuid) -> Result<(), error::SystemError> {
        self.room_service.delete_unchecked(room_id).await
    }

    pub async fn delete_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<(), error::SystemError> {
        self.message_repo.delete_by_conversation_ids(&[conversation_id]).await?;
        if !self.conversation_repo.delete_by_id(&conversation_id).await? {
            return Err(error::SystemError::not_found("Conversation not found"));
        }
        Ok(())
    }

    pub async fn delete_message(&self, message_id: Uuid) -> Result<(), error::SystemError> {
        if !self.message_repo.delete_by_id(&message_id).await? {
            return Err(error::SystemError::not_found("Message not found"));
        }
        Ok(())
    }

    pub async fn list_users(&self) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomEntity>, error::SystemError> {
        self.room_repo.find_all().await
    }

    pub async fn list_conversations(&self) -> Result<Vec<ConversationEntity>, error::SystemError> {
        self.conversation_repo.find_all().await
    }

    pub async fn list_recent_messages(&self) -> Result<Vec<MessageEntity>, error::SystemError> {
        self.message_repo.find_recent(ADMIN_LIST_LIMIT).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::conversation::model::ConversationListRow;
    use crate::modules::message::model::InsertMessage;
    use crate::modules::room::model::{InsertRoom, RoomFilter, UpdateRoom};
    use crate::modules::room::storage::{RoomImageStore, StorageConfig};
    use crate::modules::user::model::InsertUser;
    use crate::modules::user::schema::{UserEntity, UserRole};
    use std::sync::Mutex;

    struct MockAdminRepo {
        emails: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl AdminRepository for MockAdminRepo {
        async fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<AdminEntity>, error::SystemError> {
            if self.fail {
                return Err(error::SystemError::DatabaseError("connection refused".into()));
            }
            Ok(self.emails.lock().unwrap().iter().find(|e| *e == email).map(|e| AdminEntity {
                email: e.clone(),
                created_at: chrono::Utc::now(),
            }))
        }

        async fn insert(&self, email: &str) -> Result<AdminEntity, error::SystemError> {
            let mut emails = self.emails.lock().unwrap();
            if emails.iter().any(|e| e == email) {
                return Err(error::SystemError::conflict_message(
                    "This email is already an admin",
                ));
            }
            emails.push(email.to_string());
            Ok(AdminEntity { email: email.to_string(), created_at: chrono::Utc::now() })
        }

        async fn delete(&self, email: &str) -> Result<bool, error::SystemError> {
            let mut emails = self.emails.lock().unwrap();
            let before = emails.len();
            emails.retain(|e| e != email);
            Ok(emails.len() < before)
        }

        async fn find_all(&self) -> Result<Vec<AdminEntity>, error::SystemError> {
            Ok(self
                .emails
                .lock()
                .unwrap()
                .iter()
                .map(|e| AdminEntity { email: e.clone(), created_at: chrono::Utc::now() })
                .collect())
        }
    }

    struct StubUserRepo;

    #[async_trait::async_trait]
    impl UserRepository for StubUserRepo {
        async fn find_by_id(&self, _: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
            Ok(None)
        }
        async fn find_by_username(
            &self,
            _: &str,
        ) -> Result<Option<UserEntity>, error::SystemError> {
            Ok(None)
        }
        async fn create(&self, _: &InsertUser) -> Result<Uuid, error::SystemError> {
            unimplemented!()
        }
        async fn set_role(&self, _: &Uuid, _: &UserRole) -> Result<(), error::SystemError> {
            Ok(())
        }
        async fn delete(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(true)
        }
        async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    struct StubRoomRepo;

    #[async_trait::async_trait]
    impl RoomRepository for StubRoomRepo {
        async fn find_by_id(
            &self,
            _: &Uuid,
        ) -> Result<Option<crate::modules::room::schema::RoomEntity>, error::SystemError>
        {
            Ok(None)
        }
        async fn create(
            &self,
            _: &InsertRoom,
        ) -> Result<crate::modules::room::schema::RoomEntity, error::SystemError> {
            unimplemented!()
        }
        async fn update(
            &self,
            _: &Uuid,
            _: &UpdateRoom,
        ) -> Result<crate::modules::room::schema::RoomEntity, error::SystemError> {
            unimplemented!()
        }
        async fn find_filtered(
            &self,
            _: &RoomFilter,
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_by_owner(
            &self,
            _: &Uuid,
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_summaries_by_ids(
            &self,
            _: &[Uuid],
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn set_images(&self, _: &Uuid, _: &[String]) -> Result<(), error::SystemError> {
            Ok(())
        }
        async fn delete(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(true)
        }
        async fn find_all(
            &self,
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_ids_by_owner(&self, _: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    struct StubConversationRepo;

    #[async_trait::async_trait]
    impl ConversationRepository for StubConversationRepo {
        async fn find_by_id(
            &self,
            _: &Uuid,
        ) -> Result<Option<ConversationEntity>, error::SystemError> {
            Ok(None)
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
            Ok(true)
        }
        async fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    struct StubMessageRepo;

    #[async_trait::async_trait]
    impl MessageRepository for StubMessageRepo {
        async fn create(&self, _: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
            unimplemented!()
        }
        async fn find_by_conversation(
            &self,
            _: &Uuid,
        ) -> Result<Vec<MessageEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn delete_by_id(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(true)
        }
        async fn delete_by_conversation_ids(&self, _: &[Uuid]) -> Result<u64, error::SystemError> {
            Ok(0)
        }
        async fn find_recent(&self, _: i64) -> Result<Vec<MessageEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    fn service(admin_repo: MockAdminRepo) -> AdminService {
        let room_repo = Arc::new(StubRoomRepo);
        let conversation_repo = Arc::new(StubConversationRepo);
        let message_repo = Arc::new(StubMessageRepo);
        let storage = Arc::new(RoomImageStore::new(StorageConfig {
            max_file_size: 1024,
            allowed_mime_types: vec!["image/png".to_string()],
            upload_dir: "/tmp/roomrent-admin-test".to_string(),
            public_base_url: "http://localhost/storage".to_string(),
        }));
        let room_service = RoomService::with_dependencies(
            room_repo.clone(),
            conversation_repo.clone(),
            message_repo.clone(),
            storage,
        );
        AdminService::with_dependencies(
            Arc::new(admin_repo),
            Arc::new(StubUserRepo),
            room_repo,
            conversation_repo,
            message_repo,
            room_service,
        )
    }

    #[tokio::test]
    async fn test_initial_admin_is_always_admin() {
        let service = service(MockAdminRepo { emails: Mutex::new(Vec::new()), fail: true });

        // Case-insensitive, and never touches the failing store.
        assert!(service.is_admin(INITIAL_ADMIN).await);
        assert!(service.is_admin(&INITIAL_ADMIN.to_uppercase()).await);
    }

    #[tokio::test]
    async fn test_is_admin_fails_closed_on_store_error() {
        let service = service(MockAdminRepo {
            emails: Mutex::new(vec!["mod@example.com".to_string()]),
            fail: true,
        });

        assert!(!service.is_admin("mod@example.com").await);
    }

    #[tokio::test]
    async fn test_add_and_remove_admin() {
        let service = service(MockAdminRepo { emails: Mutex::new(Vec::new()), fail: false });

        assert!(!service.is_admin("mod@example.com").await);
        service.add_admin("Mod@Example.com").await.unwrap();
        assert!(service.is_admin("mod@example.com").await);

        let err = service.add_admin("mod@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));

        service.remove_admin("mod@example.com").await.unwrap();
        assert!(!service.is_admin("mod@example.com").await);

        let err = service.remove_admin("mod@example.com").await.unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_initial_admin_cannot_be_added_or_removed() {
        let service = service(MockAdminRepo { emails: Mutex::new(Vec::new()), fail: false });

        let err = service.add_admin(INITIAL_ADMIN).await.unwrap_err();
        assert!(matches!(err, error::SystemError::Conflict(_)));

        let err = service.remove_admin(INITIAL_ADMIN).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    type Steps = Arc<Mutex<Vec<&'static str>>>;

    struct RecordingUserRepo {
        steps: Steps,
        user: UserEntity,
    }

    #[async_trait::async_trait]
    impl UserRepository for RecordingUserRepo {
        async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
            if self.user.id == *id { Ok(Some(self.user.clone())) } else { Ok(None) }
        }
        async fn find_by_username(
            &self,
            _: &str,
        ) -> Result<Option<UserEntity>, error::SystemError> {
            Ok(None)
        }
        async fn create(&self, _: &InsertUser) -> Result<Uuid, error::SystemError> {
            unimplemented!()
        }
        async fn set_role(&self, _: &Uuid, _: &UserRole) -> Result<(), error::SystemError> {
            Ok(())
        }
        async fn delete(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            self.steps.lock().unwrap().push("user");
            Ok(true)
        }
        async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    struct RecordingRoomRepo {
        steps: Steps,
        room: crate::modules::room::schema::RoomEntity,
    }

    #[async_trait::async_trait]
    impl RoomRepository for RecordingRoomRepo {
        async fn find_by_id(
            &self,
            id: &Uuid,
        ) -> Result<Option<crate::modules::room::schema::RoomEntity>, error::SystemError>
        {
            if self.room.id == *id { Ok(Some(self.room.clone())) } else { Ok(None) }
        }
        async fn create(
            &self,
            _: &InsertRoom,
        ) -> Result<crate::modules::room::schema::RoomEntity, error::SystemError> {
            unimplemented!()
        }
        async fn update(
            &self,
            _: &Uuid,
            _: &UpdateRoom,
        ) -> Result<crate::modules::room::schema::RoomEntity, error::SystemError> {
            unimplemented!()
        }
        async fn find_filtered(
            &self,
            _: &RoomFilter,
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_by_owner(
            &self,
            _: &Uuid,
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_summaries_by_ids(
            &self,
            _: &[Uuid],
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn set_images(&self, _: &Uuid, _: &[String]) -> Result<(), error::SystemError> {
            Ok(())
        }
        async fn delete(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            self.steps.lock().unwrap().push("room");
            Ok(true)
        }
        async fn find_all(
            &self,
        ) -> Result<Vec<crate::modules::room::schema::RoomEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn find_ids_by_owner(
            &self,
            owner_id: &Uuid,
        ) -> Result<Vec<Uuid>, error::SystemError> {
            if self.room.owner_id == *owner_id { Ok(vec![self.room.id]) } else { Ok(Vec::new()) }
        }
    }

    struct RecordingConversationRepo {
        steps: Steps,
        /// Conversation about the user's owned room.
        room_conversation: Uuid,
        /// Conversation where the user is the finder on someone else's room.
        finder_conversation: Uuid,
    }

    #[async_trait::async_trait]
    impl ConversationRepository for RecordingConversationRepo {
        async fn find_by_id(
            &self,
            _: &Uuid,
        ) -> Result<Option<ConversationEntity>, error::SystemError> {
            Ok(None)
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
            Ok(vec![self.room_conversation])
        }
        async fn find_ids_by_user(&self, _: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
            Ok(vec![self.finder_conversation])
        }
        async fn delete_by_ids(&self, ids: &[Uuid]) -> Result<u64, error::SystemError> {
            self.steps.lock().unwrap().push("conversations");
            Ok(ids.len() as u64)
        }
        async fn delete_by_id(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(true)
        }
        async fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    struct RecordingMessageRepo {
        steps: Steps,
    }

    #[async_trait::async_trait]
    impl MessageRepository for RecordingMessageRepo {
        async fn create(&self, _: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
            unimplemented!()
        }
        async fn find_by_conversation(
            &self,
            _: &Uuid,
        ) -> Result<Vec<MessageEntity>, error::SystemError> {
            Ok(Vec::new())
        }
        async fn delete_by_id(&self, _: &Uuid) -> Result<bool, error::SystemError> {
            Ok(true)
        }
        async fn delete_by_conversation_ids(
            &self,
            ids: &[Uuid],
        ) -> Result<u64, error::SystemError> {
            self.steps.lock().unwrap().push("messages");
            Ok(ids.len() as u64)
        }
        async fn find_recent(&self, _: i64) -> Result<Vec<MessageEntity>, error::SystemError> {
            Ok(Vec::new())
        }
    }

    fn sample_user(id: Uuid) -> UserEntity {
        UserEntity {
            id,
            username: "ram".to_string(),
            email: "ram@example.com".to_string(),
            hash_password: "hash".to_string(),
            role: UserRole::Owner,
            display_name: "Ram".to_string(),
            phone: None,
            deleted_at: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn sample_owned_room(owner_id: Uuid) -> crate::modules::room::schema::RoomEntity {
        use crate::modules::room::schema::{PropertyType, TenantPreference};
        crate::modules::room::schema::RoomEntity {
            id: Uuid::now_v7(),
            title: "Flat in Patan".to_string(),
            location: "Lalitpur".to_string(),
            rent_price: 20000,
            property_type: PropertyType::TwoBhk,
            tenant_preference: TenantPreference::Family,
            contact_number: "9800000000".to_string(),
            description: "Top floor".to_string(),
            owner_id,
            images: Vec::new(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_delete_user_cascades_owned_rooms_before_the_account() {
        let steps: Steps = Arc::new(Mutex::new(Vec::new()));
        let user_id = Uuid::now_v7();

        let room_repo = Arc::new(RecordingRoomRepo {
            steps: steps.clone(),
            room: sample_owned_room(user_id),
        });
        let conversation_repo = Arc::new(RecordingConversationRepo {
            steps: steps.clone(),
            room_conversation: Uuid::now_v7(),
            finder_conversation: Uuid::now_v7(),
        });
        let message_repo = Arc::new(RecordingMessageRepo { steps: steps.clone() });
        let storage = Arc::new(RoomImageStore::new(StorageConfig {
            max_file_size: 1024,
            allowed_mime_types: vec!["image/png".to_string()],
            upload_dir: "/tmp/roomrent-admin-test".to_string(),
            public_base_url: "http://localhost/storage".to_string(),
        }));
        let room_service = RoomService::with_dependencies(
            room_repo.clone(),
            conversation_repo.clone(),
            message_repo.clone(),
            storage,
        );
        let service = AdminService::with_dependencies(
            Arc::new(MockAdminRepo { emails: Mutex::new(Vec::new()), fail: false }),
            Arc::new(RecordingUserRepo { steps: steps.clone(), user: sample_user(user_id) }),
            room_repo,
            conversation_repo,
            message_repo,
            room_service,
        );

        service.delete_user(user_id).await.unwrap();

        // The owned room runs its full cascade, then the user's remaining
        // conversations as a finder go, then the account itself.
        assert_eq!(
            *steps.lock().unwrap(),
            vec!["messages", "conversations", "room", "messages", "conversations", "user"]
        );
    }

    #[tokio::test]
    async fn test_delete_user_unknown_user_touches_nothing() {
        let steps: Steps = Arc::new(Mutex::new(Vec::new()));

        let room_repo = Arc::new(RecordingRoomRepo {
            steps: steps.clone(),
            room: sample_owned_room(Uuid::now_v7()),
        });
        let conversation_repo = Arc::new(RecordingConversationRepo {
            steps: steps.clone(),
            room_conversation: Uuid::now_v7(),
            finder_conversation: Uuid::now_v7(),
        });
        let message_repo = Arc::new(RecordingMessageRepo { steps: steps.clone() });
        let storage = Arc::new(RoomImageStore::new(StorageConfig {
            max_file_size: 1024,
            allowed_mime_types: vec!["image/png".to_string()],
            upload_dir: "/tmp/roomrent-admin-test".to_string(),
            public_base_url: "http://localhost/storage".to_string(),
        }));
        let room_service = RoomService::with_dependencies(
            room_repo.clone(),
            conversation_repo.clone(),
            message_repo.clone(),
            storage,
        );
        let service = AdminService::with_dependencies(
            Arc::new(MockAdminRepo { emails: Mutex::new(Vec::new()), fail: false }),
            Arc::new(RecordingUserRepo {
                steps: steps.clone(),
                user: sample_user(Uuid::now_v7()),
            }),
            room_repo,
            conversation_repo,
            message_repo,
            room_service,
        );

        let err = service.delete_user(Uuid::now_v7()).await.unwrap_err();

        assert!(matches!(err, error::SystemError::NotFound(_)));
        assert!(steps.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_admins_puts_initial_first_without_duplicates() {
        let service = service(MockAdminRepo {
            emails: Mutex::new(vec![INITIAL_ADMIN.to_string(), "mod@example.com".to_string()]),
            fail: false,
        });

        let admins = service.get_admins().await.unwrap();
        assert_eq!(admins, vec![INITIAL_ADMIN.to_string(), "mod@example.com".to_string()]);
    }
}
