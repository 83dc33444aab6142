use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::InsertUser,
        schema::{UserEntity, UserRole},
    },
};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;
    async fn create(&self, user: &InsertUser) -> Result<Uuid, error::SystemError>;
    async fn set_role(&self, id: &Uuid, role: &UserRole) -> Result<(), error::SystemError>;
    /// Soft delete; the admin cascade removes owned data first.
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;
}
