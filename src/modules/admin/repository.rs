use crate::{api::error, modules::admin::model::AdminEntity};

/// Allow-list storage. Emails are stored lower-cased; the initial admin is
/// a compile-time constant and never lives in this table.
#[async_trait::async_trait]
pub trait AdminRepository {
    async fn find_by_email(&self, email: &str)
    -> Result<Option<AdminEntity>, error::SystemError>;
    async fn insert(&self, email: &str) -> Result<AdminEntity, error::SystemError>;
    async fn delete(&self, email: &str) -> Result<bool, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<AdminEntity>, error::SystemError>;
}
