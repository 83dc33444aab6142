use crate::{
    api::error,
    modules::admin::{model::AdminEntity, repository::AdminRepository},
};

#[derive(Clone)]
pub struct AdminRepositoryPg {
    pool: sqlx::PgPool,
}

impl AdminRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AdminRepository for AdminRepositoryPg {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminEntity>, error::SystemError> {
        let admin = sqlx::query_as::<_, AdminEntity>(
            "SELECT * FROM admins WHERE email = lower($1)",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn insert(&self, email: &str) -> Result<AdminEntity, error::SystemError> {
        let admin = sqlx::query_as::<_, AdminEntity>(
            "INSERT INTO admins (email) VALUES (lower($1)) RETURNING *",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(admin)
    }

    async fn delete(&self, email: &str) -> Result<bool, error::SystemError> {
        let result = sqlx::query("DELETE FROM admins WHERE email = lower($1)")
            .bind(email)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<AdminEntity>, error::SystemError> {
        let admins =
            sqlx::query_as::<_, AdminEntity>("SELECT * FROM admins ORDER BY created_at ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(admins)
    }
}
