use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::{
    api::error,
    modules::room::{
        model::{InsertRoom, RoomFilter, UpdateRoom},
        repository::RoomRepository,
        schema::RoomEntity,
    },
};

#[derive(Clone)]
pub struct RoomRepositoryPg {
    pool: sqlx::PgPool,
}

impl RoomRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RoomRepository for RoomRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<RoomEntity>, error::SystemError> {
        let room = sqlx::query_as::<_, RoomEntity>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn create(&self, room: &InsertRoom) -> Result<RoomEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let entity = sqlx::query_as::<_, RoomEntity>(
            r#"
            INSERT INTO rooms
                (id, title, location, rent_price, property_type, tenant_preference,
                 contact_number, description, owner_id, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, '{}')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&room.title)
        .bind(&room.location)
        .bind(room.rent_price)
        .bind(&room.property_type)
        .bind(&room.tenant_preference)
        .bind(&room.contact_number)
        .bind(&room.description)
        .bind(room.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity)
    }

    async fn update(
        &self,
        id: &Uuid,
        room: &UpdateRoom,
    ) -> Result<RoomEntity, error::SystemError> {
        let entity = sqlx::query_as::<_, RoomEntity>(
            r#"
            UPDATE rooms
            SET
                title             = COALESCE($2, title),
                location          = COALESCE($3, location),
                rent_price        = COALESCE($4, rent_price),
                property_type     = COALESCE($5, property_type),
                tenant_preference = COALESCE($6, tenant_preference),
                contact_number    = COALESCE($7, contact_number),
                description       = COALESCE($8, description),
                updated_at        = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&room.title)
        .bind(&room.location)
        .bind(room.rent_price)
        .bind(&room.property_type)
        .bind(&room.tenant_preference)
        .bind(&room.contact_number)
        .bind(&room.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Room not found"))?;

        Ok(entity)
    }

    async fn find_filtered(
        &self,
        filter: &RoomFilter,
    ) -> Result<Vec<RoomEntity>, error::SystemError> {
        let mut query = QueryBuilder::new("SELECT * FROM rooms WHERE TRUE");

        if let Some(location) = &filter.location {
            let pattern = format!("%{}%", location.replace('%', "\\%").replace('_', "\\_"));
            query.push(" AND location ILIKE ");
            query.push_bind(pattern);
        }
        if let Some(min_price) = filter.min_price {
            query.push(" AND rent_price >= ");
            query.push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            query.push(" AND rent_price <= ");
            query.push_bind(max_price);
        }
        if let Some(property_type) = &filter.property_type {
            query.push(" AND property_type = ");
            query.push_bind(property_type.clone());
        }
        if let Some(tenant_preference) = &filter.tenant_preference {
            query.push(" AND tenant_preference = ");
            query.push_bind(tenant_preference.clone());
        }

        query.push(" ORDER BY created_at DESC");

        let rooms = query.build_query_as::<RoomEntity>().fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    async fn find_by_owner(
        &self,
        owner_id: &Uuid,
    ) -> Result<Vec<RoomEntity>, error::SystemError> {
        let rooms = sqlx::query_as::<_, RoomEntity>(
            "SELECT * FROM rooms WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    async fn find_summaries_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<RoomEntity>, error::SystemError> {
        let rooms = sqlx::query_as::<_, RoomEntity>("SELECT * FROM rooms WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    async fn set_images(&self, id: &Uuid, images: &[String]) -> Result<(), error::SystemError> {
        let rows =
            sqlx::query("UPDATE rooms SET images = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(images)
                .execute(&self.pool)
                .await?
                .rows_affected();

        if rows == 0 {
            return Err(error::SystemError::not_found("Room not found"));
        }
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn find_all(&self) -> Result<Vec<RoomEntity>, error::SystemError> {
        let rooms =
            sqlx::query_as::<_, RoomEntity>("SELECT * FROM rooms ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rooms)
    }

    async fn find_ids_by_owner(&self, owner_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>("SELECT id FROM rooms WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(ids)
    }
}
