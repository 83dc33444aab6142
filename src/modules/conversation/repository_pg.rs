use uuid::Uuid;

use crate::{
    api::error,
    modules::conversation::{
        model::ConversationListRow, repository::ConversationRepository, schema::ConversationEntity,
    },
};

#[derive(Clone)]
pub struct ConversationRepositoryPg {
    pool: sqlx::PgPool,
}

impl ConversationRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ConversationRepository for ConversationRepositoryPg {
    async fn find_by_id(
        &self,
        id: &Uuid,
    ) -> Result<Option<ConversationEntity>, error::SystemError> {
        let conversation =
            sqlx::query_as::<_, ConversationEntity>("SELECT * FROM conversations WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(conversation)
    }

    async fn create_if_absent(
        &self,
        owner_id: &Uuid,
        finder_id: &Uuid,
        room_id: &Uuid,
    ) -> Result<ConversationEntity, error::SystemError> {
        let id = Uuid::now_v7();

        // ON CONFLICT DO NOTHING returns no row when the triple already
        // exists; the follow-up select picks up whichever insert won.
        let inserted = sqlx::query_as::<_, ConversationEntity>(
            r#"
            INSERT INTO conversations (id, owner_id, finder_id, room_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (owner_id, finder_id, room_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(finder_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(conversation) = inserted {
            return Ok(conversation);
        }

        let existing = sqlx::query_as::<_, ConversationEntity>(
            r#"
            SELECT * FROM conversations
            WHERE owner_id = $1 AND finder_id = $2 AND room_id = $3
            "#,
        )
        .bind(owner_id)
        .bind(finder_id)
        .bind(room_id)
        .fetch_optional(&self.pool)
        .await?;

        existing.ok_or_else(|| error::SystemError::not_found("Conversation not found"))
    }

    async fn find_all_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationListRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, ConversationListRow>(
            r#"
            SELECT
                c.id,
                c.owner_id,
                c.finder_id,
                c.room_id,
                c.created_at,

                (
                    SELECT COUNT(*)
                    FROM messages m
                    WHERE m.conversation_id = c.id
                    AND m.sender_id <> $1
                    AND m.read_at IS NULL
                ) AS unread_count,

                lm.id         AS last_message_id,
                lm.sender_id  AS last_sender_id,
                lm.message    AS last_message,
                lm.created_at AS last_created_at,
                lm.read_at    AS last_read_at

            FROM conversations c

            LEFT JOIN LATERAL (
                SELECT id, sender_id, message, created_at, read_at
                FROM messages m
                WHERE m.conversation_id = c.id
                ORDER BY created_at DESC
                LIMIT 1
            ) lm ON TRUE

            WHERE c.owner_id = $1 OR c.finder_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn mark_read(
        &self,
        conversation_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = NOW()
            WHERE conversation_id = $1
            AND sender_id <> $2
            AND read_at IS NULL
            "#,
        )
        .bind(conversation_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows)
    }

    async fn find_ids_by_room(&self, room_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM conversations WHERE room_id = $1")
                .bind(room_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(ids)
    }

    async fn find_ids_by_user(&self, user_id: &Uuid) -> Result<Vec<Uuid>, error::SystemError> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM conversations WHERE owner_id = $1 OR finder_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }

    async fn delete_by_ids(&self, ids: &[Uuid]) -> Result<u64, error::SystemError> {
        let rows = sqlx::query("DELETE FROM conversations WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows)
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(rows > 0)
    }

    async fn find_all(&self) -> Result<Vec<ConversationEntity>, error::SystemError> {
        let conversations = sqlx::query_as::<_, ConversationEntity>(
            "SELECT * FROM conversations ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(conversations)
    }
}
