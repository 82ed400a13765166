use crate::error::ServiceResult;
use sqlx::PgPool;
use uuid::Uuid;

/// Queryable view of the follow relation. Every call reads the store
/// directly; nothing is cached across requests, so reads made after a
/// toggle in the same request always observe it.
#[derive(Clone)]
pub struct FollowRepository {
    pool: PgPool,
}

impl FollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Check if follower is following followed. Self-queries are false:
    /// the schema admits no self-edge.
    pub async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followed_id = $2)",
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Ids of the users this user follows
    pub async fn following_set(&self, user_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let following: Vec<Uuid> = sqlx::query_scalar(
            "SELECT followed_id FROM follows WHERE follower_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(following)
    }

    pub async fn follower_count(&self, user_id: Uuid) -> ServiceResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE followed_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn following_count(&self, user_id: Uuid) -> ServiceResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE follower_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Conditional edge insert; returns true if a new edge was created.
    /// The composite primary key makes the existence check and the write
    /// one atomic step, so concurrent calls cannot produce duplicates.
    pub async fn insert_if_absent(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> ServiceResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followed_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted > 0)
    }

    /// Conditional edge delete; returns true if an edge was removed.
    pub async fn delete_if_present(
        &self,
        follower_id: Uuid,
        followed_id: Uuid,
    ) -> ServiceResult<bool> {
        let affected = sqlx::query(
            "DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2",
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }
}
