use crate::domain::models::Comment;
use crate::error::ServiceResult;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Comment rows
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        story_id: Uuid,
        author_id: Uuid,
        author_username: &str,
        body: &str,
    ) -> ServiceResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (story_id, author_id, author_username, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, story_id, author_id, author_username, body, created_at
            "#,
        )
        .bind(story_id)
        .bind(author_id)
        .bind(author_username)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    pub async fn find_by_id(&self, comment_id: Uuid) -> ServiceResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, story_id, author_id, author_username, body, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Comments on a story, oldest first (stable via the id tiebreak)
    pub async fn list_for_story(&self, story_id: Uuid) -> ServiceResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, story_id, author_id, author_username, body, created_at
            FROM comments
            WHERE story_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(story_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn delete(&self, comment_id: Uuid) -> ServiceResult<bool> {
        let affected = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }
}
