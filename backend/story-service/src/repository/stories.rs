use crate::domain::models::{NewStory, Story, StoryWithAuthor};
use crate::error::ServiceResult;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for Story rows and the feed selections over them.
///
/// Every list query carries the same explicit total order,
/// `created_at DESC, id DESC`, so feed output is deterministic and
/// stable under any later pagination layer.
#[derive(Clone)]
pub struct StoryRepository {
    pool: PgPool,
}

impl StoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, author_id: Uuid, story: &NewStory) -> ServiceResult<Story> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            INSERT INTO stories (author_id, title, body, location, images)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, author_id, title, body, location, images, created_at
            "#,
        )
        .bind(author_id)
        .bind(&story.title)
        .bind(&story.body)
        .bind(&story.location)
        .bind(&story.images)
        .fetch_one(&self.pool)
        .await?;

        Ok(story)
    }

    pub async fn find_by_id(&self, story_id: Uuid) -> ServiceResult<Option<Story>> {
        let story = sqlx::query_as::<_, Story>(
            r#"
            SELECT id, author_id, title, body, location, images, created_at
            FROM stories
            WHERE id = $1
            "#,
        )
        .bind(story_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(story)
    }

    pub async fn find_with_author(&self, story_id: Uuid) -> ServiceResult<Option<StoryWithAuthor>> {
        let story = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.id = $1
            "#,
        )
        .bind(story_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(story)
    }

    pub async fn update(
        &self,
        story_id: Uuid,
        title: &str,
        body: &str,
        location: Option<&str>,
        images: &[String],
    ) -> ServiceResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE stories
            SET title = $2, body = $3, location = $4, images = $5
            WHERE id = $1
            "#,
        )
        .bind(story_id)
        .bind(title)
        .bind(body)
        .bind(location)
        .bind(images)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    pub async fn delete(&self, story_id: Uuid) -> ServiceResult<bool> {
        let affected = sqlx::query("DELETE FROM stories WHERE id = $1")
            .bind(story_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    /// All stories, newest first
    pub async fn list_all(&self) -> ServiceResult<Vec<StoryWithAuthor>> {
        let stories = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    /// All stories except the given author's
    pub async fn list_all_except(&self, author_id: Uuid) -> ServiceResult<Vec<StoryWithAuthor>> {
        let stories = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.author_id <> $1
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    /// Stories authored by any of the given users
    pub async fn list_by_authors(&self, author_ids: &[Uuid]) -> ServiceResult<Vec<StoryWithAuthor>> {
        if author_ids.is_empty() {
            return Ok(Vec::new());
        }

        let stories = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.author_id = ANY($1)
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(author_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    /// Stories authored by one user
    pub async fn list_by_author(&self, author_id: Uuid) -> ServiceResult<Vec<StoryWithAuthor>> {
        let stories = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.author_id = $1
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    /// Stories from an id set, in feed order
    pub async fn list_by_ids(&self, story_ids: &[Uuid]) -> ServiceResult<Vec<StoryWithAuthor>> {
        if story_ids.is_empty() {
            return Ok(Vec::new());
        }

        let stories = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.id = ANY($1)
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(story_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }

    /// Case-insensitive substring match against title, location or body.
    /// The pattern is a ready LIKE pattern (wildcards already escaped).
    pub async fn search(&self, pattern: &str) -> ServiceResult<Vec<StoryWithAuthor>> {
        let stories = sqlx::query_as::<_, StoryWithAuthor>(
            r#"
            SELECT s.id, s.author_id, u.username AS author_username,
                   s.title, s.body, s.location, s.images, s.created_at
            FROM stories s
            JOIN users u ON u.id = s.author_id
            WHERE s.title ILIKE $1 OR s.location ILIKE $1 OR s.body ILIKE $1
            ORDER BY s.created_at DESC, s.id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(stories)
    }
}
