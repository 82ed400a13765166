use crate::error::ServiceResult;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// The two interaction membership sets a story carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Like,
    Bookmark,
}

impl InteractionKind {
    /// Backing table; the representation is private to this module
    fn table(self) -> &'static str {
        match self {
            InteractionKind::Like => "story_likes",
            InteractionKind::Bookmark => "story_bookmarks",
        }
    }
}

/// Membership tests and counts over the per-story like/bookmark sets.
/// Callers only see the membership contract; feeds never touch the
/// tables directly.
#[derive(Clone)]
pub struct InteractionRepository {
    pool: PgPool,
}

impl InteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Membership test for one (story, user) pair
    pub async fn contains(
        &self,
        kind: InteractionKind,
        story_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE story_id = $1 AND user_id = $2)",
            kind.table()
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(story_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Set size for one story
    pub async fn count(&self, kind: InteractionKind, story_id: Uuid) -> ServiceResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE story_id = $1", kind.table());
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(story_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Of the given stories, the ones whose set contains the user.
    /// One query per feed call, never a per-story loop.
    pub async fn batch_membership(
        &self,
        kind: InteractionKind,
        user_id: Uuid,
        story_ids: &[Uuid],
    ) -> ServiceResult<HashSet<Uuid>> {
        if story_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let sql = format!(
            "SELECT story_id FROM {} WHERE user_id = $1 AND story_id = ANY($2)",
            kind.table()
        );
        let members: Vec<Uuid> = sqlx::query_scalar(&sql)
            .bind(user_id)
            .bind(story_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(members.into_iter().collect())
    }

    /// Set sizes for a batch of stories; stories with no members are
    /// absent from the map.
    pub async fn batch_counts(
        &self,
        kind: InteractionKind,
        story_ids: &[Uuid],
    ) -> ServiceResult<HashMap<Uuid, i64>> {
        if story_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT story_id, COUNT(*) FROM {} WHERE story_id = ANY($1) GROUP BY story_id",
            kind.table()
        );
        let counts: Vec<(Uuid, i64)> = sqlx::query_as(&sql)
            .bind(story_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(counts.into_iter().collect())
    }

    /// Ids of every story whose set contains the user. Unordered; the
    /// story repository applies the feed order when it resolves them.
    pub async fn member_story_ids(
        &self,
        kind: InteractionKind,
        user_id: Uuid,
    ) -> ServiceResult<Vec<Uuid>> {
        let sql = format!("SELECT story_id FROM {} WHERE user_id = $1", kind.table());
        let story_ids: Vec<Uuid> = sqlx::query_scalar(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(story_ids)
    }

    /// Conditional membership insert; returns true if the user was added.
    /// The (story_id, user_id) primary key makes check-and-insert atomic.
    pub async fn insert_if_absent(
        &self,
        kind: InteractionKind,
        story_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<bool> {
        let sql = format!(
            "INSERT INTO {} (story_id, user_id) VALUES ($1, $2) \
             ON CONFLICT (story_id, user_id) DO NOTHING",
            kind.table()
        );
        let inserted = sqlx::query(&sql)
            .bind(story_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(inserted > 0)
    }

    /// Conditional membership delete; returns true if the user was removed.
    pub async fn delete_if_present(
        &self,
        kind: InteractionKind,
        story_id: Uuid,
        user_id: Uuid,
    ) -> ServiceResult<bool> {
        let sql = format!(
            "DELETE FROM {} WHERE story_id = $1 AND user_id = $2",
            kind.table()
        );
        let affected = sqlx::query(&sql)
            .bind(story_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    /// likedByViewer membership test
    pub async fn liked_by_viewer(&self, story_id: Uuid, viewer: Uuid) -> ServiceResult<bool> {
        self.contains(InteractionKind::Like, story_id, viewer).await
    }

    /// bookmarkedByViewer membership test
    pub async fn bookmarked_by_viewer(&self, story_id: Uuid, viewer: Uuid) -> ServiceResult<bool> {
        self.contains(InteractionKind::Bookmark, story_id, viewer)
            .await
    }

    pub async fn like_count(&self, story_id: Uuid) -> ServiceResult<i64> {
        self.count(InteractionKind::Like, story_id).await
    }

    pub async fn bookmark_count(&self, story_id: Uuid) -> ServiceResult<i64> {
        self.count(InteractionKind::Bookmark, story_id).await
    }
}
