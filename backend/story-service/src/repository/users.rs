use crate::domain::models::User;
use crate::error::ServiceResult;
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for User rows
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, username: &str, bio: Option<&str>) -> ServiceResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, bio)
            VALUES ($1, $2)
            RETURNING id, username, bio, created_at
            "#,
        )
        .bind(username)
        .bind(bio)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, bio, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Case-insensitive username lookup
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, bio, created_at FROM users WHERE LOWER(username) = LOWER($1)",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        username: &str,
        bio: Option<&str>,
    ) -> ServiceResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, bio = $3
            WHERE id = $1
            RETURNING id, username, bio, created_at
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(bio)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Delete a user. The ON DELETE CASCADE keys remove the user's
    /// stories (with their comments and memberships), comments,
    /// memberships and follow edges in the same atomic statement.
    pub async fn delete(&self, user_id: Uuid) -> ServiceResult<bool> {
        let affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    /// Case-insensitive substring match on username. The pattern is a
    /// ready LIKE pattern (wildcards already escaped by the caller).
    pub async fn search_by_username(&self, pattern: &str) -> ServiceResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, bio, created_at
            FROM users
            WHERE username ILIKE $1
            ORDER BY username ASC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
