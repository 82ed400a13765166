use crate::domain::models::{NewUser, ProfileEdit, User};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::UserRepository;
use sqlx::PgPool;
use uuid::Uuid;

const MAX_USERNAME_LEN: usize = 32;

/// Registration, profile edits and account deletion
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a user. Validations run in order and the first failure
    /// wins; nothing is written after a failure.
    pub async fn create_user(&self, input: NewUser) -> ServiceResult<User> {
        let username = validate_username(&input.username)?;

        if self.users.find_by_username(username).await?.is_some() {
            return Err(ServiceError::InvalidOperation(
                "username is taken".to_string(),
            ));
        }

        self.users.insert(username, input.bio.as_deref()).await
    }

    pub async fn get_user(&self, user_id: Uuid) -> ServiceResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id} does not exist")))
    }

    /// Edit username and/or bio; absent fields are left unchanged
    pub async fn update_profile(&self, user_id: Uuid, edit: ProfileEdit) -> ServiceResult<User> {
        let current = self.get_user(user_id).await?;

        let username = match &edit.username {
            Some(candidate) => {
                let candidate = validate_username(candidate)?;
                // Re-casing your own name is not a collision
                if let Some(existing) = self.users.find_by_username(candidate).await? {
                    if existing.id != user_id {
                        return Err(ServiceError::InvalidOperation(
                            "username is taken".to_string(),
                        ));
                    }
                }
                candidate.to_string()
            }
            None => current.username,
        };

        let bio = match edit.bio {
            Some(bio) => Some(bio),
            None => current.bio,
        };

        self.users
            .update(user_id, &username, bio.as_deref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {user_id} does not exist")))
    }

    /// Delete the account. The store cascades to stories, comments,
    /// memberships and follow edges in the same statement.
    pub async fn delete_user(&self, user_id: Uuid) -> ServiceResult<()> {
        if !self.users.delete(user_id).await? {
            return Err(ServiceError::NotFound(format!(
                "user {user_id} does not exist"
            )));
        }
        Ok(())
    }
}

fn validate_username(raw: &str) -> ServiceResult<&str> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(ServiceError::InvalidOperation(
            "username must not be empty".to_string(),
        ));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ServiceError::InvalidOperation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_trimmed() {
        assert_eq!(validate_username("  wanderer  ").unwrap(), "wanderer");
    }

    #[test]
    fn blank_username_is_rejected() {
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
    }

    #[test]
    fn oversized_username_is_rejected() {
        let long = "x".repeat(MAX_USERNAME_LEN + 1);
        assert!(validate_username(&long).is_err());
        let max = "x".repeat(MAX_USERNAME_LEN);
        assert!(validate_username(&max).is_ok());
    }
}
