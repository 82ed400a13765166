use crate::domain::models::Comment;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{CommentRepository, StoryRepository, UserRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment creation and deletion
#[derive(Clone)]
pub struct CommentService {
    comments: CommentRepository,
    stories: StoryRepository,
    users: UserRepository,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            comments: CommentRepository::new(pool.clone()),
            stories: StoryRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn add_comment(
        &self,
        story_id: Uuid,
        author_id: Uuid,
        body: &str,
    ) -> ServiceResult<Comment> {
        if body.trim().is_empty() {
            return Err(ServiceError::InvalidOperation(
                "comment body must not be empty".to_string(),
            ));
        }

        if self.stories.find_by_id(story_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "story {story_id} does not exist"
            )));
        }

        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {author_id} does not exist")))?;

        self.comments
            .insert(story_id, author_id, &author.username, body)
            .await
    }

    /// Deletion is allowed for the comment's author and for the owner of
    /// the story it sits on.
    pub async fn delete_comment(&self, comment_id: Uuid, actor: Uuid) -> ServiceResult<()> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("comment {comment_id} does not exist"))
            })?;

        let story = self
            .stories
            .find_by_id(comment.story_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("story {} does not exist", comment.story_id))
            })?;

        if !can_delete_comment(actor, comment.author_id, story.author_id) {
            return Err(ServiceError::InvalidOperation(
                "only the comment author or the story owner may delete a comment".to_string(),
            ));
        }

        self.comments.delete(comment_id).await?;
        Ok(())
    }
}

fn can_delete_comment(actor: Uuid, comment_author: Uuid, story_author: Uuid) -> bool {
    actor == comment_author || actor == story_author
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_and_story_owner_may_delete() {
        let author = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(can_delete_comment(author, author, owner));
        assert!(can_delete_comment(owner, author, owner));
        assert!(!can_delete_comment(stranger, author, owner));
    }
}
