use crate::domain::models::{NewStory, Story, StoryDetail, StoryEdit, StorySummary};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{CommentRepository, InteractionRepository, StoryRepository, UserRepository};
use sqlx::PgPool;
use uuid::Uuid;

/// Story creation, detail, owner edit and owner deletion
#[derive(Clone)]
pub struct StoryService {
    stories: StoryRepository,
    comments: CommentRepository,
    interactions: InteractionRepository,
    users: UserRepository,
}

impl StoryService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stories: StoryRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            interactions: InteractionRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn create_story(&self, author_id: Uuid, input: NewStory) -> ServiceResult<Story> {
        validate_story_fields(&input.title, &input.body)?;

        if self.users.find_by_id(author_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "user {author_id} does not exist"
            )));
        }

        self.stories.insert(author_id, &input).await
    }

    /// One story with its comments (oldest first) and viewer flags
    pub async fn story_detail(
        &self,
        story_id: Uuid,
        viewer: Option<Uuid>,
    ) -> ServiceResult<StoryDetail> {
        let row = self
            .stories
            .find_with_author(story_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("story {story_id} does not exist")))?;

        let comments = self.comments.list_for_story(story_id).await?;
        let like_count = self.interactions.like_count(story_id).await?;
        let bookmark_count = self.interactions.bookmark_count(story_id).await?;

        let (liked, bookmarked) = match viewer {
            Some(viewer_id) => (
                self.interactions.liked_by_viewer(story_id, viewer_id).await?,
                self.interactions
                    .bookmarked_by_viewer(story_id, viewer_id)
                    .await?,
            ),
            None => (false, false),
        };

        let story = StorySummary {
            liked,
            bookmarked,
            own: viewer == Some(row.author_id),
            like_count,
            bookmark_count,
            id: row.id,
            author_id: row.author_id,
            author_username: row.author_username,
            title: row.title,
            body: row.body,
            location: row.location,
            images: row.images,
            created_at: row.created_at,
        };

        Ok(StoryDetail { story, comments })
    }

    /// Owner-only edit. An empty replacement image list keeps the stored
    /// images; replacing them requires a non-empty list.
    pub async fn update_story(
        &self,
        story_id: Uuid,
        editor: Uuid,
        edit: StoryEdit,
    ) -> ServiceResult<Story> {
        let current = self
            .stories
            .find_by_id(story_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("story {story_id} does not exist")))?;

        if current.author_id != editor {
            return Err(ServiceError::InvalidOperation(
                "only the author may edit a story".to_string(),
            ));
        }

        validate_story_fields(&edit.title, &edit.body)?;

        let images = if edit.images.is_empty() {
            current.images
        } else {
            edit.images
        };

        self.stories
            .update(
                story_id,
                &edit.title,
                &edit.body,
                edit.location.as_deref(),
                &images,
            )
            .await?;

        Ok(Story {
            id: current.id,
            author_id: current.author_id,
            created_at: current.created_at,
            title: edit.title,
            body: edit.body,
            location: edit.location,
            images,
        })
    }

    /// Owner-only deletion; comments and memberships cascade with the row
    pub async fn delete_story(&self, story_id: Uuid, actor: Uuid) -> ServiceResult<()> {
        let current = self
            .stories
            .find_by_id(story_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("story {story_id} does not exist")))?;

        if current.author_id != actor {
            return Err(ServiceError::InvalidOperation(
                "only the author may delete a story".to_string(),
            ));
        }

        self.stories.delete(story_id).await?;
        Ok(())
    }
}

fn validate_story_fields(title: &str, body: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::InvalidOperation(
            "story title must not be empty".to_string(),
        ));
    }
    if body.trim().is_empty() {
        return Err(ServiceError::InvalidOperation(
            "story body must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_title_and_body() {
        assert!(validate_story_fields("", "body").is_err());
        assert!(validate_story_fields("   ", "body").is_err());
        assert!(validate_story_fields("title", "").is_err());
        assert!(validate_story_fields("title", "\n\t").is_err());
        assert!(validate_story_fields("Alps Trip", "three passes").is_ok());
    }
}
