use crate::domain::models::ToggleOutcome;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{
    FollowRepository, InteractionKind, InteractionRepository, StoryRepository, UserRepository,
};
use sqlx::PgPool;
use uuid::Uuid;

/// The three relations sharing toggle semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    /// actor follows target user
    Follow,
    /// actor likes target story
    Like,
    /// actor bookmarks target story
    Bookmark,
}

/// The shared absent/present state machine behind follow, like and
/// bookmark. A toggle flips the (actor, target) relation: create it and
/// report `active: true`, or remove it and report `active: false`.
///
/// The branch is decided by a conditional insert against the relation's
/// unique key, so the existence check and the mutation are one atomic
/// step; concurrent toggles on the same key converge without ever
/// producing a duplicate edge or membership.
#[derive(Clone)]
pub struct ToggleService {
    follows: FollowRepository,
    interactions: InteractionRepository,
    stories: StoryRepository,
    users: UserRepository,
}

impl ToggleService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            follows: FollowRepository::new(pool.clone()),
            interactions: InteractionRepository::new(pool.clone()),
            stories: StoryRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn toggle(
        &self,
        kind: ToggleKind,
        actor: Uuid,
        target: Uuid,
    ) -> ServiceResult<ToggleOutcome> {
        match kind {
            ToggleKind::Follow => self.toggle_follow(actor, target).await,
            ToggleKind::Like => {
                self.toggle_interaction(InteractionKind::Like, actor, target)
                    .await
            }
            ToggleKind::Bookmark => {
                self.toggle_interaction(InteractionKind::Bookmark, actor, target)
                    .await
            }
        }
    }

    async fn toggle_follow(&self, actor: Uuid, target: Uuid) -> ServiceResult<ToggleOutcome> {
        // Self-follow is a guarded no-op: no edge, no store write
        if actor == target {
            return Ok(ToggleOutcome { active: false });
        }

        if self.users.find_by_id(target).await?.is_none() {
            return Err(ServiceError::NotFound(format!("user {target} does not exist")));
        }

        match self.follows.insert_if_absent(actor, target).await {
            Ok(true) => Ok(ToggleOutcome { active: true }),
            Ok(false) => {
                self.follows.delete_if_present(actor, target).await?;
                Ok(ToggleOutcome { active: false })
            }
            // Target deleted between the existence check and the insert
            Err(err) if err.is_foreign_key_violation() => Err(ServiceError::NotFound(format!(
                "user {target} does not exist"
            ))),
            Err(err) => Err(err),
        }
    }

    async fn toggle_interaction(
        &self,
        kind: InteractionKind,
        actor: Uuid,
        story_id: Uuid,
    ) -> ServiceResult<ToggleOutcome> {
        if self.stories.find_by_id(story_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "story {story_id} does not exist"
            )));
        }

        match self.interactions.insert_if_absent(kind, story_id, actor).await {
            Ok(true) => Ok(ToggleOutcome { active: true }),
            Ok(false) => {
                self.interactions
                    .delete_if_present(kind, story_id, actor)
                    .await?;
                Ok(ToggleOutcome { active: false })
            }
            Err(err) if err.is_foreign_key_violation() => Err(ServiceError::NotFound(format!(
                "story {story_id} does not exist"
            ))),
            Err(err) => Err(err),
        }
    }
}
