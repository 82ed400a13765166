use crate::domain::models::{
    ProfileView, SearchResults, StorySummary, StoryWithAuthor, UserSummary,
};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::{
    FollowRepository, InteractionKind, InteractionRepository, StoryRepository, UserRepository,
};
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Assembles ordered, viewer-annotated story lists. Stateless per call:
/// every feed recomputes its follow and membership reads from the store,
/// so a toggle earlier in the same request is always visible.
#[derive(Clone)]
pub struct FeedService {
    stories: StoryRepository,
    follows: FollowRepository,
    interactions: InteractionRepository,
    users: UserRepository,
}

impl FeedService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stories: StoryRepository::new(pool.clone()),
            follows: FollowRepository::new(pool.clone()),
            interactions: InteractionRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Home/discovery feed: every story except the viewer's own, newest
    /// first. With no viewer there is nothing to exclude.
    pub async fn home_feed(&self, viewer: Option<Uuid>) -> ServiceResult<Vec<StorySummary>> {
        let rows = match viewer {
            Some(viewer_id) => self.stories.list_all_except(viewer_id).await?,
            None => self.stories.list_all().await?,
        };

        self.assemble(rows, viewer).await
    }

    /// Stories from the users the viewer follows, newest first
    pub async fn following_feed(&self, viewer: Uuid) -> ServiceResult<Vec<StorySummary>> {
        let authors = self.follows.following_set(viewer).await?;
        let rows = self.stories.list_by_authors(&authors).await?;

        self.assemble(rows, Some(viewer)).await
    }

    /// Stories the viewer has bookmarked, newest first
    pub async fn bookmarked_feed(&self, viewer: Uuid) -> ServiceResult<Vec<StorySummary>> {
        let story_ids = self
            .interactions
            .member_story_ids(InteractionKind::Bookmark, viewer)
            .await?;
        let rows = self.stories.list_by_ids(&story_ids).await?;

        self.assemble(rows, Some(viewer)).await
    }

    /// Stories the viewer has liked, newest first
    pub async fn liked_feed(&self, viewer: Uuid) -> ServiceResult<Vec<StorySummary>> {
        let story_ids = self
            .interactions
            .member_story_ids(InteractionKind::Like, viewer)
            .await?;
        let rows = self.stories.list_by_ids(&story_ids).await?;

        self.assemble(rows, Some(viewer)).await
    }

    /// Case-insensitive substring search. An empty or whitespace-only
    /// query returns empty user and story lists; it is not an alias for
    /// the discovery feed. Users match on username (sorted ascending),
    /// stories on title, location or body (feed order).
    pub async fn search(&self, viewer: Option<Uuid>, query: &str) -> ServiceResult<SearchResults> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchResults {
                users: Vec::new(),
                stories: Vec::new(),
            });
        }

        let pattern = like_pattern(trimmed);
        let users = self
            .users
            .search_by_username(&pattern)
            .await?
            .into_iter()
            .map(UserSummary::from)
            .collect();
        let rows = self.stories.search(&pattern).await?;
        let stories = self.assemble(rows, viewer).await?;

        Ok(SearchResults { users, stories })
    }

    /// A user's profile: their stories in feed order, graph counts, and
    /// whether the viewer follows them (false for anonymous viewers and
    /// for the profile owner).
    pub async fn profile(&self, target: Uuid, viewer: Option<Uuid>) -> ServiceResult<ProfileView> {
        let user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {target} does not exist")))?;

        let rows = self.stories.list_by_author(target).await?;
        let stories = self.assemble(rows, viewer).await?;
        let follower_count = self.follows.follower_count(target).await?;
        let following_count = self.follows.following_count(target).await?;
        let viewer_follows = match viewer {
            Some(viewer_id) if viewer_id != target => {
                self.follows.is_following(viewer_id, target).await?
            }
            _ => false,
        };

        Ok(ProfileView {
            user: user.into(),
            stories,
            follower_count,
            following_count,
            viewer_follows,
        })
    }

    /// Attach counts and viewer-relative flags to selected rows. Two
    /// batch count queries always; two batch membership queries only
    /// when there is a viewer.
    async fn assemble(
        &self,
        rows: Vec<StoryWithAuthor>,
        viewer: Option<Uuid>,
    ) -> ServiceResult<Vec<StorySummary>> {
        let story_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();

        let like_counts = self
            .interactions
            .batch_counts(InteractionKind::Like, &story_ids)
            .await?;
        let bookmark_counts = self
            .interactions
            .batch_counts(InteractionKind::Bookmark, &story_ids)
            .await?;

        let (liked, bookmarked) = match viewer {
            Some(viewer_id) => (
                self.interactions
                    .batch_membership(InteractionKind::Like, viewer_id, &story_ids)
                    .await?,
                self.interactions
                    .batch_membership(InteractionKind::Bookmark, viewer_id, &story_ids)
                    .await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        Ok(annotate(
            rows,
            viewer,
            &liked,
            &bookmarked,
            &like_counts,
            &bookmark_counts,
        ))
    }
}

/// Merge selected rows with membership sets and counts. Pure: row order
/// is preserved, flags are all false without a viewer.
fn annotate(
    rows: Vec<StoryWithAuthor>,
    viewer: Option<Uuid>,
    liked: &HashSet<Uuid>,
    bookmarked: &HashSet<Uuid>,
    like_counts: &HashMap<Uuid, i64>,
    bookmark_counts: &HashMap<Uuid, i64>,
) -> Vec<StorySummary> {
    rows.into_iter()
        .map(|row| StorySummary {
            liked: liked.contains(&row.id),
            bookmarked: bookmarked.contains(&row.id),
            own: viewer == Some(row.author_id),
            like_count: like_counts.get(&row.id).copied().unwrap_or(0),
            bookmark_count: bookmark_counts.get(&row.id).copied().unwrap_or(0),
            id: row.id,
            author_id: row.author_id,
            author_username: row.author_username,
            title: row.title,
            body: row.body,
            location: row.location,
            images: row.images,
            created_at: row.created_at,
        })
        .collect()
}

/// LIKE pattern matching the query literally as a substring: `%` and `_`
/// in the query must not act as wildcards.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
