use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - profile data only, credentials live upstream
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Story entity - a posted story with its image references
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Story {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub body: String,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Story row joined with its author's username, as selected by every feed
/// query. Interaction flags and counts are attached afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoryWithAuthor {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub title: String,
    pub body: String,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - author_username is captured at write time
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub story_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Follow edge - follower_id follows followed_id
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FollowEdge {
    pub follower_id: Uuid,
    pub followed_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a story
#[derive(Debug, Clone, Deserialize)]
pub struct NewStory {
    pub title: String,
    pub body: String,
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Input for editing a story. An empty image list keeps the stored images.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryEdit {
    pub title: String,
    pub body: String,
    pub location: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Input for registering a user
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub bio: Option<String>,
}

/// Input for editing a profile; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileEdit {
    pub username: Option<String>,
    pub bio: Option<String>,
}

/// A story as seen by a specific viewer
#[derive(Debug, Clone, Serialize)]
pub struct StorySummary {
    pub id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub title: String,
    pub body: String,
    pub location: Option<String>,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub bookmark_count: i64,
    /// Viewer-relative flags; all false for an anonymous viewer
    pub liked: bool,
    pub bookmarked: bool,
    pub own: bool,
}

/// Public user summary
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            username: user.username,
            bio: user.bio,
            created_at: user.created_at,
        }
    }
}

/// A profile page: the user, their stories, and graph counts
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub user: UserSummary,
    pub stories: Vec<StorySummary>,
    pub follower_count: i64,
    pub following_count: i64,
    /// False when the viewer is anonymous or is the profile owner
    pub viewer_follows: bool,
}

/// A single story with its comments
#[derive(Debug, Clone, Serialize)]
pub struct StoryDetail {
    pub story: StorySummary,
    pub comments: Vec<Comment>,
}

/// Search result: matching users and matching stories, separately ordered
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub users: Vec<UserSummary>,
    pub stories: Vec<StorySummary>,
}

/// Result of a toggle: whether the relation is active after the call
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleOutcome {
    pub active: bool,
}
