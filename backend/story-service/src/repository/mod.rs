pub mod comments;
pub mod follows;
pub mod interactions;
pub mod stories;
pub mod users;

pub use comments::CommentRepository;
pub use follows::FollowRepository;
pub use interactions::{InteractionKind, InteractionRepository};
pub use stories::StoryRepository;
pub use users::UserRepository;
