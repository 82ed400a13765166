pub mod comments;
pub mod feed;
pub mod stories;
pub mod toggle;
pub mod users;

pub use comments::CommentService;
pub use feed::FeedService;
pub use stories::StoryService;
pub use toggle::{ToggleKind, ToggleService};
pub use users::UserService;
