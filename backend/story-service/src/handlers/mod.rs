/// HTTP layer: thin JSON adapters over the services. Handlers only
/// deserialize input, call a service and serialize the result; identity
/// is injected by the upstream gateway via the X-User-Id header.
pub mod comments;
pub mod feed;
pub mod stories;
pub mod users;

use actix_web::error::{ErrorBadRequest, ErrorUnauthorized};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// The identity a request is made on behalf of, if any
pub struct Viewer(pub Option<Uuid>);

impl Viewer {
    /// The viewer id, or 401 for anonymous requests
    pub fn require(&self) -> Result<Uuid, actix_web::Error> {
        self.0
            .ok_or_else(|| ErrorUnauthorized("authentication required"))
    }
}

impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(viewer_from_request(req))
    }
}

fn viewer_from_request(req: &HttpRequest) -> Result<Viewer, actix_web::Error> {
    match req.headers().get("X-User-Id") {
        Some(value) => match value.to_str().ok().and_then(|s| Uuid::parse_str(s).ok()) {
            Some(id) => Ok(Viewer(Some(id))),
            None => Err(ErrorBadRequest("invalid X-User-Id header")),
        },
        None => Ok(Viewer(None)),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(users::create_user))
        .route("/users/{user_id}", web::get().to(users::get_profile))
        .route("/users/{user_id}", web::patch().to(users::update_profile))
        .route("/users/{user_id}", web::delete().to(users::delete_user))
        .route(
            "/users/{user_id}/follow",
            web::post().to(users::toggle_follow),
        )
        .route("/stories", web::post().to(stories::create_story))
        .route("/stories/{story_id}", web::get().to(stories::get_story))
        .route("/stories/{story_id}", web::put().to(stories::update_story))
        .route(
            "/stories/{story_id}",
            web::delete().to(stories::delete_story),
        )
        .route(
            "/stories/{story_id}/like",
            web::post().to(stories::toggle_like),
        )
        .route(
            "/stories/{story_id}/bookmark",
            web::post().to(stories::toggle_bookmark),
        )
        .route(
            "/stories/{story_id}/comments",
            web::post().to(comments::create_comment),
        )
        .route(
            "/comments/{comment_id}",
            web::delete().to(comments::delete_comment),
        )
        .route("/feed/home", web::get().to(feed::home))
        .route("/feed/following", web::get().to(feed::following))
        .route("/feed/bookmarked", web::get().to(feed::bookmarked))
        .route("/feed/liked", web::get().to(feed::liked))
        .route("/search", web::get().to(feed::search));
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn missing_header_is_anonymous() {
        let req = TestRequest::default().to_http_request();
        let viewer = viewer_from_request(&req).unwrap();
        assert!(viewer.0.is_none());
        assert!(viewer.require().is_err());
    }

    #[test]
    fn valid_header_yields_viewer_id() {
        let id = Uuid::new_v4();
        let req = TestRequest::default()
            .insert_header(("X-User-Id", id.to_string()))
            .to_http_request();
        let viewer = viewer_from_request(&req).unwrap();
        assert_eq!(viewer.0, Some(id));
        assert_eq!(viewer.require().unwrap(), id);
    }

    #[test]
    fn malformed_header_is_rejected() {
        let req = TestRequest::default()
            .insert_header(("X-User-Id", "not-a-uuid"))
            .to_http_request();
        assert!(viewer_from_request(&req).is_err());
    }
}
