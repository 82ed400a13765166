/// Feed handlers - home, following, bookmarked, liked, search
use crate::handlers::Viewer;
use crate::services::FeedService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub async fn home(pool: web::Data<PgPool>, viewer: Viewer) -> actix_web::Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let stories = service.home_feed(viewer.0).await?;

    Ok(HttpResponse::Ok().json(stories))
}

pub async fn following(
    pool: web::Data<PgPool>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = FeedService::new((**pool).clone());
    let stories = service.following_feed(viewer_id).await?;

    Ok(HttpResponse::Ok().json(stories))
}

pub async fn bookmarked(
    pool: web::Data<PgPool>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = FeedService::new((**pool).clone());
    let stories = service.bookmarked_feed(viewer_id).await?;

    Ok(HttpResponse::Ok().json(stories))
}

pub async fn liked(pool: web::Data<PgPool>, viewer: Viewer) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = FeedService::new((**pool).clone());
    let stories = service.liked_feed(viewer_id).await?;

    Ok(HttpResponse::Ok().json(stories))
}

pub async fn search(
    pool: web::Data<PgPool>,
    viewer: Viewer,
    params: web::Query<SearchParams>,
) -> actix_web::Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let results = service.search(viewer.0, &params.q).await?;

    Ok(HttpResponse::Ok().json(results))
}
