/// Story handlers - creation, detail, edit, deletion, like/bookmark toggles
use crate::domain::models::{NewStory, StoryEdit};
use crate::handlers::Viewer;
use crate::services::{StoryService, ToggleKind, ToggleService};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_story(
    pool: web::Data<PgPool>,
    viewer: Viewer,
    req: web::Json<NewStory>,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = StoryService::new((**pool).clone());
    let story = service.create_story(viewer_id, req.into_inner()).await?;

    Ok(HttpResponse::Created().json(story))
}

pub async fn get_story(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let service = StoryService::new((**pool).clone());
    let detail = service.story_detail(*story_id, viewer.0).await?;

    Ok(HttpResponse::Ok().json(detail))
}

pub async fn update_story(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    viewer: Viewer,
    req: web::Json<StoryEdit>,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = StoryService::new((**pool).clone());
    let story = service
        .update_story(*story_id, viewer_id, req.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(story))
}

pub async fn delete_story(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = StoryService::new((**pool).clone());
    service.delete_story(*story_id, viewer_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn toggle_like(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = ToggleService::new((**pool).clone());
    let outcome = service.toggle(ToggleKind::Like, viewer_id, *story_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub async fn toggle_bookmark(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = ToggleService::new((**pool).clone());
    let outcome = service
        .toggle(ToggleKind::Bookmark, viewer_id, *story_id)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}
