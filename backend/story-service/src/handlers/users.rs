/// User handlers - registration, profiles, account deletion, follow toggle
use crate::domain::models::{NewUser, ProfileEdit};
use crate::handlers::Viewer;
use crate::services::{FeedService, ToggleKind, ToggleService, UserService};
use actix_web::error::ErrorForbidden;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn create_user(
    pool: web::Data<PgPool>,
    req: web::Json<NewUser>,
) -> actix_web::Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let user = service.create_user(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

pub async fn get_profile(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let service = FeedService::new((**pool).clone());
    let profile = service.profile(*user_id, viewer.0).await?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn update_profile(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    viewer: Viewer,
    req: web::Json<ProfileEdit>,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;
    if viewer_id != *user_id {
        return Err(ErrorForbidden("you may only edit your own profile"));
    }

    let service = UserService::new((**pool).clone());
    let user = service.update_profile(*user_id, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(user))
}

pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;
    if viewer_id != *user_id {
        return Err(ErrorForbidden("you may only delete your own account"));
    }

    let service = UserService::new((**pool).clone());
    service.delete_user(*user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn toggle_follow(
    pool: web::Data<PgPool>,
    user_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = ToggleService::new((**pool).clone());
    let outcome = service
        .toggle(ToggleKind::Follow, viewer_id, *user_id)
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}
