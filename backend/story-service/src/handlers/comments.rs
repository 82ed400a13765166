/// Comment handlers - creation and deletion
use crate::handlers::Viewer;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Request body for creating a comment
#[derive(Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

pub async fn create_comment(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    viewer: Viewer,
    req: web::Json<CreateCommentRequest>,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = CommentService::new((**pool).clone());
    let comment = service.add_comment(*story_id, viewer_id, &req.body).await?;

    Ok(HttpResponse::Created().json(comment))
}

pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    viewer: Viewer,
) -> actix_web::Result<HttpResponse> {
    let viewer_id = viewer.require()?;

    let service = CommentService::new((**pool).clone());
    service.delete_comment(*comment_id, viewer_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
