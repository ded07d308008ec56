/// Interaction handlers - HTTP endpoints for likes, dislikes, and comments
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::metrics;
use crate::middleware::UserId;
use crate::models::ReactionKind;
use crate::services::InteractionService;

/// Request body for commenting on a post
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(max = 500))]
    pub message: String,
}

/// Like a post
pub async fn like_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    react(pool, *post_id, user_id.0, ReactionKind::Like).await
}

/// Dislike a post
pub async fn dislike_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    react(pool, *post_id, user_id.0, ReactionKind::Dislike).await
}

async fn react(
    pool: web::Data<PgPool>,
    post_id: Uuid,
    user_id: Uuid,
    kind: ReactionKind,
) -> Result<HttpResponse> {
    let service = InteractionService::new((**pool).clone());
    let result = service.react(post_id, user_id, kind).await;

    metrics::record_interaction(kind.as_str(), result.is_ok());

    let applied = result?;
    Ok(HttpResponse::Created().json(applied))
}

/// Comment on a post
pub async fn comment_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = InteractionService::new((**pool).clone());
    let result = service.comment(*post_id, user_id.0, &req.message).await;

    metrics::record_interaction("comment", result.is_ok());

    let comment = result?;
    Ok(HttpResponse::Created().json(comment))
}

/// List the authoritative comment records for a post
pub async fn list_post_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let service = InteractionService::new((**pool).clone());
    let comments = service.comments_for_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}
