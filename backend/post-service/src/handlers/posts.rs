/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::metrics;
use crate::middleware::UserId;
use crate::models::Topic;
use crate::services::{PostService, RankingService};
use crate::status::StatusFilter;

/// Request body for creating a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    #[validate(length(min = 1))]
    pub topics: Vec<Topic>,
    #[validate(range(min = 1))]
    pub expiration_minutes: i64,
}

/// Request body for searching posts by a set of topics
#[derive(Debug, Deserialize, Validate)]
pub struct TopicSearchRequest {
    #[validate(length(min = 1))]
    pub topics: Vec<Topic>,
}

/// Request body for the highest-interest query
#[derive(Debug, Deserialize)]
pub struct HighestInterestRequest {
    pub topic: Option<Topic>,
    #[serde(default)]
    pub status: StatusFilter,
}

/// Create a new post owned by the caller
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user_id.0,
            &req.title,
            &req.text,
            &req.topics,
            req.expiration_minutes,
        )
        .await?;

    metrics::POSTS_CREATED_TOTAL.inc();

    Ok(HttpResponse::Created().json(post))
}

/// List all posts with derived status
pub async fn list_posts(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(None, StatusFilter::All).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// List posts filed under one topic
pub async fn get_by_topic(
    pool: web::Data<PgPool>,
    topic: web::Path<Topic>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service
        .list_posts(Some(&[*topic]), StatusFilter::All)
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Search posts matching any of the given topics
pub async fn search_by_topics(
    pool: web::Data<PgPool>,
    req: web::Json<TopicSearchRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let posts = service
        .list_posts(Some(&req.topics), StatusFilter::All)
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List posts that have not yet expired
pub async fn list_active(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(None, StatusFilter::Live).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List live posts filed under one topic
pub async fn list_active_by_topic(
    pool: web::Data<PgPool>,
    topic: web::Path<Topic>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service
        .list_posts(Some(&[*topic]), StatusFilter::Live)
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List posts whose expiry has passed
pub async fn list_expired(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(None, StatusFilter::Expired).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// List expired posts filed under one topic
pub async fn list_expired_by_topic(
    pool: web::Data<PgPool>,
    topic: web::Path<Topic>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service
        .list_posts(Some(&[*topic]), StatusFilter::Expired)
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// The single post with maximal combined engagement under the given
/// filters; JSON null when nothing matches.
pub async fn highest_interest(
    pool: web::Data<PgPool>,
    req: web::Json<HighestInterestRequest>,
) -> Result<HttpResponse> {
    let service = RankingService::new((**pool).clone());
    let top = service.top_interest(req.topic, req.status).await?;

    Ok(HttpResponse::Ok().json(top))
}
