/// Post service - creation and status-stamped reads
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::models::{PostWithStatus, Topic};
use crate::status::StatusFilter;

#[derive(Clone)]
pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post expiring `expiration_minutes` from now.
    ///
    /// Shape validation (lengths, topic membership, positive minutes) has
    /// already happened at the request layer.
    pub async fn create_post(
        &self,
        owner_id: Uuid,
        title: &str,
        text: &str,
        topics: &[Topic],
        expiration_minutes: i64,
    ) -> Result<PostWithStatus> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(expiration_minutes);

        let post =
            post_repo::create_post(&self.pool, owner_id, title, text, topics, now, expires_at)
                .await?;

        tracing::info!(post_id = %post.id, %owner_id, expiration_minutes, "post created");

        Ok(post.with_status(now))
    }

    /// Get a single post with its derived status.
    pub async fn get_post(&self, post_id: Uuid) -> Result<PostWithStatus> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound(post_id))?;

        Ok(post.with_status(Utc::now()))
    }

    /// List posts, optionally filtered by topic overlap and temporal status.
    /// Status is stamped from a single clock reading for the whole page.
    pub async fn list_posts(
        &self,
        topics: Option<&[Topic]>,
        filter: StatusFilter,
    ) -> Result<Vec<PostWithStatus>> {
        let now = Utc::now();
        let (live_after, expired_before) = filter.bounds(now);

        let posts = post_repo::list_posts(&self.pool, topics, live_after, expired_before).await?;

        Ok(posts.into_iter().map(|p| p.with_status(now)).collect())
    }
}
