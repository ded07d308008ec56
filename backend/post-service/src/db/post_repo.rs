use crate::models::{CommentSummary, Post, ReactionKind, Topic};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Create a new post
pub async fn create_post(
    pool: &PgPool,
    owner_id: Uuid,
    title: &str,
    text: &str,
    topics: &[Topic],
    posted_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, text, topics, owner_id, posted_at, expires_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, text, topics, owner_id, posted_at, expires_at,
                  likes_count, dislikes_count, comments
        "#,
    )
    .bind(title)
    .bind(text)
    .bind(topics)
    .bind(owner_id)
    .bind(posted_at)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, text, topics, owner_id, posted_at, expires_at,
               likes_count, dislikes_count, comments
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List posts, newest first, optionally filtered by topic overlap and by
/// expiry bounds (`live_after` selects `expires_at > t`, `expired_before`
/// selects `expires_at <= t`).
pub async fn list_posts(
    pool: &PgPool,
    topics: Option<&[Topic]>,
    live_after: Option<DateTime<Utc>>,
    expired_before: Option<DateTime<Utc>>,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, text, topics, owner_id, posted_at, expires_at,
               likes_count, dislikes_count, comments
        FROM posts
        WHERE ($1::topic[] IS NULL OR topics && $1)
          AND ($2::timestamptz IS NULL OR expires_at > $2)
          AND ($3::timestamptz IS NULL OR expires_at <= $3)
        ORDER BY posted_at DESC
        "#,
    )
    .bind(topics)
    .bind(live_after)
    .bind(expired_before)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Fetch ranking candidates for a single optional topic, in stable
/// `posted_at` order so the selection fold is deterministic.
pub async fn find_for_ranking(
    pool: &PgPool,
    topic: Option<Topic>,
    live_after: Option<DateTime<Utc>>,
    expired_before: Option<DateTime<Utc>>,
) -> Result<Vec<Post>, sqlx::Error> {
    let posts = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, text, topics, owner_id, posted_at, expires_at,
               likes_count, dislikes_count, comments
        FROM posts
        WHERE ($1::topic IS NULL OR $1 = ANY(topics))
          AND ($2::timestamptz IS NULL OR expires_at > $2)
          AND ($3::timestamptz IS NULL OR expires_at <= $3)
        ORDER BY posted_at ASC
        "#,
    )
    .bind(topic)
    .bind(live_after)
    .bind(expired_before)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Atomically bump the counter matching `kind` and return the new value.
pub async fn increment_reaction_count(
    conn: &mut PgConnection,
    post_id: Uuid,
    kind: ReactionKind,
) -> Result<i64, sqlx::Error> {
    let sql = match kind {
        ReactionKind::Like => {
            "UPDATE posts SET likes_count = likes_count + 1 WHERE id = $1 RETURNING likes_count"
        }
        ReactionKind::Dislike => {
            "UPDATE posts SET dislikes_count = dislikes_count + 1 WHERE id = $1 RETURNING dislikes_count"
        }
    };

    let count: i64 = sqlx::query_scalar(sql)
        .bind(post_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// Append one entry to the post's embedded comment sequence.
pub async fn append_comment_summary(
    conn: &mut PgConnection,
    post_id: Uuid,
    summary: &CommentSummary,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET comments = comments || jsonb_build_array($2::jsonb)
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(Json(summary))
    .execute(&mut *conn)
    .await?;

    Ok(())
}
