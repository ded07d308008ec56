use crate::models::Comment;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Insert a comment
pub async fn insert_comment(
    conn: &mut PgConnection,
    post_id: Uuid,
    commenter_id: Uuid,
    message: &str,
    time_to_expiry_ms: i64,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, commenter_id, message, time_to_expiry_ms)
        VALUES ($1, $2, $3, $4)
        RETURNING id, post_id, commenter_id, message, created_at, time_to_expiry_ms
        "#,
    )
    .bind(post_id)
    .bind(commenter_id)
    .bind(message)
    .bind(time_to_expiry_ms)
    .fetch_one(&mut *conn)
    .await?;

    Ok(comment)
}

/// List the authoritative comment records for a post in creation order
pub async fn list_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, commenter_id, message, created_at, time_to_expiry_ms
        FROM comments
        WHERE post_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}
