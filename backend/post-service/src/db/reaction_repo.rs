use crate::models::{Reaction, ReactionKind};
use sqlx::PgConnection;
use uuid::Uuid;

/// Insert a reaction. The `(post_id, user_id, kind)` uniqueness constraint
/// is enforced by the store; a violation surfaces as a database error for
/// the service layer to map.
pub async fn insert_reaction(
    conn: &mut PgConnection,
    post_id: Uuid,
    user_id: Uuid,
    kind: ReactionKind,
    time_to_expiry_ms: i64,
) -> Result<Reaction, sqlx::Error> {
    let reaction = sqlx::query_as::<_, Reaction>(
        r#"
        INSERT INTO reactions (post_id, user_id, kind, time_to_expiry_ms)
        VALUES ($1, $2, $3, $4)
        RETURNING id, post_id, user_id, kind, created_at, time_to_expiry_ms
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(kind)
    .bind(time_to_expiry_ms)
    .fetch_one(&mut *conn)
    .await?;

    Ok(reaction)
}
