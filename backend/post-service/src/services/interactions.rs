/// Interaction rules: likes, dislikes, and comments against a live post.
///
/// Every write couples the entity row with its counter or embedded-summary
/// effect in one transaction, so a caller can never observe a reaction
/// without its counter increment or a comment without its summary entry.
use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{comment_repo, post_repo, reaction_repo};
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentSummary, Reaction, ReactionKind};
use crate::status::{post_status, PostStatus};

const MAX_MESSAGE_CHARS: usize = 500;

/// Outcome of a successful react: the stored reaction and the post's
/// updated counter for that kind.
#[derive(Debug, Serialize)]
pub struct ReactionApplied {
    pub reaction: Reaction,
    pub count: i64,
}

#[derive(Clone)]
pub struct InteractionService {
    pool: PgPool,
}

impl InteractionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record a like or dislike.
    ///
    /// Gate order: post exists -> post not expired -> actor is not the
    /// owner -> no prior reaction of this kind. The uniqueness gate is the
    /// store's `(post_id, user_id, kind)` constraint, checked atomically
    /// with the insert, so two concurrent identical reacts cannot both
    /// succeed.
    pub async fn react(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionApplied> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound(post_id))?;

        let now = Utc::now();
        if post_status(post.expires_at, now) == PostStatus::Expired {
            return Err(AppError::PostExpired);
        }
        if post.owner_id == user_id {
            return Err(AppError::SelfInteraction(kind));
        }

        let time_to_expiry_ms = (post.expires_at - now).num_milliseconds();

        let mut tx = self.pool.begin().await?;

        let reaction =
            reaction_repo::insert_reaction(&mut *tx, post_id, user_id, kind, time_to_expiry_ms)
                .await
                .map_err(|e| map_unique_violation(e, kind))?;
        let count = post_repo::increment_reaction_count(&mut *tx, post_id, kind).await?;

        tx.commit().await?;

        tracing::debug!(%post_id, %user_id, kind = %kind, count, "reaction recorded");

        Ok(ReactionApplied { reaction, count })
    }

    /// Attach a comment to a live post.
    ///
    /// No ownership restriction and no uniqueness restriction: the owner
    /// may comment, and any user may comment repeatedly.
    pub async fn comment(&self, post_id: Uuid, user_id: Uuid, message: &str) -> Result<Comment> {
        let post = post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound(post_id))?;

        let now = Utc::now();
        if post_status(post.expires_at, now) == PostStatus::Expired {
            return Err(AppError::PostExpired);
        }
        validate_message(message)?;

        let time_to_expiry_ms = (post.expires_at - now).num_milliseconds();

        let mut tx = self.pool.begin().await?;

        let comment =
            comment_repo::insert_comment(&mut *tx, post_id, user_id, message, time_to_expiry_ms)
                .await?;
        let summary = CommentSummary {
            commenter_id: comment.commenter_id,
            message: comment.message.clone(),
            created_at: comment.created_at,
        };
        post_repo::append_comment_summary(&mut *tx, post_id, &summary).await?;

        tx.commit().await?;

        tracing::debug!(%post_id, %user_id, "comment recorded");

        Ok(comment)
    }

    /// Read the authoritative comment records for a post.
    pub async fn comments_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        post_repo::find_post_by_id(&self.pool, post_id)
            .await?
            .ok_or(AppError::NotFound(post_id))?;

        let comments = comment_repo::list_for_post(&self.pool, post_id).await?;
        Ok(comments)
    }
}

/// A message must contain something other than whitespace and fit the
/// 500-character cap; it is stored as given, untrimmed.
fn validate_message(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(AppError::InvalidMessage("message is empty".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::InvalidMessage(format!(
            "message exceeds {} characters",
            MAX_MESSAGE_CHARS
        )));
    }
    Ok(())
}

fn map_unique_violation(err: sqlx::Error, kind: ReactionKind) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::DuplicateInteraction(kind)
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_message_is_rejected() {
        assert!(matches!(
            validate_message("   \t\n  "),
            Err(AppError::InvalidMessage(_))
        ));
    }

    #[test]
    fn empty_message_is_rejected() {
        assert!(matches!(
            validate_message(""),
            Err(AppError::InvalidMessage(_))
        ));
    }

    #[test]
    fn message_of_exactly_500_chars_is_accepted() {
        let message = "x".repeat(500);
        assert!(validate_message(&message).is_ok());
    }

    #[test]
    fn message_of_501_chars_is_rejected() {
        let message = "x".repeat(501);
        assert!(matches!(
            validate_message(&message),
            Err(AppError::InvalidMessage(_))
        ));
    }

    #[test]
    fn multibyte_messages_are_counted_in_characters() {
        // 500 three-byte characters must pass the character cap.
        let message = "日".repeat(500);
        assert!(validate_message(&message).is_ok());
    }
}
