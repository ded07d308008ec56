use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use sqlx::types::Json;
use uuid::Uuid;

use crate::status::{post_status, PostStatus};

/// Topic a post can be filed under. Mirrors the `topic` enum in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "topic")]
pub enum Topic {
    Politics,
    Health,
    Sport,
    Tech,
}

impl PgHasArrayType for Topic {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_topic")
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Topic::Politics => "Politics",
            Topic::Health => "Health",
            Topic::Sport => "Sport",
            Topic::Tech => "Tech",
        };
        f.write_str(name)
    }
}

/// Reaction kind. Mirrors the `reaction_kind` enum in Postgres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "reaction_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Dislike => "dislike",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized comment entry embedded on the post for the read path.
/// Appended in the same transaction as the authoritative comment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentSummary {
    pub commenter_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Post entity - a time-bounded message with topics and engagement counters
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub topics: Vec<Topic>,
    pub owner_id: Uuid,
    pub posted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub comments: Json<Vec<CommentSummary>>,
}

impl Post {
    /// Stamp the derived status for a response at `now`.
    pub fn with_status(self, now: DateTime<Utc>) -> PostWithStatus {
        let status = post_status(self.expires_at, now);
        PostWithStatus { post: self, status }
    }
}

/// A post as returned to callers: the stored fields plus derived status.
#[derive(Debug, Clone, Serialize)]
pub struct PostWithStatus {
    #[serde(flatten)]
    pub post: Post,
    pub status: PostStatus,
}

/// Reaction entity - one user's like or dislike of a post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reaction {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
    /// Milliseconds left until the post's expiry when the reaction landed.
    pub time_to_expiry_ms: i64,
}

/// Comment entity - immutable once created, never deleted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub commenter_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub time_to_expiry_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_post(expires_in: Duration) -> Post {
        let now = Utc::now();
        Post {
            id: Uuid::new_v4(),
            title: "Budget Cuts".to_string(),
            text: "The council voted again.".to_string(),
            topics: vec![Topic::Politics],
            owner_id: Uuid::new_v4(),
            posted_at: now,
            expires_at: now + expires_in,
            likes_count: 0,
            dislikes_count: 0,
            comments: Json(Vec::new()),
        }
    }

    #[test]
    fn with_status_stamps_live_for_future_expiry() {
        let post = sample_post(Duration::minutes(60));
        let stamped = post.with_status(Utc::now());
        assert_eq!(stamped.status, PostStatus::Live);
    }

    #[test]
    fn with_status_stamps_expired_for_past_expiry() {
        let post = sample_post(Duration::minutes(-1));
        let stamped = post.with_status(Utc::now());
        assert_eq!(stamped.status, PostStatus::Expired);
    }

    #[test]
    fn post_with_status_serializes_flattened() {
        let post = sample_post(Duration::minutes(60));
        let stamped = post.with_status(Utc::now());
        let json = serde_json::to_value(&stamped).unwrap();

        assert!(json.get("title").is_some());
        assert_eq!(json["status"], "Live");
        assert!(json["comments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn reaction_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ReactionKind::Dislike).unwrap(),
            serde_json::Value::String("dislike".to_string())
        );
        assert_eq!(ReactionKind::Like.as_str(), "like");
    }
}
