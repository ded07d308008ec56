/// Engagement ranking: the single post with maximal combined interest.
///
/// The storage query only filters; the selection itself is a pure fold so
/// the ranking rule stays testable without a database.
use chrono::Utc;
use sqlx::PgPool;

use crate::db::post_repo;
use crate::error::Result;
use crate::models::{Post, PostWithStatus, Topic};
use crate::status::StatusFilter;

/// Combined engagement of a post.
pub fn interest(post: &Post) -> i64 {
    post.likes_count + post.dislikes_count
}

/// Select the candidate with maximal interest. Ties are broken by the most
/// recent `posted_at`, then by `id`, so the result is deterministic for any
/// candidate order.
pub fn pick_top_interest(posts: Vec<Post>) -> Option<Post> {
    posts.into_iter().max_by(|a, b| {
        interest(a)
            .cmp(&interest(b))
            .then_with(|| a.posted_at.cmp(&b.posted_at))
            .then_with(|| a.id.cmp(&b.id))
    })
}

#[derive(Clone)]
pub struct RankingService {
    pool: PgPool,
}

impl RankingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Top-1 post by interest under the given filters, or `None` when
    /// nothing matches.
    pub async fn top_interest(
        &self,
        topic: Option<Topic>,
        filter: StatusFilter,
    ) -> Result<Option<PostWithStatus>> {
        let now = Utc::now();
        let (live_after, expired_before) = filter.bounds(now);

        let candidates =
            post_repo::find_for_ranking(&self.pool, topic, live_after, expired_before).await?;

        Ok(pick_top_interest(candidates).map(|p| p.with_status(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn post(likes: i64, dislikes: i64, posted_at: DateTime<Utc>) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "title".to_string(),
            text: "text".to_string(),
            topics: vec![Topic::Tech],
            owner_id: Uuid::new_v4(),
            posted_at,
            expires_at: posted_at + Duration::minutes(60),
            likes_count: likes,
            dislikes_count: dislikes,
            comments: Json(Vec::new()),
        }
    }

    #[test]
    fn empty_candidates_yield_none() {
        assert!(pick_top_interest(Vec::new()).is_none());
    }

    #[test]
    fn highest_combined_interest_wins() {
        let now = Utc::now();
        let modest = post(3, 0, now);
        let divisive = post(2, 4, now - Duration::minutes(5));

        let winner = pick_top_interest(vec![modest, divisive.clone()]).unwrap();
        assert_eq!(winner.id, divisive.id);
        assert_eq!(interest(&winner), 6);
    }

    #[test]
    fn interest_ties_break_toward_most_recent() {
        let now = Utc::now();
        let older = post(2, 1, now - Duration::minutes(10));
        let newer = post(1, 2, now);

        let winner = pick_top_interest(vec![newer.clone(), older]).unwrap();
        assert_eq!(winner.id, newer.id);
    }

    #[test]
    fn selection_is_order_independent() {
        let now = Utc::now();
        let a = post(5, 0, now - Duration::minutes(1));
        let b = post(0, 5, now - Duration::minutes(1));

        let forward = pick_top_interest(vec![a.clone(), b.clone()]).unwrap();
        let reverse = pick_top_interest(vec![b, a]).unwrap();
        assert_eq!(forward.id, reverse.id);
    }
}
