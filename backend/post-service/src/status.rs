/// Derived post lifecycle status
///
/// Status is never persisted: it is recomputed from the post's expiry
/// timestamp and the clock at every read, so a post flips Live -> Expired
/// exactly once without any background job.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Temporal status of a post at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostStatus {
    Live,
    Expired,
}

/// Compute a post's status at `now`. The boundary instant is Live.
pub fn post_status(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> PostStatus {
    if now <= expires_at {
        PostStatus::Live
    } else {
        PostStatus::Expired
    }
}

/// Temporal filter applied by list and ranking queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    Live,
    Expired,
    All,
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

impl StatusFilter {
    /// Query-side bounds: `(live_after, expired_before)`.
    ///
    /// `Live` selects `expires_at > now`, `Expired` selects
    /// `expires_at <= now`, `All` applies no temporal predicate.
    pub fn bounds(self, now: DateTime<Utc>) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        match self {
            StatusFilter::Live => (Some(now), None),
            StatusFilter::Expired => (None, Some(now)),
            StatusFilter::All => (None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn status_is_live_strictly_before_expiry() {
        let expires = Utc::now();
        let before = expires - Duration::seconds(1);
        assert_eq!(post_status(expires, before), PostStatus::Live);
    }

    #[test]
    fn status_boundary_instant_is_live() {
        let expires = Utc::now();
        assert_eq!(post_status(expires, expires), PostStatus::Live);
    }

    #[test]
    fn status_is_expired_one_tick_after_expiry() {
        let expires = Utc::now();
        let after = expires + Duration::milliseconds(1);
        assert_eq!(post_status(expires, after), PostStatus::Expired);
    }

    #[test]
    fn filter_bounds_cover_all_three_cases() {
        let now = Utc::now();
        assert_eq!(StatusFilter::Live.bounds(now), (Some(now), None));
        assert_eq!(StatusFilter::Expired.bounds(now), (None, Some(now)));
        assert_eq!(StatusFilter::All.bounds(now), (None, None));
    }
}
