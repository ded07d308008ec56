/// HTTP handlers for the post API
///
/// - Posts: create, read, topic and status filtered lists, top interest
/// - Interactions: like, dislike, comment
pub mod interactions;
pub mod posts;

// Re-export handler functions at module level
pub use interactions::{comment_post, dislike_post, like_post, list_post_comments};
pub use posts::{
    create_post, get_by_topic, get_post, highest_interest, list_active, list_active_by_topic,
    list_expired, list_expired_by_topic, list_posts, search_by_topics,
};
