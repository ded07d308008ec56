/// Business logic layer
pub mod interactions;
pub mod posts;
pub mod ranking;

pub use interactions::{InteractionService, ReactionApplied};
pub use posts::PostService;
pub use ranking::RankingService;
