/// Database access layer
///
/// Repository modules own all SQL; business rules live in `services`.
/// Write-path functions take `&mut PgConnection` so the service layer can
/// compose them into a single transaction.
pub mod comment_repo;
pub mod post_repo;
pub mod reaction_repo;
