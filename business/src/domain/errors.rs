/// Errors raised by the remote cart storage.
/// Variants use code-style identifiers so callers can translate them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository.not_found")]
    NotFound,
    #[error("repository.duplicated")]
    Duplicated,
    #[error("repository.database_error")]
    DatabaseError,
    #[error("repository.unreachable")]
    Unreachable,
}
