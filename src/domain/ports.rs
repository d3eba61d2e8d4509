use async_trait::async_trait;
use thiserror::Error;

/// Failure of a single gateway call. Duplicates are kept apart from everything
/// else so callers can treat them as an expected outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("duplicate key")]
    DuplicateKey,

    #[error("{0}")]
    Other(String),
}

/// Persistence side of the upload: one table of users, unique on email.
#[async_trait]
pub trait UserGateway: Send {
    /// Creates the users table when it does not exist yet.
    async fn ensure_schema(&mut self) -> Result<(), GatewayError>;

    async fn insert(&mut self, name: &str, surname: &str, email: &str) -> Result<(), GatewayError>;
}
