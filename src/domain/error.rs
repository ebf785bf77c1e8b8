//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of forest/tree rules.
/// These are independent of I/O and session concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown tree species: {0}")]
    UnknownSpecies(String),

    #[error("tree number {0} does not exist")]
    TreeNotFound(i64),
}
