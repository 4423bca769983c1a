// src/domain/mod.rs
//
// Domain Root
//
// All other modules import domain types from `crate::domain::*`.

pub mod history;
pub mod identity;
pub mod movie;

pub use history::{validate_history_entry, validate_history_key, HistoryEntry, HistoryKey};
pub use identity::{DeviceId, MovieId, User, UserId};
pub use movie::{validate_movie, Genre, Movie, MovieSummary, ProductionCompany};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
