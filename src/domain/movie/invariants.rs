use super::entity::Movie;
use crate::domain::{DomainError, DomainResult};

/// Validates the fields a movie snapshot must carry to be stored
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    if movie.id.0 == 0 {
        return Err(DomainError::InvariantViolation(
            "Movie id must be positive".to_string(),
        ));
    }

    if movie.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }

    Ok(())
}
