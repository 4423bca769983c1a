use super::entity::{HistoryEntry, HistoryKey};
use crate::domain::{validate_movie, DomainError, DomainResult};

/// Every component of the key must be present
pub fn validate_history_key(key: &HistoryKey) -> DomainResult<()> {
    if key.device_id.as_str().trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Device id cannot be empty".to_string(),
        ));
    }

    if key.user_id.as_str().trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "User id cannot be empty".to_string(),
        ));
    }

    if key.movie_id.0 == 0 {
        return Err(DomainError::InvariantViolation(
            "Movie id must be positive".to_string(),
        ));
    }

    Ok(())
}

/// Validates HistoryEntry invariants
pub fn validate_history_entry(entry: &HistoryEntry) -> DomainResult<()> {
    validate_history_key(&entry.key)?;
    validate_movie(&entry.movie)?;

    if entry.movie.id != entry.key.movie_id {
        return Err(DomainError::InvariantViolation(format!(
            "Snapshot of movie {} stored under movie {}",
            entry.movie.id, entry.key.movie_id
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceId, Movie, MovieId, UserId};

    #[test]
    fn test_valid_key() {
        let key = HistoryKey::new(DeviceId::new("D1"), MovieId(42), UserId::new("U1"));
        assert!(validate_history_key(&key).is_ok());
    }

    #[test]
    fn test_empty_user_fails() {
        let key = HistoryKey::new(DeviceId::new("D1"), MovieId(42), UserId::new(""));
        assert!(validate_history_key(&key).is_err());
    }

    #[test]
    fn test_empty_device_fails() {
        let key = HistoryKey::new(DeviceId::new(" "), MovieId(42), UserId::new("U1"));
        assert!(validate_history_key(&key).is_err());
    }

    #[test]
    fn test_mismatched_snapshot_fails() {
        let key = HistoryKey::new(DeviceId::new("D1"), MovieId(42), UserId::new("U1"));
        let entry = HistoryEntry::new(key, true, Movie::new(MovieId(43), "Wrong One"));
        assert!(validate_history_entry(&entry).is_err());
    }
}
