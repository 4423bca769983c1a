use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DeviceId, Movie, MovieId, UserId};

/// Composite identity of a history entry
///
/// At most one entry exists per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryKey {
    pub device_id: DeviceId,
    pub movie_id: MovieId,
    pub user_id: UserId,
}

impl HistoryKey {
    pub fn new(device_id: DeviceId, movie_id: MovieId, user_id: UserId) -> Self {
        Self {
            device_id,
            movie_id,
            user_id,
        }
    }
}

/// A user's saved/unsaved decision for one movie on one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Document identifier assigned on creation
    pub id: String,

    #[serde(flatten)]
    pub key: HistoryKey,

    pub is_saved: bool,

    /// Copy of the movie as it was when last toggled
    pub movie: Movie,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Create a new entry with a fresh document id
    pub fn new(key: HistoryKey, is_saved: bool, movie: Movie) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            key,
            is_saved,
            movie,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the flag and refresh the snapshot
    pub fn apply(&mut self, is_saved: bool, movie: Movie) {
        self.is_saved = is_saved;
        self.movie = movie;
        self.updated_at = Utc::now();
    }
}
