// events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{HistoryKey, MovieId};

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a details screen has both its movie and its saved flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailsLoaded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub is_saved: bool,
}

impl MovieDetailsLoaded {
    pub fn new(movie_id: MovieId, is_saved: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            is_saved,
        }
    }
}

impl_domain_event!(MovieDetailsLoaded);

// ============================================================================
// HISTORY EVENTS
// ============================================================================

/// Emitted after the first save of a (device, movie, user) triple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entry_id: String,
    pub key: HistoryKey,
    pub is_saved: bool,
}

impl HistoryEntryCreated {
    pub fn new(entry_id: String, key: HistoryKey, is_saved: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entry_id,
            key,
            is_saved,
        }
    }
}

impl_domain_event!(HistoryEntryCreated);

/// Emitted when an existing entry's flag and snapshot are rewritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub entry_id: String,
    pub key: HistoryKey,
    pub is_saved: bool,
}

impl HistoryEntryUpdated {
    pub fn new(entry_id: String, key: HistoryKey, is_saved: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            entry_id,
            key,
            is_saved,
        }
    }
}

impl_domain_event!(HistoryEntryUpdated);

/// Emitted when a save action is dropped because a precondition is missing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryToggleSkipped {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub reason: String,
}

impl HistoryToggleSkipped {
    pub fn new(movie_id: MovieId, reason: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            reason,
        }
    }
}

impl_domain_event!(HistoryToggleSkipped);

/// Emitted when persisting a toggle fails; the local flag is left as set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryWriteFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub key: HistoryKey,
    pub desired: bool,
    pub error: String,
}

impl HistoryWriteFailed {
    pub fn new(key: HistoryKey, desired: bool, error: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            key,
            desired,
            error,
        }
    }
}

impl_domain_event!(HistoryWriteFailed);

// ============================================================================
// MAINTENANCE EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceEntered {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl MaintenanceEntered {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for MaintenanceEntered {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(MaintenanceEntered);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceExited {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
}

impl MaintenanceExited {
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
        }
    }
}

impl Default for MaintenanceExited {
    fn default() -> Self {
        Self::new()
    }
}

impl_domain_event!(MaintenanceExited);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeviceId, UserId};

    #[test]
    fn test_event_type_names() {
        assert_eq!(MaintenanceEntered::new().event_type(), "MaintenanceEntered");
        assert_eq!(
            MovieDetailsLoaded::new(MovieId(1), false).event_type(),
            "MovieDetailsLoaded"
        );
    }

    #[test]
    fn test_history_event_carries_key() {
        let key = HistoryKey::new(DeviceId::new("D1"), MovieId(42), UserId::new("U1"));
        let event = HistoryEntryCreated::new("doc-1".to_string(), key.clone(), true);
        assert_eq!(event.key, key);
        assert_eq!(event.event_type(), "HistoryEntryCreated");
    }
}
