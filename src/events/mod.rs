// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod types;

pub use bus::{EventBus, EventLogEntry};

pub use types::{
    DomainEvent,
    // History
    HistoryEntryCreated,
    HistoryEntryUpdated,
    HistoryToggleSkipped,
    HistoryWriteFailed,
    // Maintenance
    MaintenanceEntered,
    MaintenanceExited,
    // Catalog
    MovieDetailsLoaded,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
