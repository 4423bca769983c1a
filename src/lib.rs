// src/lib.rs
// MovieHub - movie catalog browser with per-device saved history
//
// Architecture:
// - Domain-centric: entities and their invariants live in `domain`
// - Event-driven: services report what happened through the event bus
// - Explicit: repositories map data, services decide
// - Remote-gated: a maintenance flag can take over navigation at any time
// - Application Layer: commands and DTOs for UI consumers

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod app;
pub mod application;
pub mod integrations;
pub mod navigation;
pub mod session;

#[cfg(test)]
mod test_utils;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_history_entry,
    validate_history_key,
    validate_movie,
    // Identity
    DeviceId,
    DomainError,
    Genre,
    // History
    HistoryEntry,
    HistoryKey,
    // Movie
    Movie,
    MovieId,
    MovieSummary,
    ProductionCompany,
    User,
    UserId,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{AppConfig, AppwriteConfig, MaintenanceConfig, TmdbConfig};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    HistoryEntryCreated,
    HistoryEntryUpdated,
    HistoryToggleSkipped,
    HistoryWriteFailed,
    MaintenanceEntered,
    MaintenanceExited,
    MovieDetailsLoaded,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{AppwriteHistoryRepository, HistoryRepository, SqliteHistoryRepository};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    HistoryService,
    MaintenanceObserver,
    MovieDetailsController,
    MovieDetailsView,
    ScreenState,
    SkipReason,
    ToggleOutcome,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use app::build_app_state;
pub use application::AppState;

pub use application::commands;
pub use application::dto;

pub use navigation::{Navigator, Route};
pub use session::AuthSession;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    HttpFlagSource, MaintenanceFlagSource, MovieCatalog, TmdbClient, WatchFlagSource,
};
