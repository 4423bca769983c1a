// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic (create-or-update lives in HistoryService)
// - NO event emission

pub mod appwrite_history_repository;
pub mod history_repository;

pub use appwrite_history_repository::AppwriteHistoryRepository;
pub use history_repository::{HistoryRepository, SqliteHistoryRepository};
