// src/services/history_service.rs
//
// Saved-movie history
//
// Owns the create-or-update decision for a (device, movie, user) entry.
// Repositories only map data; events are emitted here after a write lands.

use std::sync::Arc;

use crate::domain::{validate_history_entry, validate_history_key, HistoryEntry, HistoryKey, Movie, UserId};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, HistoryEntryCreated, HistoryEntryUpdated};
use crate::repositories::HistoryRepository;

pub struct HistoryService {
    history_repo: Arc<dyn HistoryRepository>,
    event_bus: Arc<EventBus>,
}

impl HistoryService {
    pub fn new(history_repo: Arc<dyn HistoryRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            history_repo,
            event_bus,
        }
    }

    pub async fn get_entry(&self, key: &HistoryKey) -> AppResult<Option<HistoryEntry>> {
        validate_history_key(key).map_err(AppError::Domain)?;
        self.history_repo.get(key).await
    }

    /// Whether the triple is currently saved; no entry means not saved
    pub async fn is_saved(&self, key: &HistoryKey) -> AppResult<bool> {
        Ok(self
            .get_entry(key)
            .await?
            .map(|entry| entry.is_saved)
            .unwrap_or(false))
    }

    /// Persist the desired flag with a fresh movie snapshot
    ///
    /// Creates the entry on first use, otherwise flips the existing one and
    /// replaces its snapshot.
    pub async fn set_saved(
        &self,
        key: HistoryKey,
        is_saved: bool,
        movie: Movie,
    ) -> AppResult<HistoryEntry> {
        validate_history_key(&key).map_err(AppError::Domain)?;

        match self.history_repo.get(&key).await? {
            Some(mut entry) => {
                entry.apply(is_saved, movie);
                validate_history_entry(&entry).map_err(AppError::Domain)?;
                self.history_repo.update(&entry).await?;

                log::info!(
                    "History {} updated: movie {} saved={}",
                    entry.id,
                    entry.key.movie_id,
                    entry.is_saved
                );
                self.event_bus.emit(HistoryEntryUpdated::new(
                    entry.id.clone(),
                    entry.key.clone(),
                    entry.is_saved,
                ));
                Ok(entry)
            }
            None => {
                let entry = HistoryEntry::new(key, is_saved, movie);
                validate_history_entry(&entry).map_err(AppError::Domain)?;
                self.history_repo.create(&entry).await?;

                log::info!(
                    "History {} created: movie {} saved={}",
                    entry.id,
                    entry.key.movie_id,
                    entry.is_saved
                );
                self.event_bus.emit(HistoryEntryCreated::new(
                    entry.id.clone(),
                    entry.key.clone(),
                    entry.is_saved,
                ));
                Ok(entry)
            }
        }
    }

    /// Every entry of a user, most recent first
    pub async fn list_for_user(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        self.history_repo.list_by_user(user_id).await
    }

    /// Only the entries currently marked saved
    pub async fn list_saved(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        let entries = self.list_for_user(user_id).await?;
        Ok(entries.into_iter().filter(|entry| entry.is_saved).collect())
    }
}
