//! Shared test utilities.
//!
//! In-memory and failing history repositories plus a few fixtures, so
//! service and controller tests don't need a database or network.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::application::AppState;
use crate::domain::{DeviceId, HistoryEntry, HistoryKey, Movie, MovieId, UserId};
use crate::error::{AppError, AppResult};
use crate::events::EventBus;
use crate::integrations::{MaintenanceFlagSource, MovieCatalog};
use crate::navigation::Navigator;
use crate::repositories::HistoryRepository;
use crate::services::{HistoryService, MaintenanceObserver};
use crate::session::AuthSession;

/// A fully populated movie record
pub fn sample_movie(id: u64) -> Movie {
    let json = serde_json::json!({
        "id": id,
        "title": "The Answer",
        "poster_path": "/answer.jpg",
        "overview": "Deep Thought computes for seven and a half million years.",
        "release_date": "1979-10-12",
        "runtime": 109,
        "vote_average": 7.6,
        "vote_count": 3120,
        "genres": [
            {"id": 878, "name": "Science Fiction"},
            {"id": 35, "name": "Comedy"}
        ],
        "budget": 2500000,
        "revenue": 104600000,
        "production_companies": [
            {"id": 1, "name": "Magrathea"},
            {"id": 2, "name": "Sirius Cybernetics"}
        ]
    });
    serde_json::from_value(json).expect("fixture is valid")
}

pub fn sample_key(device: &str, movie: u64, user: &str) -> HistoryKey {
    HistoryKey::new(DeviceId::new(device), MovieId(movie), UserId::new(user))
}

/// Map-backed repository that counts writes
#[derive(Default)]
pub struct InMemoryHistoryRepository {
    entries: Mutex<HashMap<HistoryKey, HistoryEntry>>,
    writes: AtomicUsize,
}

impl InMemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.entries.lock().unwrap().values().cloned().collect()
    }

    pub fn insert(&self, entry: HistoryEntry) {
        self.entries.lock().unwrap().insert(entry.key.clone(), entry);
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn get(&self, key: &HistoryKey) -> AppResult<Option<HistoryEntry>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn create(&self, entry: &HistoryEntry) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        if entries.contains_key(&entry.key) {
            return Err(AppError::Other("duplicate key".to_string()));
        }
        entries.insert(entry.key.clone(), entry.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, entry: &HistoryEntry) -> AppResult<()> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get_mut(&entry.key) {
            Some(existing) if existing.id == entry.id => {
                *existing = entry.clone();
                self.writes.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            _ => Err(AppError::NotFound),
        }
    }

    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self
            .entries
            .lock()
            .unwrap()
            .values()
            .filter(|e| &e.key.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(entries)
    }
}

/// Reads succeed (always empty), writes fail
pub struct FailingHistoryRepository;

#[async_trait]
impl HistoryRepository for FailingHistoryRepository {
    async fn get(&self, _key: &HistoryKey) -> AppResult<Option<HistoryEntry>> {
        Ok(None)
    }

    async fn create(&self, _entry: &HistoryEntry) -> AppResult<()> {
        Err(AppError::Other("backend unavailable".to_string()))
    }

    async fn update(&self, _entry: &HistoryEntry) -> AppResult<()> {
        Err(AppError::Other("backend unavailable".to_string()))
    }

    async fn list_by_user(&self, _user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        Ok(Vec::new())
    }
}

/// Wraps the in-memory repository; writes wait until `release` is called
#[derive(Default)]
pub struct GatedHistoryRepository {
    pub inner: InMemoryHistoryRepository,
    gate: Notify,
}

impl GatedHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl HistoryRepository for GatedHistoryRepository {
    async fn get(&self, key: &HistoryKey) -> AppResult<Option<HistoryEntry>> {
        self.inner.get(key).await
    }

    async fn create(&self, entry: &HistoryEntry) -> AppResult<()> {
        self.gate.notified().await;
        self.inner.create(entry).await
    }

    async fn update(&self, entry: &HistoryEntry) -> AppResult<()> {
        self.gate.notified().await;
        self.inner.update(entry).await
    }

    async fn list_by_user(&self, user_id: &UserId) -> AppResult<Vec<HistoryEntry>> {
        self.inner.list_by_user(user_id).await
    }
}

/// Application state on device "D1" with nobody signed in
pub fn test_app_state(
    catalog: Arc<dyn MovieCatalog>,
    history_repo: Arc<dyn HistoryRepository>,
    flag_source: Arc<dyn MaintenanceFlagSource>,
) -> AppState {
    let event_bus = Arc::new(EventBus::new());
    let navigator = Arc::new(Navigator::new());

    AppState {
        history_service: Arc::new(HistoryService::new(history_repo, event_bus.clone())),
        maintenance_observer: Arc::new(MaintenanceObserver::new(
            flag_source,
            navigator.clone(),
            event_bus.clone(),
        )),
        session: Arc::new(AuthSession::new()),
        device_id: DeviceId::new("D1"),
        catalog,
        navigator,
        event_bus,
        active_details: Mutex::new(None),
    }
}
