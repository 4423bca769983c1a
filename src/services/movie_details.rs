// src/services/movie_details.rs
//
// Movie details screen controller
//
// - load(): catalog read and history read run concurrently; the screen is
//   ready only once both have resolved
// - save(): optimistic. The local flag flips before the write starts and is
//   never rolled back; a failed write is logged and reported, nothing more
// - missing movie or missing user turns save() into a logged no-op

use serde::Serialize;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{DeviceId, HistoryEntry, HistoryKey, Movie, MovieId, UserId};
use crate::events::{EventBus, HistoryToggleSkipped, HistoryWriteFailed, MovieDetailsLoaded};
use crate::integrations::MovieCatalog;
use crate::services::history_service::HistoryService;
use crate::services::movie_details_view::MovieDetailsView;
use crate::session::AuthSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    Loading,
    Ready,
    /// The catalog read failed; nothing to show and no retry
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MovieNotLoaded,
    NotSignedIn,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MovieNotLoaded => f.write_str("Movie data is not available"),
            SkipReason::NotSignedIn => f.write_str("User not logged in"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ToggleOutcome {
    Persisted(HistoryEntry),
    Skipped(SkipReason),
    /// Local flag kept the desired value, backend did not
    PersistFailed(String),
}

struct ScreenData {
    state: ScreenState,
    movie: Option<Movie>,
    is_saved: bool,
}

pub struct MovieDetailsController {
    movie_id: MovieId,
    device_id: DeviceId,
    catalog: Arc<dyn MovieCatalog>,
    history: Arc<HistoryService>,
    session: Arc<AuthSession>,
    event_bus: Arc<EventBus>,
    data: RwLock<ScreenData>,
}

impl MovieDetailsController {
    pub fn new(
        movie_id: MovieId,
        device_id: DeviceId,
        catalog: Arc<dyn MovieCatalog>,
        history: Arc<HistoryService>,
        session: Arc<AuthSession>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            movie_id,
            device_id,
            catalog,
            history,
            session,
            event_bus,
            data: RwLock::new(ScreenData {
                state: ScreenState::Loading,
                movie: None,
                is_saved: false,
            }),
        }
    }

    pub fn movie_id(&self) -> MovieId {
        self.movie_id
    }

    pub fn state(&self) -> ScreenState {
        self.read_data().state
    }

    pub fn movie(&self) -> Option<Movie> {
        self.read_data().movie.clone()
    }

    /// Local saved flag as currently shown
    pub fn is_saved(&self) -> bool {
        self.read_data().is_saved
    }

    /// Render model, once the movie is loaded
    pub fn view(&self) -> Option<MovieDetailsView> {
        let data = self.read_data();
        data.movie
            .as_ref()
            .map(|movie| MovieDetailsView::new(movie, data.is_saved))
    }

    /// Fetch the movie and its saved flag
    pub async fn load(&self) -> ScreenState {
        let user_id = self.session.current_user_id();

        let (movie, is_saved) = tokio::join!(
            self.catalog.fetch_movie_details(self.movie_id),
            self.read_saved_flag(user_id),
        );

        let movie = match movie {
            Ok(movie) => Some(movie),
            Err(e) => {
                log::warn!("Failed to fetch movie {}: {}", self.movie_id, e);
                None
            }
        };

        let state = if movie.is_some() {
            ScreenState::Ready
        } else {
            ScreenState::Unavailable
        };

        {
            let mut data = self.data.write().unwrap_or_else(PoisonError::into_inner);
            data.state = state;
            data.movie = movie;
            data.is_saved = is_saved;
        }

        if state == ScreenState::Ready {
            self.event_bus
                .emit(MovieDetailsLoaded::new(self.movie_id, is_saved));
        }

        state
    }

    /// Flip the saved flag
    pub async fn toggle(&self) -> ToggleOutcome {
        let desired = !self.is_saved();
        self.save(desired).await
    }

    /// Set the saved flag locally, then persist it
    pub async fn save(&self, desired: bool) -> ToggleOutcome {
        let Some(movie) = self.movie() else {
            return self.skip(SkipReason::MovieNotLoaded);
        };
        let Some(user_id) = self.session.current_user_id() else {
            return self.skip(SkipReason::NotSignedIn);
        };

        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .is_saved = desired;

        log::debug!(
            "movie {} device {} user {} saved={}",
            self.movie_id,
            self.device_id,
            user_id,
            desired
        );

        let key = HistoryKey::new(self.device_id.clone(), self.movie_id, user_id);
        match self.history.set_saved(key.clone(), desired, movie).await {
            Ok(entry) => ToggleOutcome::Persisted(entry),
            Err(e) => {
                log::error!("Failed to persist saved flag for movie {}: {}", self.movie_id, e);
                self.event_bus
                    .emit(HistoryWriteFailed::new(key, desired, e.to_string()));
                ToggleOutcome::PersistFailed(e.to_string())
            }
        }
    }

    async fn read_saved_flag(&self, user_id: Option<UserId>) -> bool {
        let Some(user_id) = user_id else {
            return false;
        };

        let key = HistoryKey::new(self.device_id.clone(), self.movie_id, user_id);
        match self.history.is_saved(&key).await {
            Ok(is_saved) => is_saved,
            Err(e) => {
                log::warn!("Failed to read history for movie {}: {}", self.movie_id, e);
                false
            }
        }
    }

    fn skip(&self, reason: SkipReason) -> ToggleOutcome {
        log::info!("Save skipped for movie {}: {}", self.movie_id, reason);
        self.event_bus
            .emit(HistoryToggleSkipped::new(self.movie_id, reason.to_string()));
        ToggleOutcome::Skipped(reason)
    }

    fn read_data(&self) -> std::sync::RwLockReadGuard<'_, ScreenData> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::error::AppError;
    use crate::integrations::catalog::MockMovieCatalog;
    use crate::repositories::HistoryRepository;
    use crate::test_utils::{
        sample_key, sample_movie, FailingHistoryRepository, GatedHistoryRepository,
        InMemoryHistoryRepository,
    };
    use std::time::Duration;

    fn catalog_returning_movie() -> Arc<dyn MovieCatalog> {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_fetch_movie_details()
            .returning(|id| Ok(sample_movie(id.0)));
        Arc::new(catalog)
    }

    fn catalog_failing() -> Arc<dyn MovieCatalog> {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_fetch_movie_details()
            .returning(|_| Err(AppError::Other("network down".to_string())));
        Arc::new(catalog)
    }

    fn session(user: Option<&str>) -> Arc<AuthSession> {
        Arc::new(match user {
            Some(uid) => AuthSession::signed_in(User::new(UserId::new(uid))),
            None => AuthSession::new(),
        })
    }

    fn controller(
        catalog: Arc<dyn MovieCatalog>,
        repo: Arc<dyn HistoryRepository>,
        user: Option<&str>,
    ) -> (Arc<EventBus>, MovieDetailsController) {
        let bus = Arc::new(EventBus::new());
        let history = Arc::new(HistoryService::new(repo, bus.clone()));
        let controller = MovieDetailsController::new(
            MovieId(42),
            DeviceId::new("D1"),
            catalog,
            history,
            session(user),
            bus.clone(),
        );
        (bus, controller)
    }

    #[tokio::test]
    async fn test_load_reads_movie_and_flag() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        repo.insert(HistoryEntry::new(
            sample_key("D1", 42, "U1"),
            true,
            sample_movie(42),
        ));
        let (bus, controller) = controller(catalog_returning_movie(), repo, Some("U1"));

        assert_eq!(controller.state(), ScreenState::Loading);
        assert_eq!(controller.load().await, ScreenState::Ready);

        assert!(controller.is_saved());
        assert_eq!(controller.view().unwrap().save_icon, "save-as");
        assert_eq!(bus.get_event_log()[0].event_type, "MovieDetailsLoaded");
    }

    #[tokio::test]
    async fn test_catalog_failure_leaves_screen_unavailable() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (_bus, controller) = controller(catalog_failing(), repo, Some("U1"));

        assert_eq!(controller.load().await, ScreenState::Unavailable);
        assert!(controller.view().is_none());
    }

    #[tokio::test]
    async fn test_catalog_is_read_once_per_load() {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_fetch_movie_details()
            .withf(|id| *id == MovieId(42))
            .times(1)
            .returning(|id| Ok(sample_movie(id.0)));
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (_bus, controller) = controller(Arc::new(catalog), repo, None);

        controller.load().await;

        assert!(!controller.is_saved(), "signed-out users see unsaved");
    }

    #[tokio::test]
    async fn test_save_creates_entry_for_new_triple() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (_bus, controller) = controller(catalog_returning_movie(), repo.clone(), Some("U1"));
        controller.load().await;

        let outcome = controller.toggle().await;

        assert!(matches!(outcome, ToggleOutcome::Persisted(_)));
        assert!(controller.is_saved());
        let entries = repo.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, sample_key("D1", 42, "U1"));
        assert!(entries[0].is_saved);
    }

    #[tokio::test]
    async fn test_unsave_flips_existing_entry_and_refreshes_snapshot() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let mut stale = sample_movie(42);
        stale.title = "Stale Title".to_string();
        repo.insert(HistoryEntry::new(sample_key("D1", 42, "U1"), true, stale));
        let (_bus, controller) = controller(catalog_returning_movie(), repo.clone(), Some("U1"));
        controller.load().await;

        controller.toggle().await;

        assert!(!controller.is_saved());
        let entries = repo.snapshot();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_saved);
        assert_eq!(entries[0].movie.title, "The Answer");
    }

    #[tokio::test]
    async fn test_toggle_without_user_is_noop() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (bus, controller) = controller(catalog_returning_movie(), repo.clone(), None);
        controller.load().await;

        let outcome = controller.save(true).await;

        assert!(matches!(
            outcome,
            ToggleOutcome::Skipped(SkipReason::NotSignedIn)
        ));
        assert!(!controller.is_saved());
        assert_eq!(repo.write_count(), 0);
        assert!(bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "HistoryToggleSkipped"));
    }

    #[tokio::test]
    async fn test_toggle_without_movie_is_noop() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (_bus, controller) = controller(catalog_failing(), repo.clone(), Some("U1"));
        controller.load().await;

        let outcome = controller.save(true).await;

        assert!(matches!(
            outcome,
            ToggleOutcome::Skipped(SkipReason::MovieNotLoaded)
        ));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_toggle_before_load_is_noop() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (_bus, controller) = controller(catalog_returning_movie(), repo.clone(), Some("U1"));

        let outcome = controller.save(true).await;

        assert!(matches!(
            outcome,
            ToggleOutcome::Skipped(SkipReason::MovieNotLoaded)
        ));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_optimistic_flag() {
        let (bus, controller) = controller(
            catalog_returning_movie(),
            Arc::new(FailingHistoryRepository),
            Some("U1"),
        );
        controller.load().await;

        let outcome = controller.save(true).await;

        assert!(matches!(outcome, ToggleOutcome::PersistFailed(_)));
        assert!(controller.is_saved(), "no rollback on failure");
        assert!(bus
            .get_event_log()
            .iter()
            .any(|e| e.event_type == "HistoryWriteFailed"));
    }

    #[tokio::test]
    async fn test_local_flag_flips_before_write_completes() {
        let repo = Arc::new(GatedHistoryRepository::new());
        let (_bus, controller) = controller(catalog_returning_movie(), repo.clone(), Some("U1"));
        let controller = Arc::new(controller);
        controller.load().await;

        let background = Arc::clone(&controller);
        let pending = tokio::spawn(async move { background.save(true).await });

        tokio::time::timeout(Duration::from_secs(5), async {
            while !controller.is_saved() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("local flag should flip without waiting for the backend");
        assert_eq!(repo.inner.write_count(), 0);

        repo.release();
        let outcome = pending.await.unwrap();

        assert!(matches!(outcome, ToggleOutcome::Persisted(_)));
        assert_eq!(repo.inner.write_count(), 1);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_remote_flag() {
        let repo = Arc::new(InMemoryHistoryRepository::new());
        let (_bus, controller) = controller(catalog_returning_movie(), repo.clone(), Some("U1"));
        controller.load().await;

        controller.toggle().await;
        controller.toggle().await;

        assert!(!controller.is_saved());
        let entries = repo.snapshot();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_saved);
    }
}
