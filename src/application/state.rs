// src/application/state.rs

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::{DeviceId, MovieId};
use crate::events::EventBus;
use crate::integrations::MovieCatalog;
use crate::navigation::{Navigator, Route};
use crate::services::{HistoryService, MaintenanceObserver, MovieDetailsController};
use crate::session::AuthSession;

/// Application state shared by every command.
/// All fields are Arc-wrapped for thread-safe sharing across commands.
/// Built by `app::bootstrap` and passed here.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub navigator: Arc<Navigator>,
    pub session: Arc<AuthSession>,
    pub device_id: DeviceId,
    pub catalog: Arc<dyn MovieCatalog>,
    pub history_service: Arc<HistoryService>,
    pub maintenance_observer: Arc<MaintenanceObserver>,
    /// Controller of the details screen currently on top, if any
    pub active_details: Mutex<Option<Arc<MovieDetailsController>>>,
}

impl AppState {
    pub fn active_details(&self) -> Option<Arc<MovieDetailsController>> {
        self.active_details
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_active_details(&self, controller: Option<Arc<MovieDetailsController>>) {
        *self
            .active_details
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = controller;
    }

    /// Active controller, only while its screen is the one on top
    ///
    /// A controller whose screen was discarded (back navigation, or the
    /// stack being replaced by the maintenance redirect) is dropped here.
    pub fn details_on_top(&self) -> Option<Arc<MovieDetailsController>> {
        let mut active = self
            .active_details
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let on_top = active
            .as_ref()
            .map(|controller| {
                self.navigator.current() == Route::MovieDetails(controller.movie_id())
            })
            .unwrap_or(false);

        if !on_top {
            if let Some(stale) = active.take() {
                log::debug!("Dropping details screen for movie {}", stale.movie_id());
            }
        }

        active.clone()
    }

    /// Controller for a new details screen
    pub fn details_controller(&self, movie_id: MovieId) -> MovieDetailsController {
        MovieDetailsController::new(
            movie_id,
            self.device_id.clone(),
            Arc::clone(&self.catalog),
            Arc::clone(&self.history_service),
            Arc::clone(&self.session),
            Arc::clone(&self.event_bus),
        )
    }
}
