// src/application/commands/navigation_commands.rs

use std::sync::Arc;

use crate::application::{dto::RouteDto, state::AppState};
use crate::navigation::Route;

pub fn current_route(state: &AppState) -> RouteDto {
    RouteDto::from(state.navigator.current())
}

/// Leave the current screen
///
/// Landing back on an earlier details screen reloads it, since only the
/// top screen keeps a live controller.
pub async fn go_back(state: &AppState) -> RouteDto {
    let route = state.navigator.back();

    match route {
        Route::MovieDetails(movie_id) => {
            let still_active = state
                .active_details()
                .map(|controller| controller.movie_id() == movie_id)
                .unwrap_or(false);

            if !still_active {
                let controller = Arc::new(state.details_controller(movie_id));
                state.set_active_details(Some(Arc::clone(&controller)));
                controller.load().await;
            }
        }
        _ => state.set_active_details(None),
    }

    RouteDto::from(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{current_details, open_movie};
    use crate::domain::MovieId;
    use crate::integrations::catalog::MockMovieCatalog;
    use crate::integrations::WatchFlagSource;
    use crate::test_utils::{sample_movie, test_app_state, InMemoryHistoryRepository};

    fn state() -> AppState {
        let mut catalog = MockMovieCatalog::new();
        catalog
            .expect_fetch_movie_details()
            .returning(|id| Ok(sample_movie(id.0)));
        test_app_state(
            Arc::new(catalog),
            Arc::new(InMemoryHistoryRepository::new()),
            Arc::new(WatchFlagSource::new(false)),
        )
    }

    #[tokio::test]
    async fn test_back_to_home_clears_active_screen() {
        let state = state();
        open_movie(&state, 42).await.unwrap();

        let route = go_back(&state).await;

        assert_eq!(route.route, Route::Home);
        assert_eq!(route.path, "/");
        assert!(current_details(&state).is_none());
    }

    #[tokio::test]
    async fn test_back_to_previous_movie_reloads_it() {
        let state = state();
        open_movie(&state, 1).await.unwrap();
        open_movie(&state, 2).await.unwrap();

        let route = go_back(&state).await;

        assert_eq!(route.route, Route::MovieDetails(MovieId(1)));
        assert_eq!(current_details(&state).unwrap().movie_id, 1);
    }

    #[tokio::test]
    async fn test_back_on_root_stays_home() {
        let state = state();

        assert_eq!(go_back(&state).await.route, Route::Home);
        assert_eq!(current_route(&state).route, Route::Home);
    }
}
