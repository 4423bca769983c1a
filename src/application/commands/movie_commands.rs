// src/application/commands/movie_commands.rs
//
// Movie Command Handlers
//
// RULES:
// - Nothing but the maintenance screen while maintenance is on
// - Opening a movie pushes its screen and makes it the active one
// - Only the details screen on top of the stack can save

use std::sync::Arc;

use crate::application::{
    dto::{MovieSummaryDto, ToggleResultDto},
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};
use crate::domain::MovieId;
use crate::navigation::Route;
use crate::services::MovieDetailsView;

fn ensure_available(state: &AppState) -> Result<(), String> {
    if state.maintenance_observer.in_maintenance() {
        return Err(ErrorResponse::maintenance().into_json());
    }
    Ok(())
}

/// Search the catalog, or list popular movies when no query is given
pub async fn browse_movies(
    state: &AppState,
    query: Option<String>,
) -> Result<Vec<MovieSummaryDto>, String> {
    ensure_available(state)?;

    let movies = state.catalog.fetch_movies(query).await.to_error_response()?;

    Ok(movies.into_iter().map(MovieSummaryDto::from).collect())
}

/// Open the details screen for a movie
///
/// Returns `None` when the catalog read failed (the screen shows nothing).
pub async fn open_movie(
    state: &AppState,
    movie_id: u64,
) -> Result<Option<MovieDetailsView>, String> {
    ensure_available(state)?;
    if movie_id == 0 {
        return Err(ErrorResponse::validation("Movie id must be positive").into_json());
    }

    let movie_id = MovieId(movie_id);
    state.navigator.push(Route::MovieDetails(movie_id));

    let controller = Arc::new(state.details_controller(movie_id));
    state.set_active_details(Some(Arc::clone(&controller)));
    controller.load().await;

    Ok(controller.view())
}

/// Render model of the active details screen
pub fn current_details(state: &AppState) -> Option<MovieDetailsView> {
    state.details_on_top().and_then(|controller| controller.view())
}

/// Tap the save button on the active details screen
pub async fn toggle_saved(state: &AppState) -> Result<ToggleResultDto, String> {
    ensure_available(state)?;

    let controller = state
        .details_on_top()
        .ok_or_else(|| ErrorResponse::not_found("Movie details screen").into_json())?;

    let outcome = controller.toggle().await;

    Ok(ToggleResultDto::new(
        controller.movie_id().0,
        controller.is_saved(),
        &outcome,
    ))
}
