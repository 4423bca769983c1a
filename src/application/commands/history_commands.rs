// src/application/commands/history_commands.rs

use crate::application::{
    dto::HistoryEntryDto,
    error_handling::{ErrorResponse, ToErrorResponse},
    state::AppState,
};

/// History of the signed-in user, most recent first
pub async fn list_history(
    state: &AppState,
    saved_only: bool,
) -> Result<Vec<HistoryEntryDto>, String> {
    let user_id = state
        .session
        .current_user_id()
        .ok_or_else(|| ErrorResponse::validation("User not logged in").into_json())?;

    let result = if saved_only {
        state.history_service.list_saved(&user_id).await
    } else {
        state.history_service.list_for_user(&user_id).await
    };
    let entries = result.to_error_response()?;

    Ok(entries.into_iter().map(HistoryEntryDto::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HistoryEntry, User, UserId};
    use crate::integrations::catalog::MockMovieCatalog;
    use crate::integrations::WatchFlagSource;
    use crate::test_utils::{sample_key, sample_movie, test_app_state, InMemoryHistoryRepository};
    use std::sync::Arc;

    fn state() -> AppState {
        let repo = InMemoryHistoryRepository::new();
        repo.insert(HistoryEntry::new(sample_key("D1", 1, "U1"), true, sample_movie(1)));
        repo.insert(HistoryEntry::new(sample_key("D1", 2, "U1"), false, sample_movie(2)));
        repo.insert(HistoryEntry::new(sample_key("D1", 3, "U2"), true, sample_movie(3)));

        test_app_state(
            Arc::new(MockMovieCatalog::new()),
            Arc::new(repo),
            Arc::new(WatchFlagSource::new(false)),
        )
    }

    #[tokio::test]
    async fn test_requires_user() {
        let err = list_history(&state(), false).await.unwrap_err();
        assert!(err.contains("User not logged in"));
    }

    #[tokio::test]
    async fn test_lists_only_own_entries() {
        let state = state();
        state.session.sign_in(User::new(UserId::new("U1")));

        let all = list_history(&state, false).await.unwrap();
        let saved = list_history(&state, true).await.unwrap();

        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|e| e.user_id == "U1"));
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].movie_id, 1);
        assert_eq!(saved[0].title, "The Answer");
    }
}
