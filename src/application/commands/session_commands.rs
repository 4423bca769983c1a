// src/application/commands/session_commands.rs
//
// Credentials are checked by the identity provider; these commands only
// record who is signed in.

use crate::application::{
    dto::{SignInDto, UserDto},
    error_handling::ErrorResponse,
    state::AppState,
};
use crate::domain::{User, UserId};

pub fn sign_in(state: &AppState, dto: SignInDto) -> Result<UserDto, String> {
    if dto.uid.trim().is_empty() {
        return Err(ErrorResponse::validation("User id cannot be empty").into_json());
    }

    let user = User {
        uid: UserId::new(dto.uid),
        email: dto.email,
        display_name: dto.display_name,
    };
    state.session.sign_in(user.clone());

    Ok(UserDto::from(user))
}

pub fn sign_out(state: &AppState) {
    state.session.sign_out();
}

pub fn current_user(state: &AppState) -> Option<UserDto> {
    state.session.current_user().map(UserDto::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::catalog::MockMovieCatalog;
    use crate::integrations::WatchFlagSource;
    use crate::test_utils::{test_app_state, InMemoryHistoryRepository};
    use std::sync::Arc;

    fn state() -> AppState {
        test_app_state(
            Arc::new(MockMovieCatalog::new()),
            Arc::new(InMemoryHistoryRepository::new()),
            Arc::new(WatchFlagSource::new(false)),
        )
    }

    #[test]
    fn test_sign_in_and_out() {
        let state = state();

        let user = sign_in(
            &state,
            SignInDto {
                uid: "U1".to_string(),
                email: Some("u1@example.com".to_string()),
                display_name: None,
            },
        )
        .unwrap();

        assert_eq!(user.uid, "U1");
        assert_eq!(current_user(&state).unwrap().email.as_deref(), Some("u1@example.com"));

        sign_out(&state);
        assert!(current_user(&state).is_none());
    }

    #[test]
    fn test_blank_uid_is_rejected() {
        let state = state();

        let result = sign_in(
            &state,
            SignInDto {
                uid: "  ".to_string(),
                email: None,
                display_name: None,
            },
        );

        assert!(result.is_err());
        assert!(current_user(&state).is_none());
    }
}
