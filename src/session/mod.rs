// src/session/mod.rs
//
// Authentication session
//
// Sign-in itself happens elsewhere; this only holds who is signed in.
// No user means "not logged in".

use std::sync::{PoisonError, RwLock};

use crate::domain::{User, UserId};

#[derive(Default)]
pub struct AuthSession {
    user: RwLock<Option<User>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    pub fn sign_in(&self, user: User) {
        log::info!("User {} signed in", user.uid);
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn sign_out(&self) {
        let previous = self
            .user
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(user) = previous {
            log::info!("User {} signed out", user.uid);
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user().map(|user| user.uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let session = AuthSession::new();
        assert!(session.current_user().is_none());

        session.sign_in(User::new(UserId::new("U1")));
        assert_eq!(session.current_user_id(), Some(UserId::new("U1")));

        session.sign_out();
        assert!(session.current_user_id().is_none());
    }
}
