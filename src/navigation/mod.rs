// src/navigation/mod.rs
//
// Screen stack
//
// The app starts on Home. Screens push onto the stack; `replace_all`
// discards the whole history, which is how the maintenance redirect works.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{PoisonError, RwLock};

use crate::domain::MovieId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", content = "movie_id", rename_all = "snake_case")]
pub enum Route {
    Home,
    MovieDetails(MovieId),
    SignIn,
    Maintenance,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::MovieDetails(id) => format!("/movies/{}", id),
            Route::SignIn => "/sign-in".to_string(),
            Route::Maintenance => "/maintenance".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Thread-safe navigation stack, shared between commands and observers
pub struct Navigator {
    stack: RwLock<Vec<Route>>,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: RwLock::new(vec![Route::Home]),
        }
    }

    pub fn current(&self) -> Route {
        self.stack
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
            .unwrap_or(Route::Home)
    }

    /// Bottom-to-top copy of the stack
    pub fn history(&self) -> Vec<Route> {
        self.stack
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn push(&self, route: Route) {
        log::debug!("navigate: push {}", route);
        self.stack
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }

    /// Pop the top screen; the root stays. Returns the new current route.
    pub fn back(&self) -> Route {
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        if stack.len() > 1 {
            stack.pop();
        }
        stack.last().copied().unwrap_or(Route::Home)
    }

    /// Full-stack replace
    pub fn replace_all(&self, route: Route) {
        log::info!("navigate: replace stack with {}", route);
        let mut stack = self.stack.write().unwrap_or_else(PoisonError::into_inner);
        stack.clear();
        stack.push(route);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
