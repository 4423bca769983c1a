// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{HistoryEntry, MovieSummary, User};
use crate::integrations::poster_url;
use crate::navigation::Route;
use crate::services::{save_icon, ToggleOutcome};

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieSummaryDto {
    pub id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: Option<String>,
    pub rating: String,
}

// ============================================================================
// HISTORY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntryDto {
    pub id: String,
    pub device_id: String,
    pub movie_id: u64,
    pub user_id: String,
    pub title: String,
    pub is_saved: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Result of tapping the save button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResultDto {
    pub movie_id: u64,
    /// Local flag after the tap
    pub is_saved: bool,
    pub save_icon: String,
    /// "persisted", "skipped" or "persist_failed"
    pub outcome: String,
    pub message: Option<String>,
}

// ============================================================================
// NAVIGATION / SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDto {
    pub route: Route,
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInDto {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

// ============================================================================
// CONVERSION HELPERS (Domain → DTO)
// ============================================================================

impl From<MovieSummary> for MovieSummaryDto {
    fn from(movie: MovieSummary) -> Self {
        let release_year = movie
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .filter(|year| !year.is_empty())
            .map(str::to_string);

        Self {
            id: movie.id.0,
            poster_url: movie.poster_path.as_deref().map(poster_url),
            release_year,
            rating: format!("{}/10", movie.vote_average.round() as i64),
            title: movie.title,
        }
    }
}

impl From<HistoryEntry> for HistoryEntryDto {
    fn from(entry: HistoryEntry) -> Self {
        Self {
            id: entry.id,
            device_id: entry.key.device_id.to_string(),
            movie_id: entry.key.movie_id.0,
            user_id: entry.key.user_id.to_string(),
            title: entry.movie.title,
            is_saved: entry.is_saved,
            created_at: entry.created_at.to_rfc3339(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }
}

impl From<Route> for RouteDto {
    fn from(route: Route) -> Self {
        Self {
            path: route.path(),
            route,
        }
    }
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            uid: user.uid.to_string(),
            email: user.email,
            display_name: user.display_name,
        }
    }
}

impl ToggleResultDto {
    pub fn new(movie_id: u64, is_saved: bool, outcome: &ToggleOutcome) -> Self {
        let (outcome, message) = match outcome {
            ToggleOutcome::Persisted(_) => ("persisted", None),
            ToggleOutcome::Skipped(reason) => ("skipped", Some(reason.to_string())),
            ToggleOutcome::PersistFailed(error) => ("persist_failed", Some(error.clone())),
        };

        Self {
            movie_id,
            is_saved,
            save_icon: save_icon(is_saved).to_string(),
            outcome: outcome.to_string(),
            message,
        }
    }
}
