// src/integrations/catalog.rs
//
// Seam between the screens and whatever serves movie metadata.

use async_trait::async_trait;

use crate::domain::{Movie, MovieId, MovieSummary};
use crate::error::AppResult;

/// Read-only movie metadata provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    /// Full record for one movie; `AppError::NotFound` when the id is unknown
    async fn fetch_movie_details(&self, id: MovieId) -> AppResult<Movie>;

    /// Search by title, or the popular listing when `query` is `None`
    async fn fetch_movies(&self, query: Option<String>) -> AppResult<Vec<MovieSummary>>;
}
