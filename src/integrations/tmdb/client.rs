// src/integrations/tmdb/client.rs
//
// TMDB API Integration
//
// ARCHITECTURE:
// - REST client for the TMDB v3 API
// - Authenticates with a static bearer token
// - Maps external payloads → domain records (read-only, no mutation)
// - No retries: a failed request is reported to the caller as-is

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TmdbConfig;
use crate::domain::{Movie, MovieId, MovieSummary};
use crate::error::{AppError, AppResult};
use crate::integrations::catalog::MovieCatalog;

/// Base URL for w500 poster renditions
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Full image URL for a poster path as returned by the API
pub fn poster_url(poster_path: &str) -> String {
    format!("{}{}", POSTER_BASE_URL, poster_path)
}

/// Paged list wrapper used by search and discover
#[derive(Debug, Deserialize)]
struct PagedResponse<T> {
    results: Vec<T>,
}

/// Error body returned on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

/// TMDB API Client
pub struct TmdbClient {
    base_url: String,
    http_client: Client,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &TmdbConfig) -> AppResult<Self> {
        Self::new(config.base_url.clone(), config.api_key.clone())
    }

    /// Get one movie by TMDB id
    pub async fn get_movie(&self, id: MovieId) -> AppResult<Movie> {
        self.get_json(&format!("/movie/{}", id), &[]).await
    }

    /// Search movies by title
    pub async fn search_movies(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let page: PagedResponse<MovieSummary> = self
            .get_json("/search/movie", &[("query", query)])
            .await?;
        Ok(page.results)
    }

    /// Popular movies, most popular first
    pub async fn discover_movies(&self) -> AppResult<Vec<MovieSummary>> {
        let page: PagedResponse<MovieSummary> = self
            .get_json("/discover/movie", &[("sort_by", "popularity.desc")])
            .await?;
        Ok(page.results)
    }

    // ========================================================================
    // INTERNAL: Request Execution
    // ========================================================================

    async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("TMDB GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .header(header::ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Other(format!("TMDB request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.status_message)
                .unwrap_or_default();
            return Err(AppError::Other(format!(
                "TMDB API returned status {}: {}",
                status, message
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Other(format!("Failed to parse TMDB response: {}", e)))
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    async fn fetch_movie_details(&self, id: MovieId) -> AppResult<Movie> {
        self.get_movie(id).await
    }

    async fn fetch_movies(&self, query: Option<String>) -> AppResult<Vec<MovieSummary>> {
        match query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => self.search_movies(q).await,
            _ => self.discover_movies().await,
        }
    }
}
