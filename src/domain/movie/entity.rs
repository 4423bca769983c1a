use serde::{Deserialize, Serialize};

use crate::domain::MovieId;

/// Full movie record as served by the catalog
///
/// Immutable once fetched. Field names follow the catalog's JSON so the
/// record can be deserialized directly and stored as a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,

    pub title: String,

    /// Relative image path, e.g. "/abc.jpg"
    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub overview: Option<String>,

    /// "YYYY-MM-DD"; may be empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,

    /// Minutes
    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub vote_count: u64,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub budget: u64,

    #[serde(default)]
    pub revenue: u64,

    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: Option<String>,
}

/// List item returned by search and discover
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl Movie {
    /// Minimal record, mostly useful for tests and fixtures
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            overview: None,
            release_date: None,
            runtime: None,
            vote_average: 0.0,
            vote_count: 0,
            genres: Vec::new(),
            budget: 0,
            revenue: 0,
            production_companies: Vec::new(),
        }
    }

    /// Year portion of the release date, if any
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
    }
}
