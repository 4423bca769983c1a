// src/services/movie_details_view.rs
//
// Render model for the movie details screen.
// Every field is display-ready text; the UI only lays it out.

use serde::{Deserialize, Serialize};

use crate::domain::Movie;
use crate::integrations::tmdb::poster_url;

const NOT_AVAILABLE: &str = "N/A";
const SAVED_ICON: &str = "save-as";
const UNSAVED_ICON: &str = "save-alt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetailsView {
    pub movie_id: u64,
    pub title: String,
    pub poster_url: Option<String>,
    pub release_year: Option<String>,
    pub runtime: Option<String>,
    pub rating: String,
    pub votes: String,
    pub overview: String,
    pub genres: String,
    pub budget: String,
    pub revenue: String,
    pub production_companies: String,
    pub is_saved: bool,
    pub save_icon: String,
}

impl MovieDetailsView {
    pub fn new(movie: &Movie, is_saved: bool) -> Self {
        Self {
            movie_id: movie.id.0,
            title: movie.title.clone(),
            poster_url: movie.poster_path.as_deref().map(poster_url),
            release_year: movie.release_year().map(str::to_string),
            runtime: movie.runtime.map(|minutes| format!("{}m", minutes)),
            rating: format!("{}/10", movie.vote_average.round() as i64),
            votes: format!("({} votes)", movie.vote_count),
            overview: or_not_available(movie.overview.clone().unwrap_or_default()),
            genres: or_not_available(join_names(movie.genres.iter().map(|g| g.name.as_str()))),
            budget: format!("${} million", movie.budget as f64 / 1_000_000.0),
            revenue: format!(
                "${} million",
                (movie.revenue as f64 / 1_000_000.0).round() as u64
            ),
            production_companies: or_not_available(join_names(
                movie.production_companies.iter().map(|c| c.name.as_str()),
            )),
            is_saved,
            save_icon: save_icon(is_saved).to_string(),
        }
    }
}

/// Icon name for the save button
pub fn save_icon(is_saved: bool) -> &'static str {
    if is_saved {
        SAVED_ICON
    } else {
        UNSAVED_ICON
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(" - ")
}

fn or_not_available(value: String) -> String {
    if value.trim().is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value
    }
}
