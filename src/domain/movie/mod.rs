pub mod entity;
pub mod invariants;

pub use entity::{Genre, Movie, MovieSummary, ProductionCompany};
pub use invariants::validate_movie;
