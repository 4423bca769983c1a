pub mod client;

pub use client::{poster_url, TmdbClient, POSTER_BASE_URL};
