// src/integrations/mod.rs
//
// External Integrations Module
//
// - tmdb: movie catalog (read-only HTTP API)
// - remote_config: maintenance flag source

pub mod catalog;
pub mod remote_config;
pub mod tmdb;

pub use catalog::MovieCatalog;
pub use remote_config::{FlagSubscription, HttpFlagSource, MaintenanceFlagSource, WatchFlagSource};
pub use tmdb::client::{poster_url, TmdbClient, POSTER_BASE_URL};
