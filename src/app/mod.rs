// src/app/mod.rs
//
// Application wiring

pub mod bootstrap;

pub use bootstrap::{build_app_state, open_history_repository, open_flag_source};
