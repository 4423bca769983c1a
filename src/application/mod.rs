// src/application/mod.rs
//
// Application Layer
//
// - Boundary between UI consumers (the CLI today) and the services
// - Translates domain types into DTOs

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
