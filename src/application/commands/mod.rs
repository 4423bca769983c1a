// src/application/commands/mod.rs
//
// Command Handlers
//
// - Commands are thin adapters between UI and Services
// - Commands accept plain values, return DTOs
// - Errors leave as JSON-encoded ErrorResponse strings
// - Commands NEVER contain business logic

pub mod history_commands;
pub mod movie_commands;
pub mod navigation_commands;
pub mod session_commands;

pub use history_commands::*;
pub use movie_commands::*;
pub use navigation_commands::*;
pub use session_commands::*;
