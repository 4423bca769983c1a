pub mod entity;
pub mod invariants;

pub use entity::{HistoryEntry, HistoryKey};
pub use invariants::{validate_history_entry, validate_history_key};
