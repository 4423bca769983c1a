// src/infrastructure/mod.rs
//
// Infrastructure Module
//
// Local filesystem concerns that don't belong to the database.

pub mod device_identity;

pub use device_identity::{load_or_create_device_id, DEVICE_ID_FILE};
