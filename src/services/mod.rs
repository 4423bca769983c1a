// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod history_service;
pub mod maintenance_observer;
pub mod movie_details;
pub mod movie_details_view;

pub use history_service::HistoryService;

pub use maintenance_observer::MaintenanceObserver;

pub use movie_details::{MovieDetailsController, ScreenState, SkipReason, ToggleOutcome};

pub use movie_details_view::{save_icon, MovieDetailsView};
