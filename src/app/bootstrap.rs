// src/app/bootstrap.rs
//
// Application Bootstrap
//
// Wires infrastructure → repositories → services → application state.
//
// - History goes to Appwrite when it is configured, to local SQLite otherwise
// - Without a flag URL the app is never in maintenance
// - The maintenance observer is started before any screen is shown

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::application::AppState;
use crate::config::AppConfig;
use crate::db::{
    create_connection_pool, get_connection, get_database_path, initialize_database,
    verify_database_integrity,
};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::infrastructure::load_or_create_device_id;
use crate::integrations::{
    HttpFlagSource, MaintenanceFlagSource, MovieCatalog, TmdbClient, WatchFlagSource,
};
use crate::navigation::Navigator;
use crate::repositories::{AppwriteHistoryRepository, HistoryRepository, SqliteHistoryRepository};
use crate::services::{HistoryService, MaintenanceObserver};
use crate::session::AuthSession;

/// Build the full application state and start the maintenance observer
pub async fn build_app_state(config: &AppConfig) -> AppResult<AppState> {
    config.validate()?;

    // 1. INFRASTRUCTURE
    let data_dir = config.resolve_data_dir()?;
    let device_id = load_or_create_device_id(&data_dir)?;
    let event_bus = Arc::new(EventBus::new());
    let navigator = Arc::new(Navigator::new());
    let session = Arc::new(AuthSession::new());

    // 2. EXTERNAL SERVICES
    let catalog: Arc<dyn MovieCatalog> = Arc::new(TmdbClient::from_config(&config.tmdb)?);
    let history_repo = open_history_repository(config, &data_dir)?;
    let flag_source = open_flag_source(config)?;

    // 3. SERVICES
    let history_service = Arc::new(HistoryService::new(history_repo, event_bus.clone()));
    let maintenance_observer = Arc::new(MaintenanceObserver::new(
        flag_source,
        navigator.clone(),
        event_bus.clone(),
    ));

    // 4. APPLICATION STATE
    let state = AppState {
        event_bus,
        navigator,
        session,
        device_id,
        catalog,
        history_service,
        maintenance_observer,
        active_details: Mutex::new(None),
    };

    state.maintenance_observer.start().await;

    log::info!(
        "MovieHub ready (device {}, data dir {})",
        state.device_id,
        data_dir.display()
    );

    Ok(state)
}

/// History backend for the configuration
pub fn open_history_repository(
    config: &AppConfig,
    data_dir: &Path,
) -> AppResult<Arc<dyn HistoryRepository>> {
    if let Some(appwrite) = &config.appwrite {
        log::info!("History stored in Appwrite collection {}", appwrite.collection_id);
        return Ok(Arc::new(AppwriteHistoryRepository::new(appwrite.clone())?));
    }

    let db_path = get_database_path(data_dir)?;
    let pool = Arc::new(create_connection_pool(&db_path)?);
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
    }
    log::info!("History stored in {}", db_path.display());

    Ok(Arc::new(SqliteHistoryRepository::new(pool)))
}

/// Maintenance flag source for the configuration
pub fn open_flag_source(config: &AppConfig) -> AppResult<Arc<dyn MaintenanceFlagSource>> {
    match HttpFlagSource::from_config(&config.maintenance)? {
        Some(source) => Ok(Arc::new(source)),
        None => {
            log::debug!("No maintenance flag URL configured");
            Ok(Arc::new(WatchFlagSource::new(false)))
        }
    }
}
