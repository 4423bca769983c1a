// src/services/maintenance_observer.rs
//
// Maintenance Observer - redirects the whole app while maintenance is on
//
// CRITICAL RULES:
// - One read at start, then a long-lived subscription
// - Every transition replaces the whole navigation stack
//   (true → Maintenance, false → Home)
// - No debouncing: the last value received wins
// - stop() (or drop) unsubscribes

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

use crate::events::{EventBus, MaintenanceEntered, MaintenanceExited};
use crate::integrations::MaintenanceFlagSource;
use crate::navigation::{Navigator, Route};

pub struct MaintenanceObserver {
    source: Arc<dyn MaintenanceFlagSource>,
    navigator: Arc<Navigator>,
    event_bus: Arc<EventBus>,
    in_maintenance: Arc<AtomicBool>,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl MaintenanceObserver {
    pub fn new(
        source: Arc<dyn MaintenanceFlagSource>,
        navigator: Arc<Navigator>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            source,
            navigator,
            event_bus,
            in_maintenance: Arc::new(AtomicBool::new(false)),
            task_handle: Mutex::new(None),
        }
    }

    /// Check the flag once, then keep listening for changes
    ///
    /// A failed initial read counts as "not in maintenance".
    pub async fn start(&self) {
        self.stop();

        let initial = match self.source.fetch().await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read maintenance flag at startup: {}", e);
                false
            }
        };

        let transition = Transition {
            navigator: Arc::clone(&self.navigator),
            event_bus: Arc::clone(&self.event_bus),
            in_maintenance: Arc::clone(&self.in_maintenance),
        };

        if initial {
            transition.enter();
        }

        let mut subscription = self.source.subscribe(initial);

        // The flag may have moved between the read and the subscription
        let mut last = initial;
        if subscription.current() != last {
            last = subscription.current();
            transition.apply(last);
        }

        let task = tokio::spawn(async move {
            while let Some(value) = subscription.next_change().await {
                if value != last {
                    transition.apply(value);
                    last = value;
                }
            }
            log::debug!("Maintenance flag source closed");
        });

        *self
            .task_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(task);
    }

    /// Unsubscribe
    pub fn stop(&self) {
        let mut handle = self
            .task_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = handle.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task_handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    pub fn in_maintenance(&self) -> bool {
        self.in_maintenance.load(Ordering::SeqCst)
    }
}

impl Drop for MaintenanceObserver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The two callbacks: enter and exit maintenance
struct Transition {
    navigator: Arc<Navigator>,
    event_bus: Arc<EventBus>,
    in_maintenance: Arc<AtomicBool>,
}

impl Transition {
    fn apply(&self, in_maintenance: bool) {
        if in_maintenance {
            self.enter();
        } else {
            self.exit();
        }
    }

    fn enter(&self) {
        log::warn!("Maintenance mode on, showing maintenance screen");
        self.in_maintenance.store(true, Ordering::SeqCst);
        self.navigator.replace_all(Route::Maintenance);
        self.event_bus.emit(MaintenanceEntered::new());
    }

    fn exit(&self) {
        log::info!("Maintenance mode off, returning home");
        self.in_maintenance.store(false, Ordering::SeqCst);
        self.navigator.replace_all(Route::Home);
        self.event_bus.emit(MaintenanceExited::new());
    }
}
