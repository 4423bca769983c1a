// src/infrastructure/device_identity.rs
//
// Device identity
//
// A random id is generated on first run and written to the data directory;
// later runs read it back so history entries stay attached to this install.

use std::fs;
use std::path::Path;

use crate::domain::DeviceId;
use crate::error::AppResult;

pub const DEVICE_ID_FILE: &str = "device_id";

/// Read the persisted device id, creating it on first use
pub fn load_or_create_device_id(data_dir: &Path) -> AppResult<DeviceId> {
    let path = data_dir.join(DEVICE_ID_FILE);

    if path.exists() {
        let stored = fs::read_to_string(&path)?;
        let stored = stored.trim();
        if !stored.is_empty() {
            return Ok(DeviceId::new(stored));
        }
        log::warn!("Device id file {:?} is empty, generating a new id", path);
    }

    fs::create_dir_all(data_dir)?;
    let device_id = DeviceId::generate();
    fs::write(&path, device_id.as_str())?;
    log::info!("Generated device id {}", device_id);

    Ok(device_id)
}
