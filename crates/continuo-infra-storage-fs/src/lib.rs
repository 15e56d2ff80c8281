use continuo_ports::settings::{PluginSettings, SettingsSource, StorageError};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings loader rooted at the host-provided bundle directory.
pub struct BundleStorage {
    bundle_dir: PathBuf,
}

impl BundleStorage {
    pub fn new(bundle_dir: PathBuf) -> Self {
        Self { bundle_dir }
    }

    fn settings_path(&self) -> PathBuf {
        self.bundle_dir.join("settings.json")
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
        let data = fs::read(path).map_err(|e| StorageError::Io(e.to_string()))?;
        serde_json::from_slice(&data).map_err(|e| StorageError::Serde(e.to_string()))
    }
}

impl SettingsSource for BundleStorage {
    fn load_settings(&self) -> Result<PluginSettings, StorageError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(PluginSettings::default());
        }
        log::info!("continuo: reading settings from '{}'", path.display());
        Self::read_json(&path)
    }
}
