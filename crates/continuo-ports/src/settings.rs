use serde::{Deserialize, Serialize};

fn default_soundfont_file() -> String {
    "GeneralUser.sf2".to_string()
}

fn default_drum_banks() -> Vec<u16> {
    vec![120, 128]
}

fn default_polyphony() -> u16 {
    256
}

fn default_master_gain() -> f32 {
    1.0
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serde(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Bank file name, resolved against the bundle directory.
    #[serde(default = "default_soundfont_file")]
    pub soundfont_file: String,
    /// Bank numbers classified as drum kits on program change.
    #[serde(default = "default_drum_banks")]
    pub drum_banks: Vec<u16>,
    #[serde(default = "default_polyphony")]
    pub polyphony: u16,
    #[serde(default = "default_master_gain")]
    pub master_gain: f32,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            soundfont_file: default_soundfont_file(),
            drum_banks: default_drum_banks(),
            polyphony: default_polyphony(),
            master_gain: default_master_gain(),
        }
    }
}

pub trait SettingsSource: Send + Sync {
    fn load_settings(&self) -> Result<PluginSettings, StorageError>;
}
