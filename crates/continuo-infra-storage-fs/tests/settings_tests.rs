use continuo_infra_storage_fs::BundleStorage;
use continuo_ports::settings::{PluginSettings, SettingsSource, StorageError};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("continuo-storage-{test}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_settings_file_yields_defaults() {
    let dir = scratch_dir("missing");
    let _ = fs::remove_file(dir.join("settings.json"));

    let settings = BundleStorage::new(dir).load_settings().unwrap();
    assert_eq!(settings, PluginSettings::default());
    assert_eq!(settings.soundfont_file, "GeneralUser.sf2");
    assert_eq!(settings.drum_banks, vec![120, 128]);
}

#[test]
fn partial_settings_fill_in_field_defaults() {
    let dir = scratch_dir("partial");
    fs::write(
        dir.join("settings.json"),
        r#"{ "soundfont_file": "Custom.sf2", "polyphony": 64 }"#,
    )
    .unwrap();

    let settings = BundleStorage::new(dir).load_settings().unwrap();
    assert_eq!(settings.soundfont_file, "Custom.sf2");
    assert_eq!(settings.polyphony, 64);
    assert_eq!(settings.drum_banks, vec![120, 128]);
    assert_eq!(settings.master_gain, 1.0);
}

#[test]
fn full_settings_round_trip() {
    let dir = scratch_dir("full");
    let written = PluginSettings {
        soundfont_file: "Orchestra.sf2".into(),
        drum_banks: vec![127],
        polyphony: 32,
        master_gain: 0.5,
    };
    fs::write(
        dir.join("settings.json"),
        serde_json::to_vec(&written).unwrap(),
    )
    .unwrap();

    let settings = BundleStorage::new(dir).load_settings().unwrap();
    assert_eq!(settings, written);
}

#[test]
fn malformed_settings_are_an_error_not_a_fallback() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("settings.json"), b"{ not json").unwrap();

    let result = BundleStorage::new(dir).load_settings();
    assert!(matches!(result, Err(StorageError::Serde(_))));
}
