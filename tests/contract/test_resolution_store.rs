//! Contract tests for settings resolution
//!
//! Validates precedence across the local, shared and default layers, write
//! fan-out, persistence of exactly one layer, and change notification.

use settingstack::{
    config::{builtin_defaults, LayerCodec, SettingsPaths},
    models::keys,
    Layer, LayerBootstrapper, LayerKind, SettingValue, SettingsError, SettingsStore,
};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn paths_in(temp_dir: &TempDir) -> SettingsPaths {
    SettingsPaths::in_dirs(temp_dir.path().join("bin"), temp_dir.path().join("data"))
}

fn write_document(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn open(paths: SettingsPaths) -> SettingsStore {
    LayerBootstrapper::new(paths)
        .bootstrap(builtin_defaults().unwrap())
        .unwrap()
}

#[test]
fn test_every_default_key_resolves() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(paths_in(&temp_dir));

    for (name, _) in keys::ALL {
        assert!(store.get(name, None).is_ok(), "{} did not resolve", name);
    }
    for key in store.defaults().keys() {
        assert!(store.live_view().contains_key(key));
    }
}

#[test]
fn test_fallback_applies_only_to_undefined_keys() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);
    let mut defaults = Layer::new();
    defaults.insert("Looped", SettingValue::Bool(true));
    let store = LayerBootstrapper::new(paths).bootstrap(defaults).unwrap();

    // Fresh install: the shared document exists and is empty
    assert_eq!(fs::read_to_string(&store.paths().shared).unwrap(), "");

    assert_eq!(store.get_or("Quality", 50), SettingValue::Integer(50));
    assert_eq!(store.get_or("Looped", false), SettingValue::Bool(true));
    assert!(matches!(
        store.get("Quality", None),
        Err(SettingsError::KeyUndefined(_))
    ));
}

#[test]
fn test_fallback_ignored_when_default_exists() {
    let temp_dir = TempDir::new().unwrap();
    let store = open(paths_in(&temp_dir));

    assert_eq!(store.get_or("Quality", 50), SettingValue::Integer(10));
}

#[test]
fn test_precedence_across_documents() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);
    write_document(&paths.local, "RepeatCount = 7\n");
    write_document(&paths.shared, "RepeatCount = 4\nQuality = 60\n");

    let store = open(paths);

    assert_eq!(store.get("RepeatCount", None).unwrap(), SettingValue::Integer(7));
    assert_eq!(store.get("Quality", None).unwrap(), SettingValue::Integer(60));
    assert_eq!(store.get("Looped", None).unwrap(), SettingValue::Bool(true));
    assert_eq!(store.value(keys::QUALITY).unwrap(), 60);
}

#[test]
fn test_set_writes_through_and_saves_local_only() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);
    write_document(&paths.local, "");
    write_document(&paths.shared, "Quality = 60\n");

    let mut store = open(paths.clone());
    store.set("RepeatCount", 3);

    for kind in LayerKind::OPTIONAL {
        assert_eq!(
            store.layer(kind).unwrap().get("RepeatCount"),
            Some(&SettingValue::Integer(3))
        );
    }

    let written = store.save().unwrap();
    assert_eq!(written, Some(paths.local.clone()));

    let codec = LayerCodec::default();
    assert_eq!(
        codec.load(&paths.local).get("RepeatCount"),
        Some(&SettingValue::Integer(3))
    );
    assert_eq!(fs::read_to_string(&paths.shared).unwrap(), "Quality = 60\n");
}

#[test]
fn test_save_falls_back_to_shared() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);

    let mut store = open(paths.clone());
    store.set_value(keys::LANGUAGE_CODE, "de".to_string());

    assert_eq!(store.save().unwrap(), Some(paths.shared.clone()));
    assert!(!paths.local.exists());

    let reopened = open(paths);
    assert_eq!(reopened.value(keys::LANGUAGE_CODE).unwrap(), "de");
}

#[test]
fn test_saved_layer_holds_only_written_keys() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);

    let mut store = open(paths.clone());
    store.set("Looped", false);
    store.save().unwrap();

    let saved = LayerCodec::default().load(&paths.shared);
    assert_eq!(saved.len(), 1);
}

#[test]
fn test_save_reports_unwritable_document() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);

    let mut store = open(paths.clone());
    fs::remove_file(&paths.shared).unwrap();
    fs::create_dir_all(paths.shared.join("occupied")).unwrap();

    store.set("Quality", 1);

    let err = store.save().unwrap_err();
    assert!(matches!(err, SettingsError::Io { .. }), "unexpected error: {}", err);
    assert!(!paths.shared.with_extension("tmp").exists());

    // The write stays visible in memory
    assert_eq!(store.get_or("Quality", 0), SettingValue::Integer(1));
}

#[test]
fn test_corrupt_shared_document_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);
    write_document(&paths.shared, "Quality = = 3\n[[[");

    let store = open(paths);

    assert!(store.is_active(LayerKind::Shared));
    assert!(store.layer(LayerKind::Shared).unwrap().is_empty());
    assert_eq!(store.value(keys::QUALITY).unwrap(), 10);
}

#[test]
fn test_typed_read_of_wrong_kind() {
    let temp_dir = TempDir::new().unwrap();
    let paths = paths_in(&temp_dir);
    write_document(&paths.shared, "Quality = \"high\"\n");

    let store = open(paths);

    match store.value(keys::QUALITY) {
        Err(SettingsError::KindMismatch { key, expected, found }) => {
            assert_eq!(key, "Quality");
            assert_eq!(expected.to_string(), "integer");
            assert_eq!(found.to_string(), "string");
        }
        other => panic!("Expected KindMismatch, got {:?}", other),
    }
}

#[test]
fn test_listeners_observe_each_write() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = open(paths_in(&temp_dir));
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    store.subscribe(move |key| sink.lock().unwrap().push(key.to_string()));

    store.set("Quality", 20);
    store.set("Quality", 20);
    store.set_value(keys::LOOPED, false);

    assert_eq!(*seen.lock().unwrap(), vec!["Quality", "Quality", "Looped"]);
}
