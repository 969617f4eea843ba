//! Unit tests for the TOML persistence codec
//!
//! Exercises loading and saving documents on disk: round trips for every
//! value kind, deterministic output, and recovery from corrupt files.

use settingstack::{
    config::{parse_document, render_document, CodecConfig, LayerCodec},
    Color, EnumValue, FontDescriptor, FontStyle, Layer, Rect, SettingValue,
};
use std::fs;
use tempfile::TempDir;

/// A layer holding one value of every kind
fn create_full_layer() -> Layer {
    let mut layer = Layer::new();
    layer.insert("Looped", SettingValue::Bool(true));
    layer.insert("RepeatCount", SettingValue::Integer(-3));
    layer.insert("RecorderLeft", SettingValue::Float(120.5));
    layer.insert("EditorWidth", SettingValue::Float(800.0));
    layer.insert("LanguageCode", SettingValue::Text("pt-BR".to_string()));
    layer.insert("CaptionText", SettingValue::Text("quotes \" and\nnewlines".to_string()));
    layer.insert("StopShortcut", SettingValue::Enum(EnumValue::new("Key", "F8")));
    layer.insert("ClickColor", SettingValue::Color(Color::from_argb(120, 255, 255, 0)));
    layer.insert("GridSize", SettingValue::Rect(Rect::new(0.0, 0.0, 20.0, 20.0)));
    layer.insert(
        "CaptionFont",
        SettingValue::Font(
            FontDescriptor::new("Segoe UI", 48.0)
                .with_style(FontStyle::Oblique)
                .with_weight(FontDescriptor::BOLD_WEIGHT),
        ),
    );
    layer
}

#[test]
fn test_round_trip_every_kind() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Settings.toml");
    let codec = LayerCodec::default();
    let original = create_full_layer();

    codec.save(&original, &path).unwrap();
    let loaded = codec.load(&path);

    assert_eq!(loaded.entries(), original.entries());
    assert_eq!(loaded.path(), Some(path.as_path()));
}

#[test]
fn test_consecutive_saves_are_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Settings.toml");
    let codec = LayerCodec::default();
    let layer = create_full_layer();

    codec.save(&layer, &path).unwrap();
    let first = fs::read(&path).unwrap();

    let reloaded = codec.load(&path);
    codec.save(&reloaded, &path).unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_insertion_order_does_not_affect_output() {
    let mut forward = Layer::new();
    forward.insert("Alpha", SettingValue::Integer(1));
    forward.insert("Beta", SettingValue::Integer(2));

    let mut backward = Layer::new();
    backward.insert("Beta", SettingValue::Integer(2));
    backward.insert("Alpha", SettingValue::Integer(1));

    let rendered = render_document(&forward).unwrap();
    assert_eq!(rendered, render_document(&backward).unwrap());
    assert!(rendered.find("Alpha").unwrap() < rendered.find("Beta").unwrap());
}

#[test]
fn test_truncated_document_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Settings.toml");
    let codec = LayerCodec::default();

    for truncated in ["Looped = tr", "[CaptionFont\nfamily = ", "ClickColor = { a = 255, r = "] {
        fs::write(&path, truncated).unwrap();
        assert!(codec.load(&path).is_empty(), "{:?}", truncated);
    }

    let loaded = codec.load(&path);

    assert!(loaded.is_empty());
    assert_eq!(loaded.path(), Some(path.as_path()));
}

#[test]
fn test_garbage_document_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Settings.toml");
    fs::write(&path, [0xFFu8, 0xFE, 0x00, 0x12]).unwrap();

    let loaded = LayerCodec::default().load(&path);
    assert!(loaded.is_empty());
}

#[test]
fn test_unrecognized_table_is_a_corrupt_document() {
    assert!(parse_document("[Window]\nleft = 1\ntop = 2\n").is_err());
    assert!(parse_document("Values = [1, 2, 3]\n").is_err());
}

#[test]
fn test_empty_document_is_empty_layer() {
    assert!(parse_document("").unwrap().is_empty());
    assert!(parse_document("# comment only\n").unwrap().is_empty());
}

#[test]
fn test_save_creates_missing_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("a").join("b").join("Settings.toml");

    LayerCodec::default().save(&create_full_layer(), &path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("tmp").exists());
}

#[cfg(unix)]
#[test]
fn test_saved_document_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Settings.toml");
    let codec = LayerCodec::new(CodecConfig {
        atomic_writes: true,
        file_permissions: 0o640,
    });

    codec.save(&create_full_layer(), &path).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[test]
fn test_hand_written_document() {
    let entries = parse_document(
        r#"
Quality = 80
RecorderTop = 12
LanguageCode = "en"
ClickColor = { a = 255, r = 0, g = 128, b = 255 }

[CaptionFont]
family = "Arial"
size = 20.0
"#,
    )
    .unwrap();

    assert_eq!(entries["Quality"], SettingValue::Integer(80));
    // Integers are kept as written; float keys widen them on read
    assert_eq!(entries["RecorderTop"].to::<f64>(), Some(12.0));
    assert_eq!(entries["ClickColor"], SettingValue::Color(Color::from_rgb(0, 128, 255)));
    assert_eq!(
        entries["CaptionFont"],
        SettingValue::Font(FontDescriptor::new("Arial", 20.0))
    );
}
