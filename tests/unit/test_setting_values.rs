//! Unit tests for setting values and typed keys
//!
//! Covers kind reporting, conversions between Rust types and stored values,
//! and agreement between the key catalog and the built-in defaults.

use settingstack::{
    config::builtin_defaults,
    models::keys,
    Color, EnumValue, FontDescriptor, FontStyle, Key, Rect, SettingType, SettingValue, ValueKind,
};

#[test]
fn test_value_kinds() {
    let cases = [
        (SettingValue::from(true), ValueKind::Bool),
        (SettingValue::from(5), ValueKind::Integer),
        (SettingValue::from(2.5), ValueKind::Float),
        (SettingValue::from("auto"), ValueKind::Text),
        (SettingValue::from(EnumValue::new("Key", "F7")), ValueKind::Enum),
        (SettingValue::from(Color::from_rgb(1, 2, 3)), ValueKind::Color),
        (SettingValue::from(Rect::new(0.0, 0.0, 10.0, 10.0)), ValueKind::Rect),
        (
            SettingValue::from(FontDescriptor::new("Segoe UI", 12.0)),
            ValueKind::Font,
        ),
    ];

    for (value, kind) in cases {
        assert_eq!(value.kind(), kind, "{:?}", value);
    }
}

#[test]
fn test_integer_widens_to_float_but_not_back() {
    let integer = SettingValue::Integer(3);
    assert_eq!(integer.to::<f64>(), Some(3.0));

    let float = SettingValue::Float(3.0);
    assert_eq!(float.to::<i64>(), None);
}

#[test]
fn test_narrow_integers_reject_out_of_range() {
    assert_eq!(SettingValue::Integer(-1).to::<u32>(), None);
    assert_eq!(SettingValue::Integer(i64::from(i32::MAX) + 1).to::<i32>(), None);
    assert_eq!(SettingValue::Integer(42).to::<i32>(), Some(42));
}

#[test]
fn test_mismatched_kinds_convert_to_none() {
    assert_eq!(SettingValue::Text("true".to_string()).to::<bool>(), None);
    assert_eq!(SettingValue::Bool(true).to::<String>(), None);
    assert_eq!(SettingValue::Color(Color::from_rgb(0, 0, 0)).to::<Rect>(), None);
}

#[test]
fn test_color_hex_forms() {
    let opaque = Color::from_hex("#FF0000").unwrap();
    assert_eq!(opaque, Color::from_argb(255, 255, 0, 0));

    let translucent = Color::from_hex("#80112233").unwrap();
    assert_eq!(translucent, Color::from_argb(0x80, 0x11, 0x22, 0x33));
    assert_eq!(Color::from_hex(&translucent.to_hex()), Some(translucent));

    assert!(Color::from_hex("red").is_none());
    assert!(Color::from_hex("#12345").is_none());
}

#[test]
fn test_font_builders() {
    let font = FontDescriptor::new("Segoe UI", 14.0)
        .with_style(FontStyle::Italic)
        .with_weight(FontDescriptor::BOLD_WEIGHT);

    assert_eq!(font.family, "Segoe UI");
    assert_eq!(font.style, FontStyle::Italic);
    assert_eq!(font.weight, 700);
    assert_eq!(FontDescriptor::new("Arial", 10.0).weight, FontDescriptor::NORMAL_WEIGHT);
}

#[test]
fn test_enum_value_type_check() {
    let value = EnumValue::new("Key", "F7");
    assert!(value.is("Key"));
    assert!(!value.is("ModifierKeys"));
}

#[test]
fn test_typed_key_reports_its_kind() {
    const CUSTOM: Key<Color> = Key::new("CustomColor");

    assert_eq!(CUSTOM.name(), "CustomColor");
    assert_eq!(CUSTOM.kind(), ValueKind::Color);
    assert_eq!(keys::RECORDER_LEFT.kind(), ValueKind::Float);
    assert_eq!(keys::REPEAT_COUNT.kind(), <i32 as SettingType>::KIND);
}

#[test]
fn test_catalog_matches_builtin_defaults() {
    let defaults = builtin_defaults().unwrap();

    for (name, kind) in keys::ALL {
        let value = defaults.get(name).unwrap_or_else(|| panic!("{} has no default", name));
        assert_eq!(value.kind(), *kind, "{}", name);
    }
}

#[test]
fn test_typed_defaults_convert() {
    let defaults = builtin_defaults().unwrap();

    let quality: i32 = defaults.get(keys::QUALITY.name()).and_then(SettingValue::to).unwrap();
    assert_eq!(quality, 10);

    let looped: bool = defaults.get(keys::LOOPED.name()).and_then(SettingValue::to).unwrap();
    assert!(looped);

    let font: FontDescriptor = defaults
        .get(keys::CAPTION_FONT.name())
        .and_then(SettingValue::to)
        .unwrap();
    assert!(font.size > 0.0);
}
