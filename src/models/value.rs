//! Setting value model
//!
//! Every setting holds one of a fixed set of kinds. Documents store the
//! primitive kinds as bare TOML values and the composite kinds as tables
//! whose field names identify the kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of value a setting can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Bool,
    Integer,
    Float,
    Text,
    Enum,
    Color,
    Rect,
    Font,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Text => "string",
            ValueKind::Enum => "enum",
            ValueKind::Color => "color",
            ValueKind::Rect => "rectangle",
            ValueKind::Font => "font",
        };
        f.write_str(name)
    }
}

/// A named constant of some enumeration owned by the host application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumValue {
    /// Name of the enumeration, e.g. `Key` or `ModifierKeys`
    #[serde(rename = "enum")]
    pub type_name: String,
    /// Selected constant, e.g. `F7`
    pub variant: String,
}

impl EnumValue {
    pub fn new(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// Returns true if this constant belongs to `type_name`
    pub fn is(&self, type_name: &str) -> bool {
        self.type_name == type_name
    }
}

/// ARGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            6 => Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::from_argb(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Format as `#AARRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Slant of a font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        };
        f.write_str(name)
    }
}

/// Font attributes used by text overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontDescriptor {
    pub family: String,
    /// Size in points
    pub size: f64,
    #[serde(default)]
    pub style: FontStyle,
    /// CSS-style weight, 100 (thin) to 900 (black)
    #[serde(default = "default_font_weight")]
    pub weight: u16,
}

fn default_font_weight() -> u16 {
    FontDescriptor::NORMAL_WEIGHT
}

impl FontDescriptor {
    pub const NORMAL_WEIGHT: u16 = 400;
    pub const BOLD_WEIGHT: u16 = 700;

    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            style: FontStyle::Normal,
            weight: Self::NORMAL_WEIGHT,
        }
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = weight;
        self
    }
}

/// Dynamically-typed setting value
///
/// Variant order matters for deserialization: the first variant whose shape
/// matches the document value wins, so integers are tried before floats and
/// composite tables reject fields they do not own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Enum(EnumValue),
    Color(Color),
    Rect(Rect),
    Font(FontDescriptor),
}

impl SettingValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Bool(_) => ValueKind::Bool,
            SettingValue::Integer(_) => ValueKind::Integer,
            SettingValue::Float(_) => ValueKind::Float,
            SettingValue::Text(_) => ValueKind::Text,
            SettingValue::Enum(_) => ValueKind::Enum,
            SettingValue::Color(_) => ValueKind::Color,
            SettingValue::Rect(_) => ValueKind::Rect,
            SettingValue::Font(_) => ValueKind::Font,
        }
    }

    /// Convert into a concrete type, `None` on kind mismatch
    pub fn to<T: SettingType>(&self) -> Option<T> {
        T::from_setting(self)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(v) => write!(f, "{}", v),
            SettingValue::Integer(v) => write!(f, "{}", v),
            SettingValue::Float(v) => write!(f, "{}", v),
            SettingValue::Text(v) => f.write_str(v),
            SettingValue::Enum(v) => write!(f, "{}::{}", v.type_name, v.variant),
            SettingValue::Color(v) => write!(f, "{}", v),
            SettingValue::Rect(v) => write!(f, "{},{} {}x{}", v.x, v.y, v.width, v.height),
            SettingValue::Font(v) => write!(f, "{} {}pt {} {}", v.family, v.size, v.style, v.weight),
        }
    }
}

/// Conversion between a Rust type and [`SettingValue`]
pub trait SettingType: Sized {
    /// Kind this type is stored as
    const KIND: ValueKind;

    fn from_setting(value: &SettingValue) -> Option<Self>;

    fn into_setting(self) -> SettingValue;
}

macro_rules! impl_setting_type {
    (copy $ty:ty => $variant:ident) => {
        impl SettingType for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_setting(value: &SettingValue) -> Option<Self> {
                match value {
                    SettingValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            fn into_setting(self) -> SettingValue {
                SettingValue::$variant(self)
            }
        }
    };
    (clone $ty:ty => $variant:ident) => {
        impl SettingType for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn from_setting(value: &SettingValue) -> Option<Self> {
                match value {
                    SettingValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_setting(self) -> SettingValue {
                SettingValue::$variant(self)
            }
        }
    };
    (narrow $ty:ty) => {
        impl SettingType for $ty {
            const KIND: ValueKind = ValueKind::Integer;

            fn from_setting(value: &SettingValue) -> Option<Self> {
                match value {
                    SettingValue::Integer(v) => <$ty>::try_from(*v).ok(),
                    _ => None,
                }
            }

            fn into_setting(self) -> SettingValue {
                SettingValue::Integer(i64::from(self))
            }
        }
    };
}

impl_setting_type!(copy bool => Bool);
impl_setting_type!(copy i64 => Integer);
impl_setting_type!(copy Color => Color);
impl_setting_type!(copy Rect => Rect);
impl_setting_type!(clone String => Text);
impl_setting_type!(clone EnumValue => Enum);
impl_setting_type!(clone FontDescriptor => Font);
impl_setting_type!(narrow i32);
impl_setting_type!(narrow u32);

impl SettingType for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_setting(value: &SettingValue) -> Option<Self> {
        match value {
            SettingValue::Float(v) => Some(*v),
            // Hand-edited documents often drop the fractional part
            SettingValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    fn into_setting(self) -> SettingValue {
        SettingValue::Float(self)
    }
}

macro_rules! impl_from_for_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for SettingValue {
                fn from(value: $ty) -> Self {
                    value.into_setting()
                }
            }
        )*
    };
}

impl_from_for_value!(bool, i32, i64, u32, f64, String, EnumValue, Color, Rect, FontDescriptor);

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}
