use serde::{Deserialize, Serialize};

/// Straight RGB color with components in `[0, 1]`.
///
/// Components are not clamped; shaders consume them as-is.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    /// Default effect tint (`#3366ff`).
    pub const DEFAULT_BLUE: Rgb = Rgb::from_packed(0x3366ff);

    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` integer. Bits above 24 are ignored.
    #[inline]
    pub const fn from_packed(rgb: u32) -> Self {
        Self::from_u8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parses `#rrggbb` or `rrggbb` (case-insensitive).
    ///
    /// Returns `None` for anything else, including 3-digit shorthand.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_u8(byte(0)?, byte(2)?, byte(4)?))
    }

    /// Parses a hex string, falling back to [`Rgb::DEFAULT_BLUE`].
    pub fn from_hex_or_default(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or_else(|| {
            log::debug!("malformed hex color {hex:?}; using default");
            Self::DEFAULT_BLUE
        })
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

/// Color as supplied by a host: a hex string or a packed integer.
///
/// Deserializes untagged, so config files may write either `"#3366ff"` or
/// `0x3366ff`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorInput {
    Hex(String),
    Packed(u32),
}

impl ColorInput {
    /// Resolves to a color. Malformed hex never fails; it yields the default blue.
    pub fn resolve(&self) -> Rgb {
        match self {
            ColorInput::Hex(s) => Rgb::from_hex_or_default(s),
            ColorInput::Packed(v) => Rgb::from_packed(*v),
        }
    }
}

impl Default for ColorInput {
    fn default() -> Self {
        ColorInput::Packed(0x3366ff)
    }
}

impl From<&str> for ColorInput {
    fn from(s: &str) -> Self {
        ColorInput::Hex(s.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(s: String) -> Self {
        ColorInput::Hex(s)
    }
}

impl From<u32> for ColorInput {
    fn from(v: u32) -> Self {
        ColorInput::Packed(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Rgb, b: Rgb) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
    }

    // ── packed ────────────────────────────────────────────────────────────

    #[test]
    fn packed_splits_channels() {
        let c = Rgb::from_packed(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
    }

    #[test]
    fn packed_ignores_high_bits() {
        assert_eq!(Rgb::from_packed(0xff_3366ff), Rgb::from_packed(0x3366ff));
    }

    // ── hex ───────────────────────────────────────────────────────────────

    #[test]
    fn hex_with_and_without_hash() {
        let a = Rgb::parse_hex("#3366ff").unwrap();
        let b = Rgb::parse_hex("3366ff").unwrap();
        assert_eq!(a, b);
        assert!(approx(a, Rgb::DEFAULT_BLUE));
    }

    #[test]
    fn hex_is_case_insensitive() {
        assert_eq!(Rgb::parse_hex("#AbCdEf"), Rgb::parse_hex("#abcdef"));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(Rgb::parse_hex("#fff").is_none());
        assert!(Rgb::parse_hex("#gg0000").is_none());
        assert!(Rgb::parse_hex("#3366ff00").is_none());
        assert!(Rgb::parse_hex("").is_none());
        assert!(Rgb::parse_hex(" #3366ff").is_none());
        // Multi-byte input must not panic on slicing.
        assert!(Rgb::parse_hex("#ééé").is_none());
    }

    #[test]
    fn malformed_hex_falls_back_to_default_blue() {
        assert_eq!(Rgb::from_hex_or_default("not a color"), Rgb::DEFAULT_BLUE);
        assert_eq!(ColorInput::from("#12").resolve(), Rgb::DEFAULT_BLUE);
    }

    // ── input ─────────────────────────────────────────────────────────────

    #[test]
    fn input_variants_resolve_to_same_color() {
        let hex = ColorInput::from("#ff0000").resolve();
        let packed = ColorInput::from(0xff0000u32).resolve();
        assert_eq!(hex, packed);
        assert_eq!(hex, Rgb::new(1.0, 0.0, 0.0));
    }
}
