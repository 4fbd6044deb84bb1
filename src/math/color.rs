//! RGB colors parsed from `#rrggbb` hex and stored as normalized floats.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::lerp::Lerp;

/// An RGB color with components in `[0, 1]` (scaling may push them above 1)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::from_hex(0xffffff);
    pub const BLACK: Self = Self::from_hex(0x000000);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_hex)
    }

    /// Format as `#rrggbb`, clamping components into range
    pub fn to_hex_string(&self) -> String {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }

    /// Multiply every channel by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// RGBA with the given alpha
    pub fn with_alpha(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl Lerp for Color {
    #[inline]
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self::new(
            Lerp::lerp(&self.r, &other.r, t),
            Lerp::lerp(&self.g, &other.g, t),
            Lerp::lerp(&self.b, &other.b, t),
        )
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color '{s}', expected #rrggbb")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let green = Color::parse("#5c7a50").unwrap();
        assert!((green.r - 92.0 / 255.0).abs() < 1e-6);
        assert!((green.g - 122.0 / 255.0).abs() < 1e-6);
        assert!((green.b - 80.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::parse("ffffff"), Some(Color::WHITE));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::parse("#fff"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse(""), None);
        // Sign prefixes and multi-byte characters are not hex digits
        assert_eq!(Color::parse("#+fffff"), None);
        assert_eq!(Color::parse("#-fffff"), None);
        assert_eq!(Color::parse("#ffé00"), None);
    }

    #[test]
    fn test_hex_string_round_trip() {
        let c = Color::from_hex(0xfffeb0);
        assert_eq!(c.to_hex_string(), "#fffeb0");
    }

    #[test]
    fn test_lerp_white_to_black() {
        let mid = Color::WHITE.lerp(&Color::BLACK, 0.5);
        assert!((mid.r - 0.5).abs() < 1e-6);
        assert!((mid.g - 0.5).abs() < 1e-6);
        assert!((mid.b - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Color::from_hex(0x333333)).unwrap();
        assert_eq!(json, "\"#333333\"");
        let back: Color = serde_json::from_str("\"#e0e0e0\"").unwrap();
        assert_eq!(back, Color::from_hex(0xe0e0e0));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
