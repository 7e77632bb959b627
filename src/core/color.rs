use std::fmt;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PaneError, PaneResult};

/// RGBA color in normalized 0..=1 channel values.
///
/// Indicator metadata carries colors as `#rrggbb` / `#rrggbbaa` strings, so
/// serde round-trips through the hex form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> PaneResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PaneError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex_str(input: &str) -> PaneResult<Self> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if digits.len() != 6 && digits.len() != 8 {
            return Err(PaneError::InvalidData(format!(
                "hex color `{input}` must have 6 or 8 hex digits"
            )));
        }

        let channel = |range: std::ops::Range<usize>| -> PaneResult<f64> {
            let raw = u8::from_str_radix(&digits[range], 16).map_err(|_| {
                PaneError::InvalidData(format!("hex color `{input}` contains non-hex digits"))
            })?;
            Ok(f64::from(raw) / 255.0)
        };

        let red = channel(0..2)?;
        let green = channel(2..4)?;
        let blue = channel(4..6)?;
        let alpha = if digits.len() == 8 { channel(6..8)? } else { 1.0 };
        Ok(Self::rgba(red, green, blue, alpha))
    }

    #[must_use]
    pub fn to_hex_string(self) -> String {
        let quantize = |value: f64| -> u8 { (value.clamp(0.0, 1.0) * 255.0).round() as u8 };
        if (self.alpha - 1.0).abs() < f64::EPSILON {
            format!(
                "#{:02x}{:02x}{:02x}",
                quantize(self.red),
                quantize(self.green),
                quantize(self.blue)
            )
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                quantize(self.red),
                quantize(self.green),
                quantize(self.blue),
                quantize(self.alpha)
            )
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex_str(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::Color;
    use approx::assert_relative_eq;

    #[test]
    fn hex_round_trip_preserves_channels() {
        let color = Color::from_hex_str("#26a69a").expect("parse");
        assert_relative_eq!(color.red, 38.0 / 255.0);
        assert_relative_eq!(color.green, 166.0 / 255.0);
        assert_relative_eq!(color.blue, 154.0 / 255.0);
        assert_eq!(color.to_hex_string(), "#26a69a");

        let translucent = Color::from_hex_str("ef5350cc").expect("parse");
        assert_relative_eq!(translucent.alpha, 204.0 / 255.0);
        assert_eq!(translucent.to_hex_string(), "#ef5350cc");
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        assert!(Color::from_hex_str("#12345").is_err());
        assert!(Color::from_hex_str("#gggggg").is_err());
    }
}
