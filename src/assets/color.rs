use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{SeatplanError, SeatplanResult};

/// Color used for a table with no (valid) palette entry.
pub const DEFAULT_TABLE_COLOR: Rgba8 = Rgba8::rgb(0xb0, 0x8d, 0x57);

/// Per-table colors keyed by group key.
///
/// Bad entries are not rejected at load time; they fall back to the default color when a table
/// asks for them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablePalette {
    /// Group key to `#rrggbb` / `#rgb` / `#rrggbbaa`.
    pub colors: BTreeMap<String, String>,
    /// Override for [`DEFAULT_TABLE_COLOR`].
    pub default: Option<String>,
}

impl TablePalette {
    /// Palette from `(key, hex)` pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            colors: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            default: None,
        }
    }

    /// Fallback color for keys without a usable entry.
    pub fn default_color(&self) -> Rgba8 {
        match self.default.as_deref() {
            None => DEFAULT_TABLE_COLOR,
            Some(hex) => parse_hex(hex).unwrap_or_else(|e| {
                tracing::warn!(color = hex, error = %e, "invalid default table color");
                DEFAULT_TABLE_COLOR
            }),
        }
    }

    /// Color for table `key`.
    pub fn color_for(&self, key: &str) -> Rgba8 {
        let Some(hex) = self.colors.get(key) else {
            return self.default_color();
        };
        parse_hex(hex).unwrap_or_else(|e| {
            tracing::warn!(table = key, color = hex.as_str(), error = %e, "invalid table color");
            self.default_color()
        })
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional, case-insensitive).
pub fn parse_hex(s: &str) -> SeatplanResult<Rgba8> {
    let s = s.trim();
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(SeatplanError::validation(format!(
            "hex color \"{s}\" must contain only hex digits"
        )));
    }

    fn hex_byte(pair: &str) -> SeatplanResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| SeatplanError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, i) in out.iter_mut().zip(0..3) {
                let v = hex_byte(&digits[i..i + 1])?;
                *slot = v * 17;
            }
            Ok(Rgba8::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Rgba8::rgb(
            hex_byte(&digits[0..2])?,
            hex_byte(&digits[2..4])?,
            hex_byte(&digits[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&digits[0..2])?,
            g: hex_byte(&digits[2..4])?,
            b: hex_byte(&digits[4..6])?,
            a: hex_byte(&digits[6..8])?,
        }),
        _ => Err(SeatplanError::validation(
            "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
