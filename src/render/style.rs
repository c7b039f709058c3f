use serde::{Deserialize, Serialize};

/// Visual constants shared by every emitter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartStyle {
    /// CSS / SVG font-family list.
    pub font_family: String,
    /// Caption above the group key in the center badge.
    pub center_caption: String,
    /// Fill used when a guest has no usable portrait.
    pub placeholder_fill: String,
    /// Name label color.
    pub text_color: String,
    /// Title label color.
    pub title_color: String,
    /// Optional background fill; `None` leaves the canvas transparent.
    pub background: Option<String>,
    /// Seat ring stroke width around each portrait.
    pub portrait_stroke_px: f64,
    /// Title font size relative to the name label.
    pub title_scale: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: "'Noto Serif JP', 'Hiragino Mincho ProN', serif".to_string(),
            center_caption: "TABLE".to_string(),
            placeholder_fill: "#e5e1da".to_string(),
            text_color: "#333333".to_string(),
            title_color: "#777777".to_string(),
            background: None,
            portrait_stroke_px: 3.0,
            title_scale: 0.75,
        }
    }
}

/// Escape the five XML special characters for element text and attribute values.
pub(crate) fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Fixed two-decimal formatting keeps emitted markup byte-stable across runs.
pub(crate) fn num(v: f64) -> String {
    let s = format!("{v:.2}");
    if s == "-0.00" { "0.00".to_string() } else { s }
}

/// Make a string safe to use inside an XML id attribute.
pub(crate) fn id_fragment(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
