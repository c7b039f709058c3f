use serde::{Deserialize, Serialize};

/// Labels longer than this many codepoints use the small font tier.
pub const LONG_LABEL_THRESHOLD: usize = 7;

/// The two font sizes a seat label can take.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FontTiers {
    /// Size for labels up to [`LONG_LABEL_THRESHOLD`] codepoints.
    pub large_px: f64,
    /// Size for longer labels.
    pub small_px: f64,
}

impl Default for FontTiers {
    fn default() -> Self {
        Self {
            large_px: 16.0,
            small_px: 12.0,
        }
    }
}

/// How labels are composed and sized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelPolicy {
    /// Font tiers.
    pub tiers: FontTiers,
    /// Honorific used when a guest has none.
    pub default_honorific: String,
    /// Optional ellipsis truncation limit in codepoints. `None` keeps full text.
    pub max_chars: Option<usize>,
}

impl Default for LabelPolicy {
    fn default() -> Self {
        Self {
            tiers: FontTiers::default(),
            default_honorific: crate::guests::model::DEFAULT_HONORIFIC.to_string(),
            max_chars: None,
        }
    }
}

/// Sized label text for one seat.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSpec {
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Text to draw (possibly truncated).
    pub text: String,
}

impl LabelPolicy {
    /// Compose `name + " " + honorific` and pick its font tier.
    ///
    /// The tier is decided on the full composed text before any truncation, so truncating never
    /// changes which size a name gets.
    pub fn size_label(&self, display_name: &str, honorific: &str) -> LabelSpec {
        let honorific = if honorific.trim().is_empty() {
            self.default_honorific.as_str()
        } else {
            honorific
        };
        let text = format!("{display_name} {honorific}");
        let count = text.chars().count();

        let font_size_px = if count > LONG_LABEL_THRESHOLD {
            self.tiers.small_px
        } else {
            self.tiers.large_px
        };

        let text = match self.max_chars {
            Some(max) => truncate_with_ellipsis(&text, max),
            None => text,
        };

        LabelSpec { font_size_px, text }
    }
}

/// Size a label with the default policy.
pub fn size_label(display_name: &str, honorific: &str) -> LabelSpec {
    LabelPolicy::default().size_label(display_name, honorific)
}

/// Cut `text` to at most `max_chars` codepoints, ending in `…` when shortened.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
#[path = "../../tests/unit/layout/label.rs"]
mod tests;
