use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::color::TablePalette;
use crate::foundation::error::{SeatplanError, SeatplanResult};
use crate::guests::group::Exclusions;
use crate::layout::label::LabelPolicy;
use crate::layout::table::{LayoutParams, TableGeometry};
use crate::render::interactive::ViewportPolicy;
use crate::render::style::ChartStyle;

/// Output format for batch export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Self-contained SVG.
    #[default]
    Svg,
    /// Transparent PNG rendered from the SVG.
    Png,
    /// Standalone HTML document.
    Html,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
            Self::Html => "html",
        }
    }
}

/// Batch export settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportSettings {
    /// Output format.
    pub format: ExportFormat,
    /// Worker threads for per-table capture; `1` runs tables sequentially.
    pub threads: usize,
    /// Pause between loading markup and capturing it, in milliseconds.
    pub settle_ms: u64,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` fonts.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            format: ExportFormat::Svg,
            threads: 1,
            settle_ms: 0,
            font_dirs: Vec::new(),
        }
    }
}

/// Everything configurable, loadable from one JSON file.
///
/// Missing keys take their defaults, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeatplanConfig {
    /// Reserved groups/participation kept off radial tables.
    pub exclusions: Exclusions,
    /// Table colors.
    pub palette: TablePalette,
    /// Label composition and sizing.
    pub labels: LabelPolicy,
    /// Circle and seat proportions.
    pub geometry: TableGeometry,
    /// Colors and fonts.
    pub style: ChartStyle,
    /// Compact mode and deep links.
    pub viewport: ViewportPolicy,
    /// Batch export.
    pub export: ExportSettings,
}

impl Default for SeatplanConfig {
    fn default() -> Self {
        Self {
            exclusions: Exclusions::for_groups(["高砂", "応援"])
                .with_participation(["principal", "cheering"]),
            palette: TablePalette::from_pairs([
                ("A", "#e8a0bf"),
                ("B", "#a0c4e8"),
                ("C", "#b8e0a0"),
                ("D", "#f2d08a"),
                ("E", "#c7a8e0"),
                ("F", "#f0b49a"),
            ]),
            labels: LabelPolicy::default(),
            geometry: TableGeometry::default(),
            style: ChartStyle::default(),
            viewport: ViewportPolicy::default(),
            export: ExportSettings::default(),
        }
    }
}

impl SeatplanConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SeatplanResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| SeatplanError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SeatplanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SeatplanError::io(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values no layout can be drawn with.
    pub fn validate(&self) -> SeatplanResult<()> {
        let g = &self.geometry;
        if g.canvas.width == 0 || g.canvas.height == 0 {
            return Err(SeatplanError::validation(
                "geometry.canvas width/height must be non-zero",
            ));
        }
        for (name, v) in [
            ("geometry.ringRatio", g.ring_ratio),
            ("geometry.portraitRatio", g.portrait_ratio),
            ("geometry.centerBadgeRatio", g.center_badge_ratio),
            ("labels.tiers.largePx", self.labels.tiers.large_px),
            ("labels.tiers.smallPx", self.labels.tiers.small_px),
            ("viewport.compactScale", self.viewport.compact_scale),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SeatplanError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.export.threads == 0 {
            return Err(SeatplanError::validation("export.threads must be >= 1"));
        }
        Ok(())
    }

    /// Engine inputs derived from this config.
    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            exclusions: self.exclusions.clone(),
            palette: self.palette.clone(),
            labels: self.labels.clone(),
            geometry: self.geometry,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
