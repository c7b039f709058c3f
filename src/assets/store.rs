use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::error::{SeatplanError, SeatplanResult};
use crate::layout::table::TableLayout;

/// A decoded, embeddable guest portrait.
#[derive(Clone, Debug)]
pub struct Portrait {
    /// Normalized path relative to the asset root.
    pub norm_path: String,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded image bytes (PNG, JPEG or GIF).
    pub bytes: Arc<Vec<u8>>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Portrait {
    /// `data:` URI suitable for an SVG `<image href>` or an HTML `<img src>`.
    pub fn data_uri(&self) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(self.bytes.as_slice());
        format!("data:{};base64,{b64}", self.mime)
    }
}

/// Lookup from a guest's image path to a ready portrait.
///
/// `None` means "draw a placeholder": the path was unsafe, the file was missing, or it did not
/// decode. Implementations never fail the table for it.
pub trait PortraitSource: Sync {
    /// Portrait for `rel_path`, if one is available.
    fn portrait(&self, rel_path: &str) -> Option<&Portrait>;
}

/// Source that never has portraits; every seat gets a placeholder.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPortraits;

impl PortraitSource for NoPortraits {
    fn portrait(&self, _rel_path: &str) -> Option<&Portrait> {
        None
    }
}

/// Normalize and validate asset paths from guest records.
///
/// Uses `/` separators and drops `.` segments. A leading `/` is read as relative to the asset
/// root, matching how the website serves portraits from its public directory. Parent traversals
/// (`..`) are rejected.
pub fn normalize_rel_path(source: &str) -> SeatplanResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.is_empty() {
        return Err(SeatplanError::validation("asset path must be non-empty"));
    }
    if s.contains("://") || s.starts_with("data:") {
        return Err(SeatplanError::validation(
            "asset path must be a file path, not a URL",
        ));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SeatplanError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SeatplanError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Portraits for a set of tables, loaded and decoded up front.
///
/// All filesystem access happens in [`PortraitStore::prepare`], so emitters stay IO-free and a
/// capture never starts with an asset still pending.
#[derive(Clone, Debug, Default)]
pub struct PortraitStore {
    root: PathBuf,
    by_path: BTreeMap<String, Option<Portrait>>,
}

impl PortraitStore {
    /// Load every distinct image referenced by `tables` from under `root`.
    pub fn prepare(tables: &[TableLayout], root: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            root: root.into(),
            by_path: BTreeMap::new(),
        };
        for seat in tables.iter().flat_map(|t| t.guests.iter()) {
            if let Some(path) = seat.image_path.as_deref() {
                store.load(path);
            }
        }
        store
    }

    /// Root directory used to resolve relative paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of referenced images that resolved to a placeholder.
    pub fn missing_count(&self) -> usize {
        self.by_path.values().filter(|p| p.is_none()).count()
    }

    /// Number of portraits that loaded.
    pub fn loaded_count(&self) -> usize {
        self.by_path.values().filter(|p| p.is_some()).count()
    }

    fn load(&mut self, raw: &str) {
        if self.by_path.contains_key(raw) {
            return;
        }
        let loaded = match self.read_portrait(raw) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::warn!(path = raw, error = %e, "portrait unavailable, using placeholder");
                None
            }
        };
        self.by_path.insert(raw.to_string(), loaded);
    }

    fn read_portrait(&self, raw: &str) -> SeatplanResult<Portrait> {
        let norm_path = normalize_rel_path(raw)?;
        let path = self.root.join(Path::new(&norm_path));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read portrait '{}'", path.display()))?;
        decode_portrait(norm_path, bytes)
    }
}

impl PortraitSource for PortraitStore {
    fn portrait(&self, rel_path: &str) -> Option<&Portrait> {
        self.by_path.get(rel_path).and_then(Option::as_ref)
    }
}

/// Validate image bytes and make sure every renderer can embed them.
///
/// PNG, JPEG and GIF pass through untouched; any other decodable format is re-encoded as PNG.
pub fn decode_portrait(norm_path: String, bytes: Vec<u8>) -> SeatplanResult<Portrait> {
    let format = image::guess_format(&bytes)
        .map_err(|e| SeatplanError::asset(format!("unrecognized image '{norm_path}': {e}")))?;
    let img = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| SeatplanError::asset(format!("decode image '{norm_path}': {e}")))?;
    let (width, height) = (img.width(), img.height());

    let (mime, bytes) = match format {
        image::ImageFormat::Png | image::ImageFormat::Jpeg | image::ImageFormat::Gif => {
            (format.to_mime_type(), bytes)
        }
        _ => {
            let mut buf = Vec::new();
            img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
                .map_err(|e| {
                    SeatplanError::asset(format!("re-encode image '{norm_path}' as png: {e}"))
                })?;
            (image::ImageFormat::Png.to_mime_type(), buf)
        }
    };

    Ok(Portrait {
        norm_path,
        mime,
        bytes: Arc::new(bytes),
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
