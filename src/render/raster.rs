use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::foundation::core::Canvas;
use crate::foundation::error::{SeatplanError, SeatplanResult};

/// Largest raster edge we agree to allocate.
const MAX_DIM: u32 = 16_384;

/// Straight-alpha RGBA8 raster produced by a capture.
#[derive(Clone, Debug)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major, straight alpha.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Encode as PNG.
    pub fn to_png(&self) -> SeatplanResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| SeatplanError::render("raster buffer does not match its dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| SeatplanError::render(format!("encode png: {e}")))?;
        Ok(buf)
    }

    /// `true` if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }
}

/// Renders table markup to a fixed-size transparent raster with `resvg`.
///
/// The font database is built once and shared by every capture, so a batch of tables pays the
/// system font scan a single time.
#[derive(Clone)]
pub struct RasterCapture {
    fontdb: Arc<usvg::fontdb::Database>,
    settle: Duration,
}

impl std::fmt::Debug for RasterCapture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterCapture")
            .field("font_faces", &self.fontdb.len())
            .field("settle", &self.settle)
            .finish()
    }
}

impl RasterCapture {
    /// Capture engine with system fonts plus any fonts found in `font_dirs`.
    pub fn new(font_dirs: &[PathBuf], settle: Duration) -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        for dir in font_dirs {
            let before = db.len();
            for path in font_files(dir) {
                if let Err(e) = db.load_font_file(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable font");
                }
            }
            tracing::debug!(dir = %dir.display(), faces = db.len() - before, "loaded font dir");
        }
        Self {
            fontdb: Arc::new(db),
            settle,
        }
    }

    /// Capture engine without any fonts; text is dropped. Used where glyphs do not matter.
    pub fn without_fonts() -> Self {
        Self {
            fontdb: Arc::new(usvg::fontdb::Database::new()),
            settle: Duration::ZERO,
        }
    }

    /// Number of font faces available to captures.
    pub fn font_face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Rasterize in-memory SVG markup at `canvas` size.
    pub fn capture_str(&self, svg: &str, canvas: Canvas) -> SeatplanResult<RasterImage> {
        let tree = usvg::Tree::from_str(svg, &self.options(None))
            .map_err(|e| SeatplanError::render(format!("parse svg markup: {e}")))?;
        self.render_tree(&tree, canvas)
    }

    /// Load markup from `path` and rasterize it at `canvas` size.
    ///
    /// Relative references inside the markup resolve against the file's directory. The settle
    /// delay runs after loading and before capture.
    pub fn capture_file(&self, path: &Path, canvas: Canvas) -> SeatplanResult<RasterImage> {
        let bytes = std::fs::read(path).map_err(|e| {
            SeatplanError::io(format!("read markup '{}': {e}", path.display()))
        })?;
        let tree = usvg::Tree::from_data(&bytes, &self.options(path.parent()))
            .map_err(|e| SeatplanError::render(format!("parse '{}': {e}", path.display())))?;
        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
        self.render_tree(&tree, canvas)
    }

    fn options(&self, resources_dir: Option<&Path>) -> usvg::Options<'static> {
        usvg::Options {
            resources_dir: resources_dir.map(Path::to_path_buf),
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        }
    }

    fn render_tree(&self, tree: &usvg::Tree, canvas: Canvas) -> SeatplanResult<RasterImage> {
        if canvas.width > MAX_DIM || canvas.height > MAX_DIM {
            return Err(SeatplanError::render(format!(
                "raster size too large: {}x{} (max {MAX_DIM}x{MAX_DIM})",
                canvas.width, canvas.height
            )));
        }
        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| SeatplanError::render("failed to allocate pixmap"))?;

        let size = tree.size();
        let sx = (canvas.width as f32) / size.width();
        let sy = (canvas.height as f32) / size.height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(tree, xform, &mut pixmap.as_mut());

        let mut data = pixmap.data().to_vec();
        demultiply_rgba8_in_place(&mut data);
        Ok(RasterImage {
            width: canvas.width,
            height: canvas.height,
            data,
        })
    }
}

/// Temporary markup file that is removed when dropped.
///
/// Holding one across a capture guarantees the file is deleted on every exit path, including an
/// early `?` return or a panic unwinding through the caller.
#[derive(Debug)]
pub struct TempMarkup {
    file: tempfile::NamedTempFile,
}

impl TempMarkup {
    /// Write `markup` to a fresh temporary file inside `dir`.
    ///
    /// `dir` should be where the markup's relative asset references resolve from.
    pub fn write(dir: &Path, stem: &str, extension: &str, markup: &str) -> SeatplanResult<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!(".{stem}-"))
            .suffix(&format!(".{extension}"))
            .tempfile_in(dir)
            .map_err(|e| {
                SeatplanError::io(format!("create temp markup in '{}': {e}", dir.display()))
            })?;
        file.write_all(markup.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| SeatplanError::io(format!("write temp markup: {e}")))?;
        Ok(Self { file })
    }

    /// Path of the temporary file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

/// Font files directly inside one of the configured `font_dirs`, sorted so faces load in the same
/// order on every run.
fn font_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "font dir unreadable, skipping");
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|s| s.to_str())
                    .is_some_and(|ext| {
                        matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc")
                    })
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
