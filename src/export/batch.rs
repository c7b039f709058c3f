use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;

use crate::assets::store::{PortraitSource, PortraitStore};
use crate::config::{ExportFormat, SeatplanConfig};
use crate::foundation::error::{SeatplanError, SeatplanResult};
use crate::guests::model::GuestList;
use crate::layout::table::{TableLayout, layout_tables};
use crate::render::html::{HtmlOptions, emit_table_document};
use crate::render::raster::{RasterCapture, TempMarkup};
use crate::render::style::ChartStyle;
use crate::render::svg::emit_svg;

/// One table that could not be exported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableFailure {
    /// Group key of the table.
    pub group_key: String,
    /// Rendered error message.
    pub error: String,
}

/// Outcome of a batch export, in table-key order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Files written.
    pub written: Vec<PathBuf>,
    /// Tables that failed; the rest of the batch still ran.
    pub failed: Vec<TableFailure>,
}

impl ExportReport {
    /// `true` when no table failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Group keys of the failed tables.
    pub fn failed_keys(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.group_key.as_str()).collect()
    }
}

/// A configured batch: where files go, in which format, drawn how.
///
/// Portraits must already be resolved; a job never touches the asset root itself.
pub struct ExportJob<'a> {
    /// Output directory. Must exist.
    pub out_dir: PathBuf,
    /// Output format.
    pub format: ExportFormat,
    /// Colors and fonts.
    pub style: ChartStyle,
    /// Options for [`ExportFormat::Html`] documents.
    pub html: HtmlOptions,
    /// Worker threads, at least 1.
    pub threads: usize,
    /// Raster engine for [`ExportFormat::Png`].
    pub capture: RasterCapture,
    /// Preloaded portraits.
    pub portraits: &'a dyn PortraitSource,
}

impl std::fmt::Debug for ExportJob<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportJob")
            .field("out_dir", &self.out_dir)
            .field("format", &self.format)
            .field("threads", &self.threads)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

impl<'a> ExportJob<'a> {
    /// Job for `cfg`'s export settings.
    ///
    /// The system font scan only happens for PNG output.
    pub fn from_config(
        cfg: &SeatplanConfig,
        out_dir: impl Into<PathBuf>,
        portraits: &'a dyn PortraitSource,
    ) -> Self {
        let capture = match cfg.export.format {
            ExportFormat::Png => RasterCapture::new(
                &cfg.export.font_dirs,
                Duration::from_millis(cfg.export.settle_ms),
            ),
            ExportFormat::Svg | ExportFormat::Html => RasterCapture::without_fonts(),
        };
        Self {
            out_dir: out_dir.into(),
            format: cfg.export.format,
            style: cfg.style.clone(),
            html: HtmlOptions::default(),
            threads: cfg.export.threads,
            capture,
            portraits,
        }
    }

    /// Replace the raster engine, e.g. to reuse one font database across jobs.
    pub fn with_capture(mut self, capture: RasterCapture) -> Self {
        self.capture = capture;
        self
    }

    /// Export every table, isolating failures per table.
    ///
    /// Only a thread pool that cannot be built fails the whole batch. Zero tables is an empty
    /// report.
    pub fn run(&self, tables: &[TableLayout]) -> SeatplanResult<ExportReport> {
        if tables.is_empty() {
            tracing::info!("no tables to export");
            return Ok(ExportReport::default());
        }

        let pool = build_thread_pool(Some(self.threads))?;
        let results: Vec<(String, SeatplanResult<PathBuf>)> = pool.install(|| {
            tables
                .par_iter()
                .map(|table| (table.group_key.clone(), self.export_table(table)))
                .collect()
        });

        let mut report = ExportReport::default();
        for (group_key, result) in results {
            match result {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    tracing::warn!(table = %group_key, error = %e, "table export failed");
                    report.failed.push(TableFailure {
                        group_key,
                        error: e.to_string(),
                    });
                }
            }
        }
        tracing::info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "export finished"
        );
        Ok(report)
    }

    /// Output path for `table`.
    pub fn out_path(&self, table: &TableLayout) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", table.file_stem(), self.format.extension()))
    }

    #[tracing::instrument(skip_all, fields(table = %table.group_key, format = ?self.format))]
    fn export_table(&self, table: &TableLayout) -> SeatplanResult<PathBuf> {
        let out_path = self.out_path(table);
        let bytes = match self.format {
            ExportFormat::Svg => emit_svg(table, &self.style, self.portraits).into_bytes(),
            ExportFormat::Html => {
                emit_table_document(table, &self.style, self.portraits, &self.html).into_bytes()
            }
            ExportFormat::Png => self.capture_png(table)?,
        };
        std::fs::write(&out_path, bytes)
            .map_err(|e| SeatplanError::io(format!("write '{}': {e}", out_path.display())))?;
        tracing::info!(path = %out_path.display(), seats = table.guests.len(), "wrote table");
        Ok(out_path)
    }

    /// Write temp markup, capture it, drop the markup; the guard removes the file on every path.
    fn capture_png(&self, table: &TableLayout) -> SeatplanResult<Vec<u8>> {
        let svg = emit_svg(table, &self.style, self.portraits);
        let markup = TempMarkup::write(&self.out_dir, &table.file_stem(), "svg", &svg)?;
        tracing::debug!(markup = %markup.path().display(), "capturing");
        let image = self
            .capture
            .capture_file(markup.path(), table.geometry().canvas)?;
        drop(markup);
        image.to_png()
    }
}

/// Read `guests_path`, lay out every table, and export it into `out_dir`.
///
/// Unreadable input and an output directory that cannot be created fail the call; anything that
/// goes wrong for a single table lands in [`ExportReport::failed`].
pub fn export_tables(
    guests_path: &Path,
    out_dir: &Path,
    assets_root: &Path,
    cfg: &SeatplanConfig,
) -> SeatplanResult<ExportReport> {
    let guests = GuestList::from_path(guests_path)?;
    let tables = layout_tables(guests.guests(), &cfg.layout_params());
    tracing::info!(
        guests = guests.len(),
        tables = tables.len(),
        "laid out tables"
    );

    std::fs::create_dir_all(out_dir).map_err(|e| {
        SeatplanError::io(format!("create output dir '{}': {e}", out_dir.display()))
    })?;

    let portraits = PortraitStore::prepare(&tables, assets_root);
    if portraits.missing_count() > 0 {
        tracing::info!(
            missing = portraits.missing_count(),
            "some portraits fall back to placeholders"
        );
    }

    ExportJob::from_config(cfg, out_dir, &portraits).run(&tables)
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> SeatplanResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SeatplanError::validation(
            "export 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SeatplanError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/batch.rs"]
mod tests;
