//! Seatplan lays out wedding-reception seating charts.
//!
//! Guests are grouped by table, put in seat order, and placed evenly around a circle; each seat
//! label gets one of two font sizes. The computed [`TableLayout`]s then feed interchangeable
//! emitters:
//!
//! - [`render::svg`]: self-contained SVG documents
//! - [`render::html`]: standalone HTML documents and the interactive page
//! - [`render::raster`]: transparent PNG capture of the SVG
//! - [`render::interactive`]: seat views for an on-screen chart with a compact mode
//!
//! [`export_tables`] runs a whole batch, one output file per table.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod export;
mod foundation;
mod guests;
mod layout;

/// Configuration file model.
pub mod config;
pub mod render;

pub use crate::foundation::core::{Canvas, Point, Rgba8, Vec2};
pub use crate::foundation::error::{SeatplanError, SeatplanResult};

pub use crate::assets::color::{DEFAULT_TABLE_COLOR, TablePalette, parse_hex};
pub use crate::assets::store::{
    NoPortraits, Portrait, PortraitSource, PortraitStore, decode_portrait, normalize_rel_path,
};
pub use crate::config::{ExportFormat, ExportSettings, SeatplanConfig};
pub use crate::export::batch::{ExportJob, ExportReport, TableFailure, export_tables};
pub use crate::guests::group::{
    Exclusions, TableGroup, group_guests, parse_table_order, seat_order, table_groups,
};
pub use crate::guests::model::{DEFAULT_HONORIFIC, Guest, GuestList};
pub use crate::layout::label::{
    FontTiers, LONG_LABEL_THRESHOLD, LabelPolicy, LabelSpec, size_label, truncate_with_ellipsis,
};
pub use crate::layout::placement::{
    Placement, START_ANGLE, place_guests, point_on_circle, seat_angles,
};
pub use crate::layout::table::{
    LayoutParams, SeatLayout, TableGeometry, TableLayout, layout_table, layout_tables,
};
