use serde::{Deserialize, Serialize};

use crate::assets::color::TablePalette;
use crate::foundation::core::{Canvas, Point, Rgba8};
use crate::guests::group::{Exclusions, TableGroup, table_groups};
use crate::guests::model::Guest;
use crate::layout::label::LabelPolicy;
use crate::layout::placement::place_guests;

/// Size of the circle guests are placed on, and of the things drawn at each seat.
///
/// Every length is a fraction of the canvas' shorter side, so the same geometry scales from a
/// print-size export down to a phone preview.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableGeometry {
    /// Output canvas.
    pub canvas: Canvas,
    /// Seat ring radius.
    pub ring_ratio: f64,
    /// Portrait circle radius at each seat.
    pub portrait_ratio: f64,
    /// Radius of the center table badge.
    pub center_badge_ratio: f64,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            ring_ratio: 0.35,
            portrait_ratio: 0.06,
            center_badge_ratio: 0.11,
        }
    }
}

impl TableGeometry {
    /// Default proportions on `canvas`.
    pub fn for_canvas(canvas: Canvas) -> Self {
        Self {
            canvas,
            ..Self::default()
        }
    }

    /// Table center.
    pub fn center(&self) -> Point {
        self.canvas.center()
    }

    /// Seat ring radius in pixels.
    pub fn ring_radius(&self) -> f64 {
        self.canvas.min_side() * self.ring_ratio
    }

    /// Portrait radius in pixels.
    pub fn portrait_radius(&self) -> f64 {
        self.canvas.min_side() * self.portrait_ratio
    }

    /// Center badge radius in pixels.
    pub fn center_badge_radius(&self) -> f64 {
        self.canvas.min_side() * self.center_badge_ratio
    }

    /// Same canvas with every radius multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            ring_ratio: self.ring_ratio * factor,
            portrait_ratio: self.portrait_ratio * factor,
            center_badge_ratio: self.center_badge_ratio * factor,
            ..*self
        }
    }
}

/// Everything an emitter needs to draw one seat.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatLayout {
    /// Guest id.
    pub guest_id: String,
    /// Absolute x of the seat anchor.
    pub x: f64,
    /// Absolute y of the seat anchor.
    pub y: f64,
    /// Angle from the table center.
    pub angle_radians: f64,
    /// Label font size.
    pub font_size_px: f64,
    /// Name plus honorific, possibly truncated.
    pub label_text: String,
    /// Secondary label.
    pub title: Option<String>,
    /// Seat-number badge text (may be empty).
    pub seat_badge: String,
    /// Portrait path relative to the asset root.
    pub image_path: Option<String>,
}

/// A fully laid-out table.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableLayout {
    /// Group key.
    pub group_key: String,
    /// Table color as `#rrggbb`.
    pub color: String,
    /// Seats in order, seat 0 first.
    pub guests: Vec<SeatLayout>,
    #[serde(skip)]
    pub(crate) rgba: Rgba8,
    #[serde(skip)]
    pub(crate) geometry: TableGeometry,
}

impl TableLayout {
    /// Table color.
    pub fn rgba(&self) -> Rgba8 {
        self.rgba
    }

    /// Geometry the seats were placed with.
    pub fn geometry(&self) -> &TableGeometry {
        &self.geometry
    }

    /// Output file stem, `table-<key>`.
    ///
    /// Path separators, characters Windows forbids in file names, and control characters in the
    /// key become `_`.
    pub fn file_stem(&self) -> String {
        let key: String = self
            .group_key
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        format!("table-{key}")
    }
}

/// Inputs the engine needs besides the guest list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutParams {
    /// Reserved categories kept off radial tables.
    pub exclusions: Exclusions,
    /// Table colors.
    pub palette: TablePalette,
    /// Label composition and sizing.
    pub labels: LabelPolicy,
    /// Circle and seat sizes.
    pub geometry: TableGeometry,
}

/// Lay out one already-ordered table group.
pub fn layout_table(
    group: &TableGroup,
    palette: &TablePalette,
    labels: &LabelPolicy,
    geometry: &TableGeometry,
) -> TableLayout {
    let rgba = palette.color_for(&group.key);
    let placements = place_guests(&group.guests, geometry.center(), geometry.ring_radius());

    let guests = group
        .guests
        .iter()
        .zip(placements)
        .map(|(guest, placement)| seat_for(guest, placement, labels))
        .collect();

    TableLayout {
        group_key: group.key.clone(),
        color: rgba.to_hex(),
        guests,
        rgba,
        geometry: *geometry,
    }
}

/// Group, place and size every standard table in `guests`, in key order.
pub fn layout_tables(guests: &[Guest], params: &LayoutParams) -> Vec<TableLayout> {
    table_groups(guests, &params.exclusions)
        .iter()
        .map(|group| layout_table(group, &params.palette, &params.labels, &params.geometry))
        .collect()
}

fn seat_for(
    guest: &Guest,
    placement: crate::layout::placement::Placement,
    labels: &LabelPolicy,
) -> SeatLayout {
    let label = labels.size_label(
        &guest.name,
        guest.honorific_or(&labels.default_honorific),
    );
    SeatLayout {
        guest_id: placement.guest_id,
        x: placement.x,
        y: placement.y,
        angle_radians: placement.angle_radians,
        font_size_px: label.font_size_px,
        label_text: label.text,
        title: guest.title_text().map(str::to_string),
        seat_badge: guest.table.trim().to_string(),
        image_path: guest.image_path().map(str::to_string),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/table.rs"]
mod tests;
