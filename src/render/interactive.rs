//! On-screen seat views for an interactive page.
//!
//! The page renderer owns the DOM (or canvas); this module only decides where each seat goes
//! and what it links to, reusing the engine's placement so every surface agrees on seat order.

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Point};
use crate::layout::placement::{point_on_circle, seat_angles};
use crate::layout::table::{TableGeometry, TableLayout};

/// How much of the chart is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Full-size table with per-guest controls.
    Full,
    /// Small preview: shrunk radius, labels only, no controls.
    Compact,
}

/// When and how the view collapses to [`ViewMode::Compact`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportPolicy {
    /// Viewports narrower than this use compact mode.
    pub compact_below_px: u32,
    /// Radius multiplier in compact mode.
    pub compact_scale: f64,
    /// Prefix for guest-detail deep links; the guest id is appended.
    pub guest_link_prefix: String,
}

impl Default for ViewportPolicy {
    fn default() -> Self {
        Self {
            compact_below_px: 640,
            compact_scale: 0.55,
            guest_link_prefix: "/guests/".to_string(),
        }
    }
}

impl ViewportPolicy {
    /// Mode for a viewport `width_px` wide.
    pub fn mode_for_viewport(&self, width_px: u32) -> ViewMode {
        if width_px < self.compact_below_px {
            ViewMode::Compact
        } else {
            ViewMode::Full
        }
    }

    /// Deep link to the guest-detail view.
    pub fn guest_href(&self, guest_id: &str) -> String {
        let mut href = self.guest_link_prefix.clone();
        for b in guest_id.bytes() {
            match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    href.push(b as char)
                }
                _ => href.push_str(&format!("%{b:02X}")),
            }
        }
        href
    }
}

/// Periodic full/compact toggle driven by the caller's clock.
///
/// Each call to [`ViewModeCycle::tick`] advances one tick; the mode flips every `period_ticks`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModeCycle {
    period_ticks: u32,
    elapsed: u32,
    mode: ViewMode,
}

impl ViewModeCycle {
    /// Start in `initial`, flipping every `period_ticks` (clamped to at least 1).
    pub fn new(initial: ViewMode, period_ticks: u32) -> Self {
        Self {
            period_ticks: period_ticks.max(1),
            elapsed: 0,
            mode: initial,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Advance one tick and return the mode after it.
    pub fn tick(&mut self) -> ViewMode {
        self.elapsed += 1;
        if self.elapsed >= self.period_ticks {
            self.elapsed = 0;
            self.mode = match self.mode {
                ViewMode::Full => ViewMode::Compact,
                ViewMode::Compact => ViewMode::Full,
            };
        }
        self.mode
    }
}

/// One positioned seat element.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    /// Guest id.
    pub guest_id: String,
    /// Portrait center.
    pub center: Point,
    /// Portrait diameter.
    pub diameter: f64,
    /// Label text.
    pub label: String,
    /// Label font size.
    pub font_size_px: f64,
    /// Title under the label, hidden in compact mode.
    pub title: Option<String>,
    /// Seat badge text.
    pub seat_badge: String,
    /// Portrait path, if any.
    pub image_path: Option<String>,
    /// Deep link to the guest-detail view.
    pub href: String,
    /// Whether per-guest controls are shown.
    pub show_controls: bool,
}

/// A table as positioned on screen.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    /// Group key.
    pub group_key: String,
    /// Table color.
    pub color: String,
    /// Mode this view was computed for.
    pub mode: ViewMode,
    /// Table center.
    pub center: Point,
    /// Center badge radius.
    pub badge_radius: f64,
    /// Seats in order.
    pub seats: Vec<SeatView>,
}

/// Position `table` for `mode`.
///
/// Compact mode re-runs placement on a shrunken geometry instead of scaling pixels, so seats stay
/// evenly spaced at any size. Font sizes shrink by the same factor.
pub fn view_table(table: &TableLayout, mode: ViewMode, policy: &ViewportPolicy) -> TableView {
    let base = table.geometry();
    let (geometry, scale): (TableGeometry, f64) = match mode {
        ViewMode::Full => (*base, 1.0),
        ViewMode::Compact => (base.scaled(policy.compact_scale), policy.compact_scale),
    };
    let center = geometry.center();
    let radius = geometry.ring_radius();
    let diameter = geometry.portrait_radius() * 2.0;
    let compact = mode == ViewMode::Compact;

    let seats = table
        .guests
        .iter()
        .zip(seat_angles(table.guests.len()))
        .map(|(seat, angle)| SeatView {
            guest_id: seat.guest_id.clone(),
            center: point_on_circle(center, radius, angle),
            diameter,
            label: seat.label_text.clone(),
            font_size_px: seat.font_size_px * scale,
            title: if compact { None } else { seat.title.clone() },
            seat_badge: seat.seat_badge.clone(),
            image_path: seat.image_path.clone(),
            href: policy.guest_href(&seat.guest_id),
            show_controls: !compact,
        })
        .collect();

    TableView {
        group_key: table.group_key.clone(),
        color: table.color.clone(),
        mode,
        center,
        badge_radius: geometry.center_badge_radius(),
        seats,
    }
}

/// Recompute the view after a viewport resize.
///
/// The table keeps its proportions but is re-placed on a canvas the size of the viewport, and the
/// mode follows the viewport width.
pub fn view_for_viewport(
    table: &TableLayout,
    viewport: Canvas,
    policy: &ViewportPolicy,
) -> TableView {
    let mode = policy.mode_for_viewport(viewport.width);
    let mut resized = table.clone();
    resized.geometry = TableGeometry {
        canvas: viewport,
        ..*table.geometry()
    };
    view_table(&resized, mode, policy)
}

#[cfg(test)]
#[path = "../../tests/unit/render/interactive.rs"]
mod tests;
