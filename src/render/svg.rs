//! Vector markup emitter.
//!
//! Turns a [`TableLayout`] into a self-contained SVG document: a colored center badge, and per
//! seat a placeholder circle with the portrait clipped over it, a seat-number badge and the
//! name/title labels.
//! Portraits are embedded as `data:` URIs so the document has no external references.
//!
//! This is a pure function with no IO; portraits come from an already prepared
//! [`PortraitSource`].

use std::fmt::Write;

use crate::assets::store::PortraitSource;
use crate::layout::table::{SeatLayout, TableLayout};
use crate::render::style::{ChartStyle, id_fragment, num, xml_escape};

/// Emit `table` as an SVG document string.
pub fn emit_svg(table: &TableLayout, style: &ChartStyle, portraits: &dyn PortraitSource) -> String {
    let geometry = table.geometry();
    let canvas = geometry.canvas;
    let color = table.color.as_str();
    let table_id = id_fragment(&table.group_key);

    let mut out = String::with_capacity(4096);
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}">"#,
        w = canvas.width,
        h = canvas.height,
        font = xml_escape(&style.font_family),
    );
    let _ = writeln!(
        out,
        "  <title>{}</title>",
        xml_escape(&format!("{} {}", style.center_caption, table.group_key))
    );

    if let Some(bg) = style.background.as_deref() {
        let _ = writeln!(
            out,
            r#"  <rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            canvas.width,
            canvas.height,
            xml_escape(bg)
        );
    }

    let portrait_r = geometry.portrait_radius();
    let _ = writeln!(out, "  <defs>");
    for (i, seat) in table.guests.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"    <clipPath id="clip-{table_id}-{i}"><circle cx="{}" cy="{}" r="{}"/></clipPath>"#,
            num(seat.x),
            num(seat.y),
            num(portrait_r),
        );
    }
    let _ = writeln!(out, "  </defs>");

    write_center_badge(&mut out, table, style);

    for (i, seat) in table.guests.iter().enumerate() {
        write_seat(&mut out, &table_id, i, seat, color, portrait_r, style, portraits);
    }

    let _ = writeln!(out, "</svg>");
    out
}

fn write_center_badge(out: &mut String, table: &TableLayout, style: &ChartStyle) {
    let geometry = table.geometry();
    let c = geometry.center();
    let r = geometry.center_badge_radius();
    let text_fill = table.rgba().contrasting_text().to_hex();

    let _ = writeln!(out, r#"  <g class="table-badge">"#);
    let _ = writeln!(
        out,
        r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        num(c.x),
        num(c.y),
        num(r),
        table.color
    );
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle" letter-spacing="2">{}</text>"#,
        num(c.x),
        num(c.y - r * 0.25),
        num(r * 0.2),
        text_fill,
        xml_escape(&style.center_caption)
    );
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle" font-weight="bold">{}</text>"#,
        num(c.x),
        num(c.y + r * 0.35),
        num(r * 0.6),
        text_fill,
        xml_escape(&table.group_key)
    );
    let _ = writeln!(out, "  </g>");
}

#[allow(clippy::too_many_arguments)]
fn write_seat(
    out: &mut String,
    table_id: &str,
    index: usize,
    seat: &SeatLayout,
    color: &str,
    portrait_r: f64,
    style: &ChartStyle,
    portraits: &dyn PortraitSource,
) {
    let (x, y) = (seat.x, seat.y);
    let _ = writeln!(
        out,
        r#"  <g class="seat" data-guest-id="{}">"#,
        xml_escape(&seat.guest_id)
    );

    // Placeholder first; a portrait that a consumer cannot decode leaves it visible.
    let _ = writeln!(
        out,
        r#"    <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
        num(x),
        num(y),
        num(portrait_r),
        xml_escape(&style.placeholder_fill)
    );
    if let Some(p) = seat
        .image_path
        .as_deref()
        .and_then(|p| portraits.portrait(p))
    {
        let d = portrait_r * 2.0;
        let _ = writeln!(
            out,
            r#"    <image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="xMidYMid slice" clip-path="url(#clip-{table_id}-{index})" xlink:href="{}"/>"#,
            num(x - portrait_r),
            num(y - portrait_r),
            num(d),
            num(d),
            p.data_uri()
        );
    }
    let _ = writeln!(
        out,
        r#"    <circle cx="{}" cy="{}" r="{}" fill="none" stroke="{color}" stroke-width="{}"/>"#,
        num(x),
        num(y),
        num(portrait_r),
        num(style.portrait_stroke_px)
    );

    if !seat.seat_badge.is_empty() {
        // Upper-right of the portrait, at 45 degrees.
        let offset = portrait_r * std::f64::consts::FRAC_1_SQRT_2;
        let (bx, by) = (x + offset, y - offset);
        let br = (portrait_r * 0.32).max(8.0);
        let _ = writeln!(
            out,
            r#"    <circle cx="{}" cy="{}" r="{}" fill="{color}"/>"#,
            num(bx),
            num(by),
            num(br)
        );
        let _ = writeln!(
            out,
            r##"    <text x="{}" y="{}" font-size="{}" fill="#ffffff" text-anchor="middle" dominant-baseline="central">{}</text>"##,
            num(bx),
            num(by),
            num(br * 1.1),
            xml_escape(&seat.seat_badge)
        );
    }

    let name_y = y + portrait_r + seat.font_size_px + 4.0;
    let _ = writeln!(
        out,
        r#"    <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle">{}</text>"#,
        num(x),
        num(name_y),
        num(seat.font_size_px),
        xml_escape(&style.text_color),
        xml_escape(&seat.label_text)
    );

    if let Some(title) = seat.title.as_deref() {
        let title_size = seat.font_size_px * style.title_scale;
        let _ = writeln!(
            out,
            r#"    <text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="middle">{}</text>"#,
            num(x),
            num(name_y + title_size + 2.0),
            num(title_size),
            xml_escape(&style.title_color),
            xml_escape(title)
        );
    }

    let _ = writeln!(out, "  </g>");
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
