//! Styled-markup emitter.
//!
//! Produces HTML/CSS documents with absolutely positioned seats. A single-table document is what
//! a headless browser would screenshot; the multi-table page is the interactive chart, with deep
//! links on every seat and a compact variant behind a width media query.

use std::fmt::Write;

use crate::assets::store::PortraitSource;
use crate::layout::table::TableLayout;
use crate::render::interactive::{SeatView, TableView, ViewMode, ViewportPolicy, view_table};
use crate::render::style::{ChartStyle, num, xml_escape};

/// Switches for the HTML emitter.
#[derive(Clone, Debug, PartialEq)]
pub struct HtmlOptions {
    /// Inline portraits as `data:` URIs. When off, `<img src>` points at the guest's path and a
    /// broken image removes itself, leaving the placeholder behind.
    pub embed_portraits: bool,
    /// Wrap each seat in a link to its guest-detail view.
    pub deep_links: bool,
    /// Page title for [`emit_page`].
    pub page_title: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            embed_portraits: true,
            deep_links: false,
            page_title: "Seating Chart".to_string(),
        }
    }
}

/// Single-table document sized exactly to the table canvas with a transparent body.
pub fn emit_table_document(
    table: &TableLayout,
    style: &ChartStyle,
    portraits: &dyn PortraitSource,
    opts: &HtmlOptions,
) -> String {
    let policy = ViewportPolicy::default();
    let view = view_table(table, ViewMode::Full, &policy);
    let canvas = table.geometry().canvas;

    let mut out = String::with_capacity(4096);
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="ja">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"<meta charset="utf-8">"#);
    let _ = writeln!(out, "<title>{}</title>", xml_escape(&table.file_stem()));
    let _ = writeln!(out, "<style>");
    write_base_css(&mut out, style);
    let _ = writeln!(
        out,
        "html, body {{ margin: 0; padding: 0; width: {}px; height: {}px; background: transparent; }}",
        canvas.width, canvas.height
    );
    let _ = writeln!(out, "</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    write_table_view(
        &mut out,
        &view,
        (f64::from(canvas.width), f64::from(canvas.height)),
        (0.0, 0.0),
        "view-full",
        style,
        portraits,
        opts,
    );
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Interactive page with every table, full and compact variants.
pub fn emit_page(
    tables: &[TableLayout],
    style: &ChartStyle,
    portraits: &dyn PortraitSource,
    policy: &ViewportPolicy,
    opts: &HtmlOptions,
) -> String {
    let mut out = String::with_capacity(8192);
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, r#"<html lang="ja">"#);
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, r#"<meta charset="utf-8">"#);
    let _ = writeln!(
        out,
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
    );
    let _ = writeln!(out, "<title>{}</title>", xml_escape(&opts.page_title));
    let _ = writeln!(out, "<style>");
    write_base_css(&mut out, style);
    let _ = writeln!(
        out,
        "body {{ margin: 0; font-family: {}; }}\n.view-compact {{ display: none; }}",
        style.font_family
    );
    let _ = writeln!(
        out,
        "@media (max-width: {}px) {{ .view-full {{ display: none; }} .view-compact {{ display: block; }} }}",
        policy.compact_below_px.saturating_sub(1)
    );
    let _ = writeln!(out, "</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<main>");

    for table in tables {
        let canvas = table.geometry().canvas;
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let _ = writeln!(
            out,
            r#"<section class="table-section" id="{}">"#,
            xml_escape(&table.file_stem())
        );

        let full = view_table(table, ViewMode::Full, policy);
        write_table_view(
            &mut out,
            &full,
            (w, h),
            (0.0, 0.0),
            "view-full",
            style,
            portraits,
            opts,
        );

        // The compact container shrinks with the radius; shift seats so the table stays centered.
        let s = policy.compact_scale;
        let compact = view_table(table, ViewMode::Compact, policy);
        let shift = (
            compact.center.x - w * s / 2.0,
            compact.center.y - h * s / 2.0,
        );
        write_table_view(
            &mut out,
            &compact,
            (w * s, h * s),
            shift,
            "view-compact",
            style,
            portraits,
            opts,
        );

        let _ = writeln!(out, "</section>");
    }

    let _ = writeln!(out, "</main>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

fn write_base_css(out: &mut String, style: &ChartStyle) {
    let _ = writeln!(
        out,
        ".table {{ position: relative; font-family: {}; }}",
        style.font_family
    );
    let _ = writeln!(
        out,
        ".table-badge {{ position: absolute; border-radius: 50%; display: flex; flex-direction: column; align-items: center; justify-content: center; }}"
    );
    let _ = writeln!(
        out,
        ".seat {{ position: absolute; display: block; text-decoration: none; }}"
    );
    let _ = writeln!(
        out,
        ".portrait {{ position: absolute; inset: 0; border-radius: 50%; overflow: hidden; box-sizing: border-box; background: {}; }}",
        style.placeholder_fill
    );
    let _ = writeln!(
        out,
        ".portrait img {{ width: 100%; height: 100%; object-fit: cover; display: block; }}"
    );
    let _ = writeln!(
        out,
        ".seat-badge {{ position: absolute; right: -4%; top: -4%; min-width: 32%; aspect-ratio: 1; border-radius: 50%; color: #fff; display: flex; align-items: center; justify-content: center; font-size: 11px; }}"
    );
    let _ = writeln!(
        out,
        ".name {{ position: absolute; top: 100%; left: 50%; transform: translateX(-50%); white-space: nowrap; margin-top: 4px; color: {}; text-align: center; }}",
        style.text_color
    );
    let _ = writeln!(
        out,
        ".title {{ display: block; color: {}; }}",
        style.title_color
    );
}

#[allow(clippy::too_many_arguments)]
fn write_table_view(
    out: &mut String,
    view: &TableView,
    size: (f64, f64),
    shift: (f64, f64),
    class: &str,
    style: &ChartStyle,
    portraits: &dyn PortraitSource,
    opts: &HtmlOptions,
) {
    let _ = writeln!(
        out,
        r#"<div class="table {class}" data-group="{}" style="width: {}px; height: {}px;">"#,
        xml_escape(&view.group_key),
        num(size.0),
        num(size.1)
    );

    let r = view.badge_radius;
    let text = crate::assets::color::parse_hex(&view.color)
        .map(|c| c.contrasting_text().to_hex())
        .unwrap_or_else(|_| "#ffffff".to_string());
    let _ = writeln!(
        out,
        r#"  <div class="table-badge" style="left: {}px; top: {}px; width: {}px; height: {}px; background: {}; color: {};"><span style="font-size: {}px; letter-spacing: 2px;">{}</span><strong style="font-size: {}px;">{}</strong></div>"#,
        num(view.center.x - shift.0 - r),
        num(view.center.y - shift.1 - r),
        num(r * 2.0),
        num(r * 2.0),
        view.color,
        text,
        num(r * 0.2),
        xml_escape(&style.center_caption),
        num(r * 0.6),
        xml_escape(&view.group_key)
    );

    for seat in &view.seats {
        write_seat(out, seat, &view.color, shift, style, portraits, opts);
    }

    let _ = writeln!(out, "</div>");
}

fn write_seat(
    out: &mut String,
    seat: &SeatView,
    color: &str,
    shift: (f64, f64),
    style: &ChartStyle,
    portraits: &dyn PortraitSource,
    opts: &HtmlOptions,
) {
    let d = seat.diameter;
    let left = seat.center.x - shift.0 - d / 2.0;
    let top = seat.center.y - shift.1 - d / 2.0;
    let (tag, href) = if opts.deep_links && seat.show_controls {
        ("a", format!(r#" href="{}""#, xml_escape(&seat.href)))
    } else {
        ("div", String::new())
    };

    let _ = writeln!(
        out,
        r#"  <{tag} class="seat" data-guest-id="{}"{href} style="left: {}px; top: {}px; width: {}px; height: {}px;">"#,
        xml_escape(&seat.guest_id),
        num(left),
        num(top),
        num(d),
        num(d)
    );

    let _ = write!(
        out,
        r#"    <div class="portrait" style="border: {}px solid {color};">"#,
        num(style.portrait_stroke_px)
    );
    if let Some(path) = seat.image_path.as_deref() {
        if opts.embed_portraits {
            if let Some(p) = portraits.portrait(path) {
                let _ = write!(out, r#"<img alt="" src="{}">"#, p.data_uri());
            }
        } else {
            let _ = write!(
                out,
                r#"<img alt="" src="{}" onerror="this.remove()">"#,
                xml_escape(path)
            );
        }
    }
    let _ = writeln!(out, "</div>");

    if !seat.seat_badge.is_empty() {
        let _ = writeln!(
            out,
            r#"    <span class="seat-badge" style="background: {color};">{}</span>"#,
            xml_escape(&seat.seat_badge)
        );
    }

    let _ = write!(
        out,
        r#"    <span class="name" style="font-size: {}px;">{}"#,
        num(seat.font_size_px),
        xml_escape(&seat.label)
    );
    if let Some(title) = seat.title.as_deref() {
        let _ = write!(
            out,
            r#"<small class="title" style="font-size: {}px;">{}</small>"#,
            num(seat.font_size_px * style.title_scale),
            xml_escape(title)
        );
    }
    let _ = writeln!(out, "</span>");
    let _ = writeln!(out, "  </{tag}>");
}

#[cfg(test)]
#[path = "../../tests/unit/render/html.rs"]
mod tests;
